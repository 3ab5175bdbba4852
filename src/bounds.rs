use crate::error::Error;

/// Inclusive pixel range covered by a segment
///
/// Always satisfies `start <= end`; the upper limit against the strip
/// length is checked by [`SegmentBounds::new`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SegmentBounds {
    start: u16,
    end: u16,
}

#[allow(clippy::len_without_is_empty)]
impl SegmentBounds {
    /// Validate a range against a strip of `strip_len` pixels
    pub const fn new(start: u16, end: u16, strip_len: u16) -> Result<Self, Error> {
        if start > end {
            return Err(Error::InvalidRange { start, end });
        }
        if end >= strip_len {
            return Err(Error::OutOfBounds {
                end,
                len: strip_len,
            });
        }
        Ok(Self { start, end })
    }

    /// Range covering the whole strip
    pub const fn whole(strip_len: u16) -> Self {
        Self {
            start: 0,
            end: strip_len.saturating_sub(1),
        }
    }

    /// First pixel index
    pub const fn start(self) -> u16 {
        self.start
    }

    /// Last pixel index (inclusive)
    pub const fn end(self) -> u16 {
        self.end
    }

    /// Number of pixels in the range, never zero
    pub const fn len(self) -> usize {
        (self.end - self.start) as usize + 1
    }

    /// Check whether an absolute index falls inside the range
    pub const fn contains(self, index: u16) -> bool {
        index >= self.start && index <= self.end
    }

    /// Split `strip_len` pixels into `parts` even ranges
    ///
    /// The last range absorbs the remainder. Returns `None` for an index
    /// past the last part or when there are more parts than pixels.
    pub const fn subdivision(strip_len: u16, parts: u8, index: u8) -> Option<Self> {
        if parts == 0 || index >= parts || parts as u16 > strip_len {
            return None;
        }
        let per = strip_len / parts as u16;
        let start = index as u16 * per;
        let end = if index == parts - 1 {
            strip_len - 1
        } else {
            start + per - 1
        };
        Some(Self { start, end })
    }
}

/// Get a slice of the pixels within the bounds
///
/// Ranges reaching past the slice are cut at its end.
pub(crate) fn bounded<T>(pixels: &mut [T], bounds: SegmentBounds) -> &mut [T] {
    let end = (bounds.end as usize + 1).min(pixels.len());
    let start = (bounds.start as usize).min(end);
    &mut pixels[start..end]
}
