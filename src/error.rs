use crate::segment::SegmentId;

/// Configuration errors reported at the engine boundary
///
/// None of these are produced while effects are running; they come from
/// strip construction, segment management and palette creation, and are
/// returned before any state is changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// LED count is zero, exceeds the buffer capacity or cannot hold the
    /// requested subdivisions
    #[error("invalid LED count {0}")]
    InvalidLedCount(u16),
    /// Segment start is past its end
    #[error("segment start {start} is past its end {end}")]
    InvalidRange { start: u16, end: u16 },
    /// Segment end is outside the strip
    #[error("segment end {end} is outside a strip of {len} LEDs")]
    OutOfBounds { end: u16, len: u16 },
    /// Segment table is full
    #[error("segment table is full")]
    TooManySegments,
    /// No segment with this id exists
    #[error("unknown segment {}", .0.raw())]
    UnknownSegment(SegmentId),
    /// Segment name does not fit the name buffer
    #[error("segment name is too long")]
    NameTooLong,
    /// Palette without colors
    #[error("palette has no colors")]
    EmptyPalette,
    /// Palette with more colors than it can hold
    #[error("palette has too many colors")]
    PaletteTooLong,
}
