use heapless::Vec;

use super::Rgb;
use crate::error::Error;

/// Maximum number of colors in a palette
pub const MAX_PALETTE_COLORS: usize = 16;

/// Ordered list of colors, used by the intensity meter bars
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Palette {
    colors: Vec<Rgb, MAX_PALETTE_COLORS>,
}

impl Palette {
    /// Build a palette, rejecting empty and oversized color lists
    pub fn new(colors: &[Rgb]) -> Result<Self, Error> {
        if colors.is_empty() {
            return Err(Error::EmptyPalette);
        }
        let colors = Vec::from_slice(colors).map_err(|()| Error::PaletteTooLong)?;
        Ok(Self { colors })
    }

    /// Palette without colors, effects treat it as "nothing lit"
    pub const fn empty() -> Self {
        Self { colors: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<Rgb> {
        self.colors.get(index).copied()
    }

    pub fn as_slice(&self) -> &[Rgb] {
        &self.colors
    }
}
