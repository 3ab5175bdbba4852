//! Heat to color mapping for the fire simulation

use super::{Rgb, blend_colors, scale_color};
use crate::math8::scale8;

/// Map a heat value to the classic black, red, yellow, white fire ramp
///
/// Heat is compressed to 0..=191 and split into three 64-wide bands; the
/// position inside a band drives the ramping channel.
pub const fn heat_color(temperature: u8) -> Rgb {
    let t192 = scale8(temperature, 191);
    let heatramp = (t192 & 0x3F) << 2;

    if t192 & 0x80 != 0 {
        Rgb {
            r: 255,
            g: 255,
            b: heatramp,
        }
    } else if t192 & 0x40 != 0 {
        Rgb {
            r: 255,
            g: heatramp,
            b: 0,
        }
    } else {
        Rgb {
            r: heatramp,
            g: 0,
            b: 0,
        }
    }
}

/// Gradient used to color a heat buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeatGradient {
    /// Black to white through red and yellow
    Classic,
    /// Monochrome ramp from black to the given color
    Single(Rgb),
    /// Straight interpolation from cool to hot color
    Dual(Rgb, Rgb),
    /// Cool, middle and hot colors, the middle one sits at heat 128
    Triple(Rgb, Rgb, Rgb),
}

impl HeatGradient {
    /// Build a gradient from a primary color and up to two optional stops
    pub const fn from_stops(primary: Rgb, secondary: Option<Rgb>, tertiary: Option<Rgb>) -> Self {
        match (secondary, tertiary) {
            (Some(mid), Some(hot)) => Self::Triple(primary, mid, hot),
            (Some(hot), None) | (None, Some(hot)) => Self::Dual(primary, hot),
            (None, None) => Self::Single(primary),
        }
    }

    /// Color for the given heat value
    pub const fn color_at(self, heat: u8) -> Rgb {
        match self {
            Self::Classic => heat_color(heat),
            Self::Single(color) => scale_color(color, heat),
            Self::Dual(cool, hot) => blend_colors(cool, hot, heat),
            Self::Triple(cool, mid, hot) => {
                if heat <= 127 {
                    blend_colors(cool, mid, heat * 2)
                } else {
                    blend_colors(mid, hot, (heat - 128) * 2)
                }
            }
        }
    }
}
