pub use smart_leds::hsv::hsv2rgb;

use crate::{
    color::{Hsv, Rgb},
    math8::{blend8, scale8},
};

/// All channels off
pub const BLACK: Rgb = Rgb { r: 0, g: 0, b: 0 };

/// Per-channel [`blend8`] of two colors, 0 gives `a`, 255 gives `b`
#[inline]
pub const fn blend_colors(a: Rgb, b: Rgb, amount_of_b: u8) -> Rgb {
    Rgb {
        r: blend8(a.r, b.r, amount_of_b),
        g: blend8(a.g, b.g, amount_of_b),
        b: blend8(a.b, b.b, amount_of_b),
    }
}

/// Scale every channel of a color by `scale` (0-255 = 0.0-1.0)
#[inline]
pub const fn scale_color(color: Rgb, scale: u8) -> Rgb {
    Rgb {
        r: scale8(color.r, scale),
        g: scale8(color.g, scale),
        b: scale8(color.b, scale),
    }
}

/// Create an RGB color from a u32 value (0xRRGGBB format)
#[allow(clippy::cast_possible_truncation)]
pub const fn rgb_from_u32(color: u32) -> Rgb {
    Rgb {
        r: ((color >> 16) & 0xFF) as u8,
        g: ((color >> 8) & 0xFF) as u8,
        b: (color & 0xFF) as u8,
    }
}

/// Sample the color wheel at `position` out of `count` evenly spaced stops
///
/// Position 0 is red; `count` positions cover exactly one traversal.
/// A zero `count` is treated as a single stop.
#[allow(clippy::cast_possible_truncation)]
pub fn wheel(position: usize, count: usize) -> Rgb {
    let count = count.max(1);
    let hue = ((position % count) * 256 / count) as u8;
    hsv2rgb(Hsv {
        hue,
        sat: 255,
        val: 255,
    })
}
