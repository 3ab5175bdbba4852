mod heat;
mod palette;
mod utils;

use smart_leds::{RGB8, hsv::Hsv as HSV};

pub use heat::{HeatGradient, heat_color};
pub use palette::{MAX_PALETTE_COLORS, Palette};
pub use utils::{BLACK, blend_colors, hsv2rgb, rgb_from_u32, scale_color, wheel};

pub type Rgb = RGB8;
pub type Hsv = HSV;
