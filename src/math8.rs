//! 8-bit fixed-point helpers in the spirit of `FastLED`'s lib8tion.

/// Scale an 8-bit value by a factor (0-255 = 0.0-1.0)
///
/// `scale8(v, 255) == v`, so full scale is lossless.
#[inline]
#[allow(clippy::cast_lossless, clippy::cast_possible_truncation)]
pub const fn scale8(value: u8, scale: u8) -> u8 {
    ((value as u16 * (1 + scale as u16)) >> 8) as u8
}

/// Saturating add, clamps at 255
#[inline]
pub const fn qadd8(a: u8, b: u8) -> u8 {
    a.saturating_add(b)
}

/// Saturating subtract, clamps at 0
#[inline]
pub const fn qsub8(a: u8, b: u8) -> u8 {
    a.saturating_sub(b)
}

/// Weighted mix of two 8-bit values, rounded to nearest
///
/// `amount_of_b` = 0 gives `a`, 255 gives `b`.
#[inline]
#[allow(clippy::cast_possible_truncation)]
pub const fn blend8(a: u8, b: u8, amount_of_b: u8) -> u8 {
    let amount = amount_of_b as u32;
    let mixed = a as u32 * (255 - amount) + b as u32 * amount;
    ((mixed + 127) / 255) as u8
}

/// Linearly map `value` from `[in_min, in_max]` onto `[out_min, out_max]`
///
/// The input is clamped to its range first, so the result always lies
/// between `out_min` and `out_max`. A degenerate input range yields
/// `out_max`.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub const fn map8(value: u8, in_min: u8, in_max: u8, out_min: u8, out_max: u8) -> u8 {
    if in_max <= in_min {
        return out_max;
    }
    let value = if value < in_min {
        in_min
    } else if value > in_max {
        in_max
    } else {
        value
    };
    let span_in = (in_max - in_min) as i32;
    let span_out = out_max as i32 - out_min as i32;
    (out_min as i32 + (value - in_min) as i32 * span_out / span_in) as u8
}

/// Same as [`map8`] for wider outputs (durations in milliseconds)
pub const fn map_u8_to_u64(value: u8, in_min: u8, in_max: u8, out_min: u64, out_max: u64) -> u64 {
    if in_max <= in_min || out_max <= out_min {
        return out_max;
    }
    let value = if value < in_min {
        in_min
    } else if value > in_max {
        in_max
    } else {
        value
    };
    out_min + (value - in_min) as u64 * (out_max - out_min) / (in_max - in_min) as u64
}
