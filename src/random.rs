//! Small deterministic PRNG for stochastic effects.

/// Xorshift32 generator
///
/// Every effect instance owns its own generator seeded from its segment,
/// so two starts with the same parameters replay the same frames.
#[derive(Debug, Clone)]
pub struct Xorshift32 {
    state: u32,
}

impl Xorshift32 {
    /// Create a generator, a zero seed is replaced since it would stick at zero
    pub const fn new(seed: u32) -> Self {
        Self {
            state: if seed == 0 { 0x2545_F491 } else { seed },
        }
    }

    /// Next raw 32-bit value
    pub fn next_u32(&mut self) -> u32 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.state = x;
        x
    }

    /// Uniform byte
    #[allow(clippy::cast_possible_truncation)]
    pub fn next_u8(&mut self) -> u8 {
        (self.next_u32() >> 24) as u8
    }

    /// Value in `[low, high)`, returns `low` when the range is empty
    pub fn range(&mut self, low: u32, high: u32) -> u32 {
        if high <= low {
            return low;
        }
        low + self.next_u32() % (high - low)
    }

    /// Byte in `[low, high)`
    #[allow(clippy::cast_possible_truncation)]
    pub fn range8(&mut self, low: u8, high: u8) -> u8 {
        self.range(u32::from(low), u32::from(high)) as u8
    }

    /// Returns true with probability `percent / 100`
    pub fn chance(&mut self, percent: u8) -> bool {
        self.range(0, 100) < u32::from(percent)
    }
}
