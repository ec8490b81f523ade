/// Seeded xorshift32 generator.
///
/// Owned by the solver and threaded into every stochastic call site
/// (impact wobble, particle respawn) so identical seeds replay identically.
#[derive(Clone, Debug)]
pub struct Rng {
    state: u32,
}

/// xorshift32 has a fixed point at 0
const ZERO_SEED_FALLBACK: u32 = 0x9E37_79B9;

impl Rng {
    pub fn new(seed: u32) -> Self {
        Self {
            state: if seed == 0 { ZERO_SEED_FALLBACK } else { seed },
        }
    }

    pub fn reseed(&mut self, seed: u32) {
        *self = Self::new(seed);
    }

    #[inline]
    pub fn next_u32(&mut self) -> u32 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.state = x;
        x
    }

    /// Uniform in [0, 1)
    #[inline]
    pub fn next_f32(&mut self) -> f32 {
        // Top 24 bits fit an f32 mantissa exactly
        (self.next_u32() >> 8) as f32 * (1.0 / 16_777_216.0)
    }

    /// Uniform in [min, max)
    #[inline]
    pub fn range(&mut self, min: f32, max: f32) -> f32 {
        self.next_f32() * (max - min) + min
    }
}

impl Default for Rng {
    fn default() -> Self {
        Self::new(12345)
    }
}
