use std::cmp::Ordering;

use super::trig;

/// Sine-based seeded generator.
///
/// Each draw returns `frac(sin(seed) * 10000)` and then bumps the seed by
/// one. Reproducible for any integer seed and statistically weak: fine for
/// picking the day's content, never for anything that must be unpredictable.
///
/// Sine comes from [`trig::sin`], not `f64::sin`, so every draw is bit-for-bit
/// the value a browser computes with `Math.sin` on any host platform.
#[derive(Debug, Clone)]
pub struct SineRng {
    next_seed: i64,
}

impl SineRng {
    pub fn new(seed: i64) -> Self {
        Self { next_seed: seed }
    }

    /// Next value in `[0, 1)`.
    pub fn next_f64(&mut self) -> f64 {
        let x = trig::sin(self.next_seed as f64) * 10_000.0;
        self.next_seed = self.next_seed.wrapping_add(1);

        let value = x - x.floor();
        debug_assert!((0.0..1.0).contains(&value), "draw {value} out of range [0.0, 1.0)");
        value
    }

    /// One draw mapped to an ordering: `draw - 0.5` compared against zero.
    pub fn draw_ordering(&mut self) -> Ordering {
        (self.next_f64() - 0.5)
            .partial_cmp(&0.0)
            .unwrap_or(Ordering::Equal)
    }
}

impl Iterator for SineRng {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        Some(self.next_f64())
    }
}
