use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

/// Source of uniform draws for the series generator.
///
/// The generator never reaches for ambient randomness itself; callers decide
/// whether a run is reproducible (seeded) or fresh (OS entropy), and tests
/// inject fixed sequences.
pub trait RandomSource {
    /// Next uniform draw in `[0, 1)`.
    fn next_uniform(&mut self) -> f64;
}

// Closures double as sources, which keeps test stubs to one line.
impl<F> RandomSource for F
where
    F: FnMut() -> f64,
{
    fn next_uniform(&mut self) -> f64 {
        self()
    }
}

/// Production source: ChaCha20 seeded from OS entropy at construction, so
/// every page load gets a different set of curves.
pub struct EntropySource {
    rng: ChaCha20Rng,
}

impl EntropySource {
    pub fn new() -> Self {
        Self {
            rng: ChaCha20Rng::from_os_rng(),
        }
    }
}

impl Default for EntropySource {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomSource for EntropySource {
    fn next_uniform(&mut self) -> f64 {
        self.rng.random()
    }
}

/// Reproducible source for pinned runs (API `seed` parameter, tests).
pub struct SeededSource {
    rng: ChaCha20Rng,
}

impl SeededSource {
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: ChaCha20Rng::seed_from_u64(seed),
        }
    }
}

impl RandomSource for SeededSource {
    fn next_uniform(&mut self) -> f64 {
        self.rng.random()
    }
}
