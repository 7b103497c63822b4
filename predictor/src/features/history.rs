use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Normal};

/// Hourly samples averaged into one synthetic 24h mean
pub const HOURS_PER_DAY: usize = 24;

/// Random source for the synthetic 24h means
///
/// Unseeded, every request draws fresh entropy and identical readings can
/// yield slightly different features. With a seed each request restarts the
/// same stream, so identical readings assemble identical vectors.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HistorySynthesizer {
    seed: Option<u64>,
}

impl HistorySynthesizer {
    pub fn new(seed: Option<u64>) -> Self {
        Self { seed }
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}

/// Mean of 24 samples of `current + N(0, std_dev)`
///
/// This is not an aggregate of real history. It stands in for the rolling
/// means the classifier was trained with until sensor history is available.
pub fn synthetic_daily_mean<R: Rng + ?Sized>(current: f64, std_dev: f64, rng: &mut R) -> f64 {
    // rand_distr accepts negative spreads, so only a positive finite one samples
    if !std_dev.is_finite() || std_dev <= 0.0 {
        return current;
    }
    let Ok(noise) = Normal::new(0.0, std_dev) else {
        return current;
    };

    let total: f64 = (0..HOURS_PER_DAY)
        .map(|_| current + noise.sample(rng))
        .sum();
    total / HOURS_PER_DAY as f64
}
