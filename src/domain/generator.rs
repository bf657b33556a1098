// Synthetic reading generator - bounded random walk with drift and spikes
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Normal};

use crate::domain::channel::ChannelProfile;
use crate::domain::helmet::HelmetStatus;

/// Produces the next synthetic value for a channel from its previous one.
///
/// Each tick adds Gaussian jitter, a slow drift term scaled by the channel's
/// nominal base value, and (rarely) a larger spike, then clamps the result to
/// the channel's physical range. The clamp keeps the random walk from
/// diverging no matter how many ticks accumulate.
pub struct ReadingGenerator {
    rng: StdRng,
}

impl ReadingGenerator {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Seeded constructor for reproducible runs. A fixed seed yields a
    /// byte-identical value sequence across runs.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn next_value(
        &mut self,
        profile: &ChannelProfile,
        previous: Option<f64>,
        status: HelmetStatus,
    ) -> f64 {
        if status == HelmetStatus::Offline {
            return 0.0;
        }

        let previous = previous.unwrap_or(profile.base_value);

        let noise = self.sample_normal(profile.noise_sigma);
        // Drift sigma scales with the nominal base, not the current value,
        // so drift pressure stays constant over the life of the walk.
        let drift = self.sample_normal(profile.drift_rate * profile.base_value);
        let spike = if self.rng.gen_range(0.0..1.0) < profile.spike_chance {
            self.sample_normal(profile.spike_magnitude)
        } else {
            0.0
        };

        let candidate = previous + noise + drift + spike;
        profile.quantize(candidate)
    }

    fn sample_normal(&mut self, sigma: f64) -> f64 {
        if sigma <= 0.0 {
            return 0.0;
        }
        // Sigma is validated non-negative at config load.
        Normal::new(0.0, sigma)
            .map(|dist| dist.sample(&mut self.rng))
            .unwrap_or(0.0)
    }
}

impl Default for ReadingGenerator {
    fn default() -> Self {
        Self::new()
    }
}
