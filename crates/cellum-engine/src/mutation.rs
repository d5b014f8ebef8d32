//! Random perturbation of live-neighbour counts.
//!
//! With probability `p` per extra draw, a count is pushed one further
//! away from its true value, in a direction chosen by a fair coin. The
//! result is clamped to `[0, neighbourhood size]` before the rule is
//! consulted.

use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::config::ConfigError;

/// Seeded source of neighbour-count noise.
#[derive(Clone, Debug)]
pub struct Mutation {
    probability: f64,
    seed: u64,
    rng: ChaCha8Rng,
}

impl Mutation {
    /// Noise with extension probability `probability`, which must lie in
    /// `[0, 1)`.
    pub fn new(probability: f64, seed: u64) -> Result<Self, ConfigError> {
        if !(0.0..1.0).contains(&probability) {
            return Err(ConfigError::InvalidMutation { probability });
        }
        Ok(Self {
            probability,
            seed,
            rng: ChaCha8Rng::seed_from_u64(seed),
        })
    }

    /// Chance of each further step.
    pub fn probability(&self) -> f64 {
        self.probability
    }

    /// Seed the noise was started from.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// `count` moved by a random amount, clamped to `[0, max]`.
    pub fn perturb(&mut self, count: usize, max: usize) -> usize {
        let mut delta = 0usize;
        while self.rng.gen::<f64>() < self.probability {
            delta += 1;
        }
        let perturbed = if self.rng.gen_bool(0.5) {
            count.saturating_sub(delta)
        } else {
            count.saturating_add(delta)
        };
        perturbed.min(max)
    }
}

impl PartialEq for Mutation {
    fn eq(&self, other: &Self) -> bool {
        self.probability == other.probability && self.seed == other.seed
    }
}
