use rand::Rng;

use super::naming::design_name;
use crate::core::protocol::ProtocolSettings;
use crate::core::settings::{LengthRange, RunSettings};

/// Seeds are drawn uniformly from this half-open range; it is wide enough
/// that two distinct attempts almost never collide on `(length, seed)`.
pub const SEED_SPACE: u64 = 1_000_000;

/// One loop iteration's input. Ephemeral: only its outcome is persisted,
/// under the derived name.
#[derive(Debug, Clone, PartialEq)]
pub struct Attempt {
    pub name: String,
    pub length: u32,
    pub seed: u64,
    pub helicity: f64,
}

/// Draws randomized attempt parameters for the acceptance loop.
#[derive(Debug, Clone)]
pub struct AttemptSampler {
    prefix: String,
    lengths: LengthRange,
    random_helicity: bool,
    helicity_weight: f64,
}

impl AttemptSampler {
    pub fn new(settings: &RunSettings, protocol: &ProtocolSettings) -> Self {
        Self {
            prefix: settings.binder_name.clone(),
            lengths: settings.lengths,
            random_helicity: protocol.random_helicity,
            helicity_weight: protocol.weights_helicity,
        }
    }

    pub fn sample(&self, rng: &mut impl Rng) -> Attempt {
        let seed = rng.gen_range(0..SEED_SPACE);
        let length = rng.gen_range(self.lengths.min()..=self.lengths.max());
        let helicity = if self.random_helicity {
            rng.gen_range(-1.0..=0.0)
        } else {
            self.helicity_weight
        };
        Attempt {
            name: design_name(&self.prefix, length, seed),
            length,
            seed,
            helicity,
        }
    }
}
