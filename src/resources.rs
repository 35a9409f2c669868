//! Shared runtime resources

use rand_chacha::{ChaCha8Rng, rand_core::SeedableRng};
use std::ops::{Deref, DerefMut};

/// Seedable random source shared by all initial-condition sampling.
///
/// All randomness in the simulation flows through this wrapper; there is no
/// module-level RNG, so seeded runs are reproducible end to end.
#[derive(Debug, Clone, PartialEq)]
pub struct SharedRng(pub ChaCha8Rng);

impl SharedRng {
    pub fn from_seed(seed: u64) -> Self {
        Self(ChaCha8Rng::seed_from_u64(seed))
    }

    pub fn from_optional_seed(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::from_seed(seed),
            None => Self::default(),
        }
    }
}

impl Default for SharedRng {
    fn default() -> Self {
        Self(ChaCha8Rng::from_rng(&mut rand::rng()))
    }
}

impl Deref for SharedRng {
    type Target = ChaCha8Rng;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for SharedRng {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}
