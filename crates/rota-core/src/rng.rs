//! Deterministic RNG wrapper and seed selection helpers.

use rand::rngs::{OsRng, StdRng};
use rand::{RngCore, SeedableRng};

/// Deterministic RNG handle threaded through the generator.
///
/// The handle is a thin wrapper around `StdRng` that documents the seeding
/// policy used throughout the project. Every run is driven by an explicit
/// `seed: u64`; runs configured without a seed draw one from the operating
/// system first (see [`resolve_seed`]) so the run can still be replayed.
/// Two handles built from the same seed yield identical streams on every
/// platform supported by `rand`'s `StdRng` for a given `rand` release.
#[derive(Debug, Clone)]
pub struct RngHandle {
    seed: u64,
    rng: StdRng,
}

impl RngHandle {
    /// Creates a new RNG handle from a master seed.
    pub fn from_seed(seed: u64) -> Self {
        Self {
            seed,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Returns the seed this handle was created from.
    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl RngCore for RngHandle {
    fn next_u32(&mut self) -> u32 {
        self.rng.next_u32()
    }

    fn next_u64(&mut self) -> u64 {
        self.rng.next_u64()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        self.rng.fill_bytes(dest)
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.rng.try_fill_bytes(dest)
    }
}

/// Where the seed of a run came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SeedSource {
    /// Supplied on the command line, overriding the configuration.
    Override,
    /// Taken from the configuration file.
    Config,
    /// Drawn from operating system entropy.
    Entropy,
}

/// Picks the seed for a run: explicit override first, then the configured
/// seed, then a fresh value from OS entropy.
pub fn resolve_seed(configured: Option<u64>, override_seed: Option<u64>) -> (u64, SeedSource) {
    match (override_seed, configured) {
        (Some(seed), _) => (seed, SeedSource::Override),
        (None, Some(seed)) => (seed, SeedSource::Config),
        (None, None) => (OsRng.next_u64(), SeedSource::Entropy),
    }
}
