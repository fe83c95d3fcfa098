use std::hash::BuildHasher;
use xxhash_rust::xxh3::Xxh3;

/// Builds seeded xxh3 hashers.
///
/// Unlike `std::collections::hash_map::RandomState`, the seed is fixed at
/// construction, so a key hashes to the same value in every table and every run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Xxh3State {
    seed: u64,
}

impl Xxh3State {
    /// state with seed 0
    pub fn new() -> Self {
        Self::default()
    }

    /// state with the given seed
    pub fn with_seed(seed: u64) -> Self {
        Self { seed }
    }
}

impl BuildHasher for Xxh3State {
    type Hasher = Xxh3;

    fn build_hasher(&self) -> Xxh3 {
        Xxh3::with_seed(self.seed)
    }
}
