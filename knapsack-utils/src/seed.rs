use rand::{rngs::StdRng, Rng, SeedableRng};

/// Expands a short seed into the 32 bytes instance generation takes.
pub fn seed_from_u64(seed: u64) -> [u8; 32] {
    StdRng::seed_from_u64(seed).gen()
}

pub fn random_seed() -> u64 {
    rand::thread_rng().gen()
}
