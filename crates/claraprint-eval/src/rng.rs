//! Deterministic RNG using PCG32 with BLAKE3 seed derivation.
//!
//! Every random draw of an evaluation (source selection, query picking) flows
//! through generators created here, so a report is reproducible from its
//! configuration.

use rand::SeedableRng;
use rand_pcg::Pcg32;

/// Creates a PCG32 RNG from a 32-bit seed.
///
/// The seed is duplicated into both halves of the 64-bit PCG32 state.
pub fn create_rng(seed: u32) -> Pcg32 {
    let seed64 = (seed as u64) | ((seed as u64) << 32);
    Pcg32::seed_from_u64(seed64)
}

fn hash_to_seed(input: &[u8]) -> u32 {
    let hash = blake3::hash(input);
    let bytes = hash.as_bytes();
    u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]])
}

/// Derives the seed of one run from the base seed and the run key.
pub fn derive_run_seed(base_seed: u32, key: &str) -> u32 {
    let mut input = Vec::with_capacity(4 + key.len());
    input.extend_from_slice(&base_seed.to_le_bytes());
    input.extend_from_slice(key.as_bytes());
    hash_to_seed(&input)
}

/// Derives the seed of one round from its run seed.
pub fn derive_round_seed(run_seed: u32, round: u32) -> u32 {
    let mut input = Vec::with_capacity(8);
    input.extend_from_slice(&run_seed.to_le_bytes());
    input.extend_from_slice(&round.to_le_bytes());
    hash_to_seed(&input)
}

/// Creates the RNG for one round.
pub fn create_round_rng(run_seed: u32, round: u32) -> Pcg32 {
    create_rng(derive_round_seed(run_seed, round))
}
