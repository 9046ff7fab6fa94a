//! Seed derivation
//!
//! All randomness is derived from the world's master seed. Independent
//! streams (the world build, one per fixture, one per day) are keyed by a tag plus integers
//! so that parallel work never shares a generator.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

pub const WORLD_STREAM: u64 = 0x574f_524c_44;
pub const MATCH_STREAM: u64 = 0x4d41_5443_48;
pub const DAY_STREAM: u64 = 0x4441_59;
pub const SEASON_STREAM: u64 = 0x5345_4153_4f4e;

fn splitmix64(mut z: u64) -> u64 {
    z = z.wrapping_add(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

/// Mix the master seed with a stream tag and key parts into a new seed.
pub fn derive_seed(master: u64, stream: u64, parts: &[u64]) -> u64 {
    let seed = splitmix64(master ^ splitmix64(stream));
    parts
        .iter()
        .fold(seed, |acc, part| splitmix64(acc ^ part.wrapping_mul(0x100_0000_01B3)))
}

pub fn stream(master: u64, stream: u64, parts: &[u64]) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(derive_seed(master, stream, parts))
}
