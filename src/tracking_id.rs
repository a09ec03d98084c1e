//! Tracking identifier generation.
//!
//! Identifiers look like `LS-X82F1S`. They are random and never checked for
//! collisions; there is no store to collide against.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub const TRACKING_PREFIX: &str = "LS-";

const SUFFIX_LEN: usize = 6;
const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Source of fresh booking identifiers.
pub trait IdGenerator: Send {
    fn generate(&mut self) -> String;
}

/// Random identifiers from a seedable RNG.
pub struct RandomIds {
    rng: StdRng,
}

impl RandomIds {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Deterministic sequence, for tests and benchmarks.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomIds {
    fn default() -> Self {
        Self::new()
    }
}

impl IdGenerator for RandomIds {
    fn generate(&mut self) -> String {
        let suffix: String = (0..SUFFIX_LEN)
            .map(|_| CHARSET[self.rng.gen_range(0..CHARSET.len())] as char)
            .collect();
        format!("{TRACKING_PREFIX}{suffix}")
    }
}

/// Whether `id` has the exact generated shape: prefix plus six uppercase
/// alphanumerics.
pub fn is_generated_id(id: &str) -> bool {
    id.strip_prefix(TRACKING_PREFIX).is_some_and(|suffix| {
        suffix.len() == SUFFIX_LEN
            && suffix
                .bytes()
                .all(|b| b.is_ascii_uppercase() || b.is_ascii_digit())
    })
}
