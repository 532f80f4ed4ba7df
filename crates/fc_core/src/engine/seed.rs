//! Match id → RNG seed.

// FxHasher rather than DefaultHasher: the mapping must survive toolchain upgrades.
use fxhash::FxHasher;
use std::hash::{Hash, Hasher};

/// Stable seed for a platform match id, so the same id always replays the
/// same match.
pub fn seed_from_match_id(match_id: &str) -> u64 {
    let mut hasher = FxHasher::default();
    match_id.hash(&mut hasher);
    hasher.finish()
}
