//! Deterministic template choice.
//!
//! Picks one of several phrasing variants from `(timestamp, kind, player)`
//! without touching any RNG, so the projector stays pure and replays render
//! the same text.

// FxHasher: DefaultHasher is not stable across Rust releases.
use fxhash::FxHasher;
use std::hash::{Hash, Hasher};

use super::CommentaryKind;

/// Index in `0..options_count`. Returns 0 for zero or one option.
#[inline]
pub fn variant_index(t: i64, kind: CommentaryKind, player: Option<&str>, options_count: usize) -> usize {
    if options_count <= 1 {
        return 0;
    }

    let mut hasher = FxHasher::default();
    t.hash(&mut hasher);
    kind.hash(&mut hasher);
    player.hash(&mut hasher);
    (hasher.finish() % options_count as u64) as usize
}
