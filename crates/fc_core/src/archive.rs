//! Finished-match archive
//!
//! Layout: `lz4(msgpack(MatchArchive))` with the size prepended, followed by
//! a 32-byte SHA-256 of everything before it.

use std::path::Path;

use chrono::{DateTime, Utc};
use lz4_flex::{compress_prepend_size, decompress_size_prepended};
use rmp_serde::{from_slice, to_vec_named};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::commentary::CommentaryLine;
use crate::engine::match_state::MatchState;
use crate::error::{CoreError, Result};

pub const ARCHIVE_VERSION: u32 = 1;
const CHECKSUM_LEN: usize = 32;
/// lz4 size prefix
const HEADER_LEN: usize = 4;
/// Upper bound on the declared decompressed size.
pub const MAX_DECODED_LEN: usize = 64 * 1024 * 1024;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MatchArchive {
    pub version: u32,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub match_id: Option<String>,
    #[serde(default)]
    pub seed: Option<u64>,
    pub state: MatchState,
    pub commentary: Vec<CommentaryLine>,
}

impl MatchArchive {
    pub fn new(state: MatchState, commentary: Vec<CommentaryLine>) -> Self {
        Self {
            version: ARCHIVE_VERSION,
            created_at: Utc::now(),
            match_id: None,
            seed: None,
            state,
            commentary,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_match_id(mut self, match_id: impl Into<String>) -> Self {
        self.match_id = Some(match_id.into());
        self
    }

    pub fn encode(&self) -> Result<Vec<u8>> {
        let msgpack = to_vec_named(self).map_err(|e| CoreError::SerializationError(e.to_string()))?;
        let mut bytes = compress_prepend_size(&msgpack);
        let checksum = Sha256::digest(&bytes);
        bytes.extend_from_slice(&checksum);
        Ok(bytes)
    }

    pub fn decode(bytes: &[u8]) -> Result<Self> {
        if bytes.len() < HEADER_LEN + CHECKSUM_LEN {
            return Err(CoreError::DeserializationError(format!(
                "archive too short: {} bytes",
                bytes.len()
            )));
        }

        let (payload, stored) = bytes.split_at(bytes.len() - CHECKSUM_LEN);
        let computed = Sha256::digest(payload);
        if computed.as_slice() != stored {
            return Err(CoreError::ChecksumMismatch {
                expected: to_hex(stored),
                found: to_hex(&computed),
            });
        }

        let mut prefix = [0u8; HEADER_LEN];
        prefix.copy_from_slice(&payload[..HEADER_LEN]);
        let declared = u32::from_le_bytes(prefix) as usize;
        if declared > MAX_DECODED_LEN {
            return Err(CoreError::DeserializationError(format!(
                "archive declares {declared} bytes, limit is {MAX_DECODED_LEN}"
            )));
        }

        let msgpack = decompress_size_prepended(payload)
            .map_err(|e| CoreError::DeserializationError(format!("lz4: {e}")))?;
        let archive: MatchArchive =
            from_slice(&msgpack).map_err(|e| CoreError::DeserializationError(e.to_string()))?;

        if archive.version > ARCHIVE_VERSION {
            return Err(CoreError::DeserializationError(format!(
                "archive version {} is newer than supported {}",
                archive.version, ARCHIVE_VERSION
            )));
        }
        Ok(archive)
    }

    pub fn write_to(&self, path: &Path) -> Result<()> {
        std::fs::write(path, self.encode()?)?;
        Ok(())
    }

    pub fn read_from(path: &Path) -> Result<Self> {
        Self::decode(&std::fs::read(path)?)
    }
}

fn to_hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commentary::{CommentaryProjector, EventDraft};
    use crate::engine::MatchSimulator;
    use crate::models::{PlayerInMatch, Position, TeamInMatch, Weather};

    fn finished_archive() -> MatchArchive {
        let squad = |name: &str| {
            let lineup = (0..11)
                .map(|i| PlayerInMatch::new(format!("{name}{i}"), format!("{name} {i}"), Position::Forward, 70.0))
                .collect();
            TeamInMatch::new(name, lineup)
        };
        let mut sim = MatchSimulator::with_seed(squad("Persija"), squad("Persib"), Some(Weather::Rainy), 31);
        let state = sim.play_full_match().clone();
        let drafts: Vec<_> = state.events.iter().map(EventDraft::from_event).collect();
        let commentary = CommentaryProjector::default().project(&drafts);
        MatchArchive::new(state, commentary).with_seed(31).with_match_id("m-31")
    }

    #[test]
    fn test_archive_restores_match() {
        let archive = finished_archive();
        let restored = MatchArchive::decode(&archive.encode().unwrap()).unwrap();
        assert_eq!(restored, archive);
        assert_eq!(restored.seed, Some(31));
    }

    #[test]
    fn test_corruption_is_detected() {
        let mut bytes = finished_archive().encode().unwrap();
        let middle = bytes.len() / 2;
        bytes[middle] ^= 0xff;
        let err = MatchArchive::decode(&bytes).unwrap_err();
        assert!(matches!(err, CoreError::ChecksumMismatch { .. }), "{err}");
    }

    #[test]
    fn test_oversized_declared_length() {
        let mut payload = u32::MAX.to_le_bytes().to_vec();
        payload.extend_from_slice(&[0u8; 16]);
        let checksum = Sha256::digest(&payload);
        payload.extend_from_slice(&checksum);

        let err = MatchArchive::decode(&payload).unwrap_err();
        assert!(matches!(err, CoreError::DeserializationError(ref msg) if msg.contains("limit")), "{err}");
    }

    #[test]
    fn test_truncated_input() {
        assert!(matches!(MatchArchive::decode(&[0u8; 10]), Err(CoreError::DeserializationError(_))));
    }

    #[test]
    fn test_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("match.fca");
        let archive = finished_archive();
        archive.write_to(&path).unwrap();
        assert_eq!(MatchArchive::read_from(&path).unwrap().state.minute, 90);
    }
}
