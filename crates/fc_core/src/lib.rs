//! # fc_core - Minute-level football match simulation
//!
//! Per-minute probabilistic match engine with an officiating model and
//! localized commentary.
//!
//! ## Features
//! - Deterministic for a given seed (one injected `ChaCha8Rng`)
//! - Referee / assistant / VAR attributes shape fouls, cards, offsides and reviews
//! - Fluent-based commentary in `en-US` and `id-ID`
//! - JSON API, compressed match archives and a parallel calibration runner

// Builder-style config tweaks in tests and callers
#![allow(clippy::field_reassign_with_default)]

pub mod api;
pub mod archive;
pub mod calibration;
pub mod commentary;
pub mod engine;
pub mod error;
pub mod models;
pub mod officials;
pub mod tactics;

pub use api::{match_request_schema, run_match, simulate_match_json, MatchRequest, MatchResponse};
pub use archive::MatchArchive;
pub use commentary::{CommentaryLine, CommentaryProjector, CommentarySource, EventDraft};
pub use engine::{MatchSimulator, MatchState, SimConfig, SimulatorParts, Subscription};
pub use error::{CoreError, Result};
pub use models::{CrewAssignment, MatchEventData, MatchEventType, OfficialModel, TeamInMatch, TeamSide, Weather};
pub use officials::OfficialPool;
pub use tactics::{MatchTactics, Mentality, TacticsPatch};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
