//! Match engine: strength model, officiating model, state and the minute simulator.

pub mod config;
pub mod match_state;
pub mod observers;
pub mod officiating;
pub mod seed;
pub mod simulator;
pub mod strength;

pub use config::SimConfig;
pub use match_state::{MatchPhase, MatchState};
pub use observers::Subscription;
pub use officiating::{Officiating, StandardOfficiating};
pub use seed::seed_from_match_id;
pub use simulator::{MatchSimulator, SimulatorParts};
