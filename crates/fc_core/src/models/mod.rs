pub mod events;
pub mod official;
pub mod player;
pub mod team;
pub mod weather;

pub use events::{MatchEventData, MatchEventType, Significance, VarReviewDetails, VarReviewOutcome};
pub use official::{CrewAssignment, CrewSnapshot, OfficialModel, OfficialRole};
pub use player::{PlayerAttributes, PlayerInMatch, Position};
pub use team::{SidePair, TeamInMatch, TeamSide};
pub use weather::Weather;
