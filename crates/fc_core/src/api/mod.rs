pub mod json_api;

pub use json_api::{
    match_request_schema, run_match, simulate_match_json, MatchRequest, MatchResponse,
    MatchStatistics, ScheduledTactics,
};
