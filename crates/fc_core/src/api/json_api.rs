//! JSON entry point: one request in, one finished match out.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::info;
use validator::Validate;

use crate::commentary::{CommentaryLine, CommentaryProjector, EventDraft};
use crate::engine::{seed_from_match_id, MatchSimulator, SimConfig, SimulatorParts};
use crate::error::{CoreError, Result};
use crate::models::{
    CrewSnapshot, MatchEventData, OfficialModel, SidePair, TeamInMatch, TeamSide, Weather,
};
use crate::officials::OfficialPool;
use crate::tactics::TacticsPatch;

pub const SCHEMA_VERSION: u8 = 1;

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, Validate)]
pub struct MatchRequest {
    pub schema_version: u8,
    /// Explicit RNG seed. Takes precedence over `match_id`.
    #[serde(default)]
    pub seed: Option<u64>,
    /// Platform match id; hashed into a seed when `seed` is absent.
    #[serde(default)]
    pub match_id: Option<String>,
    #[validate]
    pub home_team: TeamInMatch,
    #[validate]
    pub away_team: TeamInMatch,
    /// Drawn from the seed when absent.
    #[serde(default)]
    pub weather: Option<Weather>,
    /// Officials to pick the crew from (first active per role). Checked on
    /// insertion into the pool.
    #[serde(default)]
    pub officials: Option<Vec<OfficialModel>>,
    /// Generate a crew from the seed when `officials` is absent.
    #[serde(default)]
    pub synthetic_officials: bool,
    /// Commentary locale, negotiated against the shipped ones.
    #[serde(default)]
    pub locale: Option<String>,
    #[serde(default)]
    pub config: Option<SimConfig>,
    #[serde(default)]
    #[validate]
    pub tactics_changes: Vec<ScheduledTactics>,
}

/// Tactical change applied once the clock reaches `minute`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, Validate)]
pub struct ScheduledTactics {
    #[validate(range(max = 90))]
    pub minute: u8,
    pub side: TeamSide,
    pub patch: TacticsPatch,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MatchResponse {
    pub schema_version: u8,
    pub seed: u64,
    pub weather: Weather,
    pub score_home: u16,
    pub score_away: u16,
    pub statistics: MatchStatistics,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub officials: Option<CrewSnapshot>,
    pub events: Vec<MatchEventData>,
    pub commentary: Vec<CommentaryLine>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MatchStatistics {
    pub possession: SidePair<u8>,
    pub shots: SidePair<u16>,
    pub shots_on_target: SidePair<u16>,
    pub corners: SidePair<u16>,
    pub fouls: SidePair<u16>,
    pub yellow_cards: SidePair<u16>,
    pub red_cards: SidePair<u16>,
    pub var_overturns: u16,
}

/// JSON Schema of [`MatchRequest`].
pub fn match_request_schema() -> schemars::schema::RootSchema {
    schemars::schema_for!(MatchRequest)
}

pub fn simulate_match_json(request_json: &str) -> Result<String> {
    let request: MatchRequest = serde_json::from_str(request_json)?;
    let response = run_match(request)?;
    Ok(serde_json::to_string(&response)?)
}

/// Validates the request and plays all 90 minutes.
pub fn run_match(request: MatchRequest) -> Result<MatchResponse> {
    if request.schema_version != SCHEMA_VERSION {
        return Err(CoreError::InvalidParameter(format!(
            "Unsupported schema version: {}",
            request.schema_version
        )));
    }
    request.validate()?;

    let mut config = request.config.unwrap_or_default();
    if let Some(locale) = request.locale {
        config.locale = locale;
    }
    config.check()?;

    let seed = request
        .seed
        .or_else(|| request.match_id.as_deref().map(seed_from_match_id))
        .ok_or_else(|| CoreError::InvalidParameter("either seed or match_id is required".into()))?;

    let crew = match (request.officials, request.synthetic_officials) {
        (Some(officials), _) => {
            let mut pool = OfficialPool::new();
            for official in officials {
                pool.insert(official)?;
            }
            Some(pool.default_crew()?)
        }
        (None, true) => Some(OfficialPool::synthetic(seed).default_crew()?),
        (None, false) => None,
    };

    let projector = CommentaryProjector::new(&config.locale);
    let mut sim = MatchSimulator::from_parts(
        request.home_team,
        request.away_team,
        request.weather,
        ChaCha8Rng::seed_from_u64(seed),
        SimulatorParts::new(config),
    );
    if let Some(crew) = crew {
        sim.assign_officials(crew);
    }

    let mut pending = request.tactics_changes;
    pending.sort_by_key(|change| change.minute);
    let mut pending = pending.into_iter().peekable();

    sim.start();
    loop {
        let minute = sim.state().minute;
        while let Some(change) = pending.next_if(|c| c.minute <= minute) {
            sim.change_tactics(change.side, change.patch);
        }
        if !sim.state().is_playing {
            break;
        }
        sim.simulate_minute();
    }

    let state = sim.get_state();
    let drafts: Vec<_> = state.events.iter().map(EventDraft::from_event).collect();
    let commentary = projector.project(&drafts);
    info!(
        seed,
        score = %state.scoreline(),
        events = state.events.len(),
        lang = projector.lang(),
        "match simulated"
    );

    let var_overturns = state.events.iter().filter(|e| e.is_overturn()).count() as u16;
    Ok(MatchResponse {
        schema_version: SCHEMA_VERSION,
        seed,
        weather: state.weather,
        score_home: state.home_score,
        score_away: state.away_score,
        statistics: MatchStatistics {
            possession: state.possession,
            shots: state.shots,
            shots_on_target: state.shots_on_target,
            corners: state.corners,
            fouls: state.fouls,
            yellow_cards: state.yellow_cards,
            red_cards: state.red_cards,
            var_overturns,
        },
        officials: state.officials,
        events: state.events,
        commentary,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MatchEventType;
    use serde_json::{json, Value};

    fn squad(name: &str, size: usize) -> Value {
        let positions = ["GK", "DEF", "DEF", "DEF", "DEF", "MID", "MID", "MID", "MID", "FWD", "FWD"];
        let players: Vec<Value> = (0..size)
            .map(|i| {
                json!({
                    "id": format!("{name}-{i}"),
                    "name": format!("{name} {i}"),
                    "position": positions[i % positions.len()],
                    "rating": 72.0,
                    "attributes": {"pace": 70, "shooting": 65, "passing": 68, "dribbling": 66, "defending": 60, "physical": 70}
                })
            })
            .collect();
        json!({"name": name, "formation": "4-4-2", "lineup": players, "chemistry": 80.0})
    }

    fn request() -> Value {
        json!({
            "schema_version": 1,
            "seed": 42,
            "home_team": squad("Bali United", 11),
            "away_team": squad("Arema", 11),
            "weather": "sunny"
        })
    }

    fn simulate(value: &Value) -> Result<MatchResponse> {
        let out = simulate_match_json(&value.to_string())?;
        Ok(serde_json::from_str(&out).unwrap())
    }

    #[test]
    fn test_simulate_match_json() {
        let response = simulate(&request()).unwrap();
        assert_eq!(response.seed, 42);
        assert_eq!(response.weather, Weather::Sunny);
        assert_eq!(response.events.first().unwrap().event_type, MatchEventType::Kickoff);
        assert_eq!(response.events.last().unwrap().event_type, MatchEventType::FullTime);
        assert_eq!(response.commentary.len(), response.events.len());
        assert!(response.commentary.iter().all(|line| line.lang == "en-US"));
        assert!(response.officials.is_none());
    }

    #[test]
    fn test_deterministic_for_same_seed() {
        assert_eq!(simulate(&request()).unwrap(), simulate(&request()).unwrap());
    }

    #[test]
    fn test_match_id_seed() {
        let mut value = request();
        value.as_object_mut().unwrap().remove("seed");
        value["match_id"] = json!("tg-match-0001");
        let response = simulate(&value).unwrap();
        assert_eq!(response.seed, seed_from_match_id("tg-match-0001"));

        value.as_object_mut().unwrap().remove("match_id");
        assert!(matches!(simulate(&value), Err(CoreError::InvalidParameter(_))));
    }

    #[test]
    fn test_short_lineup_rejected() {
        let mut value = request();
        value["away_team"] = squad("Arema", 10);
        assert!(matches!(simulate(&value), Err(CoreError::ValidationError(_))));
    }

    #[test]
    fn test_out_of_range_values_rejected() {
        let mut value = request();
        value["home_team"]["chemistry"] = json!(140.0);
        assert!(matches!(simulate(&value), Err(CoreError::ValidationError(_))));

        let mut value = request();
        value["home_team"]["lineup"][3]["attributes"]["pace"] = json!(120);
        assert!(matches!(simulate(&value), Err(CoreError::ValidationError(_))));
    }

    #[test]
    fn test_schema_version_checked() {
        let mut value = request();
        value["schema_version"] = json!(2);
        assert!(matches!(simulate(&value), Err(CoreError::InvalidParameter(_))));
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(simulate_match_json("{not json"), Err(CoreError::DeserializationError(_))));
    }

    #[test]
    fn test_synthetic_officials_and_locale() {
        let mut value = request();
        value["synthetic_officials"] = json!(true);
        value["locale"] = json!("id-ID");
        let response = simulate(&value).unwrap();
        let officials = response.officials.unwrap();
        assert!(officials.referee.starts_with("ref-"));
        assert!(officials.var_official.is_some());
        assert!(response.commentary.iter().all(|line| line.lang == "id-ID"));
    }

    #[test]
    fn test_scheduled_tactics_changes() {
        let mut value = request();
        value["tactics_changes"] = json!([
            {"minute": 60, "side": "away", "patch": {"mentality": "ultra-attacking"}},
            {"minute": 0, "side": "home", "patch": {"tempo": "fast"}}
        ]);
        let response = simulate(&value).unwrap();
        let changes: Vec<_> =
            response.events.iter().filter(|e| e.event_type == MatchEventType::Substitution).collect();
        assert_eq!(changes.len(), 2);
        assert_eq!((changes[0].minute, changes[0].team), (0, TeamSide::Home));
        assert_eq!((changes[1].minute, changes[1].team), (60, TeamSide::Away));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut value = request();
        value["config"] = json!({"thresholds": {"goal": 2.0}});
        assert!(matches!(simulate(&value), Err(CoreError::InvalidParameter(_))));

        value["config"] = json!({"stamina": {"base_decay": -2.0}});
        assert!(matches!(simulate(&value), Err(CoreError::InvalidParameter(_))));

        value["config"] = json!({"clock": {"full_time_minute": 200}});
        assert!(matches!(simulate(&value), Err(CoreError::InvalidParameter(_))));
    }

    #[test]
    fn test_request_schema_accepts_sample() {
        let schema = serde_json::to_value(match_request_schema()).unwrap();
        let compiled = jsonschema::JSONSchema::compile(&schema).unwrap();
        assert!(compiled.is_valid(&request()));

        let mut missing_team = request();
        missing_team.as_object_mut().unwrap().remove("away_team");
        assert!(!compiled.is_valid(&missing_team));
    }
}
