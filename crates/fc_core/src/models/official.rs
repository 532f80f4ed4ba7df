use std::sync::Arc;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum OfficialRole {
    Referee,
    AssistantLeft,
    AssistantRight,
    Var,
}

impl OfficialRole {
    /// Listing order: referee, assistants, VAR.
    pub fn sort_rank(self) -> u8 {
        match self {
            OfficialRole::Referee => 0,
            OfficialRole::AssistantLeft => 1,
            OfficialRole::AssistantRight => 2,
            OfficialRole::Var => 3,
        }
    }

    /// Prefix used for generated official ids.
    pub fn id_prefix(self) -> &'static str {
        match self {
            OfficialRole::Referee => "ref",
            OfficialRole::AssistantLeft => "al",
            OfficialRole::AssistantRight => "ar",
            OfficialRole::Var => "var",
        }
    }
}

/// Attribute record of a match official. Attributes are 0..=100 and do not
/// change while a match is running.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema, Validate)]
pub struct OfficialModel {
    pub official_id: String,
    pub role: OfficialRole,
    #[validate(range(max = 100))]
    pub strictness: u8,
    #[validate(range(max = 100))]
    pub advantage_tendency: u8,
    #[validate(range(max = 100))]
    pub offside_tolerance: u8,
    #[validate(range(max = 100))]
    pub var_propensity: u8,
    #[validate(range(max = 100))]
    pub consistency: u8,
    #[validate(range(max = 100))]
    pub fitness: u8,
    #[validate(range(max = 100))]
    pub reputation: u8,
    #[serde(default)]
    pub ai_seed: i64,
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

/// Maps a 0..=100 attribute onto `[0, 1]`, clamping out-of-range input.
#[inline]
pub(crate) fn unit(value: u8) -> f64 {
    f64::from(value.min(100)) / 100.0
}

impl OfficialModel {
    /// Official with every attribute at 50.
    pub fn neutral(official_id: impl Into<String>, role: OfficialRole) -> Self {
        Self {
            official_id: official_id.into(),
            role,
            strictness: 50,
            advantage_tendency: 50,
            offside_tolerance: 50,
            var_propensity: 50,
            consistency: 50,
            fitness: 50,
            reputation: 50,
            ai_seed: 0,
            active: true,
        }
    }

    pub fn with_strictness(mut self, strictness: u8) -> Self {
        self.strictness = strictness;
        self
    }
}

/// The crew for one match. Officials are shared with the pool that owns them.
#[derive(Debug, Clone)]
pub struct CrewAssignment {
    pub referee: Arc<OfficialModel>,
    pub assistant_left: Arc<OfficialModel>,
    pub assistant_right: Arc<OfficialModel>,
    pub var_official: Option<Arc<OfficialModel>>,
}

impl CrewAssignment {
    pub fn snapshot(&self) -> CrewSnapshot {
        CrewSnapshot {
            referee: self.referee.official_id.clone(),
            assistant_left: self.assistant_left.official_id.clone(),
            assistant_right: self.assistant_right.official_id.clone(),
            var_official: self.var_official.as_ref().map(|v| v.official_id.clone()),
        }
    }
}

/// Crew ids only, kept in the match state for display.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, JsonSchema)]
pub struct CrewSnapshot {
    pub referee: String,
    pub assistant_left: String,
    pub assistant_right: String,
    pub var_official: Option<String>,
}
