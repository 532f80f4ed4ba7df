use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::team::TeamSide;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, JsonSchema)]
#[cfg_attr(test, derive(strum_macros::EnumIter))]
#[serde(rename_all = "snake_case")]
pub enum MatchEventType {
    Kickoff,
    Goal,
    Shot,
    Save,
    Corner,
    Freekick,
    Penalty,
    YellowCard,
    RedCard,
    /// Also used for in-match tactical changes, there is no separate kind.
    Substitution,
    Injury,
    Offside,
    Foul,
    VarDecision,
    HalfTime,
    FullTime,
}

impl MatchEventType {
    /// Events produced by the per-minute draw (markers and VAR excluded).
    pub fn is_gameplay(self) -> bool {
        matches!(
            self,
            MatchEventType::Goal
                | MatchEventType::Shot
                | MatchEventType::Save
                | MatchEventType::Corner
                | MatchEventType::Foul
                | MatchEventType::YellowCard
                | MatchEventType::Offside
        )
    }
}

/// Display priority. Never read by the engine.
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum Significance {
    Low,
    Medium,
    High,
    Critical,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum VarReviewOutcome {
    Upheld,
    Overturned,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
pub struct VarReviewDetails {
    pub reviewed_event_type: MatchEventType,
    pub outcome: VarReviewOutcome,
}

/// One entry of the append-only match log.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
pub struct MatchEventData {
    #[serde(rename = "type")]
    pub event_type: MatchEventType,
    pub minute: u8,
    pub team: TeamSide,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub player: Option<String>,
    pub description: String,
    pub commentary: String,
    pub significance: Significance,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub var_review: Option<VarReviewDetails>,
}

impl MatchEventData {
    pub fn new(
        event_type: MatchEventType,
        minute: u8,
        team: TeamSide,
        significance: Significance,
    ) -> Self {
        Self {
            event_type,
            minute,
            team,
            player: None,
            description: String::new(),
            commentary: String::new(),
            significance,
            var_review: None,
        }
    }

    pub fn with_player(mut self, player: impl Into<String>) -> Self {
        self.player = Some(player.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_commentary(mut self, commentary: impl Into<String>) -> Self {
        self.commentary = commentary.into();
        self
    }

    pub fn with_var_review(mut self, details: VarReviewDetails) -> Self {
        self.var_review = Some(details);
        self
    }

    pub fn is_overturn(&self) -> bool {
        matches!(
            self.var_review,
            Some(VarReviewDetails { outcome: VarReviewOutcome::Overturned, .. })
        )
    }
}
