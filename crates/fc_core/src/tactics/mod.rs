//! Team tactics for the minute-level engine.
//!
//! Four closed dimensions. Only mentality and tempo feed team strength;
//! width and pressing are carried for display and for later tuning.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum Mentality {
    UltraDefensive,
    Defensive,
    #[default]
    Balanced,
    Attacking,
    UltraAttacking,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum TeamWidth {
    Narrow,
    #[default]
    Normal,
    Wide,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum TeamTempo {
    Slow,
    #[default]
    Normal,
    Fast,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum TeamPressing {
    Low,
    #[default]
    Medium,
    High,
}

impl Mentality {
    pub fn strength_multiplier(self) -> f64 {
        match self {
            Mentality::UltraAttacking => 1.3,
            Mentality::Attacking => 1.15,
            Mentality::Balanced => 1.0,
            Mentality::Defensive => 0.9,
            Mentality::UltraDefensive => 0.8,
        }
    }

    /// Wire name, also the suffix of the localized label key.
    pub fn as_str(self) -> &'static str {
        match self {
            Mentality::UltraDefensive => "ultra-defensive",
            Mentality::Defensive => "defensive",
            Mentality::Balanced => "balanced",
            Mentality::Attacking => "attacking",
            Mentality::UltraAttacking => "ultra-attacking",
        }
    }
}

impl TeamTempo {
    pub fn strength_multiplier(self) -> f64 {
        match self {
            TeamTempo::Fast => 1.1,
            TeamTempo::Slow => 0.95,
            TeamTempo::Normal => 1.0,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default, JsonSchema)]
pub struct MatchTactics {
    #[serde(default)]
    pub mentality: Mentality,
    #[serde(default, alias = "team_width")]
    pub width: TeamWidth,
    #[serde(default, alias = "team_tempo")]
    pub tempo: TeamTempo,
    #[serde(default, alias = "pressing_intensity")]
    pub pressing: TeamPressing,
}

/// Partial tactics update. `None` keeps the current value.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default, JsonSchema)]
pub struct TacticsPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mentality: Option<Mentality>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<TeamWidth>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tempo: Option<TeamTempo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pressing: Option<TeamPressing>,
}

impl TacticsPatch {
    pub fn mentality(mentality: Mentality) -> Self {
        Self { mentality: Some(mentality), ..Default::default() }
    }

    pub fn is_empty(&self) -> bool {
        self.mentality.is_none()
            && self.width.is_none()
            && self.tempo.is_none()
            && self.pressing.is_none()
    }
}

impl MatchTactics {
    /// Mentality multiplier, then tempo multiplier.
    pub fn strength_modifier(&self) -> f64 {
        self.mentality.strength_multiplier() * self.tempo.strength_multiplier()
    }

    pub fn merge(&mut self, patch: &TacticsPatch) {
        if let Some(mentality) = patch.mentality {
            self.mentality = mentality;
        }
        if let Some(width) = patch.width {
            self.width = width;
        }
        if let Some(tempo) = patch.tempo {
            self.tempo = tempo;
        }
        if let Some(pressing) = patch.pressing {
            self.pressing = pressing;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_modifier_table() {
        let mut tactics = MatchTactics::default();
        assert!((tactics.strength_modifier() - 1.0).abs() < 1e-9);

        tactics.mentality = Mentality::UltraAttacking;
        tactics.tempo = TeamTempo::Fast;
        assert!((tactics.strength_modifier() - 1.43).abs() < 1e-9);

        tactics.mentality = Mentality::UltraDefensive;
        tactics.tempo = TeamTempo::Slow;
        assert!((tactics.strength_modifier() - 0.76).abs() < 1e-9);
    }

    #[test]
    fn test_merge_only_touches_given_fields() {
        let mut tactics = MatchTactics { pressing: TeamPressing::High, ..Default::default() };
        tactics.merge(&TacticsPatch::mentality(Mentality::Defensive));
        assert_eq!(tactics.mentality, Mentality::Defensive);
        assert_eq!(tactics.pressing, TeamPressing::High);
        assert_eq!(tactics.tempo, TeamTempo::Normal);
    }

    #[test]
    fn test_wire_names() {
        let json = serde_json::to_string(&Mentality::UltraAttacking).unwrap();
        assert_eq!(json, "\"ultra-attacking\"");
        let patch: TacticsPatch = serde_json::from_str(r#"{"tempo":"fast"}"#).unwrap();
        assert_eq!(patch.tempo, Some(TeamTempo::Fast));
        assert!(patch.mentality.is_none());
        assert!(TacticsPatch::default().is_empty());
    }
}
