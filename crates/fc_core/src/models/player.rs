use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use validator::Validate;

pub const FULL_STAMINA: f64 = 100.0;

/// Coarse positional group. Only used to pick goal scorers and shooters,
/// players are not placed on a pitch.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, JsonSchema)]
pub enum Position {
    #[serde(rename = "GK")]
    Goalkeeper,
    #[serde(rename = "DEF")]
    Defender,
    #[serde(rename = "MID")]
    Midfielder,
    #[serde(rename = "FWD")]
    Forward,
}

impl Position {
    /// Forwards and midfielders are eligible to score or shoot.
    pub fn is_attacking(self) -> bool {
        matches!(self, Position::Forward | Position::Midfielder)
    }

    pub fn code(self) -> &'static str {
        match self {
            Position::Goalkeeper => "GK",
            Position::Defender => "DEF",
            Position::Midfielder => "MID",
            Position::Forward => "FWD",
        }
    }
}

/// Six-attribute vector, each 0..=100.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, JsonSchema, Validate)]
pub struct PlayerAttributes {
    #[validate(range(max = 100))]
    pub pace: u8,
    #[validate(range(max = 100))]
    pub shooting: u8,
    #[validate(range(max = 100))]
    pub passing: u8,
    #[validate(range(max = 100))]
    pub dribbling: u8,
    #[validate(range(max = 100))]
    pub defending: u8,
    #[validate(range(max = 100))]
    pub physical: u8,
}

impl Default for PlayerAttributes {
    fn default() -> Self {
        Self { pace: 50, shooting: 50, passing: 50, dribbling: 50, defending: 50, physical: 50 }
    }
}

/// A player as seen by the match engine. `stamina` is the only field the
/// simulator mutates.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema, Validate)]
pub struct PlayerInMatch {
    pub id: String,
    pub name: String,
    pub position: Position,
    #[validate(range(min = 0.0, max = 100.0))]
    pub rating: f64,
    #[serde(default = "full_stamina")]
    #[validate(range(min = 0.0, max = 100.0))]
    pub stamina: f64,
    #[serde(default = "default_morale")]
    #[validate(range(min = 0.0, max = 100.0))]
    pub morale: f64,
    #[serde(default)]
    #[validate]
    pub attributes: PlayerAttributes,
}

fn full_stamina() -> f64 {
    FULL_STAMINA
}

fn default_morale() -> f64 {
    75.0
}

impl PlayerInMatch {
    pub fn new(id: impl Into<String>, name: impl Into<String>, position: Position, rating: f64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            position,
            rating,
            stamina: FULL_STAMINA,
            morale: default_morale(),
            attributes: PlayerAttributes::default(),
        }
    }

    pub fn with_attributes(mut self, attributes: PlayerAttributes) -> Self {
        self.attributes = attributes;
        self
    }

    /// Drains stamina, never below zero.
    pub fn drain_stamina(&mut self, amount: f64) {
        self.stamina = (self.stamina - amount).max(0.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_wire_codes() {
        let json = serde_json::to_string(&Position::Forward).unwrap();
        assert_eq!(json, "\"FWD\"");
        let parsed: Position = serde_json::from_str("\"GK\"").unwrap();
        assert_eq!(parsed, Position::Goalkeeper);
    }

    #[test]
    fn test_drain_floors_at_zero() {
        let mut player = PlayerInMatch::new("p1", "Budi", Position::Defender, 70.0);
        player.drain_stamina(30.0);
        assert!((player.stamina - 70.0).abs() < 1e-9);
        player.drain_stamina(500.0);
        assert_eq!(player.stamina, 0.0);
    }

    #[test]
    fn test_defaults_fill_missing_fields() {
        let player: PlayerInMatch = serde_json::from_str(
            r#"{"id":"p9","name":"Rian","position":"MID","rating":72}"#,
        )
        .unwrap();
        assert_eq!(player.stamina, FULL_STAMINA);
        assert_eq!(player.attributes, PlayerAttributes::default());
    }

    #[test]
    fn test_attribute_range_validation() {
        let mut player = PlayerInMatch::new("p1", "Budi", Position::Forward, 80.0);
        assert!(player.validate().is_ok());
        player.attributes.pace = 140;
        assert!(player.validate().is_err());
    }
}
