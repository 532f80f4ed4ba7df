use super::player::PlayerInMatch;
use crate::tactics::MatchTactics;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// Minimum lineup size accepted at the API boundary.
pub const MIN_LINEUP: usize = 11;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum TeamSide {
    Home,
    Away,
}

impl TeamSide {
    pub fn opponent(self) -> Self {
        match self {
            TeamSide::Home => TeamSide::Away,
            TeamSide::Away => TeamSide::Home,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TeamSide::Home => "home",
            TeamSide::Away => "away",
        }
    }
}

/// One side of a match: roster, tactics and chemistry. There is no bench,
/// every listed player takes part for the full match.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema, Validate)]
pub struct TeamInMatch {
    pub name: String,
    #[serde(default = "default_formation")]
    pub formation: String,
    #[validate(custom = "validate_lineup")]
    pub lineup: Vec<PlayerInMatch>,
    #[serde(default)]
    pub tactics: MatchTactics,
    #[validate(range(min = 0.0, max = 100.0))]
    pub chemistry: f64,
}

fn default_formation() -> String {
    "4-4-2".to_string()
}

fn validate_lineup(lineup: &[PlayerInMatch]) -> Result<(), ValidationError> {
    if lineup.len() < MIN_LINEUP {
        let mut err = ValidationError::new("lineup_too_short");
        err.add_param("min".into(), &MIN_LINEUP);
        err.add_param("found".into(), &lineup.len());
        return Err(err);
    }
    if lineup.iter().any(|p| p.validate().is_err()) {
        return Err(ValidationError::new("player_out_of_range"));
    }
    Ok(())
}

impl TeamInMatch {
    pub fn new(name: impl Into<String>, lineup: Vec<PlayerInMatch>) -> Self {
        Self {
            name: name.into(),
            formation: default_formation(),
            lineup,
            tactics: MatchTactics::default(),
            chemistry: 75.0,
        }
    }

    pub fn with_tactics(mut self, tactics: MatchTactics) -> Self {
        self.tactics = tactics;
        self
    }

    pub fn with_chemistry(mut self, chemistry: f64) -> Self {
        self.chemistry = chemistry;
        self
    }

    /// Mean of `f` over the lineup. Callers must not pass an empty lineup.
    pub(crate) fn lineup_mean(&self, f: impl Fn(&PlayerInMatch) -> f64) -> f64 {
        self.lineup.iter().map(f).sum::<f64>() / self.lineup.len() as f64
    }
}

/// Home/away pair of counters.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default, JsonSchema)]
pub struct SidePair<T> {
    pub home: T,
    pub away: T,
}

impl<T> SidePair<T> {
    pub fn new(home: T, away: T) -> Self {
        Self { home, away }
    }

    pub fn get(&self, side: TeamSide) -> &T {
        match side {
            TeamSide::Home => &self.home,
            TeamSide::Away => &self.away,
        }
    }

    pub fn get_mut(&mut self, side: TeamSide) -> &mut T {
        match side {
            TeamSide::Home => &mut self.home,
            TeamSide::Away => &mut self.away,
        }
    }
}

impl SidePair<u16> {
    pub fn increment(&mut self, side: TeamSide) {
        let slot = self.get_mut(side);
        *slot = slot.saturating_add(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::player::Position;

    fn squad(n: usize) -> Vec<PlayerInMatch> {
        (0..n).map(|i| PlayerInMatch::new(format!("p{i}"), format!("P{i}"), Position::Midfielder, 70.0)).collect()
    }

    #[test]
    fn test_short_lineup_rejected() {
        let team = TeamInMatch::new("Persib", squad(10));
        assert!(team.validate().is_err());
        let team = TeamInMatch::new("Persib", squad(11));
        assert!(team.validate().is_ok());
    }

    #[test]
    fn test_chemistry_range() {
        let team = TeamInMatch::new("Persib", squad(11)).with_chemistry(120.0);
        assert!(team.validate().is_err());
    }

    #[test]
    fn test_side_pair_increment() {
        let mut pair = SidePair::<u16>::default();
        pair.increment(TeamSide::Away);
        pair.increment(TeamSide::Away);
        assert_eq!(pair, SidePair::new(0, 2));
    }

    #[test]
    fn test_lineup_mean() {
        let mut players = squad(2);
        players[1].rating = 90.0;
        let team = TeamInMatch::new("Arema", players);
        assert!((team.lineup_mean(|p| p.rating) - 80.0).abs() < 1e-9);
    }
}
