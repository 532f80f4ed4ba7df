//! Mutable record of one match. Only the simulator writes to it; everyone
//! else gets a clone or a shared borrow.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::models::{
    CrewSnapshot, MatchEventData, MatchEventType, SidePair, TeamInMatch, TeamSide, Weather,
};

/// Coarse lifecycle derived from the clock and the playing flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchPhase {
    NotStarted,
    Playing,
    Finished,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
pub struct MatchState {
    pub minute: u8,
    pub home_score: u16,
    pub away_score: u16,
    pub home_team: TeamInMatch,
    pub away_team: TeamInMatch,
    pub possession: SidePair<u8>,
    pub shots: SidePair<u16>,
    pub shots_on_target: SidePair<u16>,
    pub corners: SidePair<u16>,
    pub fouls: SidePair<u16>,
    pub yellow_cards: SidePair<u16>,
    /// Tracked for display; the foul model never issues red cards.
    pub red_cards: SidePair<u16>,
    pub weather: Weather,
    pub is_playing: bool,
    pub events: Vec<MatchEventData>,
    pub officials: Option<CrewSnapshot>,
}

impl MatchState {
    pub fn new(home_team: TeamInMatch, away_team: TeamInMatch, weather: Weather) -> Self {
        Self {
            minute: 0,
            home_score: 0,
            away_score: 0,
            home_team,
            away_team,
            possession: SidePair::new(50, 50),
            shots: SidePair::default(),
            shots_on_target: SidePair::default(),
            corners: SidePair::default(),
            fouls: SidePair::default(),
            yellow_cards: SidePair::default(),
            red_cards: SidePair::default(),
            weather,
            is_playing: false,
            events: Vec::new(),
            officials: None,
        }
    }

    pub fn phase(&self, full_time_minute: u8) -> MatchPhase {
        if self.is_playing {
            MatchPhase::Playing
        } else if self.minute >= full_time_minute {
            MatchPhase::Finished
        } else {
            MatchPhase::NotStarted
        }
    }

    pub fn team(&self, side: TeamSide) -> &TeamInMatch {
        match side {
            TeamSide::Home => &self.home_team,
            TeamSide::Away => &self.away_team,
        }
    }

    pub fn team_mut(&mut self, side: TeamSide) -> &mut TeamInMatch {
        match side {
            TeamSide::Home => &mut self.home_team,
            TeamSide::Away => &mut self.away_team,
        }
    }

    pub fn score(&self, side: TeamSide) -> u16 {
        match side {
            TeamSide::Home => self.home_score,
            TeamSide::Away => self.away_score,
        }
    }

    pub(crate) fn add_goal(&mut self, side: TeamSide) {
        match side {
            TeamSide::Home => self.home_score = self.home_score.saturating_add(1),
            TeamSide::Away => self.away_score = self.away_score.saturating_add(1),
        }
    }

    /// VAR overturn: exactly one goal back, floored at zero.
    pub(crate) fn remove_goal(&mut self, side: TeamSide) {
        match side {
            TeamSide::Home => self.home_score = self.home_score.saturating_sub(1),
            TeamSide::Away => self.away_score = self.away_score.saturating_sub(1),
        }
    }

    pub fn events_of(&self, event_type: MatchEventType) -> impl Iterator<Item = &MatchEventData> {
        self.events.iter().filter(move |e| e.event_type == event_type)
    }

    /// All VAR decisions in log order.
    pub fn var_log(&self) -> Vec<&MatchEventData> {
        self.events_of(MatchEventType::VarDecision).collect()
    }

    /// Compact scoreline, e.g. `"2-1"`.
    pub fn scoreline(&self) -> String {
        format!("{}-{}", self.home_score, self.away_score)
    }
}
