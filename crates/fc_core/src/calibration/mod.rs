//! Batch calibration runner
//!
//! Plays many seeded matches in parallel and reports per-minute event rates,
//! used to check balance changes against expected frequencies.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::engine::{MatchSimulator, SimConfig, SimulatorParts};
use crate::models::{CrewAssignment, MatchEventType, TeamInMatch, Weather};

/// One batch: the same fixture replayed with seeds `base_seed..base_seed + matches`.
#[derive(Debug, Clone)]
pub struct CalibrationRun {
    pub home: TeamInMatch,
    pub away: TeamInMatch,
    pub matches: u32,
    pub base_seed: u64,
    pub weather: Option<Weather>,
    pub config: SimConfig,
    pub crew: Option<CrewAssignment>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventTotals {
    pub goals: u64,
    pub shots: u64,
    pub corners: u64,
    pub fouls: u64,
    pub yellow_cards: u64,
    pub offsides: u64,
    pub var_reviews: u64,
    pub var_overturns: u64,
    /// Sum of final home possession, for the mean.
    pub home_possession: u64,
    pub minutes: u64,
}

impl EventTotals {
    fn merge(self, other: Self) -> Self {
        Self {
            goals: self.goals + other.goals,
            shots: self.shots + other.shots,
            corners: self.corners + other.corners,
            fouls: self.fouls + other.fouls,
            yellow_cards: self.yellow_cards + other.yellow_cards,
            offsides: self.offsides + other.offsides,
            var_reviews: self.var_reviews + other.var_reviews,
            var_overturns: self.var_overturns + other.var_overturns,
            home_possession: self.home_possession + other.home_possession,
            minutes: self.minutes + other.minutes,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventRates {
    pub goal: f64,
    pub shot: f64,
    pub corner: f64,
    pub foul: f64,
    pub yellow_card: f64,
    pub offside: f64,
    pub var_overturn: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalibrationReport {
    pub matches: u32,
    pub totals: EventTotals,
    pub per_minute: EventRates,
    pub goals_per_match: f64,
    pub mean_home_possession: f64,
}

impl CalibrationRun {
    pub fn new(home: TeamInMatch, away: TeamInMatch, matches: u32) -> Self {
        Self {
            home,
            away,
            matches,
            base_seed: 0,
            weather: None,
            config: SimConfig::default(),
            crew: None,
        }
    }

    pub fn with_crew(mut self, crew: CrewAssignment) -> Self {
        self.crew = Some(crew);
        self
    }

    pub fn with_base_seed(mut self, seed: u64) -> Self {
        self.base_seed = seed;
        self
    }

    pub fn run(&self) -> CalibrationReport {
        let totals = (0..self.matches)
            .into_par_iter()
            .map(|i| self.play_one(self.base_seed.wrapping_add(u64::from(i))))
            .reduce(EventTotals::default, EventTotals::merge);

        let report = CalibrationReport::from_totals(self.matches, totals);
        info!(
            matches = self.matches,
            goals_per_match = report.goals_per_match,
            foul_rate = report.per_minute.foul,
            "calibration batch finished"
        );
        report
    }

    fn play_one(&self, seed: u64) -> EventTotals {
        let mut sim = MatchSimulator::from_parts(
            self.home.clone(),
            self.away.clone(),
            self.weather,
            ChaCha8Rng::seed_from_u64(seed),
            SimulatorParts::headless(self.config.clone()),
        );
        if let Some(crew) = &self.crew {
            sim.assign_officials(crew.clone());
        }
        let state = sim.play_full_match();
        let count = |t: MatchEventType| state.events_of(t).count() as u64;

        EventTotals {
            goals: count(MatchEventType::Goal),
            shots: u64::from(state.shots.home + state.shots.away),
            corners: u64::from(state.corners.home + state.corners.away),
            fouls: u64::from(state.fouls.home + state.fouls.away),
            yellow_cards: u64::from(state.yellow_cards.home + state.yellow_cards.away),
            offsides: count(MatchEventType::Offside),
            var_reviews: count(MatchEventType::VarDecision),
            var_overturns: state.events.iter().filter(|e| e.is_overturn()).count() as u64,
            home_possession: u64::from(state.possession.home),
            minutes: u64::from(state.minute),
        }
    }
}

impl CalibrationReport {
    fn from_totals(matches: u32, totals: EventTotals) -> Self {
        let per_minute = |n: u64| if totals.minutes == 0 { 0.0 } else { n as f64 / totals.minutes as f64 };
        let per_match = |n: u64| if matches == 0 { 0.0 } else { n as f64 / f64::from(matches) };
        Self {
            matches,
            totals,
            per_minute: EventRates {
                goal: per_minute(totals.goals),
                shot: per_minute(totals.shots),
                corner: per_minute(totals.corners),
                foul: per_minute(totals.fouls),
                yellow_card: per_minute(totals.yellow_cards),
                offside: per_minute(totals.offsides),
                var_overturn: per_minute(totals.var_overturns),
            },
            goals_per_match: per_match(totals.goals),
            mean_home_possession: per_match(totals.home_possession),
        }
    }
}
