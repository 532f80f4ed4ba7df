//! Minute-by-minute match simulator.
//!
//! The simulator owns the [`MatchState`] and advances it one minute per
//! [`MatchSimulator::simulate_minute`] call. It never drives its own clock:
//! a caller loop decides the cadence (real time, batch, tests).
//!
//! Per tick:
//! 1. stamina drain for all players
//! 2. possession split from team strength
//! 3. one uniform draw picks at most one of goal / shot / corner / foul
//! 4. officiating modifiers shape fouls, cards, offsides and VAR reviews
//! 5. half-time / full-time markers
//! 6. state observers are notified once
//!
//! Every random number comes from the injected generator, so a fixed seed
//! replays the same match.

use std::sync::Arc;

use rand::seq::SliceRandom;
use rand::{Rng, RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, trace, warn};

use super::config::SimConfig;
use super::match_state::{MatchPhase, MatchState};
use super::observers::{ObserverList, Subscription};
use super::officiating::{Officiating, StandardOfficiating};
use super::strength::{home_share, possession_split, strength};
use crate::commentary::{CommentaryProjector, CommentarySource, SilentCommentary};
use crate::models::{
    CrewAssignment, MatchEventData, MatchEventType, OfficialModel, Significance, TeamInMatch,
    TeamSide, VarReviewDetails, VarReviewOutcome, Weather,
};
use crate::tactics::TacticsPatch;

/// Pluggable pieces of a simulator. `SimulatorParts::new(config)` gives the
/// production officiating model and localized commentary for `config.locale`.
pub struct SimulatorParts {
    pub config: SimConfig,
    pub officiating: Box<dyn Officiating>,
    pub commentary: Box<dyn CommentarySource>,
}

impl Default for SimulatorParts {
    fn default() -> Self {
        Self::new(SimConfig::default())
    }
}

impl SimulatorParts {
    pub fn new(config: SimConfig) -> Self {
        let officiating = Box::new(StandardOfficiating::new(config.officiating.clone()));
        let commentary = Box::new(CommentaryProjector::new(&config.locale));
        Self { config, officiating, commentary }
    }

    /// Production officiating with empty commentary, for batch runs.
    pub fn headless(config: SimConfig) -> Self {
        let officiating = Box::new(StandardOfficiating::new(config.officiating.clone()));
        Self { config, officiating, commentary: Box::new(SilentCommentary) }
    }

    pub fn with_officiating(mut self, officiating: impl Officiating + 'static) -> Self {
        self.officiating = Box::new(officiating);
        self
    }

    pub fn with_commentary(mut self, commentary: impl CommentarySource + 'static) -> Self {
        self.commentary = Box::new(commentary);
        self
    }
}

pub struct MatchSimulator<R: RngCore = ChaCha8Rng> {
    state: MatchState,
    config: SimConfig,
    rng: R,
    officiating: Box<dyn Officiating>,
    commentary: Box<dyn CommentarySource>,
    crew: Option<CrewAssignment>,
    state_observers: ObserverList<MatchState>,
    event_observers: ObserverList<MatchEventData>,
    next_subscription: u64,
}

impl MatchSimulator<ChaCha8Rng> {
    /// Simulator with an entropy-seeded generator. Weather is drawn when not given.
    pub fn new(home: TeamInMatch, away: TeamInMatch, weather: Option<Weather>) -> Self {
        Self::with_seed(home, away, weather, rand::random())
    }

    pub fn with_seed(home: TeamInMatch, away: TeamInMatch, weather: Option<Weather>, seed: u64) -> Self {
        Self::from_parts(home, away, weather, ChaCha8Rng::seed_from_u64(seed), SimulatorParts::default())
    }
}

impl<R: RngCore> MatchSimulator<R> {
    pub fn from_parts(
        home: TeamInMatch,
        away: TeamInMatch,
        weather: Option<Weather>,
        mut rng: R,
        parts: SimulatorParts,
    ) -> Self {
        let weather = weather.unwrap_or_else(|| Weather::generate(&mut rng));
        let SimulatorParts { config, officiating, commentary } = parts;
        Self {
            state: MatchState::new(home, away, weather),
            config,
            rng,
            officiating,
            commentary,
            crew: None,
            state_observers: ObserverList::default(),
            event_observers: ObserverList::default(),
            next_subscription: 0,
        }
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// Owned snapshot; later ticks do not affect it.
    pub fn get_state(&self) -> MatchState {
        self.state.clone()
    }

    pub fn state(&self) -> &MatchState {
        &self.state
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn phase(&self) -> MatchPhase {
        self.state.phase(self.config.clock.full_time_minute)
    }

    pub fn is_finished(&self) -> bool {
        self.phase() == MatchPhase::Finished
    }

    // ========================================================================
    // Subscriptions
    // ========================================================================

    /// Called once after every state-changing command.
    pub fn on_state_change(&mut self, callback: impl FnMut(&MatchState) + 'static) -> Subscription {
        let id = self.next_id();
        self.state_observers.push(id, Box::new(callback));
        id
    }

    /// Called for every appended event, in log order.
    pub fn on_event(&mut self, callback: impl FnMut(&MatchEventData) + 'static) -> Subscription {
        let id = self.next_id();
        self.event_observers.push(id, Box::new(callback));
        id
    }

    /// Returns false when the handle was already removed.
    pub fn unsubscribe(&mut self, subscription: Subscription) -> bool {
        self.state_observers.remove(subscription) || self.event_observers.remove(subscription)
    }

    fn next_id(&mut self) -> Subscription {
        self.next_subscription += 1;
        Subscription(self.next_subscription)
    }

    // ========================================================================
    // Commands
    // ========================================================================

    /// Kicks off. Only the first call from the not-started state has an effect.
    pub fn start(&mut self) {
        let kicked_off = self.state.events_of(MatchEventType::Kickoff).next().is_some();
        if self.state.is_playing || self.state.minute > 0 || kicked_off {
            warn!(minute = self.state.minute, "start ignored: match already started");
            return;
        }

        self.state.is_playing = true;
        debug!(
            home = %self.state.home_team.name,
            away = %self.state.away_team.name,
            weather = self.state.weather.as_str(),
            "kickoff"
        );
        self.emit(
            MatchEventData::new(MatchEventType::Kickoff, 0, TeamSide::Home, Significance::Medium)
                .with_description("Match kicks off!"),
        );
        self.notify_state();
    }

    /// Advances one minute. No-op before kickoff and after full time.
    pub fn simulate_minute(&mut self) {
        let clock = self.config.clock.clone();
        if !self.state.is_playing || self.state.minute >= clock.full_time_minute {
            return;
        }

        self.state.minute += 1;
        let minute = self.state.minute;

        self.update_stamina();
        let home_chance = self.update_possession();
        self.process_random_event(home_chance);

        if minute == clock.half_time_minute {
            debug!(score = %self.state.scoreline(), "half-time");
            let commentary = self.commentary.half_time_line(&self.state);
            self.emit(
                MatchEventData::new(MatchEventType::HalfTime, minute, TeamSide::Home, Significance::High)
                    .with_description("Half-time")
                    .with_commentary(commentary),
            );
        }

        if minute == clock.full_time_minute {
            self.state.is_playing = false;
            debug!(score = %self.state.scoreline(), events = self.state.events.len(), "full-time");
            let commentary = self.commentary.full_time_line(&self.state);
            self.emit(
                MatchEventData::new(MatchEventType::FullTime, minute, TeamSide::Home, Significance::Critical)
                    .with_description("Full-time")
                    .with_commentary(commentary),
            );
        }

        trace!(
            minute,
            possession_home = self.state.possession.home,
            score = %self.state.scoreline(),
            "tick"
        );
        self.notify_state();
    }

    /// Merges `patch` into the side's tactics and logs a `substitution` event
    /// at the current minute. Allowed in any phase. The commentary names the
    /// mentality carried by the patch, balanced when it carries none.
    pub fn change_tactics(&mut self, side: TeamSide, patch: TacticsPatch) {
        let tactics = &mut self.state.team_mut(side).tactics;
        tactics.merge(&patch);
        debug!(side = side.as_str(), mentality = tactics.mentality.as_str(), "tactics changed");

        let announced = patch.mentality.unwrap_or_default();
        let minute = self.state.minute;
        let commentary = self.commentary.tactical_change_line(side, announced);
        self.emit(
            MatchEventData::new(MatchEventType::Substitution, minute, side, Significance::Medium)
                .with_description(format!("Tactical change by {} team", side.as_str()))
                .with_commentary(commentary),
        );
        self.notify_state();
    }

    /// Attaches a crew. Only the ids are copied into the state.
    pub fn assign_officials(&mut self, crew: CrewAssignment) {
        let snapshot = crew.snapshot();
        debug!(referee = %snapshot.referee, var = snapshot.var_official.is_some(), "officials assigned");
        self.state.officials = Some(snapshot);
        self.crew = Some(crew);
    }

    /// Kicks off if needed and runs to full time.
    pub fn play_full_match(&mut self) -> &MatchState {
        self.start();
        while self.state.is_playing {
            self.simulate_minute();
        }
        &self.state
    }

    // ========================================================================
    // Tick phases
    // ========================================================================

    fn update_stamina(&mut self) {
        let drain = self.config.stamina.drain_for_minute(self.state.minute, self.state.weather);
        let players = self.state.home_team.lineup.iter_mut().chain(self.state.away_team.lineup.iter_mut());
        for player in players {
            player.drain_stamina(drain);
        }
    }

    /// Recomputes possession and returns the home share of strength.
    fn update_possession(&mut self) -> f64 {
        let minute = self.state.minute;
        let home = strength(&self.state.home_team, self.state.weather, minute);
        let away = strength(&self.state.away_team, self.state.weather, minute);
        let clock = &self.config.clock;
        let (home_pct, away_pct) = possession_split(home, away, clock.possession_min, clock.possession_max);
        self.state.possession.home = home_pct;
        self.state.possession.away = away_pct;
        home_share(home, away)
    }

    fn process_random_event(&mut self, home_chance: f64) {
        let t = &self.config.thresholds;
        let referee = self.crew.as_ref().map(|c| c.referee.as_ref());
        let foul_band = self.officiating.foul_probability(referee).clamp(0.0, t.foul_cap);

        let goal_edge = t.goal;
        let shot_edge = goal_edge + t.shot;
        let corner_edge = shot_edge + t.corner;
        let foul_edge = corner_edge + foul_band;

        let r = self.draw();
        if r < goal_edge {
            let side = self.weighted_side(home_chance);
            self.process_goal(side);
        } else if r < shot_edge {
            let side = self.weighted_side(home_chance);
            self.process_shot(side);
        } else if r < corner_edge {
            let side = self.weighted_side(home_chance);
            self.process_corner(side);
        } else if r < foul_edge {
            let side = self.weighted_side(0.5);
            self.process_foul(side);
        }
    }

    fn process_goal(&mut self, side: TeamSide) {
        self.state.add_goal(side);
        let scorer = self.pick_attacker(side);
        self.state.shots.increment(side);
        self.state.shots_on_target.increment(side);

        let description = match &scorer {
            Some(name) => format!("GOAL! {name} scores for {}!", side.as_str()),
            None => format!("GOAL for {}!", side.as_str()),
        };
        let event = MatchEventData::new(MatchEventType::Goal, self.state.minute, side, Significance::Critical)
            .with_description(description);
        self.emit(with_optional_player(event, scorer));
        self.review_goal(side);
    }

    /// VAR sub-protocol for the goal just scored by `side`.
    fn review_goal(&mut self, side: TeamSide) {
        let var_official = self.crew.as_ref().and_then(|c| c.var_official.as_deref());
        let chance = self.officiating.var_review_chance(var_official);
        if chance <= 0.0 || self.draw() >= chance {
            return;
        }

        let overturn = self.draw() < self.config.thresholds.var_overturn_chance;
        let (outcome, significance, description) = if overturn {
            self.state.remove_goal(side);
            debug!(side = side.as_str(), score = %self.state.scoreline(), "VAR overturned goal");
            (VarReviewOutcome::Overturned, Significance::High, "VAR: Goal disallowed.")
        } else {
            (VarReviewOutcome::Upheld, Significance::Medium, "VAR: Goal stands.")
        };

        self.emit(
            MatchEventData::new(MatchEventType::VarDecision, self.state.minute, side, significance)
                .with_description(description)
                .with_var_review(VarReviewDetails { reviewed_event_type: MatchEventType::Goal, outcome }),
        );
    }

    fn process_shot(&mut self, side: TeamSide) {
        let assistant = self.pick_assistant();
        let noise = self.officiating.offside_noise(assistant.as_deref());
        if self.draw() < noise {
            self.emit(
                MatchEventData::new(MatchEventType::Offside, self.state.minute, side, Significance::Low)
                    .with_description("Flag up for offside."),
            );
            return;
        }

        self.state.shots.increment(side);
        let shooter = self.pick_attacker(side);
        let actor = shooter.clone().unwrap_or_else(|| side.as_str().to_string());
        let on_target = self.draw() < self.config.thresholds.on_target_chance;

        let minute = self.state.minute;
        let event = if on_target {
            self.state.shots_on_target.increment(side);
            MatchEventData::new(MatchEventType::Save, minute, side, Significance::Medium)
                .with_description(format!("{actor} forces a save!"))
        } else {
            MatchEventData::new(MatchEventType::Shot, minute, side, Significance::Low)
                .with_description(format!("{actor} takes a shot"))
        };
        self.emit(with_optional_player(event, shooter));
    }

    fn process_corner(&mut self, side: TeamSide) {
        self.state.corners.increment(side);
        self.emit(
            MatchEventData::new(MatchEventType::Corner, self.state.minute, side, Significance::Low)
                .with_description(format!("Corner for {}", side.as_str())),
        );
    }

    fn process_foul(&mut self, side: TeamSide) {
        self.state.fouls.increment(side);
        let offender = self.pick_any(side);
        let actor = offender.clone().unwrap_or_else(|| side.as_str().to_string());

        let referee = self.crew.as_ref().map(|c| c.referee.as_ref());
        let severity = self.officiating.card_severity_factor(referee);
        let t = &self.config.thresholds;
        let yellow_chance = (t.yellow_base * severity).min(t.yellow_cap);

        let minute = self.state.minute;
        let event = if self.draw() < yellow_chance {
            self.state.yellow_cards.increment(side);
            MatchEventData::new(MatchEventType::YellowCard, minute, side, Significance::Medium)
                .with_description(format!("Yellow card for {actor}"))
        } else {
            MatchEventData::new(MatchEventType::Foul, minute, side, Significance::Low)
                .with_description(format!("Foul by {actor}"))
        };
        self.emit(with_optional_player(event, offender));
    }

    // ========================================================================
    // Draw helpers
    // ========================================================================

    fn draw(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }

    fn weighted_side(&mut self, home_chance: f64) -> TeamSide {
        if self.draw() < home_chance {
            TeamSide::Home
        } else {
            TeamSide::Away
        }
    }

    /// Uniform among forwards and midfielders, any player if there are none.
    fn pick_attacker(&mut self, side: TeamSide) -> Option<String> {
        let lineup = &self.state.team(side).lineup;
        let attackers: Vec<_> = lineup.iter().filter(|p| p.position.is_attacking()).collect();
        let pool: Vec<_> = if attackers.is_empty() { lineup.iter().collect() } else { attackers };
        pool.choose(&mut self.rng).map(|p| p.name.clone())
    }

    fn pick_any(&mut self, side: TeamSide) -> Option<String> {
        self.state.team(side).lineup.choose(&mut self.rng).map(|p| p.name.clone())
    }

    /// One of the two assistants, coin-flipped. No draw without a crew.
    fn pick_assistant(&mut self) -> Option<Arc<OfficialModel>> {
        let (left, right) = self
            .crew
            .as_ref()
            .map(|c| (Arc::clone(&c.assistant_left), Arc::clone(&c.assistant_right)))?;
        Some(if self.draw() < 0.5 { left } else { right })
    }

    // ========================================================================
    // Event log & notification
    // ========================================================================

    /// Appends an event, filling in commentary when the caller left it empty,
    /// then notifies event observers.
    fn emit(&mut self, mut event: MatchEventData) {
        if event.commentary.is_empty() {
            event.commentary =
                self.commentary.event_line(event.event_type, event.team, event.player.as_deref(), event.minute);
        }
        self.state.events.push(event);
        if let Some(appended) = self.state.events.last() {
            self.event_observers.notify(appended);
        }
    }

    fn notify_state(&mut self) {
        self.state_observers.notify(&self.state);
    }
}

fn with_optional_player(event: MatchEventData, player: Option<String>) -> MatchEventData {
    match player {
        Some(name) => event.with_player(name),
        None => event,
    }
}
