//! Officiating model.
//!
//! Maps official attributes onto the four scalars the simulator consumes.
//! Every function is deterministic in its inputs; the simulator owns all
//! random draws. A missing official yields the configured baseline.

use crate::engine::config::OfficiatingBaseline;
use crate::models::official::{unit, OfficialModel};

/// Seam between the simulator and whatever decides how officials behave.
pub trait Officiating {
    /// Additive contribution to the foul band. The simulator clamps it to the cap.
    fn foul_probability(&self, referee: Option<&OfficialModel>) -> f64;
    /// Multiplier on the yellow-card-on-foul probability.
    fn card_severity_factor(&self, referee: Option<&OfficialModel>) -> f64;
    /// Chance that a shot is flagged offside.
    fn offside_noise(&self, assistant: Option<&OfficialModel>) -> f64;
    /// Chance that a goal goes to review.
    fn var_review_chance(&self, var_official: Option<&OfficialModel>) -> f64;
}

/// Attribute-driven officiating used in production.
#[derive(Debug, Clone, Default)]
pub struct StandardOfficiating {
    pub baseline: OfficiatingBaseline,
}

impl StandardOfficiating {
    pub fn new(baseline: OfficiatingBaseline) -> Self {
        Self { baseline }
    }
}

/// Free-function form of [`Officiating::foul_probability`] over a present referee.
///
/// 0.02 at strictness 0 up to 0.18 at strictness 100, minus up to 0.02 for
/// referees who like to play advantage. Always within `[0, 0.2]`.
pub fn foul_probability(referee: &OfficialModel) -> f64 {
    let strict = unit(referee.strictness);
    let advantage = unit(referee.advantage_tendency);
    (0.02 + strict * 0.16 - advantage * 0.02).clamp(0.0, 0.2)
}

/// 0.5 (lenient) to 2.0 (strict). Inconsistent referees drift toward 1.0.
pub fn card_severity_factor(referee: &OfficialModel) -> f64 {
    let strict_factor = 0.5 + unit(referee.strictness) * 1.5;
    let consistency = unit(referee.consistency);
    1.0 + (strict_factor - 1.0) * (0.5 + 0.5 * consistency)
}

/// 0.01 for a tolerant, consistent, fit assistant, up to 0.08 for the opposite.
pub fn offside_noise(assistant: &OfficialModel) -> f64 {
    let intolerance = 1.0 - unit(assistant.offside_tolerance);
    let inconsistency = 1.0 - unit(assistant.consistency);
    let fatigue = 1.0 - unit(assistant.fitness);
    0.01 + intolerance * 0.03 + inconsistency * 0.03 + fatigue * 0.01
}

/// 0.05 to 0.40, driven by VAR propensity.
pub fn var_review_chance(var_official: &OfficialModel) -> f64 {
    0.05 + unit(var_official.var_propensity) * 0.35
}

impl Officiating for StandardOfficiating {
    fn foul_probability(&self, referee: Option<&OfficialModel>) -> f64 {
        referee.map_or(self.baseline.foul_probability, foul_probability)
    }

    fn card_severity_factor(&self, referee: Option<&OfficialModel>) -> f64 {
        referee.map_or(self.baseline.card_severity, card_severity_factor)
    }

    fn offside_noise(&self, assistant: Option<&OfficialModel>) -> f64 {
        assistant.map_or(self.baseline.offside_noise, offside_noise)
    }

    fn var_review_chance(&self, var_official: Option<&OfficialModel>) -> f64 {
        var_official.map_or(self.baseline.var_review_chance, var_review_chance)
    }
}
