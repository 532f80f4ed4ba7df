//! # Simulation configuration
//!
//! All tuning constants of the minute engine live here so balance changes do
//! not touch the state machine. `SimConfig::default()` reproduces the
//! production numbers.
//!
//! ```rust
//! use fc_core::engine::config::SimConfig;
//!
//! let cfg = SimConfig::default();
//! assert_eq!(cfg.clock.full_time_minute, 90);
//! ```

use std::path::Path;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};
use crate::models::Weather;

/// Regulation length; the clock never runs past it.
pub const MAX_FULL_TIME_MINUTE: u8 = 90;

/// Cumulative event-draw widths. Each value is the width of its band, the
/// foul band comes from the officiating model.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[serde(default)]
pub struct EventThresholds {
    /// Width of the goal band (default: 0.04)
    pub goal: f64,
    /// Width of the shot band (default: 0.11)
    pub shot: f64,
    /// Width of the corner band (default: 0.10)
    pub corner: f64,
    /// Upper clamp on the referee foul contribution (default: 0.20)
    pub foul_cap: f64,
    /// Share of non-offside shots that hit the target (default: 0.4)
    pub on_target_chance: f64,
    /// Chance a VAR review overturns the goal (default: 0.25)
    pub var_overturn_chance: f64,
    /// Yellow probability per unit of card severity (default: 0.2)
    pub yellow_base: f64,
    /// Ceiling on yellow-card probability (default: 0.5)
    pub yellow_cap: f64,
}

impl Default for EventThresholds {
    fn default() -> Self {
        Self {
            goal: 0.04,
            shot: 0.11,
            corner: 0.10,
            foul_cap: 0.20,
            on_target_chance: 0.4,
            var_overturn_chance: 0.25,
            yellow_base: 0.2,
            yellow_cap: 0.5,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[serde(default)]
pub struct StaminaSettings {
    /// Stamina lost per minute (default: 1.0)
    pub base_decay: f64,
    /// Extra decay once past `late_minute` (default: 0.5)
    pub late_decay_bonus: f64,
    /// Minute after which the late bonus applies (default: 60)
    pub late_minute: u8,
    pub snowy_factor: f64,
    pub rainy_factor: f64,
    pub sunny_factor: f64,
}

impl Default for StaminaSettings {
    fn default() -> Self {
        Self {
            base_decay: 1.0,
            late_decay_bonus: 0.5,
            late_minute: 60,
            snowy_factor: 1.2,
            rainy_factor: 1.1,
            sunny_factor: 1.05,
        }
    }
}

impl StaminaSettings {
    pub fn weather_factor(&self, weather: Weather) -> f64 {
        match weather {
            Weather::Snowy => self.snowy_factor,
            Weather::Rainy => self.rainy_factor,
            Weather::Sunny => self.sunny_factor,
            Weather::Cloudy | Weather::Windy => 1.0,
        }
    }

    /// Stamina drained during `minute` (1-based).
    pub fn drain_for_minute(&self, minute: u8, weather: Weather) -> f64 {
        let late = if minute > self.late_minute { self.late_decay_bonus } else { 0.0 };
        (self.base_decay + late) * self.weather_factor(weather)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[serde(default)]
pub struct ClockSettings {
    pub half_time_minute: u8,
    pub full_time_minute: u8,
    /// Possession clamp, the other side gets `100 - value`.
    pub possession_min: u8,
    pub possession_max: u8,
}

impl Default for ClockSettings {
    fn default() -> Self {
        Self { half_time_minute: 45, full_time_minute: 90, possession_min: 20, possession_max: 80 }
    }
}

/// Values used when no crew (or no VAR) is assigned.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[serde(default)]
pub struct OfficiatingBaseline {
    pub foul_probability: f64,
    pub card_severity: f64,
    pub offside_noise: f64,
    /// 0.0 means goals are never reviewed without a VAR official.
    pub var_review_chance: f64,
}

impl Default for OfficiatingBaseline {
    fn default() -> Self {
        Self { foul_probability: 0.06, card_severity: 1.0, offside_noise: 0.02, var_review_chance: 0.0 }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[serde(default)]
pub struct SimConfig {
    pub thresholds: EventThresholds,
    pub stamina: StaminaSettings,
    pub clock: ClockSettings,
    pub officiating: OfficiatingBaseline,
    /// Locale used for event commentary (default: "en-US")
    pub locale: String,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            thresholds: EventThresholds::default(),
            stamina: StaminaSettings::default(),
            clock: ClockSettings::default(),
            officiating: OfficiatingBaseline::default(),
            locale: "en-US".to_string(),
        }
    }
}

impl SimConfig {
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let cfg: SimConfig = serde_yaml::from_str(content)?;
        cfg.check()?;
        Ok(cfg)
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        let cfg: SimConfig = serde_json::from_str(content)?;
        cfg.check()?;
        Ok(cfg)
    }

    /// Loads a config file, choosing the format by extension (`.json` or YAML).
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Self::from_json_str(&content),
            _ => Self::from_yaml_str(&content),
        }
    }

    /// Rejects configurations whose bands cannot form a probability table.
    pub fn check(&self) -> Result<()> {
        let t = &self.thresholds;
        let probabilities = [
            ("thresholds.goal", t.goal),
            ("thresholds.shot", t.shot),
            ("thresholds.corner", t.corner),
            ("thresholds.foul_cap", t.foul_cap),
            ("thresholds.on_target_chance", t.on_target_chance),
            ("thresholds.var_overturn_chance", t.var_overturn_chance),
            ("thresholds.yellow_cap", t.yellow_cap),
        ];
        for (name, value) in probabilities {
            if !(0.0..=1.0).contains(&value) {
                return Err(CoreError::InvalidParameter(format!("{name} must be in [0, 1], got {value}")));
            }
        }
        if t.goal + t.shot + t.corner + t.foul_cap > 1.0 {
            return Err(CoreError::InvalidParameter("event bands exceed 1.0".into()));
        }

        let o = &self.officiating;
        let baselines = [
            ("officiating.foul_probability", o.foul_probability),
            ("officiating.offside_noise", o.offside_noise),
            ("officiating.var_review_chance", o.var_review_chance),
        ];
        for (name, value) in baselines {
            if !(0.0..=1.0).contains(&value) {
                return Err(CoreError::InvalidParameter(format!("{name} must be in [0, 1], got {value}")));
            }
        }

        let s = &self.stamina;
        let non_negative = [
            ("thresholds.yellow_base", t.yellow_base),
            ("officiating.card_severity", o.card_severity),
            ("stamina.base_decay", s.base_decay),
            ("stamina.late_decay_bonus", s.late_decay_bonus),
            ("stamina.snowy_factor", s.snowy_factor),
            ("stamina.rainy_factor", s.rainy_factor),
            ("stamina.sunny_factor", s.sunny_factor),
        ];
        for (name, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(CoreError::InvalidParameter(format!(
                    "{name} must be finite and non-negative, got {value}"
                )));
            }
        }

        let c = &self.clock;
        if c.full_time_minute > MAX_FULL_TIME_MINUTE {
            return Err(CoreError::InvalidParameter(format!(
                "full_time_minute must be at most {MAX_FULL_TIME_MINUTE}, got {}",
                c.full_time_minute
            )));
        }
        if c.half_time_minute == 0 || c.half_time_minute >= c.full_time_minute {
            return Err(CoreError::InvalidParameter("half_time_minute must be in 1..full_time_minute".into()));
        }
        if c.possession_min > c.possession_max || u16::from(c.possession_min) + u16::from(c.possession_max) != 100 {
            return Err(CoreError::InvalidParameter("possession bounds must mirror around 50".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let cfg = SimConfig::default();
        assert!((cfg.thresholds.goal - 0.04).abs() < 1e-12);
        assert_eq!(cfg.clock.half_time_minute, 45);
        assert!(cfg.check().is_ok());
    }

    #[test]
    fn test_stamina_drain_table() {
        let s = StaminaSettings::default();
        assert!((s.drain_for_minute(10, Weather::Cloudy) - 1.0).abs() < 1e-12);
        assert!((s.drain_for_minute(61, Weather::Snowy) - 1.8).abs() < 1e-12);
        assert!((s.drain_for_minute(60, Weather::Rainy) - 1.1).abs() < 1e-12);
    }

    #[test]
    fn test_partial_yaml_fills_defaults() {
        let cfg = SimConfig::from_yaml_str("thresholds:\n  goal: 0.05\nlocale: id-ID\n").unwrap();
        assert!((cfg.thresholds.goal - 0.05).abs() < 1e-12);
        assert!((cfg.thresholds.shot - 0.11).abs() < 1e-12);
        assert_eq!(cfg.locale, "id-ID");
    }

    #[test]
    fn test_rejects_overfull_bands() {
        let err = SimConfig::from_json_str(r#"{"thresholds":{"goal":0.6,"shot":0.5}}"#).unwrap_err();
        assert!(matches!(err, CoreError::InvalidParameter(_)));
    }

    #[test]
    fn test_rejects_negative_stamina_decay() {
        let err = SimConfig::from_json_str(r#"{"stamina":{"base_decay":-2.0}}"#).unwrap_err();
        assert!(matches!(err, CoreError::InvalidParameter(_)), "{err}");

        let mut cfg = SimConfig::default();
        cfg.stamina.snowy_factor = f64::NAN;
        assert!(cfg.check().is_err());

        let mut cfg = SimConfig::default();
        cfg.stamina.late_decay_bonus = -0.5;
        assert!(cfg.check().is_err());
    }

    #[test]
    fn test_rejects_clock_past_regulation() {
        let err = SimConfig::from_json_str(r#"{"clock":{"full_time_minute":200}}"#).unwrap_err();
        assert!(matches!(err, CoreError::InvalidParameter(_)), "{err}");
        assert!(SimConfig::from_json_str(r#"{"clock":{"full_time_minute":90}}"#).is_ok());
    }

    #[test]
    fn test_rejects_bad_officiating_scales() {
        let mut cfg = SimConfig::default();
        cfg.thresholds.yellow_base = -0.1;
        assert!(cfg.check().is_err());

        let mut cfg = SimConfig::default();
        cfg.officiating.card_severity = f64::INFINITY;
        assert!(cfg.check().is_err());

        let mut cfg = SimConfig::default();
        cfg.officiating.foul_probability = -0.2;
        assert!(cfg.check().is_err());

        let mut cfg = SimConfig::default();
        cfg.officiating.var_review_chance = f64::NAN;
        assert!(cfg.check().is_err());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        writeln!(file, "clock:\n  half_time_minute: 40\n  full_time_minute: 80").unwrap();
        let cfg = SimConfig::load(file.path()).unwrap();
        assert_eq!(cfg.clock.full_time_minute, 80);
        assert_eq!(cfg.clock.possession_min, 20);
    }
}
