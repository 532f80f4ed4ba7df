//! Team strength model.
//!
//! `avg_rating * (avg_stamina / 100) * tactics * weather * (1 + chemistry/100 * 0.2)`
//!
//! Every function here is pure. An empty lineup is a caller error: the means
//! become NaN and the possession split falls back to 50/50.

use crate::models::{TeamInMatch, Weather};

const CHEMISTRY_WEIGHT: f64 = 0.2;
const RAIN_PACE_PENALTY: f64 = 0.1;
const WIND_PASSING_PENALTY: f64 = 0.08;
const SNOW_MODIFIER: f64 = 0.85;

/// Single comparable scalar for one side at a point in the match.
///
/// `minute` is accepted for signature stability; stamina already carries the
/// time dependence.
pub fn strength(team: &TeamInMatch, weather: Weather, _minute: u8) -> f64 {
    let avg_rating = team.lineup_mean(|p| p.rating);
    let avg_stamina = team.lineup_mean(|p| p.stamina);
    let chemistry_bonus = 1.0 + team.chemistry / 100.0 * CHEMISTRY_WEIGHT;

    avg_rating
        * (avg_stamina / 100.0)
        * team.tactics.strength_modifier()
        * weather_modifier(team, weather)
        * chemistry_bonus
}

/// Rain punishes pace-based sides, wind punishes passing sides, snow hits everyone.
pub fn weather_modifier(team: &TeamInMatch, weather: Weather) -> f64 {
    match weather {
        Weather::Rainy => {
            let avg_pace = team.lineup_mean(|p| f64::from(p.attributes.pace));
            1.0 - avg_pace / 100.0 * RAIN_PACE_PENALTY
        }
        Weather::Windy => {
            let avg_passing = team.lineup_mean(|p| f64::from(p.attributes.passing));
            1.0 - avg_passing / 100.0 * WIND_PASSING_PENALTY
        }
        Weather::Snowy => SNOW_MODIFIER,
        Weather::Sunny | Weather::Cloudy => 1.0,
    }
}

/// Home share of combined strength in `[0, 1]`; 0.5 when the total is not positive.
pub fn home_share(home: f64, away: f64) -> f64 {
    let total = home + away;
    if total.is_finite() && total > 0.0 {
        home / total
    } else {
        0.5
    }
}

/// Rounded home possession, clamped so both sides stay in `[min, max]`.
pub fn possession_split(home: f64, away: f64, min: u8, max: u8) -> (u8, u8) {
    let raw = (home_share(home, away) * 100.0).round() as i32;
    let clamp = |v: i32| v.clamp(i32::from(min), i32::from(max)) as u8;
    (clamp(raw), clamp(100 - raw))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{PlayerInMatch, Position};
    use crate::tactics::{Mentality, TeamTempo};

    fn team(rating: f64) -> TeamInMatch {
        let lineup = (0..11)
            .map(|i| PlayerInMatch::new(format!("p{i}"), format!("P{i}"), Position::Midfielder, rating))
            .collect();
        TeamInMatch::new("Test", lineup).with_chemistry(0.0)
    }

    #[test]
    fn test_baseline_strength() {
        // full stamina, balanced/normal, no chemistry, neutral weather
        assert!((strength(&team(75.0), Weather::Sunny, 0) - 75.0).abs() < 1e-9);
    }

    #[test]
    fn test_chemistry_bonus() {
        let t = team(75.0).with_chemistry(100.0);
        assert!((strength(&t, Weather::Cloudy, 0) - 90.0).abs() < 1e-9);
    }

    #[test]
    fn test_tactics_apply_multiplicatively() {
        let mut t = team(80.0);
        t.tactics.mentality = Mentality::Attacking;
        t.tactics.tempo = TeamTempo::Slow;
        assert!((strength(&t, Weather::Sunny, 0) - 80.0 * 1.15 * 0.95).abs() < 1e-9);
    }

    #[test]
    fn test_weather_modifiers() {
        let t = team(70.0); // pace/passing 50
        assert!((weather_modifier(&t, Weather::Rainy) - 0.95).abs() < 1e-9);
        assert!((weather_modifier(&t, Weather::Windy) - 0.96).abs() < 1e-9);
        assert!((weather_modifier(&t, Weather::Snowy) - 0.85).abs() < 1e-9);
        assert!((weather_modifier(&t, Weather::Cloudy) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_stamina_scales_strength() {
        let mut t = team(60.0);
        for p in &mut t.lineup {
            p.stamina = 50.0;
        }
        assert!((strength(&t, Weather::Sunny, 70) - 30.0).abs() < 1e-9);
    }

    #[test]
    fn test_possession_split_bounds() {
        assert_eq!(possession_split(50.0, 50.0, 20, 80), (50, 50));
        assert_eq!(possession_split(95.0, 5.0, 20, 80), (80, 20));
        assert_eq!(possession_split(1.0, 99.0, 20, 80), (20, 80));
        assert_eq!(possession_split(0.0, 0.0, 20, 80), (50, 50));
        assert_eq!(possession_split(f64::NAN, 3.0, 20, 80), (50, 50));
    }
}
