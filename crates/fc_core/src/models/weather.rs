use rand::Rng;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Match-day weather. Fixed for the whole match.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Weather {
    Sunny,
    Cloudy,
    Rainy,
    Snowy,
    Windy,
}

/// Cumulative draw table: sunny 50%, cloudy 25%, rainy 15%, windy 5%, snowy 5%.
const WEATHER_TABLE: [(f64, Weather); 4] = [
    (0.50, Weather::Sunny),
    (0.75, Weather::Cloudy),
    (0.90, Weather::Rainy),
    (0.95, Weather::Windy),
];

impl Weather {
    /// Draws a weather value with one uniform sample.
    pub fn generate<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let roll: f64 = rng.gen();
        WEATHER_TABLE
            .iter()
            .find(|(threshold, _)| roll < *threshold)
            .map(|(_, weather)| *weather)
            .unwrap_or(Weather::Snowy)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Weather::Sunny => "sunny",
            Weather::Cloudy => "cloudy",
            Weather::Rainy => "rainy",
            Weather::Snowy => "snowy",
            Weather::Windy => "windy",
        }
    }
}

impl std::str::FromStr for Weather {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "sunny" => Ok(Weather::Sunny),
            "cloudy" => Ok(Weather::Cloudy),
            "rainy" => Ok(Weather::Rainy),
            "snowy" => Ok(Weather::Snowy),
            "windy" => Ok(Weather::Windy),
            other => Err(format!("unknown weather: {other}")),
        }
    }
}
