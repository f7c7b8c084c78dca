use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Coarse weather condition.
///
/// Classified exactly once, when a provider payload (or a synthetic sample)
/// is mapped into the domain; downstream lookups key on this enum instead of
/// re-scanning raw provider strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Condition {
    Clear,
    Clouds,
    Rain,
    Snow,
    Thunderstorm,
    Mist,
    Other,
}

impl Condition {
    /// Classify a raw provider condition string.
    ///
    /// Substring checks run in a fixed order and the first match wins:
    /// rain, snow, clear, cloud, thunder, mist/fog. Anything else maps to
    /// [`Condition::Other`].
    pub fn classify(raw: &str) -> Self {
        let lower = raw.to_lowercase();

        if lower.contains("rain") {
            Self::Rain
        } else if lower.contains("snow") {
            Self::Snow
        } else if lower.contains("clear") {
            Self::Clear
        } else if lower.contains("cloud") {
            Self::Clouds
        } else if lower.contains("thunder") {
            Self::Thunderstorm
        } else if lower.contains("mist") || lower.contains("fog") {
            Self::Mist
        } else {
            Self::Other
        }
    }
}

/// 8-point compass direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WindDirection {
    N,
    NE,
    E,
    SE,
    S,
    SW,
    W,
    NW,
}

impl WindDirection {
    /// Bucket meteorological degrees into one of eight compass points.
    /// Each point owns a full 45° sector starting at its own bearing, so
    /// 0°–44° is N, 45°–89° is NE, and 360° wraps back to N.
    pub fn from_degrees(degrees: f64) -> Self {
        const COMPASS: [WindDirection; 8] = [
            WindDirection::N,
            WindDirection::NE,
            WindDirection::E,
            WindDirection::SE,
            WindDirection::S,
            WindDirection::SW,
            WindDirection::W,
            WindDirection::NW,
        ];

        let idx = ((degrees.rem_euclid(360.0) / 45.0) as usize) % 8;
        COMPASS[idx]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            WindDirection::N => "N",
            WindDirection::NE => "NE",
            WindDirection::E => "E",
            WindDirection::SE => "SE",
            WindDirection::S => "S",
            WindDirection::SW => "SW",
            WindDirection::W => "W",
            WindDirection::NW => "NW",
        }
    }
}

impl std::fmt::Display for WindDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Wind vector with its derived compass direction.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Wind {
    pub speed_mps: f64,
    pub degrees: f64,
    pub direction: WindDirection,
}

impl Wind {
    pub fn new(speed_mps: f64, degrees: f64) -> Self {
        Self {
            speed_mps,
            degrees,
            direction: WindDirection::from_degrees(degrees),
        }
    }
}

/// Current conditions for one city. Immutable once produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    pub temperature_c: f64,
    pub feels_like_c: f64,
    pub humidity_pct: u8,
    pub pressure_hpa: u32,
    pub condition: Condition,
    pub description: String,
    pub wind: Wind,
    pub sunrise: DateTime<Utc>,
    pub sunset: DateTime<Utc>,
    pub visibility_m: u32,
    pub observed_at: DateTime<Utc>,
}

/// One entry of the 3-hourly forecast series.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastPoint {
    pub timestamp: DateTime<Utc>,
    pub temperature_c: f64,
    pub feels_like_c: f64,
    pub humidity_pct: u8,
    pub pressure_hpa: u32,
    pub condition: Condition,
    pub description: String,
    pub wind: Wind,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherAlert {
    pub title: String,
    pub description: String,
}

/// Where a [`WeatherBundle`] came from, so consumers can flag degraded data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataSource {
    /// Both provider queries succeeded.
    Live,
    /// At least one provider query failed; the bundle was synthesized.
    Synthetic,
}

impl DataSource {
    pub fn is_synthetic(self) -> bool {
        matches!(self, DataSource::Synthetic)
    }
}

/// The unit returned for one city: current conditions, the 3-hourly
/// forecast series, and any weather alerts, in the order received.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherBundle {
    pub city: String,
    pub current: WeatherSnapshot,
    pub forecast: Vec<ForecastPoint>,
    pub alerts: Vec<WeatherAlert>,
    pub source: DataSource,
}

/// One adoptable cat from the directory, as the provider reported it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdoptableCat {
    pub id: u64,
    pub name: String,
    pub age: String,
    pub gender: String,
    pub breed: Option<String>,
    /// May be empty; cats without photos are still valid results.
    pub photo_urls: Vec<String>,
    pub city: String,
    pub state: String,
    pub profile_url: String,
}
