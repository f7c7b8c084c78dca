//! Core library for the `purrcast` dashboard.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - Weather acquisition with a synthetic fallback for provider outages
//! - The adoption-directory client and its cached token exchange
//! - Forecast reduction and cat mood/advice derivation
//!
//! It is used by `purrcast-cli`, but can also be reused by other binaries or services.

pub mod config;
pub mod directory;
pub mod error;
pub mod forecast;
pub mod model;
pub mod mood;
pub mod weather;

pub use config::{Config, DirectoryConfig, WeatherConfig};
pub use directory::{DirectoryClient, TokenCache, TokenSource};
pub use error::{AuthError, DirectoryError};
pub use forecast::{MAX_FORECAST_DAYS, daily_buckets};
pub use model::{
    AdoptableCat, Condition, DataSource, ForecastPoint, WeatherAlert, WeatherBundle,
    WeatherSnapshot, Wind, WindDirection,
};
pub use mood::{CatMood, advice_for, forecast_mood_for, mood_for};
pub use weather::{DEFAULT_CITY, WeatherService};

/// Upper bound on every outbound HTTP request.
pub(crate) const REQUEST_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(10);
