//! Weather acquisition: live provider queries with a synthetic fallback.

mod synthetic;

use anyhow::Context;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Deserialize;

use crate::error::{WeatherError, truncate_body};
use crate::model::{Condition, DataSource, ForecastPoint, WeatherBundle, WeatherSnapshot, Wind};

/// City used when the caller does not supply one.
pub const DEFAULT_CITY: &str = "London";

const WEATHER_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";

#[derive(Debug, Clone)]
pub struct WeatherService {
    http: Client,
    base_url: String,
    api_key: String,
}

impl WeatherService {
    pub fn new(api_key: impl Into<String>) -> anyhow::Result<Self> {
        let http = Client::builder()
            .timeout(crate::REQUEST_TIMEOUT)
            .build()
            .context("Failed to build HTTP client for the weather provider")?;

        Ok(Self {
            http,
            base_url: WEATHER_BASE_URL.to_string(),
            api_key: api_key.into(),
        })
    }

    /// Point the service at a different weather host.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Fetch current conditions and the 5-day forecast for a city.
    ///
    /// This never fails: when either upstream query cannot be completed
    /// (network error, non-2xx, unknown city, malformed payload), a
    /// synthetic bundle tagged [`DataSource::Synthetic`] is returned so the
    /// caller always has something to render.
    pub async fn fetch_weather(&self, city: &str) -> WeatherBundle {
        match self.fetch_live(city).await {
            Ok(bundle) => bundle,
            Err(err) => {
                tracing::warn!(
                    city,
                    error = %err,
                    "live weather unavailable, falling back to synthetic data"
                );
                synthetic::synthesize(city)
            }
        }
    }

    async fn fetch_live(&self, city: &str) -> Result<WeatherBundle, WeatherError> {
        // Both queries go out together; the bundle needs both to resolve.
        let ((name, current), forecast) =
            tokio::try_join!(self.fetch_current(city), self.fetch_forecast(city))?;

        Ok(WeatherBundle {
            city: name,
            current,
            forecast,
            // The live provider path carries no alerts.
            alerts: Vec::new(),
            source: DataSource::Live,
        })
    }

    async fn fetch_current(&self, city: &str) -> Result<(String, WeatherSnapshot), WeatherError> {
        let url = format!("{}/weather", self.base_url);

        let res = self
            .http
            .get(&url)
            .query(&[
                ("q", city),
                ("units", "metric"),
                ("appid", self.api_key.as_str()),
            ])
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            return Err(WeatherError::Status {
                status,
                body: truncate_body(&body),
            });
        }

        let parsed: OwCurrentResponse = serde_json::from_str(&body)?;

        let (main, description) = primary_condition(parsed.weather);

        let snapshot = WeatherSnapshot {
            temperature_c: parsed.main.temp,
            feels_like_c: parsed.main.feels_like,
            humidity_pct: parsed.main.humidity,
            pressure_hpa: parsed.main.pressure,
            condition: Condition::classify(&main),
            description,
            wind: Wind::new(parsed.wind.speed, parsed.wind.deg),
            sunrise: unix_to_utc(parsed.sys.sunrise).unwrap_or_else(Utc::now),
            sunset: unix_to_utc(parsed.sys.sunset).unwrap_or_else(Utc::now),
            visibility_m: parsed.visibility,
            observed_at: unix_to_utc(parsed.dt).unwrap_or_else(Utc::now),
        };

        Ok((parsed.name, snapshot))
    }

    async fn fetch_forecast(&self, city: &str) -> Result<Vec<ForecastPoint>, WeatherError> {
        let url = format!("{}/forecast", self.base_url);

        let res = self
            .http
            .get(&url)
            .query(&[
                ("q", city),
                ("units", "metric"),
                ("appid", self.api_key.as_str()),
            ])
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            return Err(WeatherError::Status {
                status,
                body: truncate_body(&body),
            });
        }

        let parsed: OwForecastResponse = serde_json::from_str(&body)?;

        Ok(parsed
            .list
            .into_iter()
            .map(|entry| {
                let (main, description) = primary_condition(entry.weather);

                ForecastPoint {
                    timestamp: unix_to_utc(entry.dt).unwrap_or_else(Utc::now),
                    temperature_c: entry.main.temp,
                    feels_like_c: entry.main.feels_like,
                    humidity_pct: entry.main.humidity,
                    pressure_hpa: entry.main.pressure,
                    condition: Condition::classify(&main),
                    description,
                    wind: Wind::new(entry.wind.speed, entry.wind.deg),
                }
            })
            .collect())
    }
}

fn primary_condition(weather: Vec<OwWeather>) -> (String, String) {
    weather
        .into_iter()
        .next()
        .map(|w| (w.main, w.description))
        .unwrap_or_else(|| ("Unknown".to_string(), "Unknown".to_string()))
}

fn unix_to_utc(ts: i64) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp(ts, 0)
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    feels_like: f64,
    humidity: u8,
    pressure: u32,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    main: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct OwWind {
    speed: f64,
    #[serde(default)]
    deg: f64,
}

#[derive(Debug, Deserialize)]
struct OwSys {
    sunrise: i64,
    sunset: i64,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    name: String,
    dt: i64,
    main: OwMain,
    weather: Vec<OwWeather>,
    wind: OwWind,
    sys: OwSys,
    #[serde(default = "default_visibility")]
    visibility: u32,
}

fn default_visibility() -> u32 {
    10_000
}

#[derive(Debug, Deserialize)]
struct OwForecastEntry {
    dt: i64,
    main: OwMain,
    weather: Vec<OwWeather>,
    wind: OwWind,
}

#[derive(Debug, Deserialize)]
struct OwForecastResponse {
    list: Vec<OwForecastEntry>,
}
