//! Synthetic weather generation, used when the live provider is unreachable.
//!
//! Samples a small table of archetypal conditions and jitters their
//! readings, producing a bundle with the same shape as the live path: one
//! current snapshot plus a 40-point forecast at 3-hour spacing.

use chrono::{DateTime, Duration, Local, Utc};
use rand::Rng;

use crate::model::{
    Condition, DataSource, ForecastPoint, WeatherAlert, WeatherBundle, WeatherSnapshot, Wind,
};

struct Archetype {
    condition: Condition,
    description: &'static str,
    temp_c: f64,
    wind_speed_mps: f64,
    wind_deg: f64,
    alert: Option<(&'static str, &'static str)>,
}

const ARCHETYPES: [Archetype; 6] = [
    Archetype {
        condition: Condition::Clear,
        description: "clear sky",
        temp_c: 25.0,
        wind_speed_mps: 5.0,
        wind_deg: 120.0,
        alert: None,
    },
    Archetype {
        condition: Condition::Clouds,
        description: "scattered clouds",
        temp_c: 20.0,
        wind_speed_mps: 8.0,
        wind_deg: 90.0,
        alert: None,
    },
    Archetype {
        condition: Condition::Rain,
        description: "light rain",
        temp_c: 15.0,
        wind_speed_mps: 12.0,
        wind_deg: 180.0,
        alert: Some(("Rain Warning", "Light to moderate rain expected")),
    },
    Archetype {
        condition: Condition::Snow,
        description: "light snow",
        temp_c: 0.0,
        wind_speed_mps: 6.0,
        wind_deg: 45.0,
        alert: Some(("Snow Alert", "Light snowfall expected")),
    },
    Archetype {
        condition: Condition::Thunderstorm,
        description: "thunderstorm",
        temp_c: 18.0,
        wind_speed_mps: 15.0,
        wind_deg: 225.0,
        alert: Some(("Severe Weather", "Thunderstorms with possible lightning")),
    },
    Archetype {
        condition: Condition::Mist,
        description: "misty conditions",
        temp_c: 12.0,
        wind_speed_mps: 3.0,
        wind_deg: 60.0,
        alert: Some(("Visibility Warning", "Reduced visibility due to mist")),
    },
];

/// Length of the synthetic forecast series: 5 days of 3-hour slots.
const FORECAST_POINTS: i64 = 40;

/// Build a complete synthetic bundle for a city.
pub(crate) fn synthesize(city: &str) -> WeatherBundle {
    let mut rng = rand::thread_rng();
    let now = Utc::now();

    let current_arch = &ARCHETYPES[rng.gen_range(0..ARCHETYPES.len())];
    let base_temp = current_arch.temp_c + rng.gen_range(-2.5..2.5);

    let (sunrise, sunset) = sun_times();

    let current = WeatherSnapshot {
        temperature_c: base_temp,
        feels_like_c: base_temp - 1.0,
        humidity_pct: rng.gen_range(65..85),
        pressure_hpa: rng.gen_range(1013..1023),
        condition: current_arch.condition,
        description: current_arch.description.to_string(),
        wind: Wind::new(current_arch.wind_speed_mps, current_arch.wind_deg),
        sunrise,
        sunset,
        visibility_m: if current_arch.condition == Condition::Mist {
            3_000
        } else {
            10_000
        },
        observed_at: now,
    };

    let forecast = (0..FORECAST_POINTS)
        .map(|slot| {
            // Each slot samples its own archetype; temperatures stay within
            // a bounded jitter of the current reading.
            let arch = &ARCHETYPES[rng.gen_range(0..ARCHETYPES.len())];
            let temp = base_temp + rng.gen_range(-5.0..5.0);

            ForecastPoint {
                timestamp: now + Duration::hours(3 * slot),
                temperature_c: temp,
                feels_like_c: temp - 1.0,
                humidity_pct: rng.gen_range(65..85),
                pressure_hpa: rng.gen_range(1013..1023),
                condition: arch.condition,
                description: arch.description.to_string(),
                wind: Wind::new(arch.wind_speed_mps, arch.wind_deg),
            }
        })
        .collect();

    let alerts = current_arch
        .alert
        .map(|(title, description)| {
            vec![WeatherAlert {
                title: title.to_string(),
                description: description.to_string(),
            }]
        })
        .unwrap_or_default();

    WeatherBundle {
        city: city.to_string(),
        current,
        forecast,
        alerts,
        source: DataSource::Synthetic,
    }
}

/// Sunrise 06:30, sunset 19:45, local time of the current day.
fn sun_times() -> (DateTime<Utc>, DateTime<Utc>) {
    let today = Local::now().date_naive();
    let at = |hour, minute| {
        today
            .and_hms_opt(hour, minute, 0)
            .and_then(|naive| naive.and_local_timezone(Local).single())
            .map(|local| local.with_timezone(&Utc))
            .unwrap_or_else(Utc::now)
    };

    (at(6, 30), at(19, 45))
}
