use std::sync::Arc;

use anyhow::Result;
use chrono::{DateTime, Local, Utc};
use clap::{Parser, Subcommand};

use purrcast_core::{
    AdoptableCat, Config, DEFAULT_CITY, DirectoryClient, TokenCache, WeatherBundle,
    WeatherService, advice_for, daily_buckets, forecast_mood_for, mood_for,
};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "purrcast", version, about = "Weather (and cats) for your terminal")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store provider credentials in the config file.
    Configure {
        /// Which credentials to set: "weather" or "directory".
        target: String,
    },

    /// Show weather, cat moods and nearby adoptable cats for a city.
    Show {
        /// City name; defaults to London.
        city: Option<String>,

        /// Skip the adoptable-cat lookup.
        #[arg(long)]
        no_cats: bool,
    },
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        match self.command {
            Command::Configure { target } => configure(&target),
            Command::Show { city, no_cats } => {
                show(city.as_deref().unwrap_or(DEFAULT_CITY), no_cats).await
            }
        }
    }
}

fn configure(target: &str) -> Result<()> {
    let mut config = Config::load()?;

    match target {
        "weather" => {
            let api_key = inquire::Password::new("Weather provider API key:")
                .without_confirmation()
                .prompt()?;
            config.set_weather_api_key(api_key);
        }
        "directory" => {
            let client_id = inquire::Text::new("Adoption directory client id:").prompt()?;
            let client_secret = inquire::Password::new("Adoption directory client secret:")
                .without_confirmation()
                .prompt()?;
            config.set_directory_credentials(client_id, client_secret);
        }
        other => anyhow::bail!(
            "Unknown configure target '{other}'. Supported targets: weather, directory."
        ),
    }

    config.save()?;
    println!("Saved configuration to {}", Config::config_file_path()?.display());

    Ok(())
}

async fn show(city: &str, no_cats: bool) -> Result<()> {
    let config = Config::load()?;

    let weather = WeatherService::new(config.weather()?.api_key.clone())?;
    let bundle = weather.fetch_weather(city).await;
    print_bundle(&bundle);

    if !no_cats {
        let directory_cfg = config.directory()?;
        let tokens = Arc::new(TokenCache::new(
            directory_cfg.client_id.clone(),
            directory_cfg.client_secret.clone(),
        )?);
        let directory = DirectoryClient::new(tokens)?;

        match directory.fetch_adoptable_cats(city).await {
            Ok(cats) => print_cats(&cats),
            Err(err) => {
                tracing::error!(error = %err, "adoptable-cat lookup failed");
                println!("\n{}", err.user_message());
            }
        }
    }

    Ok(())
}

fn print_bundle(bundle: &WeatherBundle) {
    if bundle.source.is_synthetic() {
        println!("(live weather unavailable -- showing sample data)\n");
    }

    for alert in &bundle.alerts {
        println!("!! {} - {}", alert.title, alert.description);
    }

    let current = &bundle.current;
    println!("{} - {}", bundle.city, current.description);
    println!(
        "  {:.0} C (feels like {:.0} C), humidity {}%, pressure {} hPa",
        current.temperature_c, current.feels_like_c, current.humidity_pct, current.pressure_hpa
    );
    println!(
        "  wind {:.1} m/s {}, visibility {:.1} km",
        current.wind.speed_mps,
        current.wind.direction,
        f64::from(current.visibility_m) / 1000.0
    );
    println!(
        "  sunrise {} | sunset {}",
        local_time(current.sunrise),
        local_time(current.sunset)
    );

    println!("\n{}", mood_for(current.condition).message);
    println!(
        "Kitty's advice: {}",
        advice_for(current.condition, current.temperature_c, current.observed_at)
    );

    let daily = daily_buckets(&bundle.forecast);
    if !daily.is_empty() {
        println!("\n5-day forecast:");
        for point in daily {
            println!(
                "  {}  {:>5.1} C  {:<18} {}",
                point.timestamp.with_timezone(&Local).format("%a %b %e"),
                point.temperature_c,
                point.description,
                forecast_mood_for(point.condition, point.temperature_c)
            );
        }
    }
}

fn print_cats(cats: &[AdoptableCat]) {
    if cats.is_empty() {
        println!("\nNo adoptable cats found near that location.");
        return;
    }

    println!("\nAdoptable cats nearby:");
    for cat in cats {
        let breed = cat.breed.as_deref().unwrap_or("Unknown breed");
        println!(
            "  {} - {} {} ({}), {}, {}",
            cat.name, cat.age, cat.gender, breed, cat.city, cat.state
        );
        println!("      {}", cat.profile_url);
    }
}

fn local_time(at: DateTime<Utc>) -> String {
    at.with_timezone(&Local).format("%H:%M").to_string()
}
