use anyhow::Result;
use clap::{Parser, Subcommand};
use inquire::{Confirm, CustomType, InquireError, Password, Text};

use clima_core::{
    Config, GeocodeConfig, PinnedLocation, Session, WeatherApiConfig, geocode,
};

use crate::output;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "clima", version, about = "Single-screen weather lookup for the terminal")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store API credentials and an optional pinned location.
    Configure,

    /// Show current weather for a city.
    Show {
        /// City name; accents are fine, they are stripped before the query.
        city: String,
    },

    /// Show weather for the configured current location.
    Here,
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        match self.command {
            Some(Command::Configure) => configure(),
            Some(Command::Show { city }) => show(&city).await,
            Some(Command::Here) => here().await,
            None => interactive().await,
        }
    }
}

async fn show(city: &str) -> Result<()> {
    let config = Config::load()?;
    let mut session = Session::from_config(&config)?;

    session.submit(city).await;
    output::render(session.state());

    Ok(())
}

async fn here() -> Result<()> {
    let config = Config::load()?;
    // Fail early with a hint instead of aborting silently mid-flight when
    // the credentials were never entered at all.
    config.geocode_credentials()?;

    let mut session = Session::from_config(&config)?;
    session.resolve_current_city().await;
    output::render(session.state());

    Ok(())
}

/// Prompt loop: type a city to look it up, leave the line blank to refresh
/// from the current location, Esc to quit.
async fn interactive() -> Result<()> {
    let config = Config::load()?;
    let mut session = Session::from_config(&config)?;

    // Startup effect: one location-based lookup before the first prompt.
    session.resolve_current_city().await;
    output::render(session.state());

    loop {
        let entry = Text::new("City:")
            .with_help_message("blank = refresh from location, Esc = quit")
            .with_initial_value(&session.state().query_text)
            .prompt();

        match entry {
            Ok(city) if city.trim().is_empty() => session.refresh().await,
            Ok(city) => {
                session.set_query_text(city.clone());
                session.submit(&city).await;
            }
            Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => {
                return Ok(());
            }
            Err(err) => return Err(err.into()),
        }

        output::render(session.state());
    }
}

fn configure() -> Result<()> {
    let path = Config::config_file_path()?;
    let mut config = Config::load_file(&path)?;

    let weather_key = Password::new("Weather API key:")
        .without_confirmation()
        .prompt()?;
    config.weather = Some(WeatherApiConfig { api_key: weather_key });

    let wants_geocode = Confirm::new("Configure geocoding credentials (needed for `clima here`)?")
        .with_default(config.geocode.is_some())
        .prompt()?;
    if wants_geocode {
        let api_key = Password::new("Geocoding API key:")
            .without_confirmation()
            .prompt()?;
        let api_host = Text::new("Geocoding API host:")
            .with_default(geocode::DEFAULT_BASE_URL.trim_start_matches("https://"))
            .prompt()?;
        config.geocode = Some(GeocodeConfig { api_key, api_host });
    }

    let wants_location = Confirm::new("Pin coordinates for current-location lookups?")
        .with_default(config.location.is_some())
        .prompt()?;
    if wants_location {
        let latitude = CustomType::<f64>::new("Latitude:").prompt()?;
        let longitude = CustomType::<f64>::new("Longitude:").prompt()?;
        config.location = Some(PinnedLocation { latitude, longitude });
    }

    config.save()?;
    println!("Saved configuration to {}", path.display());

    Ok(())
}
