use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use dashboard_core::{Config, DashboardError, FetchError, generate_dashboard, provider_from_config};
use inquire::{Password, Text};
use tracing::debug;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(
    name = "weather-dashboard",
    version,
    about = "Render a current-weather dashboard image for a city"
)]
pub struct Cli {
    /// Defaults to `show` with an interactive city prompt.
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the WeatherAPI.com API key in the config file.
    Configure {
        /// Override the current-conditions endpoint.
        #[arg(long)]
        base_url: Option<String>,

        /// Default path for the rendered dashboard.
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Fetch current weather for a city and render the dashboard.
    Show {
        /// City name; prompted for when absent.
        city: Option<String>,

        /// Where to write the image (default from config, `weather_dashboard.png`).
        #[arg(long, short)]
        output: Option<PathBuf>,
    },

    /// Print the location of the config file.
    ConfigPath,
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        let command = self.command.unwrap_or(Command::Show {
            city: None,
            output: None,
        });

        match command {
            Command::Configure { base_url, output } => configure(base_url, output),
            Command::Show { city, output } => show(city, output).await,
            Command::ConfigPath => {
                println!("{}", Config::config_file_path()?.display());
                Ok(())
            }
        }
    }
}

fn configure(base_url: Option<String>, output: Option<PathBuf>) -> Result<()> {
    let mut cfg = Config::load()?;

    let api_key = Password::new("WeatherAPI.com API key:")
        .without_confirmation()
        .prompt()
        .context("Failed to read API key")?;

    let api_key = api_key.trim();
    if api_key.is_empty() {
        bail!("API key cannot be empty");
    }
    cfg.set_api_key(api_key.to_string());

    if let Some(base_url) = base_url {
        cfg.provider.base_url = base_url;
    }
    if let Some(output) = output {
        cfg.dashboard.output_path = output;
    }

    let path = cfg.save()?;
    println!("Configuration saved to {}", path.display());

    Ok(())
}

async fn show(city: Option<String>, output: Option<PathBuf>) -> Result<()> {
    let cfg = Config::load()?;
    let provider = provider_from_config(&cfg)?;

    let city = match city {
        Some(city) => city,
        None => Text::new("Enter city name for weather dashboard:")
            .prompt()
            .context("Failed to read city name")?,
    };
    let output = output.unwrap_or_else(|| cfg.dashboard.output_path.clone());

    match generate_dashboard(provider.as_ref(), &city, &output).await {
        Ok(record) => {
            debug!(?record, "Dashboard generated");
            println!("Dashboard saved as '{}'", output.display());
        }
        Err(err) => println!("{}", failure_message(city.trim(), &output, &err)),
    }

    Ok(())
}

/// One human-readable line (two for fetch failures) describing why no dashboard was produced.
fn failure_message(city: &str, output: &Path, err: &DashboardError) -> String {
    match err {
        DashboardError::Fetch(FetchError::EmptyInput) => "No city name entered. Exiting.".into(),
        DashboardError::Fetch(err) => {
            format!("Failed to fetch weather data for {city}: {err}\nDashboard not created.")
        }
        DashboardError::Render(err) => {
            format!("Failed to save dashboard to '{}': {}", output.display(), err.cause)
        }
    }
}
