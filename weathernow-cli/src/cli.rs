use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use inquire::Password;
use weathernow_core::{Config, Pipeline, ProviderId, Providers, RunOutcome};

use crate::render;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather-now", version, about = "Current weather and forecast for a city")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the API key for a provider.
    Configure {
        /// Provider short name, "opencage" or "ipgeolocation".
        provider: String,
    },

    /// Show the weather for a place.
    Show {
        /// City or place name.
        place: String,

        /// Print the view model as JSON instead of text.
        #[arg(long)]
        json: bool,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure { provider } => configure(&provider),
            Command::Show { place, json } => show(&place, json).await,
        }
    }
}

fn configure(provider: &str) -> anyhow::Result<()> {
    let id = ProviderId::try_from(provider)?;

    let api_key = Password::new(&format!("API key for {id}:"))
        .without_confirmation()
        .prompt()
        .context("Failed to read API key")?;

    let mut config = Config::load()?;
    config.upsert_provider_api_key(id, api_key.trim().to_string());
    config.save()?;

    tracing::info!(provider = %id, path = %Config::config_file_path()?.display(), "saved API key");
    println!("Saved API key for {id}.");
    Ok(())
}

async fn show(place: &str, json: bool) -> anyhow::Result<()> {
    let config = Config::load()?;
    let pipeline = Pipeline::new(Providers::from_config(&config)?);

    match pipeline.run(place).await {
        RunOutcome::Ready(view) => {
            if json {
                println!("{}", serde_json::to_string_pretty(&view)?);
            } else {
                print!("{}", render::render_view(&view));
            }
            Ok(())
        }
        RunOutcome::Failed(e) => {
            let message = e.user_message();
            Err(anyhow::Error::new(e).context(message))
        }
        RunOutcome::Superseded => bail!("query was superseded by a newer one"),
    }
}
