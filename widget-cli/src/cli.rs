use std::sync::Arc;

use anyhow::{Context, anyhow};
use chrono::Local;
use clap::{Parser, Subcommand};
use inquire::{InquireError, Password, Text};
use tracing::debug;
use weather_widget_core::{
    Config, SearchController, SearchState, WeatherView, provider_from_config,
};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather-widget", version, about = "Current weather for a city")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the weatherapi.com API key.
    Configure {
        /// Key to store; prompted for when omitted.
        #[arg(long)]
        api_key: Option<String>,
    },

    /// Show the current weather for a place.
    Show {
        /// City or location name.
        place: String,

        /// Print the raw result as JSON instead of messages.
        #[arg(long)]
        json: bool,
    },

    /// Prompt for cities until cancelled with Esc or Ctrl-C.
    Widget,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure { api_key } => configure(api_key),
            Command::Show { place, json } => show(&place, json).await,
            Command::Widget => widget().await,
        }
    }
}

fn configure(api_key: Option<String>) -> anyhow::Result<()> {
    let api_key = match api_key {
        Some(key) => key,
        None => Password::new("weatherapi.com API key:")
            .without_confirmation()
            .prompt()
            .context("Failed to read API key")?,
    };

    let api_key = api_key.trim().to_string();
    if api_key.is_empty() {
        return Err(anyhow!("API key must not be empty"));
    }

    let mut cfg = Config::load()?;
    cfg.set_api_key(api_key);
    let path = cfg.save()?;

    println!("Saved API key to {}", path.display());
    Ok(())
}

async fn show(place: &str, json: bool) -> anyhow::Result<()> {
    let controller = controller_from_config()?;
    debug!(place, "submitting lookup");
    controller.submit(place).await;

    let state = controller.state();
    if let Some(message) = state.error_message() {
        return Err(anyhow!("{message}"));
    }

    if json {
        if let Some(result) = state.result() {
            println!("{}", serde_json::to_string_pretty(result)?);
        }
    } else {
        print_state(&state);
    }

    Ok(())
}

async fn widget() -> anyhow::Result<()> {
    let controller = controller_from_config()?;

    loop {
        let input = match Text::new("Enter a city name").prompt() {
            Ok(input) => input,
            Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => break,
            Err(err) => return Err(err.into()),
        };

        controller.set_query(&input);
        println!("Loading...");
        let outcome = controller.submit_query().await;
        debug!(query = %input, ?outcome, "widget submission settled");
        print_state(&controller.state());
        println!();
    }

    Ok(())
}

fn controller_from_config() -> anyhow::Result<SearchController> {
    let cfg = Config::load()?;
    let provider = provider_from_config(&cfg)?;
    Ok(SearchController::new(Arc::from(provider)))
}

fn print_state(state: &SearchState) {
    if let Some(message) = state.error_message() {
        println!("{message}");
    }

    if let Some(result) = state.result() {
        let view = WeatherView::render(result, &Local::now());
        for line in view.lines() {
            println!("{line}");
        }
    }
}
