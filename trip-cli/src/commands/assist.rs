//! Assistant command handlers
//!
//! One-shot questions answered with generated text: photo location,
//! free-text itinerary, weather and restaurant/hotel picks.

use anyhow::{Context, Result};
use clap::Subcommand;
use std::path::PathBuf;
use std::process::ExitCode;
use trip_core::ViewSink;
use trip_core::render::{LOADING_MESSAGE, render_failure, render_text};
use trip_core::View;

use crate::config::Config;
use crate::sink::TerminalSink;

/// Assistant subcommands
#[derive(Subcommand)]
pub enum AssistCommands {
    /// Identify the place shown in a photo
    Locate {
        /// Path to a JPEG or PNG image
        image: PathBuf,
    },
    /// Plan an itinerary from free text (e.g. "Lisbon, 4 days")
    Itinerary {
        input: String,

        /// Budget in dollars
        #[arg(long)]
        budget: String,
    },
    /// Seven-day weather forecast for a location
    Weather { location: String },
    /// Restaurant and hotel recommendations for a location
    Stays { location: String },
}

/// Handle assistant commands
pub async fn handle_assist_command(command: AssistCommands, config: &Config) -> Result<ExitCode> {
    let client = config.client()?;
    let mut sink = TerminalSink::stdout(config.format);

    sink.commit(View::Loading {
        message: LOADING_MESSAGE.to_string(),
    });

    let (title, answer) = match command {
        AssistCommands::Locate { image } => {
            let bytes = tokio::fs::read(&image)
                .await
                .with_context(|| format!("Failed to read image {}", image.display()))?;
            ("Location", client.locate(&bytes).await)
        }
        AssistCommands::Itinerary { input, budget } => {
            ("Itinerary", client.plan_itinerary(&input, &budget).await)
        }
        AssistCommands::Weather { location } => {
            ("Weather Forecast", client.forecast_weather(&location).await)
        }
        AssistCommands::Stays { location } => (
            "Restaurants & Hotels",
            client.recommend_stays(&location).await,
        ),
    };

    match answer {
        Ok(text) => {
            sink.commit(render_text(title, &text));
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            tracing::warn!("{} request failed: {}", title, e);
            sink.commit(render_failure(e.failure_kind(), e.user_message()));
            Ok(ExitCode::FAILURE)
        }
    }
}
