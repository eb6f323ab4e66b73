//! Trip Planner CLI
//!
//! Command-line front end for the trip planner service: submit a trip, follow
//! its generation, and ask the one-shot assistants.

mod commands;
mod config;
mod sink;

use anyhow::Result;
use clap::Parser;
use commands::{Commands, handle_command};
use config::{Config, OutputFormat};
use std::process::ExitCode;
use std::time::Duration;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
use trip_client::PollConfig;

#[derive(Parser)]
#[command(name = "trip")]
#[command(about = "AI trip planner CLI", long_about = None)]
struct Cli {
    /// Trip planner backend URL
    #[arg(
        long,
        global = true,
        env = "TRIP_PLANNER_URL",
        default_value = "http://localhost:5000"
    )]
    base_url: String,

    /// Wait between two status checks, in milliseconds
    #[arg(long, global = true, env = "TRIP_POLL_INTERVAL_MS", default_value_t = 5_000)]
    poll_interval_ms: u64,

    /// Give up waiting for a plan after this many milliseconds
    #[arg(long, global = true, env = "TRIP_POLL_DEADLINE_MS", default_value_t = 300_000)]
    deadline_ms: u64,

    /// Timeout for each HTTP request, in seconds
    #[arg(long, global = true, env = "TRIP_REQUEST_TIMEOUT_SECS", default_value_t = 30)]
    request_timeout_secs: u64,

    /// Output format
    #[arg(short, long, global = true, value_enum, default_value = "text")]
    output: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    fn config(&self) -> Config {
        Config {
            base_url: self.base_url.clone(),
            poll: PollConfig {
                interval: Duration::from_millis(self.poll_interval_ms),
                deadline: Duration::from_millis(self.deadline_ms),
            },
            request_timeout: Duration::from_secs(self.request_timeout_secs),
            format: self.output,
        }
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    // Logs go to stderr so JSON output on stdout stays clean
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "trip_cli=warn,trip_client=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let config = cli.config();
    config.validate()?;

    handle_command(cli.command, &config).await
}
