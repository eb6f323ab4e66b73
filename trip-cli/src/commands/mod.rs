//! Commands module
//!
//! Defines all CLI commands and their handlers.

mod assist;
mod plan;

pub use assist::AssistCommands;
pub use plan::PlanArgs;

use anyhow::Result;
use clap::Subcommand;
use std::path::PathBuf;
use std::process::ExitCode;

use crate::config::Config;

/// Top-level CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Plan a trip and wait for the result
    Plan(PlanArgs),
    /// Resume waiting for a trip plan submitted earlier
    Status {
        /// Request ID returned when the trip was submitted
        request_id: String,

        /// Save the generated PDF to this path once the plan is ready
        #[arg(long)]
        pdf_out: Option<PathBuf>,
    },
    #[command(flatten)]
    Assist(AssistCommands),
}

/// Handle a CLI command
///
/// Routes the command to the appropriate handler module.
///
/// # Returns
/// The process exit code: failure whenever a failure view was shown
pub async fn handle_command(command: Commands, config: &Config) -> Result<ExitCode> {
    match command {
        Commands::Plan(args) => plan::handle_plan(args, config).await,
        Commands::Status {
            request_id,
            pdf_out,
        } => plan::handle_status(request_id, pdf_out, config).await,
        Commands::Assist(command) => assist::handle_assist_command(command, config).await,
    }
}
