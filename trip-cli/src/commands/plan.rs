//! Trip plan command handlers
//!
//! Submits the trip form and follows the queued job until a result,
//! failure or timeout is shown. Ctrl-C cancels the wait.

use anyhow::{Context, Result};
use clap::Args;
use colored::*;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;
use trip_client::{PlanOutcome, PlanSession, TokioClock, TripPlannerClient};
use trip_core::TripForm;
use trip_core::domain::job::JobHandle;

use crate::config::Config;
use crate::sink::TerminalSink;

/// Trip form fields
///
/// Give either `--duration` or both `--from` and `--to`.
#[derive(Args, Debug)]
pub struct PlanArgs {
    /// Destination
    #[arg(long, default_value = "")]
    pub location: String,

    /// Budget in dollars
    #[arg(long, default_value = "")]
    pub budget: String,

    /// Trip length in days
    #[arg(long, conflicts_with_all = ["from", "to"])]
    pub duration: Option<String>,

    /// First day of travel (YYYY-MM-DD)
    #[arg(long)]
    pub from: Option<String>,

    /// Last day of travel (YYYY-MM-DD)
    #[arg(long)]
    pub to: Option<String>,

    /// Save the generated PDF to this path once the plan is ready
    #[arg(long)]
    pub pdf_out: Option<PathBuf>,
}

impl PlanArgs {
    /// The form these arguments describe
    ///
    /// Missing fields stay blank so validation reports them like the web form.
    pub fn to_form(&self) -> TripForm {
        if self.from.is_some() || self.to.is_some() {
            TripForm::DateRange {
                location: self.location.clone(),
                budget: self.budget.clone(),
                from_date: self.from.clone().unwrap_or_default(),
                to_date: self.to.clone().unwrap_or_default(),
            }
        } else {
            TripForm::Duration {
                location: self.location.clone(),
                duration: self.duration.clone().unwrap_or_default(),
                budget: self.budget.clone(),
            }
        }
    }
}

/// Submit a trip and wait for it
pub async fn handle_plan(args: PlanArgs, config: &Config) -> Result<ExitCode> {
    let form = args.to_form();
    let pdf_out = args.pdf_out;

    run_session(config, pdf_out.as_deref(), |session, mut sink| async move {
        session.plan(&form, &mut sink).await
    })
    .await
}

/// Resume waiting for a trip submitted earlier
pub async fn handle_status(
    request_id: String,
    pdf_out: Option<PathBuf>,
    config: &Config,
) -> Result<ExitCode> {
    let request_id = request_id.trim().to_string();
    if request_id.is_empty() {
        anyhow::bail!("request ID cannot be empty");
    }

    let handle = JobHandle::new(request_id);
    run_session(config, pdf_out.as_deref(), |session, mut sink| async move {
        session.resume(handle, &mut sink).await
    })
    .await
}

async fn run_session<F, Fut>(config: &Config, pdf_out: Option<&Path>, drive: F) -> Result<ExitCode>
where
    F: FnOnce(Arc<PlanSession>, TerminalSink<std::io::Stdout>) -> Fut,
    Fut: std::future::Future<Output = PlanOutcome>,
{
    let client = Arc::new(config.client()?);
    let session = Arc::new(PlanSession::new(
        client.clone(),
        Arc::new(TokioClock),
        config.poll,
    ));

    let interrupt = {
        let session = Arc::clone(&session);
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                session.cancel();
            }
        })
    };

    let outcome = drive(Arc::clone(&session), TerminalSink::stdout(config.format)).await;
    interrupt.abort();

    match outcome {
        PlanOutcome::Answered(_) => Ok(ExitCode::SUCCESS),
        PlanOutcome::Completed {
            handle, pdf_url, ..
        } => {
            if let Some(path) = pdf_out {
                save_pdf(&client, &handle, pdf_url.as_deref(), path).await?;
            }
            Ok(ExitCode::SUCCESS)
        }
        PlanOutcome::Failed { .. } => Ok(ExitCode::FAILURE),
        PlanOutcome::Cancelled => {
            eprintln!("{}", "Cancelled.".yellow());
            Ok(ExitCode::from(130))
        }
    }
}

async fn save_pdf(
    client: &TripPlannerClient,
    handle: &JobHandle,
    pdf_url: Option<&str>,
    path: &Path,
) -> Result<()> {
    let Some(url) = pdf_url else {
        eprintln!(
            "{}",
            format!("No PDF is available for request {}.", handle).yellow()
        );
        return Ok(());
    };

    let bytes = client
        .download_pdf(url)
        .await
        .with_context(|| format!("Failed to download PDF for request {}", handle))?;

    tokio::fs::write(path, &bytes)
        .await
        .with_context(|| format!("Failed to write PDF to {}", path.display()))?;

    eprintln!(
        "{} {}",
        "✓ PDF saved to".green(),
        path.display().to_string().bold()
    );
    Ok(())
}
