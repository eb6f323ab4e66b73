//! Configuration module
//!
//! Handles CLI configuration: backend URL, polling cadence, HTTP timeout and
//! output format.

use anyhow::{Context, Result};
use clap::ValueEnum;
use std::time::Duration;
use trip_client::{PollConfig, TripPlannerClient};

/// How committed views are written
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable, colored text
    Text,
    /// One JSON object per view
    Json,
}

/// CLI configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// URL of the trip planner backend
    pub base_url: String,

    /// Status polling cadence
    pub poll: PollConfig,

    /// Timeout applied to every HTTP request
    pub request_timeout: Duration,

    pub format: OutputFormat,
}

impl Config {
    /// Validates the configuration
    pub fn validate(&self) -> Result<()> {
        if self.base_url.is_empty() {
            anyhow::bail!("base_url cannot be empty");
        }

        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            anyhow::bail!("base_url must start with http:// or https://");
        }

        if self.poll.interval.is_zero() {
            anyhow::bail!("poll interval must be greater than 0");
        }

        if self.poll.deadline < self.poll.interval {
            anyhow::bail!("poll deadline must not be shorter than the poll interval");
        }

        if self.request_timeout.is_zero() {
            anyhow::bail!("request timeout must be greater than 0");
        }

        Ok(())
    }

    /// Build the HTTP client for the configured backend
    pub fn client(&self) -> Result<TripPlannerClient> {
        let http = reqwest::Client::builder()
            .timeout(self.request_timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(TripPlannerClient::with_client(&self.base_url, http))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000".to_string(),
            poll: PollConfig::default(),
            request_timeout: Duration::from_secs(30),
            format: OutputFormat::Text,
        }
    }
}
