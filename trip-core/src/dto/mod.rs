//! Data Transfer Objects for the trip planner HTTP API
//!
//! These mirror the JSON bodies exchanged with the backend. Conversion into
//! domain types happens here so the client never handles raw status strings.

pub mod assistant;
pub mod generate;

use serde::{Deserialize, Serialize};

/// Error body returned by every endpoint on failure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}
