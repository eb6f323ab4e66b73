//! Assistant endpoint DTOs
//!
//! Request bodies for the one-shot helpers (location finder, itinerary
//! planner, weather, restaurants and hotels). All of them answer with
//! [`AssistantResponse`].

use serde::{Deserialize, Serialize};

/// Body for `POST /location_finder`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocateRequest {
    /// Base64-encoded image bytes
    pub image: String,
}

/// Body for `POST /trip_planner`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItineraryRequest {
    /// Free text such as "Lisbon, 4 days"
    pub input: String,
    pub budget: String,
}

/// Body for `POST /weather_forecasting` and `POST /restaurant_hotel_planner`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationRequest {
    pub location: String,
}

/// Response of every assistant endpoint
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AssistantResponse {
    #[serde(default)]
    pub response: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}
