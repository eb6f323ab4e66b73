//! Assistant endpoints
//!
//! One-shot helpers that answer with generated text in a single round trip.
//! There is no polling here; a failure is final.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use trip_core::ValidationError;
use trip_core::dto::assistant::{
    AssistantResponse, ItineraryRequest, LocateRequest, LocationRequest,
};
use trip_core::form::require;

use crate::TripPlannerClient;
use crate::error::{ClientError, Result};

impl TripPlannerClient {
    /// Describe the place shown in a photo
    ///
    /// # Arguments
    /// * `image` - Raw image bytes; they are base64-encoded for transport
    pub async fn locate(&self, image: &[u8]) -> Result<String> {
        if image.is_empty() {
            return Err(ValidationError::MissingFields(vec!["image"]).into());
        }

        let body = LocateRequest {
            image: STANDARD.encode(image),
        };
        self.ask("location_finder", &body).await
    }

    /// Plan an itinerary from free text such as "Lisbon, 4 days"
    pub async fn plan_itinerary(&self, input: &str, budget: &str) -> Result<String> {
        let body = ItineraryRequest {
            input: require("input", input)?,
            budget: require("budget", budget)?,
        };
        self.ask("trip_planner", &body).await
    }

    /// Seven-day weather forecast for a location
    pub async fn forecast_weather(&self, location: &str) -> Result<String> {
        let body = LocationRequest {
            location: require("location", location)?,
        };
        self.ask("weather_forecasting", &body).await
    }

    /// Restaurant and hotel recommendations for a location
    pub async fn recommend_stays(&self, location: &str) -> Result<String> {
        let body = LocationRequest {
            location: require("location", location)?,
        };
        self.ask("restaurant_hotel_planner", &body).await
    }

    async fn ask<B: serde::Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<String> {
        let url = self.url(path);
        let response = self.client.post(&url).json(body).send().await?;

        let status = response.status().as_u16();
        let answer: AssistantResponse = self.handle_response(response).await?;

        into_text(status, answer)
    }
}

/// The backend reports generation failures as `{error}` even with a 200
fn into_text(status: u16, answer: AssistantResponse) -> Result<String> {
    if let Some(error) = answer.error {
        return Err(ClientError::server(status, error));
    }

    answer
        .response
        .ok_or_else(|| ClientError::Protocol("response carried no text".to_string()))
}
