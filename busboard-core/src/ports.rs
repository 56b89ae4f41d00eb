//! Traits describing provider capabilities and shared helper types.

use async_trait::async_trait;
use chrono::ParseError as ChronoParseError;
use reqwest::Error as ReqwestError;

use crate::model::ForecastBundle;

#[derive(thiserror::Error, Debug)]
/// Errors that can occur while talking to weather backends.
pub enum PortError {
    /// Network layer failed or the backend answered with an error status.
    #[error("Network error: {0}")]
    Network(#[from] ReqwestError),
    /// Failed to parse a timestamp from the backend response.
    #[error("Parse error: {0}")]
    Parse(#[from] ChronoParseError),
    /// The response decoded but did not have the expected shape.
    #[error("Unexpected payload: {0}")]
    Payload(String),
}

#[async_trait]
/// Source of the published multi-day forecast.
pub trait ForecastPort: Send + Sync {
    /// Fetch the latest forecast fields.
    ///
    /// # Errors
    ///
    /// Returns a [`PortError`] when the request fails or the document cannot be decoded.
    async fn forecast(&self) -> Result<ForecastBundle, PortError>;
}

#[async_trait]
/// Source of the live temperature observation.
pub trait ObservationPort: Send + Sync {
    /// Latest observed temperature in degrees Celsius, if the station reported one.
    ///
    /// # Errors
    ///
    /// Returns a [`PortError`] when the request fails or the document cannot be decoded.
    async fn current_temperature(&self) -> Result<Option<f64>, PortError>;
}
