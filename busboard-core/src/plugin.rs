//! Bundle of ports supplied by a weather provider.

use std::sync::Arc;

use crate::ports::{ForecastPort, ObservationPort};

/// Ports implementing a weather provider for one forecast area.
pub struct WeatherPlugin {
    /// Human-readable provider name used in logs.
    pub name: String,
    /// Implementation for fetching the published forecast.
    pub forecast_port: Arc<dyn ForecastPort>,
    /// Implementation for fetching the live observation.
    pub observation_port: Arc<dyn ObservationPort>,
}
