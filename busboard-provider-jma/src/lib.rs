//! Provider implementation for the Japan Meteorological Agency (JMA) feeds.
//!
//! The published forecast comes from the `bosai/forecast` documents and the
//! live temperature from the AMeDAS observation map.

mod amedas;
mod forecast;

use std::sync::Arc;

use reqwest::{Client, RequestBuilder};
use serde::Deserialize;
use serde::de::DeserializeOwned;

use busboard_core::{plugin::WeatherPlugin, ports::PortError};

pub use amedas::AmedasObservationPort;
pub use forecast::JmaForecastPort;

const FORECAST_URL: &str = "https://www.jma.go.jp/bosai/forecast/data/forecast/140000.json";
const AMEDAS_LATEST_TIME_URL: &str = "https://www.jma.go.jp/bosai/amedas/data/latest_time.txt";
const AMEDAS_MAP_URL: &str = "https://www.jma.go.jp/bosai/amedas/data/map/";

/// Endpoints and area names used to pick values out of the JMA documents.
///
/// Defaults point at Kanagawa: the eastern forecast area, the Yokohama
/// temperature point, and the Yokohama AMeDAS station.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct JmaSettings {
    /// Forecast document for the prefecture office.
    pub forecast_url: String,
    /// Plain-text timestamp of the latest AMeDAS observation.
    pub amedas_latest_time_url: String,
    /// Base URL of the AMeDAS map documents; the timestamp and `.json` are appended.
    pub amedas_map_url: String,
    /// AMeDAS station identifier.
    pub amedas_station: String,
    /// Area name carrying the condition texts.
    pub forecast_area: String,
    /// Point name carrying the temperatures.
    pub temperature_point: String,
}

impl Default for JmaSettings {
    fn default() -> Self {
        Self {
            forecast_url: FORECAST_URL.to_owned(),
            amedas_latest_time_url: AMEDAS_LATEST_TIME_URL.to_owned(),
            amedas_map_url: AMEDAS_MAP_URL.to_owned(),
            amedas_station: "46106".to_owned(),
            forecast_area: "東部".to_owned(),
            temperature_point: "横浜".to_owned(),
        }
    }
}

/// Build the plugin bundle for the JMA provider.
#[must_use]
pub fn plugin(client: Client, settings: JmaSettings) -> WeatherPlugin {
    let forecast_port = Arc::new(JmaForecastPort::new(client.clone(), settings.clone()));
    let observation_port = Arc::new(AmedasObservationPort::new(client, settings));

    WeatherPlugin {
        name: String::from("jma"),
        forecast_port,
        observation_port,
    }
}

// Small helper to fetch and decode JSON with status handling.
async fn fetch_json<T: DeserializeOwned>(req: RequestBuilder) -> Result<T, PortError> {
    req.send()
        .await
        .map_err(PortError::from)?
        .error_for_status()
        .map_err(PortError::from)?
        .json()
        .await
        .map_err(PortError::from)
}

async fn fetch_text(req: RequestBuilder) -> Result<String, PortError> {
    req.send()
        .await
        .map_err(PortError::from)?
        .error_for_status()
        .map_err(PortError::from)?
        .text()
        .await
        .map_err(PortError::from)
}
