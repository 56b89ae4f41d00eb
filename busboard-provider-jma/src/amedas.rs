//! Live temperature from the AMeDAS observation map.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, FixedOffset};
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use busboard_core::ports::{ObservationPort, PortError};

use crate::{JmaSettings, fetch_json, fetch_text};

/// Observation map keyed by station id.
type ObservationMap = HashMap<String, StationObservation>;

/// Per-station readings; every element is `[value, quality flag]`.
#[derive(Debug, Deserialize)]
struct StationObservation {
    #[serde(default)]
    temp: Option<Vec<Option<f64>>>,
}

/// Observation port reading the station's latest AMeDAS temperature.
pub struct AmedasObservationPort {
    client: Client,
    settings: JmaSettings,
}

impl AmedasObservationPort {
    /// Create a new observation port bound to the given HTTP client.
    #[must_use]
    pub fn new(client: Client, settings: JmaSettings) -> Self {
        Self { client, settings }
    }
}

#[async_trait]
impl ObservationPort for AmedasObservationPort {
    async fn current_temperature(&self) -> Result<Option<f64>, PortError> {
        let latest = fetch_text(self.client.get(&self.settings.amedas_latest_time_url)).await?;
        let stamp = map_stamp(&latest)?;

        let url = format!("{}{stamp}.json", self.settings.amedas_map_url);
        let map = fetch_json::<ObservationMap>(self.client.get(url)).await?;

        let temperature = station_temperature(&map, &self.settings.amedas_station);
        debug!(
            station = %self.settings.amedas_station,
            %stamp,
            temperature = ?temperature,
            "Fetched AMeDAS observation"
        );
        Ok(temperature)
    }
}

/// Turn the published RFC 3339 timestamp into the `YYYYMMDDHHMMSS` map key,
/// keeping the timestamp's own offset.
fn map_stamp(latest: &str) -> Result<String, PortError> {
    let observed: DateTime<FixedOffset> = DateTime::parse_from_rfc3339(latest.trim())?;
    Ok(observed.format("%Y%m%d%H%M%S").to_string())
}

fn station_temperature(map: &ObservationMap, station: &str) -> Option<f64> {
    map.get(station)?.temp.as_ref()?.first().copied().flatten()
}
