//! Short-range and weekly forecast documents.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use busboard_core::{
    model::ForecastBundle,
    ports::{ForecastPort, PortError},
};

use crate::{JmaSettings, fetch_json};

const FULL_WIDTH_SPACE: char = '\u{3000}';

/// One report of the forecast document; the first is short-range, the second weekly.
#[derive(Debug, Deserialize)]
pub(crate) struct ForecastReport {
    #[serde(rename = "timeSeries", default)]
    time_series: Vec<TimeSeries>,
}

#[derive(Debug, Deserialize)]
struct TimeSeries {
    #[serde(default)]
    areas: Vec<AreaSeries>,
}

/// Per-area values; which arrays are present depends on the series.
#[derive(Debug, Deserialize)]
struct AreaSeries {
    area: AreaName,
    #[serde(default)]
    weathers: Vec<String>,
    #[serde(rename = "weatherCodes", default)]
    weather_codes: Vec<String>,
    #[serde(default)]
    temps: Vec<String>,
    #[serde(rename = "tempsMin", default)]
    temps_min: Vec<String>,
    #[serde(rename = "tempsMax", default)]
    temps_max: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct AreaName {
    name: String,
}

/// Forecast port reading the prefecture forecast document.
pub struct JmaForecastPort {
    client: Client,
    settings: JmaSettings,
}

impl JmaForecastPort {
    /// Create a new forecast port bound to the given HTTP client.
    #[must_use]
    pub fn new(client: Client, settings: JmaSettings) -> Self {
        Self { client, settings }
    }
}

#[async_trait]
impl ForecastPort for JmaForecastPort {
    async fn forecast(&self) -> Result<ForecastBundle, PortError> {
        let reports =
            fetch_json::<Vec<ForecastReport>>(self.client.get(&self.settings.forecast_url)).await?;

        let bundle = bundle_from_reports(&reports, &self.settings)?;
        debug!(
            area = %self.settings.forecast_area,
            point = %self.settings.temperature_point,
            conditions = bundle.conditions.len(),
            temps = bundle.temps.len(),
            "Fetched JMA forecast"
        );
        Ok(bundle)
    }
}

/// Pick the configured area and point out of the forecast reports.
///
/// Missing series, areas, or points leave their fields empty; only a document
/// without a short-range report is rejected.
pub(crate) fn bundle_from_reports(
    reports: &[ForecastReport],
    settings: &JmaSettings,
) -> Result<ForecastBundle, PortError> {
    let short = reports
        .first()
        .ok_or_else(|| PortError::Payload("forecast document has no reports".to_owned()))?;
    let weekly = reports.get(1);

    let conditions: Vec<String> = find_area(short, 0, &settings.forecast_area)
        .map(|area| {
            area.weathers
                .iter()
                .map(|text| text.replace(FULL_WIDTH_SPACE, " "))
                .collect()
        })
        .unwrap_or_default();

    let temps: Vec<Option<i32>> = find_area(short, 2, &settings.temperature_point)
        .map(|point| point.temps.iter().map(|value| parse_degrees(value)).collect())
        .unwrap_or_default();

    // Weekly series start at tomorrow, so index 1 is the day after.
    let far_point = weekly.and_then(|report| find_area(report, 1, &settings.temperature_point));
    let far_min = far_point
        .and_then(|point| point.temps_min.get(1))
        .and_then(|value| parse_degrees(value));
    let far_max = far_point
        .and_then(|point| point.temps_max.get(1))
        .and_then(|value| parse_degrees(value));
    let far_condition = weekly
        .and_then(|report| report.time_series.first())
        .and_then(|series| series.areas.first())
        .and_then(|area| area.weather_codes.get(1))
        .and_then(|code| weather_code_label(code))
        .map(ToOwned::to_owned);

    Ok(ForecastBundle {
        conditions,
        temps,
        far_condition,
        far_min,
        far_max,
    })
}

fn find_area<'report>(
    report: &'report ForecastReport,
    series: usize,
    name: &str,
) -> Option<&'report AreaSeries> {
    report
        .time_series
        .get(series)?
        .areas
        .iter()
        .find(|area| area.area.name == name)
}

fn parse_degrees(value: &str) -> Option<i32> {
    value.trim().parse().ok()
}

/// Coarse condition label for a JMA weather code, keyed on its leading digit.
fn weather_code_label(code: &str) -> Option<&'static str> {
    match code.trim().chars().next()? {
        '1' => Some("晴れ"),
        '2' => Some("くもり"),
        '3' => Some("雨"),
        '4' => Some("雪"),
        _ => None,
    }
}
