//! High-level service facade combining the timetable and weather ports.

use std::sync::Arc;

use chrono::NaiveDateTime;
use tracing::{debug, warn};

use crate::forecast::resolve_bundle;
use crate::model::{ResolvedForecast, Timetable, UpcomingDeparture};
use crate::plugin::WeatherPlugin;
use crate::ports::{ForecastPort, ObservationPort, PortError};
use crate::schedule;

/// Public entry point for departures and weather used by the kiosk host.
pub struct DashboardService {
    timetable: Timetable,
    provider: String,
    forecast_port: Arc<dyn ForecastPort>,
    observation_port: Arc<dyn ObservationPort>,
}

impl DashboardService {
    /// Create a new service for a timetable and a weather provider.
    #[must_use]
    pub fn new(timetable: Timetable, plugin: WeatherPlugin) -> Self {
        Self {
            timetable,
            provider: plugin.name,
            forecast_port: plugin.forecast_port,
            observation_port: plugin.observation_port,
        }
    }

    /// The timetable departures are selected from.
    #[must_use]
    pub fn timetable(&self) -> &Timetable {
        &self.timetable
    }

    /// Up to `count` departures after `now`, with countdowns.
    #[must_use]
    pub fn departures(&self, now: NaiveDateTime, count: usize) -> Vec<UpcomingDeparture> {
        schedule::upcoming(&self.timetable, now, count)
    }

    /// Fetch the forecast and the live observation concurrently and resolve them.
    ///
    /// A failed observation only blanks today's temperature.
    ///
    /// # Errors
    ///
    /// Returns a [`PortError`] when the forecast itself cannot be fetched.
    pub async fn refresh_forecast(&self) -> Result<ResolvedForecast, PortError> {
        let (forecast, observed) = futures::join!(
            self.forecast_port.forecast(),
            self.observation_port.current_temperature()
        );

        let observed = observed.unwrap_or_else(|err| {
            warn!(provider = %self.provider, error = %err, "Observation fetch failed");
            None
        });
        let bundle = forecast?;

        debug!(
            provider = %self.provider,
            conditions = bundle.conditions.len(),
            temps = bundle.temps.len(),
            observed = ?observed,
            "Resolving forecast"
        );

        Ok(resolve_bundle(&bundle, observed))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use async_trait::async_trait;
    use chrono::NaiveDate;

    use super::*;
    use crate::model::{Departure, ForecastBundle};

    struct FixedForecast(Option<ForecastBundle>);

    #[async_trait]
    impl ForecastPort for FixedForecast {
        async fn forecast(&self) -> Result<ForecastBundle, PortError> {
            self.0
                .clone()
                .ok_or_else(|| PortError::Payload("no forecast".to_owned()))
        }
    }

    struct FixedObservation(Option<f64>);

    #[async_trait]
    impl ObservationPort for FixedObservation {
        async fn current_temperature(&self) -> Result<Option<f64>, PortError> {
            self.0
                .ok_or_else(|| PortError::Payload("station offline".to_owned()))
                .map(Some)
        }
    }

    fn service(forecast: Option<ForecastBundle>, observed: Option<f64>) -> DashboardService {
        let hours: BTreeMap<u32, Vec<u32>> = [(8, vec![10, 40]), (9, vec![0, 30])].into();
        DashboardService::new(
            Timetable::new(hours).unwrap(),
            WeatherPlugin {
                name: "test".to_owned(),
                forecast_port: Arc::new(FixedForecast(forecast)),
                observation_port: Arc::new(FixedObservation(observed)),
            },
        )
    }

    fn bundle() -> ForecastBundle {
        ForecastBundle {
            conditions: vec!["晴れ".to_owned(), "くもり".to_owned()],
            temps: vec![Some(15), Some(22), Some(16), Some(23)],
            far_condition: Some("雨".to_owned()),
            far_min: Some(11),
            far_max: Some(18),
        }
    }

    #[tokio::test]
    async fn refresh_combines_forecast_and_observation() {
        let resolved = service(Some(bundle()), Some(20.7))
            .refresh_forecast()
            .await
            .unwrap();

        assert_eq!(resolved.today.temperature, Some(20));
        assert_eq!(resolved.tomorrow.range_label(), "16℃ / 23℃");
        assert_eq!(resolved.day_after.range_label(), "11℃ / 18℃");
        assert_eq!(resolved.day_after.condition.as_deref(), Some("雨"));
    }

    #[tokio::test]
    async fn failed_observation_blanks_today_only() {
        let resolved = service(Some(bundle()), None)
            .refresh_forecast()
            .await
            .unwrap();

        assert_eq!(resolved.today.temperature, None);
        assert_eq!(resolved.today.condition.as_deref(), Some("晴れ"));
        assert_eq!(resolved.tomorrow.min, Some(16));
    }

    #[tokio::test]
    async fn failed_forecast_aborts_refresh() {
        let result = service(None, Some(3.0)).refresh_forecast().await;

        assert!(matches!(result, Err(PortError::Payload(_))));
    }

    #[test]
    fn departures_use_the_timetable() {
        let now = NaiveDate::from_ymd_opt(2025, 12, 11)
            .unwrap()
            .and_hms_opt(8, 15, 0)
            .unwrap();

        let departures: Vec<Departure> = service(None, None)
            .departures(now, 3)
            .into_iter()
            .map(|upcoming| upcoming.departure)
            .collect();

        assert_eq!(
            departures,
            vec![
                Departure { hour: 8, minute: 40 },
                Departure { hour: 9, minute: 0 },
                Departure { hour: 9, minute: 30 },
            ]
        );
    }
}
