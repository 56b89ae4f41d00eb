use busboard_core::{model::ResolvedForecast, ports::PortError};
use chrono::NaiveDateTime;
use tracing::{error, info};

/// Startup loading indicator; hidden once the first forecast attempt settles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Progress {
    pub percent: u16,
    pub message: &'static str,
}

impl Progress {
    pub(crate) fn is_done(&self) -> bool {
        self.percent >= 100
    }
}

pub(crate) struct App {
    pub departures_shown: usize,

    /// Last successfully resolved forecast; kept when later refreshes fail.
    pub forecast: Option<ResolvedForecast>,
    pub forecast_updated: Option<NaiveDateTime>,

    pub progress: Progress,
    pub refreshes_in_flight: usize,
    pub error_message: Option<String>,
}

impl App {
    pub(crate) fn new(departures_shown: usize) -> Self {
        Self {
            departures_shown,
            forecast: None,
            forecast_updated: None,
            progress: Progress {
                percent: 10,
                message: "Initializing System...",
            },
            refreshes_in_flight: 0,
            error_message: None,
        }
    }

    pub(crate) fn begin_refresh(&mut self) {
        self.refreshes_in_flight += 1;
        if !self.progress.is_done() {
            self.progress = Progress {
                percent: 40,
                message: "Loading Weather...",
            };
        }
    }

    pub(crate) fn finish_refresh(
        &mut self,
        result: Result<ResolvedForecast, PortError>,
        now: NaiveDateTime,
    ) {
        self.refreshes_in_flight = self.refreshes_in_flight.saturating_sub(1);

        match result {
            Ok(forecast) => {
                info!(
                    today = forecast.today.condition_label(),
                    temperature = ?forecast.today.temperature,
                    "Weather updated"
                );
                self.forecast = Some(forecast);
                self.forecast_updated = Some(now);
                self.error_message = None;
                self.progress = Progress {
                    percent: 100,
                    message: "Ready!",
                };
            }
            Err(err) => {
                error!(error = %err, "Weather fetch failed");
                self.error_message = Some(format!("Weather fetch failed: {err}"));
                self.progress = Progress {
                    percent: 100,
                    message: "Weather Load Failed.",
                };
            }
        }
    }

    pub(crate) fn is_refreshing(&self) -> bool {
        self.refreshes_in_flight > 0
    }
}

#[cfg(test)]
mod tests {
    use busboard_core::model::{DayOutlook, TodayWeather};
    use chrono::NaiveDate;

    use super::*;

    fn at(hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 12, 11)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    fn forecast(temperature: i32) -> ResolvedForecast {
        ResolvedForecast {
            today: TodayWeather {
                condition: Some("晴れ".to_owned()),
                temperature: Some(temperature),
            },
            tomorrow: DayOutlook::default(),
            day_after: DayOutlook::default(),
        }
    }

    #[test]
    fn first_refresh_walks_the_progress_bar() {
        let mut app = App::new(3);
        assert_eq!(app.progress.percent, 10);

        app.begin_refresh();
        assert_eq!(app.progress.percent, 40);
        assert!(app.is_refreshing());

        app.finish_refresh(Ok(forecast(12)), at(9));
        assert!(app.progress.is_done());
        assert_eq!(app.progress.message, "Ready!");
        assert!(!app.is_refreshing());
        assert_eq!(app.forecast_updated, Some(at(9)));
    }

    #[test]
    fn failed_refresh_keeps_stale_forecast() {
        let mut app = App::new(3);
        app.begin_refresh();
        app.finish_refresh(Ok(forecast(12)), at(9));

        app.begin_refresh();
        assert_eq!(app.progress.percent, 100, "loader is not shown again");
        app.finish_refresh(Err(PortError::Payload("boom".to_owned())), at(10));

        assert_eq!(app.forecast, Some(forecast(12)));
        assert_eq!(app.forecast_updated, Some(at(9)));
        assert!(app.error_message.is_some());

        app.begin_refresh();
        app.finish_refresh(Ok(forecast(14)), at(11));
        assert_eq!(app.forecast, Some(forecast(14)));
        assert_eq!(app.error_message, None);
    }

    #[test]
    fn first_failure_still_settles_the_loader() {
        let mut app = App::new(3);
        app.begin_refresh();
        app.finish_refresh(Err(PortError::Payload("offline".to_owned())), at(9));

        assert_eq!(app.progress.message, "Weather Load Failed.");
        assert_eq!(app.forecast, None);
    }
}
