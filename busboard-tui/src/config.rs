use std::path::{Path, PathBuf};

use busboard_core::model::Timetable;
use busboard_provider_jma::JmaSettings;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct Config {
    /// Hour → departure minutes for the stop shown on the board.
    pub timetable: Timetable,
    #[serde(default)]
    pub weather: JmaSettings,
    #[serde(default = "default_departures_shown")]
    pub departures_shown: usize,
    #[serde(default = "default_forecast_refresh_secs")]
    pub forecast_refresh_secs: u64,
    /// Redraw interval; also bounds input latency.
    #[serde(default = "default_tick_millis")]
    pub tick_millis: u64,
    #[serde(default = "default_log_file")]
    pub log_file: PathBuf,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_departures_shown() -> usize {
    3
}

fn default_forecast_refresh_secs() -> u64 {
    60 * 60
}

fn default_tick_millis() -> u64 {
    250
}

fn default_log_file() -> PathBuf {
    PathBuf::from("busboard.log")
}

fn default_user_agent() -> String {
    "busboard/0.1".to_owned()
}

impl Config {
    pub(crate) fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|err| ConfigError::ReadError(err.to_string()))?;

        Self::from_yaml(&content)
    }

    pub(crate) fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(content)
            .map_err(|err| ConfigError::ParseError(err.to_string()))?;

        if config.departures_shown == 0 {
            return Err(ConfigError::Invalid(
                "departures_shown must be at least 1".to_owned(),
            ));
        }
        if config.forecast_refresh_secs == 0 || config.tick_millis == 0 {
            return Err(ConfigError::Invalid(
                "forecast_refresh_secs and tick_millis must be positive".to_owned(),
            ));
        }

        Ok(config)
    }
}

#[derive(Debug, thiserror::Error)]
pub(crate) enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(String),
    #[error("Failed to parse config: {0}")]
    ParseError(String),
    #[error("Invalid config: {0}")]
    Invalid(String),
}

#[cfg(test)]
mod tests {
    use busboard_core::schedule::next_departures;

    use super::*;

    #[test]
    fn minimal_config_uses_defaults() {
        let config = Config::from_yaml(
            "timetable:\n  8: [40, 10]\n  9: [0, 30]\n",
        )
        .unwrap();

        assert_eq!(config.departures_shown, 3);
        assert_eq!(config.forecast_refresh_secs, 3600);
        assert_eq!(config.weather.amedas_station, "46106");
        assert_eq!(config.weather.forecast_area, "東部");
        assert_eq!(config.log_file, PathBuf::from("busboard.log"));
        assert_eq!(next_departures(&config.timetable, 8, 15, 3).len(), 3);
    }

    #[test]
    fn weather_section_overrides_single_fields() {
        let config = Config::from_yaml(
            "timetable: {}\nweather:\n  amedas_station: \"46211\"\n  temperature_point: 小田原\n",
        )
        .unwrap();

        assert_eq!(config.weather.amedas_station, "46211");
        assert_eq!(config.weather.temperature_point, "小田原");
        assert_eq!(config.weather.forecast_area, "東部");
        assert!(config.timetable.is_empty());
    }

    #[test]
    fn rejects_bad_timetable_and_limits() {
        assert!(matches!(
            Config::from_yaml("timetable:\n  25: [0]\n"),
            Err(ConfigError::ParseError(_))
        ));
        assert!(matches!(
            Config::from_yaml("timetable: {}\ndepartures_shown: 0\n"),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            Config::from_yaml("departures_shown: 2\n"),
            Err(ConfigError::ParseError(_))
        ));
    }
}
