//! Resolution of positional forecast temperatures and display labels.
//!
//! Short-range temperature arrays carry no explicit day markers. Their layout
//! shifts with the publication time of the forecast, so the resolver infers it
//! from the array length and the wording of today's condition. This is a
//! heuristic: a layout it has not seen resolves to unknown values instead of
//! wrong ones.

use crate::model::{DayOutlook, ForecastBundle, ResolvedForecast, Sky, TodayWeather};

/// Wording that marks today's condition as the late-night ("tonight") variant.
pub const LATE_NIGHT_MARKER: &str = "今夜";

/// Placeholder rendered for any unknown field.
pub const UNKNOWN: &str = "-";

/// Resolve forecast fields into today/tomorrow/day-after rows.
///
/// Today's temperature comes from `current_observed` only; the forecast
/// temperatures are never used for today. Day-after temperatures come from the
/// extended-range values. Never fails: each missing field becomes `None`.
#[must_use]
pub fn resolve_forecast(
    conditions: &[String],
    temps: &[Option<i32>],
    far_condition: Option<&str>,
    far_min: Option<i32>,
    far_max: Option<i32>,
    current_observed: Option<f64>,
) -> ResolvedForecast {
    let today_condition = condition_at(conditions, 0);
    let (tomorrow_min, tomorrow_max) = tomorrow_range(today_condition.as_deref(), temps);

    ResolvedForecast {
        today: TodayWeather {
            condition: today_condition,
            temperature: current_observed.and_then(floor_degrees),
        },
        tomorrow: DayOutlook {
            condition: condition_at(conditions, 1),
            min: tomorrow_min,
            max: tomorrow_max,
        },
        day_after: DayOutlook {
            condition: condition_at(conditions, 2).or_else(|| {
                far_condition
                    .filter(|text| !text.trim().is_empty())
                    .map(ToOwned::to_owned)
            }),
            min: far_min,
            max: far_max,
        },
    }
}

/// [`resolve_forecast`] over a fetched bundle.
#[must_use]
pub fn resolve_bundle(bundle: &ForecastBundle, current_observed: Option<f64>) -> ResolvedForecast {
    resolve_forecast(
        &bundle.conditions,
        &bundle.temps,
        bundle.far_condition.as_deref(),
        bundle.far_min,
        bundle.far_max,
        current_observed,
    )
}

/// Whether a condition text is the late-night variant of today's forecast.
#[must_use]
pub fn is_late_night(condition: &str) -> bool {
    condition.contains(LATE_NIGHT_MARKER)
}

fn condition_at(conditions: &[String], index: usize) -> Option<String> {
    conditions
        .get(index)
        .filter(|text| !text.trim().is_empty())
        .cloned()
}

// Layouts by length:
//   4, morning:    [today min, today max, tomorrow min, tomorrow max]
//   4, late night: [tomorrow min, tomorrow max, day-after min, day-after max]
//   3:             [today max, tomorrow min, tomorrow max]
//   2:             [tomorrow min, tomorrow max]
fn tomorrow_range(today: Option<&str>, temps: &[Option<i32>]) -> (Option<i32>, Option<i32>) {
    let late_night = today.is_some_and(is_late_night);

    match temps {
        [_, _, min, max] if !late_night => (*min, *max),
        [min, max, _, _] | [_, min, max] | [min, max] => (*min, *max),
        _ => (None, None),
    }
}

#[expect(
    clippy::cast_possible_truncation,
    reason = "finite observed temperatures are far inside the i32 range"
)]
fn floor_degrees(value: f64) -> Option<i32> {
    value.is_finite().then(|| value.floor() as i32)
}

impl Sky {
    /// Classify condition text; the first matching keyword wins.
    #[must_use]
    pub fn from_condition(condition: Option<&str>) -> Self {
        let Some(text) = condition.filter(|text| !text.is_empty()) else {
            return Self::Unknown;
        };

        if text.contains('晴') {
            Self::Sunny
        } else if text.contains('雪') {
            Self::Snow
        } else if text.contains('雷') {
            Self::Thunder
        } else if text.contains('雨') {
            Self::Rain
        } else if text.contains('曇') || text.contains("くもり") {
            Self::Cloudy
        } else {
            Self::PartlyCloudy
        }
    }
}

impl TodayWeather {
    /// Condition text or the unknown placeholder.
    #[must_use]
    pub fn condition_label(&self) -> &str {
        self.condition.as_deref().unwrap_or(UNKNOWN)
    }

    /// Single observed temperature such as `20℃`, or `--`.
    #[must_use]
    pub fn temperature_label(&self) -> String {
        self.temperature
            .map_or_else(|| "--".to_owned(), |value| format!("{value}℃"))
    }

    /// Icon category for the condition.
    #[must_use]
    pub fn sky(&self) -> Sky {
        Sky::from_condition(self.condition.as_deref())
    }
}

impl DayOutlook {
    /// Condition text or the unknown placeholder.
    #[must_use]
    pub fn condition_label(&self) -> &str {
        self.condition.as_deref().unwrap_or(UNKNOWN)
    }

    /// Min/max pair such as `15℃ / 20℃`; each unknown side renders as `-`.
    #[must_use]
    pub fn range_label(&self) -> String {
        format!("{} / {}", degrees(self.min), degrees(self.max))
    }

    /// Icon category for the condition.
    #[must_use]
    pub fn sky(&self) -> Sky {
        Sky::from_condition(self.condition.as_deref())
    }
}

fn degrees(value: Option<i32>) -> String {
    value.map_or_else(|| UNKNOWN.to_owned(), |degrees| format!("{degrees}℃"))
}
