//! Digital labels and analog hand angles for the kiosk clock.

use chrono::{NaiveDateTime, Timelike};

/// Digital time of day, `HH:MM:SS`.
#[must_use]
pub fn time_label(now: NaiveDateTime) -> String {
    now.format("%H:%M:%S").to_string()
}

/// Calendar date with weekday, e.g. `2025.12.11 (Thu)`.
#[must_use]
pub fn date_label(now: NaiveDateTime) -> String {
    now.format("%Y.%m.%d (%a)").to_string()
}

#[derive(Debug, Clone, Copy, PartialEq)]
/// Hand angles in degrees, clockwise from twelve o'clock.
pub struct HandAngles {
    /// Hour hand, advancing half a degree per minute.
    pub hour: f64,
    /// Minute hand, advancing a tenth of a degree per second.
    pub minute: f64,
    /// Second hand.
    pub second: f64,
}

impl HandAngles {
    /// Hand positions for the given wall-clock time.
    #[must_use]
    pub fn at(now: NaiveDateTime) -> Self {
        let hour = f64::from(now.hour() % 12);
        let minute = f64::from(now.minute());
        let second = f64::from(now.second());

        Self {
            hour: hour * 30.0 + minute * 0.5,
            minute: minute * 6.0 + second * 0.1,
            second: second * 6.0,
        }
    }
}

/// Tip of a hand of `length` at `degrees`, with twelve o'clock on +y.
#[must_use]
pub fn hand_tip(degrees: f64, length: f64) -> (f64, f64) {
    let radians = degrees.to_radians();
    (length * radians.sin(), length * radians.cos())
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn at(hour: u32, minute: u32, second: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 12, 11)
            .unwrap()
            .and_hms_opt(hour, minute, second)
            .unwrap()
    }

    #[test]
    fn labels_are_zero_padded() {
        let now = at(7, 5, 9);
        assert_eq!(time_label(now), "07:05:09");
        assert_eq!(date_label(now), "2025.12.11 (Thu)");
    }

    #[test]
    fn hands_follow_twelve_hour_dial() {
        let angles = HandAngles::at(at(15, 30, 30));

        assert!((angles.hour - 105.0).abs() < 1e-9, "hour {}", angles.hour);
        assert!((angles.minute - 183.0).abs() < 1e-9, "minute {}", angles.minute);
        assert!((angles.second - 180.0).abs() < 1e-9, "second {}", angles.second);
    }

    #[test]
    fn hand_tip_points_clockwise() {
        let (x, y) = hand_tip(90.0, 1.0);
        assert!((x - 1.0).abs() < 1e-9 && y.abs() < 1e-9, "three o'clock at ({x}, {y})");

        let (x, y) = hand_tip(0.0, 0.5);
        assert!(x.abs() < 1e-9 && (y - 0.5).abs() < 1e-9, "twelve o'clock at ({x}, {y})");
    }
}
