//! Next-departure selection over a same-day timetable.

use chrono::{NaiveDateTime, Timelike};

use crate::model::{Countdown, Departure, Timetable, UpcomingDeparture};

/// Shown in place of departures once the last one of the day has left.
pub const SERVICE_ENDED: &str = "本日の運行は終了しました";

/// Collect up to `count` departures strictly after `now_hour:now_minute`.
///
/// Hours are walked in ascending order and the search never wraps into the
/// next day, so an empty result means service has ended for today.
#[must_use]
pub fn next_departures(
    timetable: &Timetable,
    now_hour: u32,
    now_minute: u32,
    count: usize,
) -> Vec<Departure> {
    timetable
        .iter()
        .filter(|(hour, _)| *hour >= now_hour)
        .flat_map(|(hour, minutes)| {
            minutes
                .iter()
                .filter(move |&&minute| hour > now_hour || minute > now_minute)
                .map(move |&minute| Departure { hour, minute })
        })
        .take(count)
        .collect()
}

/// Next departures after `now` with their countdowns.
///
/// Countdowns go stale every second, so callers re-run this on each tick
/// instead of caching the result.
#[must_use]
pub fn upcoming(timetable: &Timetable, now: NaiveDateTime, count: usize) -> Vec<UpcomingDeparture> {
    let today = now.date();

    next_departures(timetable, now.hour(), now.minute(), count)
        .into_iter()
        .filter_map(|departure| {
            let at = departure.on(today)?;
            Some(UpcomingDeparture {
                departure,
                countdown: Countdown::between(now, at),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use chrono::NaiveDate;

    use super::*;

    fn timetable(entries: &[(u32, &[u32])]) -> Timetable {
        let hours: BTreeMap<u32, Vec<u32>> = entries
            .iter()
            .map(|(hour, minutes)| (*hour, minutes.to_vec()))
            .collect();
        Timetable::new(hours).unwrap()
    }

    fn dep(hour: u32, minute: u32) -> Departure {
        Departure { hour, minute }
    }

    #[test]
    fn picks_next_three_across_hours() {
        let table = timetable(&[(8, &[10, 40]), (9, &[0, 30])]);

        let next = next_departures(&table, 8, 15, 3);

        assert_eq!(next, vec![dep(8, 40), dep(9, 0), dep(9, 30)]);
    }

    #[test]
    fn current_minute_is_excluded() {
        let table = timetable(&[(8, &[10, 40])]);

        assert_eq!(next_departures(&table, 8, 10, 3), vec![dep(8, 40)]);
        assert_eq!(next_departures(&table, 8, 9, 1), vec![dep(8, 10)]);
    }

    #[test]
    fn earlier_hours_are_skipped_even_with_larger_minutes() {
        let table = timetable(&[(7, &[55]), (10, &[5])]);

        assert_eq!(next_departures(&table, 9, 0, 3), vec![dep(10, 5)]);
    }

    #[test]
    fn returns_what_is_left_without_padding() {
        let table = timetable(&[(22, &[0, 30]), (23, &[10])]);

        assert_eq!(next_departures(&table, 23, 0, 3), vec![dep(23, 10)]);
        assert!(next_departures(&table, 23, 10, 3).is_empty());
        assert!(next_departures(&Timetable::default(), 0, 0, 3).is_empty());
    }

    #[test]
    fn results_are_strictly_after_now_and_ordered() {
        let table = timetable(&[
            (5, &[50]),
            (6, &[5, 20, 35, 50]),
            (7, &[0, 10, 20, 30, 40, 50]),
            (12, &[15]),
            (21, &[45]),
        ]);

        for hour in 0..24 {
            for minute in 0..60 {
                let next = next_departures(&table, hour, minute, 5);
                assert!(next.len() <= 5, "never more than requested");
                assert!(
                    next.iter().all(|departure| *departure > dep(hour, minute)),
                    "departure before {hour}:{minute:02}"
                );
                assert!(
                    next.windows(2).all(|pair| pair.first() <= pair.last()),
                    "out of order at {hour}:{minute:02}"
                );
            }
        }
    }

    #[test]
    fn upcoming_attaches_countdowns() {
        let table = timetable(&[(8, &[10, 40]), (9, &[0, 30])]);
        let now = NaiveDate::from_ymd_opt(2025, 12, 11)
            .unwrap()
            .and_hms_opt(8, 15, 20)
            .unwrap();

        let upcoming = upcoming(&table, now, 2);

        let countdowns: Vec<(i64, i64)> = upcoming
            .iter()
            .map(|entry| (entry.countdown.minutes, entry.countdown.seconds))
            .collect();
        assert_eq!(countdowns, vec![(24, 40), (44, 40)]);
        assert_eq!(upcoming.first().map(|entry| entry.departure), Some(dep(8, 40)));
    }
}
