//! Short textual forms of durations shown next to games.

use chrono::{DateTime, Utc};

/// Formats `end - start` as `"{m}m{s}s"`.
///
/// Non-positive spans render as `"0s"`. The minutes part is dropped when zero
/// and wraps at one hour, matching the clock-style display of the leaderboard.
pub fn format_duration(start: DateTime<Utc>, end: DateTime<Utc>) -> String {
    let millis = (end - start).num_milliseconds();
    if millis <= 0 {
        return "0s".to_string();
    }

    let total_seconds = millis / 1000;
    let minutes = (total_seconds / 60) % 60;
    let seconds = total_seconds % 60;

    if minutes > 0 {
        format!("{}m{}s", minutes, seconds)
    } else {
        format!("{}s", seconds)
    }
}

/// Whole seconds elapsed from `start` to `now`, never negative.
pub fn seconds_since(start: DateTime<Utc>, now: DateTime<Utc>) -> u64 {
    u64::try_from((now - start).num_seconds()).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeDelta, TimeZone};

    fn at(seconds: i64) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap() + TimeDelta::seconds(seconds)
    }

    #[test]
    fn non_positive_spans_are_zero() {
        assert_eq!(format_duration(at(10), at(10)), "0s");
        assert_eq!(format_duration(at(10), at(0)), "0s");
    }

    #[test]
    fn minutes_omitted_when_zero() {
        assert_eq!(format_duration(at(0), at(42)), "42s");
        assert_eq!(format_duration(at(0), at(60)), "1m0s");
        assert_eq!(format_duration(at(0), at(125)), "2m5s");
    }

    #[test]
    fn minutes_wrap_at_one_hour() {
        assert_eq!(format_duration(at(0), at(3600 + 65)), "1m5s");
        assert_eq!(format_duration(at(0), at(3600)), "0s");
    }

    #[test]
    fn sub_second_span_rounds_down() {
        let start = at(0);
        let end = start + TimeDelta::milliseconds(400);
        assert_eq!(format_duration(start, end), "0s");
    }

    #[test]
    fn seconds_since_clamps_future_start() {
        assert_eq!(seconds_since(at(0), at(90)), 90);
        assert_eq!(seconds_since(at(90), at(0)), 0);
    }
}
