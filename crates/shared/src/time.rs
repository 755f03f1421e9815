//! Local-day time range helpers.
//!
//! Audit queries filter by calendar date in the server's local time zone.
//! A `from` date covers the day starting at 00:00:00.000 and a `to` date
//! covers up to 23:59:59.999 of that day, both inclusive.

use chrono::{DateTime, Local, LocalResult, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};

/// Start of the given local day, as a UTC instant.
pub fn local_day_start(date: NaiveDate) -> DateTime<Utc> {
    local_to_utc(date.and_time(NaiveTime::MIN))
}

/// End of the given local day (23:59:59.999), as a UTC instant.
pub fn local_day_end(date: NaiveDate) -> DateTime<Utc> {
    let end = NaiveTime::from_hms_milli_opt(23, 59, 59, 999).unwrap_or(NaiveTime::MIN);
    local_to_utc(date.and_time(end))
}

/// Resolves a naive local timestamp to UTC. DST gaps and overlaps pick the
/// earliest valid interpretation; a nonexistent local time falls back to
/// treating the value as UTC.
fn local_to_utc(naive: NaiveDateTime) -> DateTime<Utc> {
    match Local.from_local_datetime(&naive) {
        LocalResult::Single(dt) => dt.with_timezone(&Utc),
        LocalResult::Ambiguous(earliest, _) => earliest.with_timezone(&Utc),
        LocalResult::None => Utc.from_utc_datetime(&naive),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    #[test]
    fn day_start_precedes_day_end() {
        let date = NaiveDate::from_ymd_opt(2025, 12, 17).unwrap();
        assert!(local_day_start(date) < local_day_end(date));
    }

    #[test]
    fn day_range_spans_just_under_24_hours() {
        let date = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        let span = local_day_end(date) - local_day_start(date);
        assert_eq!(span.num_milliseconds(), 24 * 3600 * 1000 - 1);
    }

    #[test]
    fn day_end_keeps_millisecond_precision() {
        let date = NaiveDate::from_ymd_opt(2025, 1, 31).unwrap();
        let end = local_day_end(date);
        assert_eq!(end.nanosecond() % 1_000_000_000 / 1_000_000, 999);
    }
}
