//! Calendar-date parsing, expiry deadlines and countdown formatting.
//!
//! Expiry dates carry no time component. A streak that "expires" on a date
//! stays alive until 23:59:59 of that date in the caller's timezone.

use chrono::{DateTime, Duration, LocalResult, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Deserializer};

use crate::error::ValidationError;

const MS_PER_MINUTE: i64 = 60 * 1000;
const MS_PER_HOUR: i64 = 60 * MS_PER_MINUTE;

/// Anything covering a closed range of calendar dates.
///
/// `span()` returns `None` when either bound is unknown, in which case no
/// date is considered inside it.
pub trait DateSpan {
    fn span(&self) -> Option<(NaiveDate, NaiveDate)>;
}

impl DateSpan for (NaiveDate, NaiveDate) {
    fn span(&self) -> Option<(NaiveDate, NaiveDate)> {
        Some(*self)
    }
}

/// Parse a calendar date.
///
/// Accepts `YYYY-MM-DD` and the date part of RFC 3339 / ISO 8601 timestamps
/// (`2024-03-05T10:00:00Z`, `2024-03-05T10:00:00`).
pub fn parse_calendar_date(input: &str) -> Result<NaiveDate, ValidationError> {
    let trimmed = input.trim();
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Ok(date);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(dt.date_naive());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S%.f") {
        return Ok(dt.date());
    }
    Err(ValidationError::InvalidDate {
        input: input.to_string(),
    })
}

/// Like [`parse_calendar_date`] but malformed input becomes `None`.
pub fn parse_calendar_date_lenient(input: &str) -> Option<NaiveDate> {
    match parse_calendar_date(input) {
        Ok(date) => Some(date),
        Err(e) => {
            tracing::warn!("Treating malformed date as absent: {e}");
            None
        }
    }
}

/// Parse a UTC timestamp.
///
/// RFC 3339 is preferred; offset-less datetimes are read as UTC and bare
/// dates as midnight UTC.
pub fn parse_timestamp(input: &str) -> Result<DateTime<Utc>, ValidationError> {
    let trimmed = input.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S%.f") {
        return Ok(dt.and_utc());
    }
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        if let Some(midnight) = date.and_hms_opt(0, 0, 0) {
            return Ok(midnight.and_utc());
        }
    }
    Err(ValidationError::InvalidDate {
        input: input.to_string(),
    })
}

/// Like [`parse_timestamp`] but malformed input becomes `None`.
pub fn parse_timestamp_lenient(input: &str) -> Option<DateTime<Utc>> {
    match parse_timestamp(input) {
        Ok(ts) => Some(ts),
        Err(e) => {
            tracing::warn!("Treating malformed timestamp as absent: {e}");
            None
        }
    }
}

/// Serde helpers for API records where a bad date must not reject the record.
pub(crate) mod lenient {
    use super::*;

    pub fn date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        Ok(raw.as_deref().and_then(parse_calendar_date_lenient))
    }

    pub fn timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        Ok(raw.as_deref().and_then(parse_timestamp_lenient))
    }
}

/// Time left until the end of `expiry` (23:59:59 in `now`'s timezone).
///
/// `None` means there is no expiry at all. An expiry in the past yields a
/// zero duration, never a negative one.
pub fn time_remaining<Tz: TimeZone>(
    expiry: Option<NaiveDate>,
    now: &DateTime<Tz>,
) -> Option<Duration> {
    let end_of_day = expiry?.and_hms_opt(23, 59, 59)?;
    let deadline = now.timezone().from_local_datetime(&end_of_day);
    Some(until_deadline(deadline, end_of_day, now))
}

/// Time from `now` to a local deadline, clamped at zero.
///
/// Only zones with DST transitions (such as `Local`) produce the ambiguous
/// and missing cases. An ambiguous deadline resolves to the later instant.
fn until_deadline<Tz: TimeZone>(
    deadline: LocalResult<DateTime<Tz>>,
    local_deadline: NaiveDateTime,
    now: &DateTime<Tz>,
) -> Duration {
    let remaining = match deadline.latest() {
        Some(deadline) => deadline.signed_duration_since(now.clone()),
        // Deadline fell into a DST gap; fall back to wall-clock arithmetic.
        None => local_deadline.signed_duration_since(now.naive_local()),
    };
    remaining.max(Duration::zero())
}

/// Inclusive calendar-date containment.
pub fn date_in_period<P: DateSpan + ?Sized>(date: NaiveDate, period: &P) -> bool {
    match period.span() {
        Some((start, end)) => start <= date && date <= end,
        None => false,
    }
}

/// Fractional hours in a duration.
pub fn hours_in(duration: Duration) -> f64 {
    duration.num_milliseconds() as f64 / MS_PER_HOUR as f64
}

/// Countdown text: `"Xd Yh"` past 24 hours, `"Xh Ym"` past one hour,
/// otherwise `"Ym"` (so zero renders as `"0m"`).
pub fn format_time_remaining(remaining: Duration) -> String {
    let ms = remaining.num_milliseconds().max(0);
    let hours = ms / MS_PER_HOUR;
    let minutes = (ms % MS_PER_HOUR) / MS_PER_MINUTE;

    if hours > 24 {
        format!("{}d {}h", hours / 24, hours % 24)
    } else if hours > 0 {
        format!("{}h {}m", hours, minutes)
    } else {
        format!("{}m", minutes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn utc(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, min, 0).unwrap()
    }

    #[test]
    fn parses_plain_and_timestamp_dates() {
        assert_eq!(parse_calendar_date("2024-03-05").unwrap(), date(2024, 3, 5));
        assert_eq!(
            parse_calendar_date("2024-03-05T22:10:00Z").unwrap(),
            date(2024, 3, 5)
        );
        assert_eq!(
            parse_calendar_date(" 2024-03-05T22:10:00 ").unwrap(),
            date(2024, 3, 5)
        );
    }

    #[test]
    fn rejects_malformed_dates() {
        assert!(parse_calendar_date("2024-02-30").is_err());
        assert!(parse_calendar_date("yesterday").is_err());
        assert!(parse_calendar_date("").is_err());
        assert_eq!(parse_calendar_date_lenient("03/05/2024"), None);
    }

    #[test]
    fn parses_timestamps() {
        assert_eq!(
            parse_timestamp("2024-03-05T10:00:00+02:00").unwrap(),
            utc(2024, 3, 5, 8, 0)
        );
        assert_eq!(parse_timestamp("2024-03-05").unwrap(), utc(2024, 3, 5, 0, 0));
        assert!(parse_timestamp_lenient("not a time").is_none());
    }

    #[test]
    fn no_expiry_means_no_remaining_time() {
        assert_eq!(time_remaining(None, &utc(2024, 3, 5, 12, 0)), None);
    }

    #[test]
    fn remaining_runs_to_end_of_day() {
        let remaining = time_remaining(Some(date(2024, 3, 5)), &utc(2024, 3, 5, 20, 0)).unwrap();
        assert_eq!(remaining, Duration::hours(3) + Duration::minutes(59) + Duration::seconds(59));
    }

    #[test]
    fn ambiguous_deadline_resolves_to_later_instant() {
        // Clocks fall back from 00:00 -02:00 to 23:00 -03:00, so 23:59:59
        // happens twice.
        let summer = FixedOffset::west_opt(2 * 3600).unwrap();
        let winter = FixedOffset::west_opt(3 * 3600).unwrap();
        let local = date(2018, 2, 17).and_hms_opt(23, 59, 59).unwrap();
        let deadline = LocalResult::Ambiguous(
            summer.from_local_datetime(&local).unwrap(),
            winter.from_local_datetime(&local).unwrap(),
        );
        let now = summer.with_ymd_and_hms(2018, 2, 17, 22, 0, 0).unwrap();

        let remaining = until_deadline(deadline, local, &now);
        assert_eq!(remaining, Duration::hours(3) - Duration::seconds(1));
    }

    #[test]
    fn deadline_in_dst_gap_uses_wall_clock() {
        let offset = FixedOffset::west_opt(10 * 3600).unwrap();
        let local = date(2011, 12, 30).and_hms_opt(23, 59, 59).unwrap();
        let now = offset.with_ymd_and_hms(2011, 12, 30, 20, 0, 0).unwrap();

        let remaining = until_deadline(LocalResult::None, local, &now);
        assert_eq!(remaining, Duration::hours(4) - Duration::seconds(1));

        let late = offset.with_ymd_and_hms(2011, 12, 31, 1, 0, 0).unwrap();
        assert_eq!(until_deadline(LocalResult::None, local, &late), Duration::zero());
    }

    #[test]
    fn remaining_uses_callers_timezone() {
        let tz = FixedOffset::east_opt(2 * 3600).unwrap();
        let now = tz.with_ymd_and_hms(2024, 3, 5, 23, 0, 0).unwrap();
        let remaining = time_remaining(Some(date(2024, 3, 5)), &now).unwrap();
        assert_eq!(remaining, Duration::minutes(59) + Duration::seconds(59));
    }

    #[test]
    fn past_expiry_clamps_to_zero() {
        let remaining = time_remaining(Some(date(2024, 3, 1)), &utc(2024, 3, 5, 12, 0)).unwrap();
        assert_eq!(remaining, Duration::zero());
    }

    #[test]
    fn period_membership_is_inclusive() {
        let period = (date(2024, 3, 5), date(2024, 3, 8));
        assert!(!date_in_period(date(2024, 3, 4), &period));
        assert!(date_in_period(date(2024, 3, 5), &period));
        assert!(date_in_period(date(2024, 3, 8), &period));
        assert!(!date_in_period(date(2024, 3, 9), &period));
    }

    #[test]
    fn formats_countdowns() {
        assert_eq!(format_time_remaining(Duration::minutes(90)), "1h 30m");
        assert_eq!(format_time_remaining(Duration::hours(30)), "1d 6h");
        assert_eq!(format_time_remaining(Duration::minutes(45)), "45m");
        assert_eq!(format_time_remaining(Duration::zero()), "0m");
        assert_eq!(format_time_remaining(Duration::seconds(59)), "0m");
        assert_eq!(format_time_remaining(Duration::hours(24)), "24h 0m");
        assert_eq!(format_time_remaining(Duration::minutes(-5)), "0m");
    }
}
