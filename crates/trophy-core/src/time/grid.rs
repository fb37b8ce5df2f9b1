//! Month grid generation for calendar views.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// First column of the calendar grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StartOfWeek {
    #[default]
    Sunday,
    Monday,
}

impl StartOfWeek {
    /// Column index (0..7) of a weekday counted from Sunday.
    pub fn column_of(&self, days_from_sunday: u32) -> u32 {
        match self {
            StartOfWeek::Sunday => days_from_sunday % 7,
            StartOfWeek::Monday => (days_from_sunday + 6) % 7,
        }
    }
}

const WEEKDAYS_SUNDAY: [&str; 7] = ["Su", "Mo", "Tu", "We", "Th", "Fr", "Sa"];
const WEEKDAYS_MONDAY: [&str; 7] = ["Mo", "Tu", "We", "Th", "Fr", "Sa", "Su"];

/// Column header labels.
pub fn weekday_labels(start: StartOfWeek) -> [&'static str; 7] {
    match start {
        StartOfWeek::Sunday => WEEKDAYS_SUNDAY,
        StartOfWeek::Monday => WEEKDAYS_MONDAY,
    }
}

/// Number of days in a month, or `None` for an invalid month.
pub fn days_in_month(year: i32, month: u32) -> Option<u32> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    }?;
    Some(next.signed_duration_since(first).num_days() as u32)
}

/// Build the 7-column grid for a month.
///
/// Leading `None` cells push the 1st into its weekday column. The grid ends
/// on the last day of the month; trailing cells are not padded.
pub fn try_month_grid(
    year: i32,
    month: u32,
    start: StartOfWeek,
) -> Result<Vec<Option<NaiveDate>>, ValidationError> {
    let invalid = || ValidationError::InvalidMonth { year, month };
    let first = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(invalid)?;
    let days = days_in_month(year, month).ok_or_else(invalid)?;

    let blanks = start.column_of(first.weekday().num_days_from_sunday()) as usize;
    let mut cells = Vec::with_capacity(blanks + days as usize);
    cells.extend(std::iter::repeat(None).take(blanks));
    cells.extend(first.iter_days().take(days as usize).map(Some));
    Ok(cells)
}

/// [`try_month_grid`] that yields an empty grid for an invalid month.
pub fn month_grid(year: i32, month: u32, start: StartOfWeek) -> Vec<Option<NaiveDate>> {
    try_month_grid(year, month, start).unwrap_or_else(|e| {
        tracing::warn!("Empty calendar grid: {e}");
        Vec::new()
    })
}

/// Heading such as `"March 2024"`.
pub fn month_title(year: i32, month: u32) -> Option<String> {
    NaiveDate::from_ymd_opt(year, month, 1).map(|d| d.format("%B %Y").to_string())
}
