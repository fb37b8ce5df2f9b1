//! Streak calendar: one cell per day of a month, flagged from streak history.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use super::model::StreakPeriod;
use crate::time::{date_in_period, month_grid, month_title, weekday_labels, StartOfWeek};

/// Calendar options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarConfig {
    #[serde(default)]
    pub start_of_week: StartOfWeek,
    /// When false, days are never reported as freeze-used.
    #[serde(default = "default_true")]
    pub show_freezes: bool,
}

fn default_true() -> bool {
    true
}

impl Default for CalendarConfig {
    fn default() -> Self {
        Self {
            start_of_week: StartOfWeek::default(),
            show_freezes: true,
        }
    }
}

/// Dominant state of a day, in display precedence order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayStatus {
    FreezeUsed,
    Active,
    Future,
    NoActivity,
}

impl DayStatus {
    pub fn label(&self) -> &'static str {
        match self {
            DayStatus::FreezeUsed => "freeze used",
            DayStatus::Active => "streak active",
            DayStatus::Future => "future",
            DayStatus::NoActivity => "no activity",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayCell {
    pub date: NaiveDate,
    pub is_today: bool,
    /// Future days are not interactive.
    pub is_future: bool,
    pub is_active: bool,
    pub used_freeze: bool,
}

impl DayCell {
    pub fn day(&self) -> u32 {
        self.date.day()
    }

    pub fn status(&self) -> DayStatus {
        if self.used_freeze {
            DayStatus::FreezeUsed
        } else if self.is_active {
            DayStatus::Active
        } else if self.is_future {
            DayStatus::Future
        } else {
            DayStatus::NoActivity
        }
    }

    /// Accessible label, e.g. `"Tuesday, March 5, today, streak active"`.
    pub fn label(&self) -> String {
        let date_label = self.date.format("%A, %B %-d");
        let today = if self.is_today { ", today" } else { "" };
        format!("{date_label}{today}, {}", self.status().label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum CalendarCell {
    /// Padding before the 1st of the month.
    Blank,
    Day(DayCell),
}

impl CalendarCell {
    pub fn as_day(&self) -> Option<&DayCell> {
        match self {
            CalendarCell::Day(cell) => Some(cell),
            CalendarCell::Blank => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreakCalendar {
    pub year: i32,
    pub month: u32,
    pub title: String,
    pub weekdays: [String; 7],
    pub cells: Vec<CalendarCell>,
}

impl StreakCalendar {
    pub fn days(&self) -> impl Iterator<Item = &DayCell> {
        self.cells.iter().filter_map(CalendarCell::as_day)
    }

    pub fn day(&self, date: NaiveDate) -> Option<&DayCell> {
        self.days().find(|cell| cell.date == date)
    }

    pub fn active_days(&self) -> usize {
        self.days().filter(|cell| cell.is_active).count()
    }
}

#[derive(Debug, Clone, Default)]
pub struct StreakCalendarBuilder {
    config: CalendarConfig,
}

impl StreakCalendarBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: CalendarConfig) -> Self {
        Self { config }
    }

    /// Build the calendar for `year`/`month` as seen on `today`.
    ///
    /// An invalid month produces a calendar with no cells.
    pub fn build(
        &self,
        history: &[StreakPeriod],
        year: i32,
        month: u32,
        today: NaiveDate,
    ) -> StreakCalendar {
        let cells = month_grid(year, month, self.config.start_of_week)
            .into_iter()
            .map(|slot| match slot {
                Some(date) => CalendarCell::Day(self.day_cell(history, date, today)),
                None => CalendarCell::Blank,
            })
            .collect();

        StreakCalendar {
            year,
            month,
            title: month_title(year, month).unwrap_or_default(),
            weekdays: weekday_labels(self.config.start_of_week).map(String::from),
            cells,
        }
    }

    /// Build the calendar for the month containing `month`.
    pub fn build_for(
        &self,
        history: &[StreakPeriod],
        month: NaiveDate,
        today: NaiveDate,
    ) -> StreakCalendar {
        self.build(history, month.year(), month.month(), today)
    }

    fn day_cell(&self, history: &[StreakPeriod], date: NaiveDate, today: NaiveDate) -> DayCell {
        let mut matching = history.iter().filter(|p| date_in_period(date, *p)).peekable();
        let is_active = matching.peek().is_some();
        // Overlapping periods: any freeze-flagged match marks the day.
        let used_freeze = self.config.show_freezes && matching.any(|p| p.used_freeze);

        DayCell {
            date,
            is_today: date == today,
            is_future: date > today,
            is_active,
            used_freeze,
        }
    }
}
