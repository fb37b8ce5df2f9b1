//! Streak derivations: risk of expiry, calendar occupancy and freezes.

mod calendar;
mod freeze;
mod model;
mod risk;

pub use calendar::{
    CalendarCell, CalendarConfig, DayCell, DayStatus, StreakCalendar, StreakCalendarBuilder,
};
pub use freeze::FreezeIndicator;
pub use model::{streak_length_label, Frequency, StreakPeriod, StreakRecord};
pub use risk::{RiskTier, StreakAlert, StreakRiskConfig, StreakRiskEvaluator};
