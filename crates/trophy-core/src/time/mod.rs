//! Pure date and time helpers shared by the derivation modules.

mod clock;
mod dates;
mod grid;

pub use clock::{Clock, ManualClock, SystemClock};
pub use dates::{
    date_in_period, format_time_remaining, hours_in, parse_calendar_date,
    parse_calendar_date_lenient, parse_timestamp, parse_timestamp_lenient, time_remaining,
    DateSpan,
};
pub use grid::{
    days_in_month, month_grid, month_title, try_month_grid, weekday_labels, StartOfWeek,
};

pub(crate) use dates::lenient;
