use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::time::{lenient, DateSpan};

/// How often activity is required to keep a streak alive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    #[default]
    Daily,
    Weekly,
    Monthly,
}

impl Frequency {
    /// Singular period noun: `day`, `week` or `month`.
    pub fn unit_label(&self) -> &'static str {
        match self {
            Frequency::Daily => "day",
            Frequency::Weekly => "week",
            Frequency::Monthly => "month",
        }
    }
}

/// One closed run of activity in a user's streak history.
///
/// Bounds that could not be parsed are kept as `None`; such a period
/// contains no dates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StreakPeriod {
    #[serde(default, deserialize_with = "lenient::date")]
    pub period_start: Option<NaiveDate>,
    #[serde(default, deserialize_with = "lenient::date")]
    pub period_end: Option<NaiveDate>,
    #[serde(default)]
    pub length: u32,
    #[serde(default)]
    pub used_freeze: bool,
}

impl StreakPeriod {
    pub fn new(start: NaiveDate, end: NaiveDate, length: u32) -> Self {
        Self {
            period_start: Some(start),
            period_end: Some(end),
            length,
            used_freeze: false,
        }
    }

    pub fn with_freeze(mut self, used_freeze: bool) -> Self {
        self.used_freeze = used_freeze;
        self
    }
}

impl DateSpan for StreakPeriod {
    fn span(&self) -> Option<(NaiveDate, NaiveDate)> {
        Some((self.period_start?, self.period_end?))
    }
}

/// A user's streak as returned by the gamification API.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StreakRecord {
    #[serde(default)]
    pub length: u32,
    #[serde(default)]
    pub frequency: Frequency,
    #[serde(default, deserialize_with = "lenient::date")]
    pub started: Option<NaiveDate>,
    #[serde(default, deserialize_with = "lenient::date")]
    pub period_start: Option<NaiveDate>,
    #[serde(default, deserialize_with = "lenient::date")]
    pub period_end: Option<NaiveDate>,
    /// Last calendar date on which the streak can still be extended.
    #[serde(default, deserialize_with = "lenient::date")]
    pub expires: Option<NaiveDate>,
    #[serde(default)]
    pub streak_history: Vec<StreakPeriod>,
    #[serde(default)]
    pub rank: Option<u32>,
    #[serde(default)]
    pub freezes: Option<u32>,
    #[serde(default)]
    pub max_freezes: Option<u32>,
    #[serde(default)]
    pub freeze_auto_earn_interval: Option<u32>,
    #[serde(default)]
    pub freeze_auto_earn_amount: Option<u32>,
}

impl StreakRecord {
    pub fn new(length: u32, frequency: Frequency, expires: Option<NaiveDate>) -> Self {
        Self {
            length,
            frequency,
            expires,
            ..Default::default()
        }
    }

    pub fn with_history(mut self, history: Vec<StreakPeriod>) -> Self {
        self.streak_history = history;
        self
    }
}

/// Badge text such as `"1 day"` or `"12 weeks"`.
pub fn streak_length_label(length: u32, frequency: Frequency) -> String {
    let unit = frequency.unit_label();
    if length == 1 {
        format!("{length} {unit}")
    } else {
        format!("{length} {unit}s")
    }
}
