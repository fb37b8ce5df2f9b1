//! Streak-at-risk evaluation.
//!
//! The evaluator is pure given `now`. Callers that show a live countdown
//! re-invoke it on their own schedule (see
//! [`StreakRiskConfig::refresh_interval_secs`]); nothing here owns a timer.
//!
//! ```text
//! no expiry / expired ──► Hidden
//! hours > warning     ──► Hidden
//! hours <= critical   ──► Critical
//! otherwise           ──► Warning
//! ```

use chrono::{DateTime, Duration, TimeZone};
use serde::{Deserialize, Serialize};

use super::model::StreakRecord;
use crate::time::{format_time_remaining, hours_in, time_remaining};

/// Outcome of a risk evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskTier {
    /// Nothing to warn about: no expiry, already expired, or not yet at risk.
    Hidden,
    Warning,
    Critical,
}

impl RiskTier {
    pub fn is_at_risk(&self) -> bool {
        !matches!(self, RiskTier::Hidden)
    }
}

/// Thresholds for the risk evaluator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StreakRiskConfig {
    /// At or below this many hours left the streak is at risk.
    #[serde(default = "default_warning_hours")]
    pub warning_hours: f64,
    /// At or below this many hours left the risk is critical.
    #[serde(default = "default_critical_hours")]
    pub critical_hours: f64,
    /// Suggested re-evaluation interval for live countdowns.
    #[serde(default = "default_refresh_interval_secs")]
    pub refresh_interval_secs: u64,
}

fn default_warning_hours() -> f64 {
    6.0
}
fn default_critical_hours() -> f64 {
    2.0
}
fn default_refresh_interval_secs() -> u64 {
    60
}

impl Default for StreakRiskConfig {
    fn default() -> Self {
        Self {
            warning_hours: default_warning_hours(),
            critical_hours: default_critical_hours(),
            refresh_interval_secs: default_refresh_interval_secs(),
        }
    }
}

/// Display-ready alert for a streak that is at risk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StreakAlert {
    pub tier: RiskTier,
    pub remaining_ms: i64,
    /// `"Xd Yh"`, `"Xh Ym"` or `"Ym"`.
    pub countdown: String,
    pub headline: String,
    pub detail: String,
}

/// Streak risk evaluator
#[derive(Debug, Clone, Default)]
pub struct StreakRiskEvaluator {
    config: StreakRiskConfig,
}

impl StreakRiskEvaluator {
    /// Create an evaluator with the default 6h / 2h thresholds
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with custom thresholds
    pub fn with_config(config: StreakRiskConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &StreakRiskConfig {
        &self.config
    }

    /// Classify the time left on a streak.
    pub fn evaluate<Tz: TimeZone>(&self, streak: &StreakRecord, now: &DateTime<Tz>) -> RiskTier {
        let tier = match time_remaining(streak.expires, now) {
            Some(remaining) => self.classify(remaining),
            None => RiskTier::Hidden,
        };
        tracing::trace!(?tier, expires = ?streak.expires, "evaluated streak risk");
        tier
    }

    /// Classify a remaining duration directly.
    pub fn classify(&self, remaining: Duration) -> RiskTier {
        if remaining <= Duration::zero() {
            return RiskTier::Hidden;
        }
        let hours = hours_in(remaining);
        if hours > self.config.warning_hours {
            RiskTier::Hidden
        } else if hours <= self.config.critical_hours {
            RiskTier::Critical
        } else {
            RiskTier::Warning
        }
    }

    /// Build the alert shown while a streak is at risk.
    ///
    /// Returns `None` whenever [`evaluate`](Self::evaluate) would be `Hidden`.
    pub fn alert<Tz: TimeZone>(
        &self,
        streak: &StreakRecord,
        now: &DateTime<Tz>,
    ) -> Option<StreakAlert> {
        let remaining = time_remaining(streak.expires, now)?;
        let tier = self.classify(remaining);
        let headline = match tier {
            RiskTier::Hidden => return None,
            RiskTier::Warning => "Your streak is at risk",
            RiskTier::Critical => "Streak expires soon!",
        };
        let countdown = format_time_remaining(remaining);
        let detail = format!(
            "{} remaining to extend your {}-{} streak",
            countdown,
            streak.length,
            streak.frequency.unit_label()
        );

        Some(StreakAlert {
            tier,
            remaining_ms: remaining.num_milliseconds(),
            countdown,
            headline: headline.to_string(),
            detail,
        })
    }
}
