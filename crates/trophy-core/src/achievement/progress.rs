//! Progress of a metric achievement toward its target.

use serde::{Deserialize, Serialize};

use super::model::{Achievement, TriggerKind, UserAchievement};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AchievementProgress {
    pub current: f64,
    /// Zero when the achievement has no usable target.
    pub target: f64,
    /// 0.0 ..= 100.0
    pub percent: f64,
    pub is_complete: bool,
}

impl AchievementProgress {
    pub fn percent_rounded(&self) -> u32 {
        self.percent.round() as u32
    }

    /// `"45/100"`
    pub fn value_label(&self) -> String {
        format!("{}/{}", format_plain(self.current), format_plain(self.target))
    }
}

/// Compute progress toward `achievement.metric_value`.
///
/// A missing or non-positive target is not trackable: percent is 0 and the
/// achievement is never complete. Completion compares raw values, so it is
/// exact even when the displayed percent rounds down. A NaN current value
/// reports 0 percent.
pub fn progress(achievement: &Achievement, current: f64) -> AchievementProgress {
    let target = achievement.metric_value.filter(|t| *t > 0.0 && t.is_finite());
    match target {
        Some(target) => AchievementProgress {
            current,
            target,
            percent: (current / target * 100.0).max(0.0).min(100.0),
            is_complete: current >= target,
        },
        None => AchievementProgress {
            current,
            target: 0.0,
            percent: 0.0,
            is_complete: false,
        },
    }
}

/// Badge label, e.g. `"Century, Locked, 45 of 100 progress"`.
///
/// Progress is only mentioned for locked metric achievements when a current
/// value is supplied.
pub fn badge_label(achievement: &UserAchievement, current: Option<f64>) -> String {
    let name = achievement.name();
    if achievement.is_unlocked() {
        return format!("{name}, Unlocked");
    }
    match current {
        Some(current) if achievement.trigger() == TriggerKind::Metric => {
            let p = progress(&achievement.achievement, current);
            format!(
                "{name}, Locked, {} of {} progress",
                format_plain(p.current),
                format_plain(p.target)
            )
        }
        _ => format!("{name}, Locked"),
    }
}

/// Integers without a trailing `.0`.
fn format_plain(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}
