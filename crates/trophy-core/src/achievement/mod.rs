//! Achievement derivations: progress toward a target and collection views.

mod collection;
mod model;
mod progress;

pub use collection::{
    filter_achievements, sort_achievements, AchievementFilter, AchievementGridConfig,
    AchievementSort, AchievementSummary, AchievementView, LockedStyle,
};
pub use model::{Achievement, AttributeMatcher, TriggerKind, UserAchievement};
pub use progress::{badge_label, progress, AchievementProgress};
