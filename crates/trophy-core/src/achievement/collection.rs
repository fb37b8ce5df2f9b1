//! Filtering and ordering of a user's achievement collection.
//!
//! Filter and sort never mutate or drop input beyond what the filter asks
//! for. Hiding locked badges is a visibility predicate applied by the
//! renderer, so counts computed upstream stay accurate.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use super::model::UserAchievement;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AchievementFilter {
    #[default]
    All,
    Earned,
    Locked,
}

impl AchievementFilter {
    pub fn matches(&self, achievement: &UserAchievement) -> bool {
        match self {
            AchievementFilter::All => true,
            AchievementFilter::Earned => achievement.is_unlocked(),
            AchievementFilter::Locked => !achievement.is_unlocked(),
        }
    }

    /// Message shown when the filtered collection is empty.
    pub fn empty_message(&self) -> &'static str {
        match self {
            AchievementFilter::Earned => "No achievements earned yet",
            AchievementFilter::Locked => "All achievements unlocked!",
            AchievementFilter::All => "No achievements available",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AchievementSort {
    /// Alphabetical by name.
    #[default]
    Name,
    /// Alphabetical by trigger kind.
    Trigger,
    /// Unlocked first, most recent first; locked keep input order.
    Earned,
}

/// How locked achievements are presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LockedStyle {
    #[default]
    Grayscale,
    Silhouette,
    Hidden,
}

impl LockedStyle {
    pub fn is_visible(&self, achievement: &UserAchievement) -> bool {
        achievement.is_unlocked() || *self != LockedStyle::Hidden
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AchievementGridConfig {
    #[serde(default)]
    pub filter: AchievementFilter,
    #[serde(default)]
    pub sort_by: AchievementSort,
    #[serde(default)]
    pub locked_style: LockedStyle,
}

/// Keep the achievements matching `filter`, in input order.
pub fn filter_achievements(
    achievements: &[UserAchievement],
    filter: AchievementFilter,
) -> Vec<&UserAchievement> {
    achievements.iter().filter(|a| filter.matches(a)).collect()
}

/// Stable sort of an already filtered view.
pub fn sort_achievements(
    mut items: Vec<&UserAchievement>,
    sort: AchievementSort,
) -> Vec<&UserAchievement> {
    match sort {
        AchievementSort::Name => items.sort_by(|a, b| collate(a.name(), b.name())),
        AchievementSort::Trigger => {
            items.sort_by(|a, b| a.trigger().as_str().cmp(b.trigger().as_str()))
        }
        AchievementSort::Earned => items.sort_by(|a, b| match (a.achieved_at, b.achieved_at) {
            (Some(a_at), Some(b_at)) => b_at.cmp(&a_at),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        }),
    }
    items
}

/// Case-insensitive; on a tie lowercase sorts before uppercase.
fn collate(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| b.cmp(a))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AchievementSummary {
    pub total: usize,
    pub earned: usize,
    pub locked: usize,
}

impl AchievementSummary {
    pub fn of(achievements: &[UserAchievement]) -> Self {
        let earned = achievements.iter().filter(|a| a.is_unlocked()).count();
        Self {
            total: achievements.len(),
            earned,
            locked: achievements.len() - earned,
        }
    }
}

/// Filtered, ordered collection ready for a grid.
#[derive(Debug, Clone)]
pub struct AchievementView<'a> {
    pub items: Vec<&'a UserAchievement>,
    pub summary: AchievementSummary,
    config: AchievementGridConfig,
}

impl<'a> AchievementView<'a> {
    pub fn build(achievements: &'a [UserAchievement], config: &AchievementGridConfig) -> Self {
        let filtered = filter_achievements(achievements, config.filter);
        Self {
            items: sort_achievements(filtered, config.sort_by),
            summary: AchievementSummary::of(achievements),
            config: config.clone(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn empty_message(&self) -> Option<&'static str> {
        self.is_empty().then(|| self.config.filter.empty_message())
    }

    /// Items the renderer should draw, honoring [`LockedStyle::Hidden`].
    pub fn visible(&self) -> impl Iterator<Item = &'a UserAchievement> + '_ {
        self.items
            .iter()
            .copied()
            .filter(|a| self.config.locked_style.is_visible(a))
    }
}
