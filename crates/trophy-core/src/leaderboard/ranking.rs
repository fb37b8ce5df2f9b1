//! Display list and podium extraction.
//!
//! Input order and ranks are authoritative; nothing here re-ranks.

use serde::{Deserialize, Serialize};

use super::model::LeaderboardRanking;

/// Per-view options. The current user is passed in explicitly.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LeaderboardConfig {
    /// Maximum entries to display; `None` shows all.
    #[serde(default)]
    pub limit: Option<usize>,
    #[serde(default)]
    pub current_user_id: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Medal {
    Gold,
    Silver,
    Bronze,
}

impl Medal {
    pub fn for_rank(rank: u32) -> Option<Self> {
        match rank {
            1 => Some(Medal::Gold),
            2 => Some(Medal::Silver),
            3 => Some(Medal::Bronze),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub ranking: LeaderboardRanking,
    pub display_name: String,
    pub is_current_user: bool,
    pub medal: Option<Medal>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LeaderboardView {
    pub entries: Vec<LeaderboardEntry>,
    pub total: usize,
    /// Entries cut off by the limit.
    pub overflow: usize,
}

impl LeaderboardView {
    pub fn current_user(&self) -> Option<&LeaderboardEntry> {
        self.entries.iter().find(|e| e.is_current_user)
    }
}

/// Truncate to the configured limit and decorate each entry.
pub fn process_rankings(
    rankings: &[LeaderboardRanking],
    config: &LeaderboardConfig,
) -> LeaderboardView {
    let total = rankings.len();
    let shown = config.limit.map_or(total, |limit| limit.min(total));
    let current = config.current_user_id.as_deref();

    let entries = rankings[..shown]
        .iter()
        .map(|ranking| LeaderboardEntry {
            display_name: ranking.display_name(),
            is_current_user: current == Some(ranking.user_id.as_str()),
            medal: Medal::for_rank(ranking.rank),
            ranking: ranking.clone(),
        })
        .collect();

    LeaderboardView {
        entries,
        total,
        overflow: total - shown,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PodiumPlace {
    First,
    Second,
    Third,
}

impl PodiumPlace {
    pub fn rank(&self) -> u32 {
        match self {
            PodiumPlace::First => 1,
            PodiumPlace::Second => 2,
            PodiumPlace::Third => 3,
        }
    }

    /// Relative column height, tallest in the center.
    pub fn height_weight(&self) -> f64 {
        match self {
            PodiumPlace::First => 1.0,
            PodiumPlace::Second => 0.75,
            PodiumPlace::Third => 0.625,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PodiumSlot {
    pub place: PodiumPlace,
    pub ranking: LeaderboardRanking,
    pub display_name: String,
}

/// Display order: second, first, third.
const PODIUM_ORDER: [PodiumPlace; 3] =
    [PodiumPlace::Second, PodiumPlace::First, PodiumPlace::Third];

/// Top three by rank, laid out 2-1-3.
///
/// Entries are selected by rank, not list position. A missing rank leaves
/// its slot out rather than inventing a placeholder; with duplicate ranks
/// the first in input order wins.
pub fn podium(rankings: &[LeaderboardRanking]) -> Vec<PodiumSlot> {
    let slots: Vec<PodiumSlot> = PODIUM_ORDER
        .iter()
        .filter_map(|place| {
            rankings
                .iter()
                .find(|r| r.rank == place.rank())
                .map(|ranking| PodiumSlot {
                    place: *place,
                    display_name: ranking.display_name(),
                    ranking: ranking.clone(),
                })
        })
        .collect();
    tracing::trace!(slots = slots.len(), "built podium");
    slots
}
