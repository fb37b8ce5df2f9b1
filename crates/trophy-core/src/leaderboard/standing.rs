use serde::{Deserialize, Serialize};

use super::model::LeaderboardRanking;
use super::trend::{classify_trend, RankChange};

/// Share of participants at or below `rank`, 0..=100.
///
/// `None` when there are no participants. Ranks beyond the participant
/// count clamp to 0.
pub fn percentile(rank: u32, total_participants: u32) -> Option<u32> {
    if total_participants == 0 {
        return None;
    }
    let total = total_participants as f64;
    let above = (total - rank as f64 + 1.0).max(0.0);
    Some(((above / total) * 100.0).round().min(100.0) as u32)
}

/// A single user's place on a leaderboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserStanding {
    pub ranking: LeaderboardRanking,
    pub display_name: String,
    pub change: RankChange,
    pub total_participants: Option<u32>,
    pub percentile: Option<u32>,
}

impl UserStanding {
    pub fn new(
        ranking: &LeaderboardRanking,
        previous_rank: Option<u32>,
        total_participants: Option<u32>,
    ) -> Self {
        Self {
            display_name: ranking.display_name(),
            change: classify_trend(previous_rank, ranking.rank),
            percentile: total_participants.and_then(|total| percentile(ranking.rank, total)),
            total_participants,
            ranking: ranking.clone(),
        }
    }

    /// `"Top 5%"`
    pub fn top_percent_label(&self) -> Option<String> {
        self.percentile.map(|p| format!("Top {}%", (100 - p + 1).min(100)))
    }
}

/// Locate `user_id` in `rankings` and describe their standing.
///
/// Without a previous rank the trend is `New`. Returns `None` if the user
/// is not ranked.
pub fn user_standing(
    rankings: &[LeaderboardRanking],
    user_id: &str,
    previous_rank: Option<u32>,
    total_participants: Option<u32>,
) -> Option<UserStanding> {
    rankings
        .iter()
        .find(|r| r.user_id == user_id)
        .map(|r| UserStanding::new(r, previous_rank, total_participants))
}
