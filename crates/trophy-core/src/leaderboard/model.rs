use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::time::lenient;

const SHORT_ID_LEN: usize = 6;

/// One user's position. Ranks are 1-based and authoritative as supplied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardRanking {
    pub user_id: String,
    #[serde(default)]
    pub user_name: Option<String>,
    pub rank: u32,
    pub value: f64,
}

impl LeaderboardRanking {
    pub fn new(user_id: impl Into<String>, user_name: Option<&str>, rank: u32, value: f64) -> Self {
        Self {
            user_id: user_id.into(),
            user_name: user_name.map(String::from),
            rank,
            value,
        }
    }

    /// `user_name` when non-empty, else `"User "` plus the first six
    /// characters of the user id.
    pub fn display_name(&self) -> String {
        match self.user_name.as_deref() {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => {
                let short: String = self.user_id.chars().take(SHORT_ID_LEN).collect();
                format!("User {short}")
            }
        }
    }

    /// Uppercased first character of the display name, for avatars.
    pub fn initial(&self) -> Option<char> {
        self.display_name().chars().next().and_then(|c| c.to_uppercase().next())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RankBy {
    Points,
    Streak,
    Metric,
}

/// Full leaderboard as returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardResponse {
    pub id: String,
    pub name: String,
    pub key: String,
    pub rank_by: RankBy,
    pub status: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub rankings: Vec<LeaderboardRanking>,
    #[serde(default, deserialize_with = "lenient::timestamp")]
    pub start: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "lenient::timestamp")]
    pub end: Option<DateTime<Utc>>,
    #[serde(default)]
    pub max_participants: u32,
}
