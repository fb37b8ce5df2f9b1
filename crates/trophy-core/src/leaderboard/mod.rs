//! Leaderboard derivations: display list, podium, trend and standing.

mod model;
mod ranking;
mod standing;
mod trend;

pub use model::{LeaderboardRanking, LeaderboardResponse, RankBy};
pub use ranking::{
    podium, process_rankings, LeaderboardConfig, LeaderboardEntry, LeaderboardView, Medal,
    PodiumPlace, PodiumSlot,
};
pub use standing::{percentile, user_standing, UserStanding};
pub use trend::{classify_trend, RankChange, RankTrend};
