//! # Trophy Core Library
//!
//! Display-state derivations for gamification widgets: streaks, achievements,
//! leaderboards and points. Every derivation is a pure function of records
//! already fetched by the host application plus the current time, so a UI
//! layer only renders what this crate computes.
//!
//! ## Architecture
//!
//! - **Time**: calendar date parsing, month grids, countdown formatting and a
//!   [`Clock`] abstraction for deterministic tests
//! - **Streaks**: risk tiers against the period deadline and month calendars
//!   of active and freeze-protected days
//! - **Achievements**: progress toward targets, filtering and sorting
//! - **Leaderboard**: entry limiting, medals, podium layout, percentile and
//!   rank trend
//! - **Points**: award history summaries and a bounded animation queue driven
//!   by `tick()` on a caller-supplied clock
//!
//! ## Key Components
//!
//! - [`StreakRiskEvaluator`]: Streak expiry risk classification
//! - [`StreakCalendarBuilder`]: Month calendar of streak activity
//! - [`AnimationQueue`]: Points animation queue with expiry timers
//! - [`TrophyConfig`]: Component configuration management

pub mod achievement;
pub mod config;
pub mod error;
pub mod leaderboard;
pub mod points;
pub mod streak;
pub mod time;

pub use achievement::{
    filter_achievements, progress, sort_achievements, Achievement, AchievementFilter,
    AchievementProgress, AchievementSort, AchievementView, UserAchievement,
};
pub use config::TrophyConfig;
pub use error::{ConfigError, CoreError, Result, ValidationError};
pub use leaderboard::{
    classify_trend, podium, process_rankings, LeaderboardRanking, LeaderboardView, RankTrend,
};
pub use points::{AnimationConfig, AnimationQueue, PointsResponse, TriggerOptions};
pub use streak::{
    RiskTier, StreakCalendar, StreakCalendarBuilder, StreakRecord, StreakRiskEvaluator,
};
pub use time::{Clock, ManualClock, SystemClock};
