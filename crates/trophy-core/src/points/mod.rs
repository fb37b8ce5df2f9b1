//! Points: award history derivations and the award animation queue.

mod animation;
mod model;
mod scheduler;

pub use animation::{
    AnimationConfig, AnimationId, AnimationItem, AnimationQueue, AnimationSize, AnimationVariant,
    PointsColor, ScreenPosition, TriggerOptions,
};
pub use model::{
    format_points, PointsAward, PointsBoost, PointsResponse, PointsTrigger, PointsTriggerKind,
};
pub use scheduler::{ExpiryScheduler, TimerHandle};
