//! Bounded queue of transient "+N points" animations.
//!
//! Items are appended by [`AnimationQueue::trigger`] and leave the queue
//! by one of three paths: capacity eviction (oldest first, silent), an
//! explicit [`remove`](AnimationQueue::remove)/[`clear`](AnimationQueue::clear),
//! or expiry after their display duration. Every path goes through the same
//! removal step, which cancels the item's timer, so an expiry can never fire
//! for an item that is already gone.
//!
//! ## Usage
//!
//! ```ignore
//! let mut queue = AnimationQueue::new(AnimationConfig::default());
//! let id = queue.trigger(50.0, TriggerOptions::default());
//! // In the render loop:
//! queue.tick(|id| println!("{id} finished"));
//! ```

use std::collections::{HashMap, VecDeque};
use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::model::format_points;
use super::scheduler::{ExpiryScheduler, TimerHandle};
use crate::time::{Clock, SystemClock};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AnimationId(Uuid);

impl AnimationId {
    fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for AnimationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointsColor {
    Default,
    #[default]
    Green,
    Gold,
    Blue,
    Purple,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnimationVariant {
    #[default]
    Float,
    Pop,
    Slide,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnimationSize {
    Sm,
    #[default]
    Default,
    Lg,
    Xl,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScreenPosition {
    pub x: f64,
    pub y: f64,
}

/// Queue defaults, applied to every trigger that does not override them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnimationConfig {
    #[serde(default = "default_duration_ms")]
    pub duration_ms: u64,
    #[serde(default = "default_max_items")]
    pub max_items: usize,
    #[serde(default = "default_prefix")]
    pub prefix: String,
    #[serde(default)]
    pub suffix: String,
    #[serde(default)]
    pub color: PointsColor,
    #[serde(default)]
    pub variant: AnimationVariant,
    #[serde(default)]
    pub size: AnimationSize,
}

fn default_duration_ms() -> u64 {
    1000
}
fn default_max_items() -> usize {
    10
}
fn default_prefix() -> String {
    "+".into()
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            duration_ms: default_duration_ms(),
            max_items: default_max_items(),
            prefix: default_prefix(),
            suffix: String::new(),
            color: PointsColor::default(),
            variant: AnimationVariant::default(),
            size: AnimationSize::default(),
        }
    }
}

/// Per-trigger overrides of [`AnimationConfig`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TriggerOptions {
    pub prefix: Option<String>,
    pub suffix: Option<String>,
    pub color: Option<PointsColor>,
    pub variant: Option<AnimationVariant>,
    pub size: Option<AnimationSize>,
    pub position: Option<ScreenPosition>,
    pub duration_ms: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnimationItem {
    pub id: AnimationId,
    pub value: f64,
    pub prefix: String,
    pub suffix: String,
    pub color: PointsColor,
    pub variant: AnimationVariant,
    pub size: AnimationSize,
    /// `None` centers the animation.
    pub position: Option<ScreenPosition>,
    pub duration_ms: u64,
    pub displayed_at_ms: u64,
}

impl AnimationItem {
    /// `"+50 XP"`; negative values drop the prefix: `"-5 XP"`.
    pub fn display_value(&self) -> String {
        if self.value >= 0.0 {
            format!("{}{}{}", self.prefix, format_points(self.value), self.suffix)
        } else {
            format!("{}{}", format_points(self.value), self.suffix)
        }
    }

    pub fn expires_at_ms(&self) -> u64 {
        self.displayed_at_ms.saturating_add(self.duration_ms)
    }
}

pub struct AnimationQueue<C: Clock = SystemClock> {
    config: AnimationConfig,
    clock: C,
    items: VecDeque<AnimationItem>,
    timers: ExpiryScheduler<AnimationId>,
    handles: HashMap<AnimationId, TimerHandle>,
}

impl AnimationQueue<SystemClock> {
    pub fn new(config: AnimationConfig) -> Self {
        Self::with_clock(config, SystemClock)
    }
}

impl Default for AnimationQueue<SystemClock> {
    fn default() -> Self {
        Self::new(AnimationConfig::default())
    }
}

impl<C: Clock> AnimationQueue<C> {
    pub fn with_clock(config: AnimationConfig, clock: C) -> Self {
        Self {
            config,
            clock,
            items: VecDeque::new(),
            timers: ExpiryScheduler::new(),
            handles: HashMap::new(),
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn config(&self) -> &AnimationConfig {
        &self.config
    }

    /// Items oldest first.
    pub fn items(&self) -> impl Iterator<Item = &AnimationItem> {
        self.items.iter()
    }

    pub fn get(&self, id: &AnimationId) -> Option<&AnimationItem> {
        self.items.iter().find(|item| item.id == *id)
    }

    pub fn contains(&self, id: &AnimationId) -> bool {
        self.get(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// When the next pending expiry is due, if any.
    pub fn next_expiry_ms(&self) -> Option<u64> {
        self.timers.next_deadline()
    }

    fn capacity(&self) -> usize {
        self.config.max_items.max(1)
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Append an animation and start its expiry timer.
    ///
    /// Evicts the oldest items beyond capacity. The new id is returned
    /// immediately.
    pub fn trigger(&mut self, value: f64, options: TriggerOptions) -> AnimationId {
        let id = AnimationId::generate();
        let now = self.clock.now_ms();
        let item = AnimationItem {
            id,
            value,
            prefix: options.prefix.unwrap_or_else(|| self.config.prefix.clone()),
            suffix: options.suffix.unwrap_or_else(|| self.config.suffix.clone()),
            color: options.color.unwrap_or(self.config.color),
            variant: options.variant.unwrap_or(self.config.variant),
            size: options.size.unwrap_or(self.config.size),
            position: options.position,
            duration_ms: options.duration_ms.unwrap_or(self.config.duration_ms),
            displayed_at_ms: now,
        };

        let handle = self.timers.schedule(item.expires_at_ms(), id);
        self.handles.insert(id, handle);
        self.items.push_back(item);
        tracing::debug!(%id, value, "triggered points animation");

        while self.items.len() > self.capacity() {
            if let Some(oldest) = self.items.front().map(|item| item.id) {
                self.take(&oldest);
                tracing::debug!(id = %oldest, "evicted points animation over capacity");
            }
        }
        id
    }

    /// Remove an item early. No-op for unknown or already removed ids.
    pub fn remove(&mut self, id: &AnimationId) -> bool {
        let removed = self.take(id).is_some();
        if removed {
            tracing::debug!(%id, "removed points animation");
        }
        removed
    }

    pub fn clear(&mut self) {
        self.items.clear();
        self.handles.clear();
        self.timers.cancel_all();
        tracing::debug!("cleared points animations");
    }

    /// Expire every item whose duration has elapsed, calling `on_complete`
    /// once per expired item. Returns how many expired.
    pub fn tick<F>(&mut self, mut on_complete: F) -> usize
    where
        F: FnMut(&AnimationId),
    {
        let now = self.clock.now_ms();
        let mut expired = 0;
        while let Some((handle, id)) = self.timers.pop_due(now) {
            if self.handles.get(&id) != Some(&handle) {
                continue;
            }
            if self.take(&id).is_some() {
                tracing::debug!(%id, "points animation expired");
                on_complete(&id);
                expired += 1;
            }
        }
        expired
    }

    /// The single removal path: drops the item and cancels its timer.
    fn take(&mut self, id: &AnimationId) -> Option<AnimationItem> {
        if let Some(handle) = self.handles.remove(id) {
            self.timers.cancel(handle);
        }
        let index = self.items.iter().position(|item| item.id == *id)?;
        self.items.remove(index)
    }
}
