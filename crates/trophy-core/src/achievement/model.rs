use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::time::lenient;

/// What unlocks an achievement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TriggerKind {
    /// A tracked metric reaches a target value.
    Metric,
    /// Granted explicitly through the API.
    Api,
    /// A streak reaches a target length.
    Streak,
}

impl TriggerKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TriggerKind::Metric => "metric",
            TriggerKind::Api => "api",
            TriggerKind::Streak => "streak",
        }
    }
}

/// Key/value attribute an achievement matches against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeMatcher {
    pub key: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Achievement {
    pub id: String,
    pub name: String,
    pub trigger: TriggerKind,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub badge_url: Option<String>,
    #[serde(default)]
    pub key: Option<String>,
    #[serde(default)]
    pub metric_id: Option<String>,
    #[serde(default)]
    pub metric_name: Option<String>,
    /// Target for metric achievements; the denominator for progress.
    #[serde(default)]
    pub metric_value: Option<f64>,
    #[serde(default)]
    pub streak_length: Option<u32>,
    #[serde(default)]
    pub user_attributes: Vec<AttributeMatcher>,
    #[serde(default)]
    pub event_attribute: Option<AttributeMatcher>,
}

impl Achievement {
    pub fn new(id: impl Into<String>, name: impl Into<String>, trigger: TriggerKind) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            trigger,
            description: None,
            badge_url: None,
            key: None,
            metric_id: None,
            metric_name: None,
            metric_value: None,
            streak_length: None,
            user_attributes: Vec::new(),
            event_attribute: None,
        }
    }

    /// Metric achievement with a target value.
    pub fn metric(id: impl Into<String>, name: impl Into<String>, target: f64) -> Self {
        Self {
            metric_value: Some(target),
            ..Self::new(id, name, TriggerKind::Metric)
        }
    }
}

/// An achievement as seen by one user. `achieved_at == None` means locked.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserAchievement {
    #[serde(flatten)]
    pub achievement: Achievement,
    #[serde(default, deserialize_with = "lenient::timestamp")]
    pub achieved_at: Option<DateTime<Utc>>,
}

impl UserAchievement {
    pub fn locked(achievement: Achievement) -> Self {
        Self {
            achievement,
            achieved_at: None,
        }
    }

    pub fn unlocked(achievement: Achievement, at: DateTime<Utc>) -> Self {
        Self {
            achievement,
            achieved_at: Some(at),
        }
    }

    pub fn is_unlocked(&self) -> bool {
        self.achieved_at.is_some()
    }

    pub fn name(&self) -> &str {
        &self.achievement.name
    }

    pub fn trigger(&self) -> TriggerKind {
        self.achievement.trigger
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn deserializes_flattened_user_achievement() {
        let ua: UserAchievement = serde_json::from_value(json!({
            "id": "a1",
            "name": "Century",
            "trigger": "metric",
            "metricId": "m1",
            "metricName": "sessions",
            "metricValue": 100,
            "userAttributes": [{ "key": "plan", "value": "pro" }],
            "achievedAt": "2024-03-05T10:00:00Z"
        }))
        .unwrap();

        assert_eq!(ua.trigger(), TriggerKind::Metric);
        assert_eq!(ua.achievement.metric_value, Some(100.0));
        assert_eq!(ua.achievement.user_attributes.len(), 1);
        assert!(ua.is_unlocked());
    }

    #[test]
    fn null_or_missing_achieved_at_is_locked() {
        let ua: UserAchievement = serde_json::from_value(json!({
            "id": "a2", "name": "Talker", "trigger": "api", "achievedAt": null
        }))
        .unwrap();
        assert!(!ua.is_unlocked());

        let ua: UserAchievement = serde_json::from_value(json!({
            "id": "a3", "name": "Streaker", "trigger": "streak", "streakLength": 7
        }))
        .unwrap();
        assert!(!ua.is_unlocked());
        assert_eq!(ua.achievement.streak_length, Some(7));
    }

    #[test]
    fn unknown_trigger_is_rejected() {
        let result: Result<Achievement, _> = serde_json::from_value(json!({
            "id": "a4", "name": "Mystery", "trigger": "telepathy"
        }));
        assert!(result.is_err());
    }
}
