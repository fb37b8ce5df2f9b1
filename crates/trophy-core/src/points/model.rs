use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::time::lenient;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointsTriggerKind {
    Metric,
    Api,
}

/// Rule that granted an award.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PointsTrigger {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: PointsTriggerKind,
    pub points: f64,
    #[serde(default)]
    pub metric_name: Option<String>,
    #[serde(default)]
    pub metric_threshold: Option<f64>,
}

impl PointsTrigger {
    /// Short human description, e.g. `"50 points for 10 sessions"`.
    pub fn describe(&self) -> String {
        match (&self.metric_name, self.metric_threshold) {
            (Some(metric), Some(threshold)) => format!(
                "{} points for {} {}",
                format_points(self.points),
                format_points(threshold),
                metric
            ),
            _ => format!("{} points", format_points(self.points)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointsBoost {
    pub id: String,
    pub name: String,
    pub multiplier: f64,
}

/// One point-granting event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointsAward {
    pub id: String,
    pub awarded: f64,
    #[serde(default, deserialize_with = "lenient::timestamp")]
    pub date: Option<DateTime<Utc>>,
    /// Running total after this award.
    pub total: f64,
    #[serde(default)]
    pub trigger: Option<PointsTrigger>,
    #[serde(default)]
    pub boosts: Option<Vec<PointsBoost>>,
}

impl PointsAward {
    /// Product of all boost multipliers; 1.0 without boosts.
    pub fn combined_multiplier(&self) -> f64 {
        self.boosts
            .iter()
            .flatten()
            .map(|b| b.multiplier)
            .product()
    }
}

/// A points system and the user's award history, most recent first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PointsResponse {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub badge_url: Option<String>,
    pub total: f64,
    #[serde(default)]
    pub awards: Vec<PointsAward>,
}

impl PointsResponse {
    pub fn recent_awards(&self, count: usize) -> &[PointsAward] {
        &self.awards[..count.min(self.awards.len())]
    }

    /// `"1,234 XP, 2 recent awards"`
    pub fn status_label(&self, recent: usize) -> String {
        let shown = self.recent_awards(recent).len();
        let base = format!("{} {}", format_points(self.total), self.name);
        match shown {
            0 => base,
            1 => format!("{base}, 1 recent award"),
            n => format!("{base}, {n} recent awards"),
        }
    }
}

/// Thousands-grouped number with at most three decimals, e.g. `1,234.5`.
pub fn format_points(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    let rounded = (value * 1000.0).round() / 1000.0;
    let negative = rounded < 0.0;
    let abs = rounded.abs();
    let whole = abs.trunc() as u64;
    let fraction = format!("{:.3}", abs.fract());
    let fraction = fraction.trim_start_matches('0').trim_end_matches('0');
    let fraction = if fraction == "." { "" } else { fraction };

    let digits = whole.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if negative { "-" } else { "" };
    format!("{sign}{grouped}{fraction}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> PointsResponse {
        serde_json::from_value(json!({
            "id": "xp",
            "name": "XP",
            "description": null,
            "badgeUrl": null,
            "total": 1234,
            "awards": [
                {
                    "id": "aw2", "awarded": 100, "date": "2024-03-05T10:00:00Z", "total": 1234,
                    "trigger": {
                        "id": "t1", "type": "metric", "points": 50,
                        "metricName": "sessions", "metricThreshold": 10
                    },
                    "boosts": [
                        { "id": "b1", "name": "Weekend", "multiplier": 2 },
                        { "id": "b2", "name": "Event", "multiplier": 1.5 }
                    ]
                },
                {
                    "id": "aw1", "awarded": 34, "date": "2024-03-04T10:00:00Z", "total": 1134,
                    "trigger": null, "boosts": null
                }
            ]
        }))
        .unwrap()
    }

    #[test]
    fn multiplier_is_product_of_boosts() {
        let points = sample();
        assert_eq!(points.awards[0].combined_multiplier(), 3.0);
        assert_eq!(points.awards[1].combined_multiplier(), 1.0);
    }

    #[test]
    fn status_labels() {
        let points = sample();
        assert_eq!(points.status_label(0), "1,234 XP");
        assert_eq!(points.status_label(1), "1,234 XP, 1 recent award");
        assert_eq!(points.status_label(5), "1,234 XP, 2 recent awards");
        assert_eq!(points.recent_awards(1)[0].id, "aw2");
    }

    #[test]
    fn trigger_description() {
        let points = sample();
        let trigger = points.awards[0].trigger.as_ref().unwrap();
        assert_eq!(trigger.kind, PointsTriggerKind::Metric);
        assert_eq!(trigger.describe(), "50 points for 10 sessions");
    }

    #[test]
    fn formats_grouped_numbers() {
        assert_eq!(format_points(0.0), "0");
        assert_eq!(format_points(999.0), "999");
        assert_eq!(format_points(1000.0), "1,000");
        assert_eq!(format_points(1234567.0), "1,234,567");
        assert_eq!(format_points(-4321.5), "-4,321.5");
        assert_eq!(format_points(2.125), "2.125");
        assert_eq!(format_points(0.5), "0.5");
    }
}
