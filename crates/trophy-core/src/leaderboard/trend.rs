use serde::{Deserialize, Serialize};

/// Direction of rank movement between two observations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RankTrend {
    Up,
    Down,
    Same,
    New,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankChange {
    pub trend: RankTrend,
    /// Places moved; only set for `Up` and `Down`.
    pub magnitude: Option<u32>,
}

impl RankChange {
    /// `"+3"`, `"-1"`, `"NEW"` or `"—"`.
    pub fn label(&self) -> String {
        match (self.trend, self.magnitude) {
            (RankTrend::Up, Some(n)) => format!("+{n}"),
            (RankTrend::Up, None) => "↑".to_string(),
            (RankTrend::Down, Some(n)) => format!("-{n}"),
            (RankTrend::Down, None) => "↓".to_string(),
            (RankTrend::New, _) => "NEW".to_string(),
            (RankTrend::Same, _) => "—".to_string(),
        }
    }
}

/// Lower rank numbers are better, so moving from 5 to 2 is `Up` by 3.
pub fn classify_trend(previous: Option<u32>, current: u32) -> RankChange {
    let Some(previous) = previous else {
        return RankChange {
            trend: RankTrend::New,
            magnitude: None,
        };
    };
    let trend = match current.cmp(&previous) {
        std::cmp::Ordering::Less => RankTrend::Up,
        std::cmp::Ordering::Greater => RankTrend::Down,
        std::cmp::Ordering::Equal => RankTrend::Same,
    };
    let magnitude = (trend != RankTrend::Same).then(|| previous.abs_diff(current));
    RankChange { trend, magnitude }
}
