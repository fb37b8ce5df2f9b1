use serde::{Deserialize, Serialize};

use super::model::StreakRecord;

/// Available streak freezes as a row of filled/empty slots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FreezeIndicator {
    pub freezes: u32,
    pub max_freezes: u32,
}

impl FreezeIndicator {
    /// `max_freezes` defaults to `freezes`. Returns `None` when no freezes
    /// are configured at all.
    pub fn new(freezes: Option<u32>, max_freezes: Option<u32>) -> Option<Self> {
        let freezes = freezes.unwrap_or(0);
        let max_freezes = max_freezes.unwrap_or(freezes);
        if max_freezes == 0 {
            return None;
        }
        Some(Self {
            freezes,
            max_freezes,
        })
    }

    pub fn from_record(streak: &StreakRecord) -> Option<Self> {
        Self::new(streak.freezes, streak.max_freezes)
    }

    /// One entry per slot, `true` for filled.
    pub fn slots(&self) -> Vec<bool> {
        (0..self.max_freezes).map(|i| i < self.freezes).collect()
    }

    /// `"2/3"`
    pub fn ratio(&self) -> String {
        format!("{}/{}", self.freezes, self.max_freezes)
    }

    pub fn label(&self) -> String {
        let plural = if self.max_freezes == 1 { "" } else { "s" };
        format!(
            "{} of {} streak freeze{} available",
            self.freezes, self.max_freezes, plural
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hidden_without_configured_freezes() {
        assert!(FreezeIndicator::new(None, None).is_none());
        assert!(FreezeIndicator::new(Some(0), Some(0)).is_none());
        assert!(FreezeIndicator::from_record(&StreakRecord::default()).is_none());
    }

    #[test]
    fn max_defaults_to_current_count() {
        let indicator = FreezeIndicator::new(Some(2), None).unwrap();
        assert_eq!(indicator.max_freezes, 2);
        assert_eq!(indicator.slots(), vec![true, true]);
    }

    #[test]
    fn slots_and_labels() {
        let indicator = FreezeIndicator::new(Some(1), Some(3)).unwrap();
        assert_eq!(indicator.slots(), vec![true, false, false]);
        assert_eq!(indicator.ratio(), "1/3");
        assert_eq!(indicator.label(), "1 of 3 streak freezes available");

        let single = FreezeIndicator::new(Some(0), Some(1)).unwrap();
        assert_eq!(single.label(), "0 of 1 streak freeze available");
    }
}
