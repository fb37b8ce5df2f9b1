//! Aggregate configuration, stored as TOML.
//!
//! Each component owns its section type; [`TrophyConfig`] only groups them.
//! Keys are addressed with dot paths such as `streak.warning_hours`.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::achievement::AchievementGridConfig;
use crate::error::{ConfigError, CoreError, Result};
use crate::leaderboard::LeaderboardConfig;
use crate::points::AnimationConfig;
use crate::streak::{CalendarConfig, StreakRiskConfig};

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TrophyConfig {
    #[serde(default)]
    pub streak: StreakRiskConfig,
    #[serde(default)]
    pub calendar: CalendarConfig,
    #[serde(default)]
    pub achievements: AchievementGridConfig,
    #[serde(default)]
    pub leaderboard: LeaderboardConfig,
    #[serde(default)]
    pub animation: AnimationConfig,
}

impl TrophyConfig {
    /// Parse and validate a TOML document. Missing sections and keys take
    /// their defaults.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: TrophyConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate the file at `path`.
    ///
    /// # Errors
    ///
    /// [`ConfigError::LoadFailed`] if the file cannot be read or parsed,
    /// [`ConfigError::InvalidValue`] if a value is out of range.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::LoadFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        let config: TrophyConfig =
            toml::from_str(&content).map_err(|e| ConfigError::LoadFailed {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;
        config.validate()?;
        tracing::debug!(path = %path.display(), "loaded trophy config");
        Ok(config)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self).map_err(ConfigError::from)?)
    }

    /// Check cross-field constraints.
    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        let streak = &self.streak;
        if !streak.critical_hours.is_finite() || streak.critical_hours < 0.0 {
            return Err(invalid("streak.critical_hours", "must be a non-negative number"));
        }
        if !streak.warning_hours.is_finite() || streak.warning_hours < streak.critical_hours {
            return Err(invalid(
                "streak.warning_hours",
                "must be at least streak.critical_hours",
            ));
        }
        if self.animation.max_items == 0 {
            return Err(invalid("animation.max_items", "must be at least 1"));
        }
        if self.animation.duration_ms == 0 {
            return Err(invalid("animation.duration_ms", "must be at least 1"));
        }
        Ok(())
    }

    /// Get a value as a string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Set a value by dot-separated key. The result must still validate;
    /// on error `self` is left unchanged.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let updated = match self.with_value(key, value, false) {
            Ok(updated) => updated,
            // An unset optional field may hold text that only looks numeric.
            Err(CoreError::Config(ConfigError::InvalidValue { .. })) => {
                self.with_value(key, value, true)?
            }
            Err(e) => return Err(e),
        };
        updated.validate()?;
        tracing::debug!(key, value, "updated trophy config");
        *self = updated;
        Ok(())
    }

    fn with_value(&self, key: &str, value: &str, null_as_text: bool) -> Result<TrophyConfig> {
        let mut json = serde_json::to_value(self)?;
        set_json_value_by_path(&mut json, key, value, null_as_text)?;
        let updated = serde_json::from_value(json).map_err(|e| invalid(key, &e.to_string()))?;
        Ok(updated)
    }
}

fn invalid(key: &str, message: &str) -> ConfigError {
    ConfigError::InvalidValue {
        key: key.to_string(),
        message: message.to_string(),
    }
}

fn get_json_value_by_path<'a>(
    root: &'a serde_json::Value,
    key: &str,
) -> Option<&'a serde_json::Value> {
    if key.is_empty() {
        return None;
    }

    let mut current = root;
    for part in key.split('.') {
        current = current.get(part)?;
    }
    Some(current)
}

fn set_json_value_by_path(
    root: &mut serde_json::Value,
    key: &str,
    value: &str,
    null_as_text: bool,
) -> std::result::Result<(), ConfigError> {
    let unknown = || ConfigError::UnknownKey(key.to_string());
    if key.is_empty() {
        return Err(unknown());
    }

    let mut parts = key.split('.').peekable();
    let mut current = root;
    while let Some(part) = parts.next() {
        if parts.peek().is_some() {
            current = current.get_mut(part).ok_or_else(unknown)?;
            continue;
        }

        let obj = current.as_object_mut().ok_or_else(unknown)?;
        let existing = obj.get(part).ok_or_else(unknown)?;
        let new_value = match existing {
            serde_json::Value::Bool(_) => {
                serde_json::Value::Bool(value.parse::<bool>().map_err(|_| {
                    invalid(key, &format!("cannot parse '{value}' as bool"))
                })?)
            }
            serde_json::Value::Number(_) => parse_number(value)
                .ok_or_else(|| invalid(key, &format!("cannot parse '{value}' as number")))?,
            // Unset optional field: the target type is unknown here.
            serde_json::Value::Null if null_as_text => serde_json::Value::String(value.into()),
            serde_json::Value::Null => {
                parse_number(value).unwrap_or_else(|| serde_json::Value::String(value.into()))
            }
            serde_json::Value::Object(_) | serde_json::Value::Array(_) => {
                serde_json::from_str(value).map_err(|e| invalid(key, &e.to_string()))?
            }
            serde_json::Value::String(_) => serde_json::Value::String(value.into()),
        };
        obj.insert(part.to_string(), new_value);
        return Ok(());
    }

    Err(unknown())
}

fn parse_number(value: &str) -> Option<serde_json::Value> {
    if let Ok(n) = value.parse::<u64>() {
        return Some(serde_json::Value::Number(n.into()));
    }
    value
        .parse::<f64>()
        .ok()
        .and_then(serde_json::Number::from_f64)
        .map(serde_json::Value::Number)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::points::PointsColor;
    use crate::time::StartOfWeek;
    use std::io::Write;

    #[test]
    fn default_config_roundtrip() {
        let cfg = TrophyConfig::default();
        let toml = cfg.to_toml_string().unwrap();
        let parsed = TrophyConfig::from_toml_str(&toml).unwrap();
        assert_eq!(parsed, cfg);
    }

    #[test]
    fn config_default_values() {
        let cfg = TrophyConfig::default();
        assert_eq!(cfg.streak.warning_hours, 6.0);
        assert_eq!(cfg.streak.critical_hours, 2.0);
        assert_eq!(cfg.streak.refresh_interval_secs, 60);
        assert_eq!(cfg.calendar.start_of_week, StartOfWeek::Sunday);
        assert!(cfg.calendar.show_freezes);
        assert_eq!(cfg.animation.duration_ms, 1000);
        assert_eq!(cfg.animation.max_items, 10);
        assert_eq!(cfg.animation.prefix, "+");
        assert_eq!(cfg.animation.color, PointsColor::Green);
        assert_eq!(cfg.leaderboard.limit, None);
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let cfg = TrophyConfig::from_toml_str(
            r#"
            [streak]
            warning_hours = 12.0

            [calendar]
            start_of_week = "monday"
            "#,
        )
        .unwrap();
        assert_eq!(cfg.streak.warning_hours, 12.0);
        assert_eq!(cfg.streak.critical_hours, 2.0);
        assert_eq!(cfg.calendar.start_of_week, StartOfWeek::Monday);
        assert_eq!(cfg.animation.max_items, 10);
    }

    #[test]
    fn rejects_inverted_thresholds() {
        let err = TrophyConfig::from_toml_str(
            "[streak]\nwarning_hours = 1.0\ncritical_hours = 2.0\n",
        )
        .unwrap_err();
        assert!(matches!(
            err,
            CoreError::Config(ConfigError::InvalidValue { ref key, .. })
                if key == "streak.warning_hours"
        ));
    }

    #[test]
    fn rejects_zero_capacity() {
        let err = TrophyConfig::from_toml_str("[animation]\nmax_items = 0\n").unwrap_err();
        assert!(matches!(err, CoreError::Config(ConfigError::InvalidValue { .. })));
    }

    #[test]
    fn get_supports_dot_path_keys() {
        let cfg = TrophyConfig::default();
        assert_eq!(cfg.get("streak.warning_hours").as_deref(), Some("6.0"));
        assert_eq!(cfg.get("animation.prefix").as_deref(), Some("+"));
        assert_eq!(cfg.get("calendar.show_freezes").as_deref(), Some("true"));
        assert_eq!(cfg.get("streak.nope"), None);
        assert_eq!(cfg.get(""), None);
    }

    #[test]
    fn set_updates_nested_values() {
        let mut cfg = TrophyConfig::default();
        cfg.set("calendar.show_freezes", "false").unwrap();
        cfg.set("animation.max_items", "3").unwrap();
        cfg.set("animation.color", "gold").unwrap();
        cfg.set("leaderboard.limit", "5").unwrap();
        cfg.set("leaderboard.current_user_id", "u42").unwrap();

        assert!(!cfg.calendar.show_freezes);
        assert_eq!(cfg.animation.max_items, 3);
        assert_eq!(cfg.animation.color, PointsColor::Gold);
        assert_eq!(cfg.leaderboard.limit, Some(5));
        assert_eq!(cfg.leaderboard.current_user_id.as_deref(), Some("u42"));
    }

    #[test]
    fn set_numeric_text_on_optional_string() {
        let mut cfg = TrophyConfig::default();
        cfg.set("leaderboard.current_user_id", "123456").unwrap();
        assert_eq!(cfg.leaderboard.current_user_id.as_deref(), Some("123456"));
        assert_eq!(cfg.get("leaderboard.current_user_id").as_deref(), Some("123456"));

        cfg.set("leaderboard.limit", "25").unwrap();
        assert_eq!(cfg.leaderboard.limit, Some(25));
        assert!(cfg.set("leaderboard.limit", "lots").is_err());
        assert_eq!(cfg.leaderboard.limit, Some(25));
    }

    #[test]
    fn set_rejects_unknown_key() {
        let mut cfg = TrophyConfig::default();
        let err = cfg.set("streak.nonexistent_key", "1").unwrap_err();
        assert!(matches!(err, CoreError::Config(ConfigError::UnknownKey(_))));
    }

    #[test]
    fn set_rejects_invalid_type_and_keeps_state() {
        let mut cfg = TrophyConfig::default();
        assert!(cfg.set("calendar.show_freezes", "not_a_bool").is_err());
        assert!(cfg.set("animation.color", "chartreuse").is_err());
        assert!(cfg.set("streak.critical_hours", "10").is_err());
        assert_eq!(cfg, TrophyConfig::default());
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[leaderboard]\nlimit = 10\n\n[animation]\nsuffix = \" XP\"").unwrap();

        let cfg = TrophyConfig::load_from(file.path()).unwrap();
        assert_eq!(cfg.leaderboard.limit, Some(10));
        assert_eq!(cfg.animation.suffix, " XP");
    }

    #[test]
    fn load_from_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let err = TrophyConfig::load_from(dir.path().join("missing.toml")).unwrap_err();
        assert!(matches!(err, CoreError::Config(ConfigError::LoadFailed { .. })));
    }

    #[test]
    fn load_from_malformed_file_fails() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[streak\nwarning_hours = ").unwrap();
        let err = TrophyConfig::load_from(file.path()).unwrap_err();
        assert!(matches!(err, CoreError::Config(ConfigError::LoadFailed { .. })));
    }
}
