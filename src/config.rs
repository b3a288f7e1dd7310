//! Timing settings for the controls, loadable from a TOML file.
//!
//! ```toml
//! hide_delay_ms = 2000
//! seek_step_ms = 5000
//! ```
//!
//! Missing keys take their defaults. A negative `hide_delay_ms` is treated as
//! zero, which makes every hide apply immediately.

use crate::Error;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;
use tracing::info;

pub const DEFAULT_HIDE_DELAY: Duration = crate::visibility::DEFAULT_GRACE;
pub const DEFAULT_SEEK_STEP: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// Time the controls stay visible after the last pointer activity.
    pub hide_delay: Duration,
    /// Distance covered by the seek backward/forward buttons.
    pub seek_step: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            hide_delay: DEFAULT_HIDE_DELAY,
            seek_step: DEFAULT_SEEK_STEP,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct RawConfig {
    #[serde(default)]
    hide_delay_ms: Option<i64>,
    #[serde(default)]
    seek_step_ms: Option<u64>,
}

impl From<RawConfig> for Config {
    fn from(raw: RawConfig) -> Self {
        let defaults = Config::default();
        Config {
            hide_delay: raw
                .hide_delay_ms
                .map_or(defaults.hide_delay, |ms| Duration::from_millis(ms.max(0) as u64)),
            seek_step: raw
                .seek_step_ms
                .map_or(defaults.seek_step, Duration::from_millis),
        }
    }
}

/// Whole milliseconds in `value`, or an error if saving would lose precision.
fn whole_millis<N: TryFrom<u128>>(key: &'static str, value: Duration) -> Result<N, Error> {
    let unrepresentable = || Error::Unrepresentable { key, value };
    if value.subsec_nanos() % 1_000_000 != 0 {
        return Err(unrepresentable());
    }
    N::try_from(value.as_millis()).map_err(|_| unrepresentable())
}

impl TryFrom<&Config> for RawConfig {
    type Error = Error;

    fn try_from(config: &Config) -> Result<Self, Error> {
        Ok(RawConfig {
            hide_delay_ms: Some(whole_millis("hide_delay_ms", config.hide_delay)?),
            seek_step_ms: Some(whole_millis("seek_step_ms", config.seek_step)?),
        })
    }
}

impl Config {
    pub fn from_toml_str(content: &str) -> Result<Self, Error> {
        let raw: RawConfig = toml::from_str(content)?;
        Ok(raw.into())
    }

    pub fn load(path: &Path) -> Result<Self, Error> {
        let content = fs::read_to_string(path)?;
        let config = Self::from_toml_str(&content)?;
        info!(message = "loaded controls config", path = %path.display(), ?config);
        Ok(config)
    }

    /// Fails with [`Error::Unrepresentable`] for durations that are not a
    /// whole number of milliseconds, so a saved config always loads back
    /// unchanged.
    pub fn to_toml_string(&self) -> Result<String, Error> {
        Ok(toml::to_string_pretty(&RawConfig::try_from(self)?)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn empty_document_uses_defaults() {
        let config = Config::from_toml_str("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.hide_delay, Duration::from_millis(2000));
        assert_eq!(config.seek_step, Duration::from_secs(5));
    }

    #[test]
    fn negative_hide_delay_clamps_to_zero() {
        let config = Config::from_toml_str("hide_delay_ms = -250").unwrap();
        assert_eq!(config.hide_delay, Duration::ZERO);
    }

    #[test]
    fn invalid_toml_is_reported() {
        let result = Config::from_toml_str("hide_delay_ms = \"soon\"");
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn saved_config_loads_back() {
        let config = Config {
            hide_delay: Duration::from_millis(1200),
            seek_step: Duration::from_secs(10),
        };
        let dir = tempdir().expect("failed to create temp dir");
        let path = dir.path().join("controls.toml");
        fs::write(&path, config.to_toml_string().unwrap()).unwrap();

        assert_eq!(Config::load(&path).unwrap(), config);
    }

    #[test]
    fn sub_second_values_survive_a_round_trip() {
        let config = Config {
            hide_delay: Duration::from_millis(1500),
            seek_step: Duration::from_millis(2500),
        };
        let loaded = Config::from_toml_str(&config.to_toml_string().unwrap()).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn sub_millisecond_values_are_not_saved() {
        let config = Config {
            hide_delay: Duration::from_micros(1500),
            ..Config::default()
        };
        let result = config.to_toml_string();
        assert!(matches!(
            result,
            Err(Error::Unrepresentable {
                key: "hide_delay_ms",
                ..
            })
        ));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = tempdir().expect("failed to create temp dir");
        let result = Config::load(&dir.path().join("missing.toml"));
        assert!(matches!(result, Err(Error::Io(_))));
    }
}
