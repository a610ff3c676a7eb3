//! Runtime configuration

use std::time::Duration;

use railboard_board::BoardSettings;
use railboard_core::{RailboardError, RailboardResult};
use serde::Deserialize;

/// Runtime configuration
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    /// Scheduler period in milliseconds
    pub tick_interval_ms: u64,
    /// Settings shared by every station board
    pub board: BoardSettings,
    /// `tracing` filter directive used when `RUST_LOG` is unset
    pub log_filter: String,
    /// Emit JSON log lines instead of the human-readable format
    pub json_logs: bool,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        RuntimeConfig {
            tick_interval_ms: 250,
            board: BoardSettings::default(),
            log_filter: "info".to_string(),
            json_logs: false,
        }
    }
}

impl RuntimeConfig {
    /// Parse a JSON document; missing fields keep their defaults
    pub fn from_json(text: &str) -> RailboardResult<Self> {
        let config: RuntimeConfig =
            serde_json::from_str(text).map_err(|e| RailboardError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Fast ticks for tests and simulations
    pub fn fast() -> Self {
        RuntimeConfig {
            tick_interval_ms: 10,
            ..Default::default()
        }
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    fn validate(&self) -> RailboardResult<()> {
        if self.tick_interval_ms == 0 {
            return Err(RailboardError::InvalidConfig(
                "tick_interval_ms must be positive".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = RuntimeConfig::default();
        assert_eq!(config.tick_interval(), Duration::from_millis(250));
        assert_eq!(config.board, BoardSettings::default());
        assert!(!config.json_logs);
    }

    #[test]
    fn test_from_json_partial() {
        let config = RuntimeConfig::from_json(
            r#"{"tick_interval_ms": 100, "board": {"approach_threshold_minutes": 5}}"#,
        )
        .unwrap();
        assert_eq!(config.tick_interval_ms, 100);
        assert_eq!(config.board.approach_threshold_minutes, 5);
        assert_eq!(config.board.arrival_grace_minutes, 5);
        assert_eq!(config.log_filter, "info");
    }

    #[test]
    fn test_from_json_rejects_bad_input() {
        assert!(matches!(
            RuntimeConfig::from_json("{not json"),
            Err(RailboardError::InvalidConfig(_))
        ));
        assert!(matches!(
            RuntimeConfig::from_json(r#"{"tick_interval_ms": 0}"#),
            Err(RailboardError::InvalidConfig(_))
        ));
    }
}
