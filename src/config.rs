//! Timing configuration.

use crate::constants::{COMMAND_MODE_ENTER_MS, COMMAND_MODE_EXIT_MS, RESPONSE_TIMEOUT_MS};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Timing knobs for talking to the module.
///
/// Fields are milliseconds when (de)serialized so the struct can sit in an
/// application's config file:
///
/// ```
/// let config: hc12::Hc12Config =
///     serde_json::from_str(r#"{ "response_timeout_ms": 300 }"#).unwrap();
/// assert_eq!(config.response_timeout.as_millis(), 300);
/// assert_eq!(config.enter_settle.as_millis(), 40);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Hc12Config {
    /// How long to wait for a reply line
    #[serde(rename = "response_timeout_ms", with = "millis")]
    pub response_timeout: Duration,
    /// Wait after pulling SET low
    #[serde(rename = "enter_settle_ms", with = "millis")]
    pub enter_settle: Duration,
    /// Wait after releasing SET
    #[serde(rename = "exit_settle_ms", with = "millis")]
    pub exit_settle: Duration,
}

impl Default for Hc12Config {
    fn default() -> Self {
        Hc12Config {
            response_timeout: Duration::from_millis(RESPONSE_TIMEOUT_MS),
            enter_settle: Duration::from_millis(COMMAND_MODE_ENTER_MS),
            exit_settle: Duration::from_millis(COMMAND_MODE_EXIT_MS),
        }
    }
}

impl Hc12Config {
    /// No settle delays, for simulated hardware
    pub fn without_settle(self) -> Self {
        Hc12Config {
            enter_settle: Duration::ZERO,
            exit_settle: Duration::ZERO,
            ..self
        }
    }
}

mod millis {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(value.as_millis() as u64)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_module_timing() {
        let config = Hc12Config::default();
        assert_eq!(config.response_timeout, Duration::from_millis(150));
        assert_eq!(config.enter_settle, Duration::from_millis(40));
        assert_eq!(config.exit_settle, Duration::from_millis(80));
    }

    #[test]
    fn serde_uses_milliseconds() {
        let json = serde_json::to_value(Hc12Config::default()).unwrap();
        assert_eq!(json["response_timeout_ms"], 150);
        assert_eq!(json["exit_settle_ms"], 80);

        let config: Hc12Config = serde_json::from_str(r#"{"exit_settle_ms": 5}"#).unwrap();
        assert_eq!(config.exit_settle, Duration::from_millis(5));
        assert_eq!(config.response_timeout, Duration::from_millis(150));
    }
}
