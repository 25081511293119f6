use std::env;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ForwarderError;

/// Fractional digits kept for metric values when nothing is configured.
pub const DEFAULT_METRIC_ROUNDING: u32 = 3;

/// Load .env file (silently ignores if missing).
pub fn load_dotenv() {
    dotenvy::dotenv().ok();
}

/// Load an explicit env file. Unlike [`load_dotenv`], a missing file is an error.
pub fn load_dotenv_from(path: &Path) -> Result<(), ForwarderError> {
    dotenvy::from_path(path)
        .map_err(|e| ForwarderError::Config(format!("failed to load {}: {e}", path.display())))
}

/// Which webhook schema an incoming payload follows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PayloadVersion {
    /// Legacy dashboard alerting (`ruleId`, `evalMatches`, ...).
    Legacy,
    /// Unified alerting (`alerts[]`, `commonLabels`, ...).
    #[default]
    Unified,
}

impl FromStr for PayloadVersion {
    type Err = ForwarderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "legacy" | "v0" => Ok(PayloadVersion::Legacy),
            "unified" | "v1" => Ok(PayloadVersion::Unified),
            other => Err(ForwarderError::Config(format!(
                "unknown payload version '{other}' (expected 'legacy' or 'unified')"
            ))),
        }
    }
}

impl std::fmt::Display for PayloadVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PayloadVersion::Legacy => write!(f, "legacy"),
            PayloadVersion::Unified => write!(f, "unified"),
        }
    }
}

// ── Top-level config ──────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Fractional digits retained when rendering metric values (0 = raw value).
    pub metric_rounding: u32,
    /// Schema used to decode incoming webhook payloads.
    pub payload_version: PayloadVersion,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            metric_rounding: DEFAULT_METRIC_ROUNDING,
            payload_version: PayloadVersion::default(),
        }
    }
}

impl Config {
    /// Build config from environment variables (call `load_dotenv()` first).
    pub fn from_env() -> Result<Self, ForwarderError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build config from an arbitrary key lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ForwarderError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let metric_rounding = match get("FORWARDER_METRIC_ROUNDING") {
            Some(raw) => raw.trim().parse::<u32>().map_err(|e| {
                ForwarderError::Config(format!(
                    "FORWARDER_METRIC_ROUNDING must be a non-negative integer, got '{raw}': {e}"
                ))
            })?,
            None => DEFAULT_METRIC_ROUNDING,
        };

        let payload_version = match get("FORWARDER_PAYLOAD_VERSION") {
            Some(raw) => raw.parse()?,
            None => PayloadVersion::default(),
        };

        Ok(Self {
            metric_rounding,
            payload_version,
        })
    }

    /// Print a summary for startup logs.
    pub fn log_summary(&self) {
        tracing::info!("Config loaded:");
        tracing::info!("  metric_rounding:  {}", self.metric_rounding);
        tracing::info!("  payload_version:  {}", self.payload_version);
    }
}
