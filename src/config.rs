//! Analysis configuration with file/env loading.
//!
//! Resolution order for `load_default`:
//! 1) $ANALYSIS_CONFIG_PATH
//! 2) config/analysis.toml
//! 3) config/analysis.json
//! 4) built-in defaults

use anyhow::{anyhow, Context, Result};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const ENV_PATH: &str = "ANALYSIS_CONFIG_PATH";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Minimum number of items required before a prediction run is attempted.
    /// Also the saturation point of the data-point confidence sub-score.
    pub minimum_data_points: usize,
    /// Predictions below this confidence are discarded, not published.
    pub confidence_threshold: f64,
    /// Number of future calendar days to project each surviving trend onto.
    pub future_horizon_days: i64,
    /// Days of history the caller should feed into timeline rebuilds.
    pub past_window_days: i64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            minimum_data_points: 100,
            confidence_threshold: 0.75,
            future_horizon_days: 7,
            past_window_days: 30,
        }
    }
}

impl AnalysisConfig {
    /// Start of the historical window for a rebuild anchored at `now`.
    /// The engine itself never windows input; retention is the collector's job.
    pub fn historical_window_start(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        now - Duration::days(self.past_window_days)
    }
}

/// Load configuration from an explicit path. TOML or JSON, by extension.
pub fn load_from(path: &Path) -> Result<AnalysisConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("reading analysis config from {}", path.display()))?;
    let ext = path
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or_default()
        .to_ascii_lowercase();
    match ext.as_str() {
        "json" => serde_json::from_str(&content)
            .with_context(|| format!("parsing JSON analysis config {}", path.display())),
        _ => toml::from_str(&content)
            .with_context(|| format!("parsing TOML analysis config {}", path.display())),
    }
}

/// Load configuration using the env var + fallback chain; absent everything,
/// returns the built-in defaults.
pub fn load_default() -> Result<AnalysisConfig> {
    if let Ok(p) = std::env::var(ENV_PATH) {
        let pb = PathBuf::from(p);
        if pb.exists() {
            return load_from(&pb);
        }
        return Err(anyhow!("ANALYSIS_CONFIG_PATH points to non-existent path"));
    }
    let toml_p = PathBuf::from("config/analysis.toml");
    if toml_p.exists() {
        return load_from(&toml_p);
    }
    let json_p = PathBuf::from("config/analysis.json");
    if json_p.exists() {
        return load_from(&json_p);
    }
    Ok(AnalysisConfig::default())
}
