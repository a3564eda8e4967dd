use crate::errors::{AnalysisError, Result};
use crate::harness::{ClockMode, HarnessMode};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Longest accepted settle interval between choreography steps.
pub const MAX_SETTLE_INTERVAL_MS: u64 = 60_000;

/// Root configuration structure for blinkreact
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BlinkConfig {
    /// Render harness configuration
    #[serde(default)]
    pub harness: HarnessConfig,

    /// Where generated files are written
    #[serde(default)]
    pub artifacts: ArtifactConfig,

    /// Report configuration
    #[serde(default)]
    pub output: OutputConfig,
}

impl BlinkConfig {
    /// Check cross-field constraints. Called after CLI overrides are applied.
    pub fn validate(&self) -> Result<()> {
        self.harness.validate()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HarnessConfig {
    #[serde(default)]
    pub mode: HarnessMode,

    /// Wait between choreography steps
    #[serde(default = "default_settle_interval_ms")]
    pub settle_interval_ms: u64,

    /// Total wall-clock budget of one harness drive
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    #[serde(default)]
    pub clock: ClockMode,

    /// Command executing the harness script in process mode
    #[serde(default = "default_runner")]
    pub runner: Vec<String>,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            mode: HarnessMode::default(),
            settle_interval_ms: default_settle_interval_ms(),
            timeout_ms: default_timeout_ms(),
            clock: ClockMode::default(),
            runner: default_runner(),
        }
    }
}

impl HarnessConfig {
    pub fn settle_interval(&self) -> Duration {
        Duration::from_millis(self.settle_interval_ms)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    pub fn validate(&self) -> Result<()> {
        if self.settle_interval_ms > MAX_SETTLE_INTERVAL_MS {
            return Err(AnalysisError::config(format!(
                "harness.settle_interval_ms must be at most {MAX_SETTLE_INTERVAL_MS}, got {}",
                self.settle_interval_ms
            )));
        }
        if self.timeout_ms == 0 {
            return Err(AnalysisError::config("harness.timeout_ms must be greater than 0"));
        }
        let scheduled = self.settle_interval_ms.saturating_mul(3);
        if self.timeout_ms <= scheduled {
            return Err(AnalysisError::config(format!(
                "harness.timeout_ms ({}) must exceed three settle intervals ({scheduled}ms)",
                self.timeout_ms
            )));
        }
        if self.mode == HarnessMode::Process && self.runner.is_empty() {
            return Err(AnalysisError::config(
                "harness.runner must name a command in process mode",
            ));
        }
        Ok(())
    }
}

fn default_settle_interval_ms() -> u64 {
    500
}

fn default_timeout_ms() -> u64 {
    10_000
}

fn default_runner() -> Vec<String> {
    ["npx", "--yes", "tsx"].map(String::from).to_vec()
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ArtifactConfig {
    /// Directory for generated files; the component's directory when unset
    #[serde(default)]
    pub dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    #[default]
    Markdown,
    Json,
    Terminal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub format: ReportFormat,

    /// Report destination; ignored by the terminal format
    #[serde(default = "default_report_path")]
    pub path: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: ReportFormat::default(),
            path: default_report_path(),
        }
    }
}

fn default_report_path() -> PathBuf {
    PathBuf::from("PERFORMANCE_REPORT.md")
}
