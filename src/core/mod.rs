//! Data model shared by every stage of a component analysis run.
//!
//! All values are created fresh per run and never mutated after creation.

use crate::errors::{AnalysisError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// Raw component text plus the path it was read from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ComponentSource {
    path: PathBuf,
    content: String,
}

impl ComponentSource {
    pub fn new(path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
        }
    }

    /// Read a component file, mapping a missing file to `NotFound`.
    pub fn read(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(AnalysisError::NotFound {
                path: path.to_path_buf(),
            });
        }
        let content = std::fs::read_to_string(path).map_err(|e| AnalysisError::io(e, path))?;
        Ok(Self::new(path, content))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn identity(&self) -> ComponentIdentity {
        ComponentIdentity::from_path(&self.path)
    }
}

/// Name used to label instrumentation and correlate log lines.
///
/// Derived from the file name up to its first `.`, so `TodoList.test.tsx`
/// becomes `TodoList`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ComponentIdentity(String);

impl ComponentIdentity {
    const FALLBACK: &'static str = "Component";

    pub fn from_path(path: &Path) -> Self {
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .and_then(|n| n.split('.').next())
            .filter(|stem| !stem.is_empty())
            .unwrap_or(Self::FALLBACK);
        Self(name.to_string())
    }

    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ComponentIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Profiler phase of one render commit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderPhase {
    Mount,
    Update,
    Unmount,
}

impl RenderPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mount => "mount",
            Self::Update => "update",
            Self::Unmount => "unmount",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "mount" => Some(Self::Mount),
            "update" => Some(Self::Update),
            "unmount" => Some(Self::Unmount),
            _ => None,
        }
    }
}

impl fmt::Display for RenderPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One profiler sample, as serialized by the instrumentation wrapper.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderEvent {
    pub phase: RenderPhase,
    pub actual_duration: f64,
    pub base_duration: f64,
    pub start_time: f64,
    pub commit_time: f64,
}

/// Aggregate render metrics reduced from a harness transcript.
///
/// `average_render_time` and `max_render_time` are `None` when the
/// transcript carried no duration samples. `unnecessary_renders` is a coarse
/// proxy (1 when more than one duration was observed), not a causal
/// determination.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderMetrics {
    pub total_renders: u64,
    pub average_render_time: Option<f64>,
    pub max_render_time: Option<f64>,
    pub unnecessary_renders: u64,
    pub render_times: Vec<f64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub events: Vec<RenderEvent>,
}

impl RenderMetrics {
    pub fn has_samples(&self) -> bool {
        !self.render_times.is_empty()
    }
}

/// Format an optional millisecond value, rendering absence as `undefined`.
pub fn format_millis(value: Option<f64>) -> String {
    match value {
        Some(ms) => format!("{ms:.2}ms"),
        None => "undefined".to_string(),
    }
}

/// A declared `[value, setValue] = useState(...)` pair.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StateHook {
    pub name: String,
    pub setter_name: String,
}

impl StateHook {
    pub fn new(name: impl Into<String>, setter_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            setter_name: setter_name.into(),
        }
    }
}

/// Update counts for one declared state hook.
///
/// `redundant_updates` is always `self_referential_updates + adjacent_updates`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StateUpdateRecord {
    pub state_name: String,
    pub setter_name: String,
    pub update_count: usize,
    pub redundant_updates: usize,
    pub self_referential_updates: usize,
    pub adjacent_updates: usize,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StateMetrics {
    pub total_state_updates: usize,
    pub redundant_state_updates: usize,
    pub state_update_details: Vec<StateUpdateRecord>,
}

impl StateMetrics {
    pub fn from_records(records: Vec<StateUpdateRecord>) -> Self {
        Self {
            total_state_updates: records.iter().map(|r| r.update_count).sum(),
            redundant_state_updates: records.iter().map(|r| r.redundant_updates).sum(),
            state_update_details: records,
        }
    }
}

/// Everything handed to a report writer after a successful run.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    pub component_name: ComponentIdentity,
    pub component_path: PathBuf,
    pub generated_at: DateTime<Utc>,
    pub render_metrics: RenderMetrics,
    pub state_metrics: StateMetrics,
}
