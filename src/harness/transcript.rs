//! Log line format shared by the instrumentation wrapper and the runners.
//!
//! The instrumented component writes exactly these lines from JavaScript,
//! and the simulated runner produces them directly, so the metrics
//! extractor sees one format regardless of how the harness ran.

use crate::core::{ComponentIdentity, RenderEvent, RenderPhase};
use once_cell::sync::Lazy;
use regex::Regex;

pub const LOG_PREFIX: &str = "[BlinkReact]";

static PHASE_MARKER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\[BlinkReact\] harness phase: (mount|update|unmount)\s*$").unwrap()
});

pub fn start_line() -> String {
    format!("{LOG_PREFIX} Starting render test...")
}

pub fn complete_line() -> String {
    format!("{LOG_PREFIX} Render test complete")
}

pub fn phase_marker_line(phase: RenderPhase) -> String {
    format!("{LOG_PREFIX} harness phase: {phase}")
}

/// Line written on every render commit.
pub fn render_commit_line(identity: &ComponentIdentity, count: u64, actual_duration: f64) -> String {
    format!("{LOG_PREFIX} {identity} rendered {count} times, render duration: {actual_duration:.2}ms")
}

/// Line written on unmount with every sample collected by the instance.
pub fn render_times_line(
    identity: &ComponentIdentity,
    events: &[RenderEvent],
) -> Result<String, serde_json::Error> {
    Ok(format!(
        "{LOG_PREFIX} {identity} render times: {}",
        serde_json::to_string(events)?
    ))
}

/// Lines emitted between two consecutive phase markers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscriptSegment {
    pub phase: RenderPhase,
    pub lines: Vec<String>,
}

/// Raw output captured from one harness run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Transcript {
    text: String,
}

impl Transcript {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut text = String::new();
        for line in lines {
            text.push_str(line.as_ref());
            text.push('\n');
        }
        Self { text }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Split the transcript at harness phase markers. Lines before the first
    /// marker belong to no segment.
    pub fn segments(&self) -> Vec<TranscriptSegment> {
        let mut segments: Vec<TranscriptSegment> = Vec::new();
        for line in self.text.lines() {
            if let Some(phase) = PHASE_MARKER
                .captures(line)
                .and_then(|caps| RenderPhase::parse(&caps[1]))
            {
                segments.push(TranscriptSegment {
                    phase,
                    lines: Vec::new(),
                });
            } else if let Some(current) = segments.last_mut() {
                current.lines.push(line.to_string());
            }
        }
        segments
    }

    pub fn phases(&self) -> Vec<RenderPhase> {
        self.segments().into_iter().map(|s| s.phase).collect()
    }
}
