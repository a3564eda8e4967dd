//! The fixed render sequence every component is driven through.

use crate::core::RenderPhase;
use serde_json::{Map, Value};
use std::time::Duration;

/// One scripted render trigger followed by an optional settle interval.
#[derive(Debug, Clone, PartialEq)]
pub struct Step {
    pub phase: RenderPhase,
    /// Props passed on mount/update; empty for unmount.
    pub props: Map<String, Value>,
    pub settle_after: Option<Duration>,
}

impl Step {
    fn render(phase: RenderPhase, prop: &str, value: &str, settle: Duration) -> Self {
        let mut props = Map::new();
        props.insert(prop.to_string(), Value::String(value.to_string()));
        Self {
            phase,
            props,
            settle_after: Some(settle),
        }
    }

    fn unmount() -> Self {
        Self {
            phase: RenderPhase::Unmount,
            props: Map::new(),
            settle_after: None,
        }
    }
}

/// Discrete-event script: mount, settle, update, settle, update, settle,
/// unmount.
#[derive(Debug, Clone, PartialEq)]
pub struct Choreography {
    steps: Vec<Step>,
}

impl Choreography {
    pub fn standard(settle: Duration) -> Self {
        Self {
            steps: vec![
                Step::render(RenderPhase::Mount, "initialProp", "test", settle),
                Step::render(RenderPhase::Update, "updatedProp", "test2", settle),
                Step::render(RenderPhase::Update, "updatedProp", "test3", settle),
                Step::unmount(),
            ],
        }
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Scheduled offset of each step from the start of the run.
    pub fn offsets(&self) -> Vec<Duration> {
        self.steps
            .iter()
            .scan(Duration::ZERO, |elapsed, step| {
                let start = *elapsed;
                *elapsed += step.settle_after.unwrap_or_default();
                Some(start)
            })
            .collect()
    }

    /// Sum of all settle intervals.
    pub fn scheduled_duration(&self) -> Duration {
        self.steps
            .iter()
            .filter_map(|s| s.settle_after)
            .sum()
    }
}
