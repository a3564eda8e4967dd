//! React component heuristics: classification, state hook extraction and
//! redundant update detection.

mod classifier;
pub mod patterns;
mod redundancy;
mod state_hooks;

pub use classifier::{classify, classify_with_evidence, ClassificationEvidence};
pub use redundancy::analyze_redundancy;
pub use state_hooks::extract_state_hooks;

use crate::core::StateMetrics;
use tracing::debug;

/// Static state-update scan of one component source.
pub fn analyze_state_updates(source: &str) -> StateMetrics {
    let hooks = extract_state_hooks(source);
    debug!(hooks = hooks.len(), "Extracted state hooks");
    StateMetrics::from_records(analyze_redundancy(&hooks, source))
}
