// Export modules for library usage
pub mod analyzers;
pub mod cli;
pub mod commands;
pub mod config;
pub mod core;
pub mod errors;
pub mod formatting;
pub mod harness;
pub mod instrumentation;
pub mod io;
pub mod metrics;
pub mod observability;

// Re-export commonly used types
pub use crate::core::{
    AnalysisReport, ComponentIdentity, ComponentSource, RenderEvent, RenderMetrics, RenderPhase,
    StateHook, StateMetrics, StateUpdateRecord,
};

pub use crate::analyzers::{
    analyze_redundancy, analyze_state_updates, classify, classify_with_evidence,
    extract_state_hooks,
};

pub use crate::commands::{analyze_component, analyze_component_blocking};

pub use crate::config::{BlinkConfig, ReportFormat};

pub use crate::errors::{AnalysisError, ErrorCode};

pub use crate::harness::{HarnessDriver, HarnessMode};

pub use crate::instrumentation::instrument;

pub use crate::io::output::{create_writer, ReportWriter};

pub use crate::metrics::extract_render_metrics;
