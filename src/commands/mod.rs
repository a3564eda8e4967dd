//! CLI command implementations for blinkreact.
//!
//! - **analyze**: profile one component file and write its performance report

pub mod analyze;

pub use analyze::{analyze_component, analyze_component_blocking, handle_analyze};
