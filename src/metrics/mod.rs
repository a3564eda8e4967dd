//! Metrics computed from harness output.

pub mod render;

pub use render::extract_render_metrics;
