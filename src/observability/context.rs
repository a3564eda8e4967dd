//! Thread-local context tracking for crash reports.
//!
//! Records which pipeline phase and component the current thread is working
//! on. Guards restore the previous context on drop, so nested phases unwind
//! correctly.

use std::cell::RefCell;
use std::path::{Path, PathBuf};

thread_local! {
    static CURRENT_CONTEXT: RefCell<AnalysisContext> = const { RefCell::new(AnalysisContext::new()) };
}

/// Context snapshot for the current analysis operation.
#[derive(Debug, Clone, Default)]
pub struct AnalysisContext {
    pub phase: Option<AnalysisPhase>,
    pub component: Option<PathBuf>,
}

impl AnalysisContext {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            phase: None,
            component: None,
        }
    }
}

/// Stages of a component analysis run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalysisPhase {
    /// Reading and classifying the component source
    Classification,
    /// Writing the instrumented artifact
    Instrumentation,
    /// Driving the render choreography
    Harness,
    /// Reducing the transcript to render metrics
    RenderMetrics,
    /// Scanning state hooks for redundant updates
    StateAnalysis,
    /// Rendering the report
    ReportGeneration,
}

impl std::fmt::Display for AnalysisPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Classification => write!(f, "classification"),
            Self::Instrumentation => write!(f, "instrumentation"),
            Self::Harness => write!(f, "harness"),
            Self::RenderMetrics => write!(f, "render_metrics"),
            Self::StateAnalysis => write!(f, "state_analysis"),
            Self::ReportGeneration => write!(f, "report_generation"),
        }
    }
}

/// RAII guard restoring the previous context on drop.
pub struct ContextGuard {
    previous: AnalysisContext,
}

impl Drop for ContextGuard {
    fn drop(&mut self) {
        CURRENT_CONTEXT.with(|ctx| {
            *ctx.borrow_mut() = self.previous.clone();
        });
    }
}

/// Set the current analysis phase until the guard drops.
#[must_use]
pub fn set_phase(phase: AnalysisPhase) -> ContextGuard {
    CURRENT_CONTEXT.with(|ctx| {
        let previous = ctx.borrow().clone();
        ctx.borrow_mut().phase = Some(phase);
        ContextGuard { previous }
    })
}

/// Set the component being analyzed until the guard drops.
#[must_use]
pub fn set_current_component(path: &Path) -> ContextGuard {
    CURRENT_CONTEXT.with(|ctx| {
        let previous = ctx.borrow().clone();
        ctx.borrow_mut().component = Some(path.to_path_buf());
        ContextGuard { previous }
    })
}

/// Run a synchronous stage with `phase` set. Guards are thread-local, so
/// async code scopes them to the work between two `.await` points.
pub fn with_phase<T>(phase: AnalysisPhase, stage: impl FnOnce() -> T) -> T {
    let _phase = set_phase(phase);
    stage()
}

#[must_use]
pub fn get_current_context() -> AnalysisContext {
    CURRENT_CONTEXT.with(|ctx| ctx.borrow().clone())
}
