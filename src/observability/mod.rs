//! Observability infrastructure for crash reports and debugging.
//!
//! ## Features
//!
//! - **Panic Hook**: Produces a short structured crash report with context
//! - **Context Tracking**: Thread-local analysis phase and component tracking
//! - **Logging**: `tracing-subscriber` setup driven by the CLI verbosity
//!
//! ## Usage
//!
//! ```ignore
//! use blinkreact::observability::{install_panic_hook, init_logging};
//!
//! fn main() {
//!     install_panic_hook();
//!     init_logging(1);
//! }
//! ```

pub mod context;
pub mod logging;
pub mod panic_hook;

pub use context::{
    get_current_context, set_current_component, set_phase, with_phase, AnalysisContext,
    AnalysisPhase, ContextGuard,
};
pub use logging::init_logging;
pub use panic_hook::install_panic_hook;
