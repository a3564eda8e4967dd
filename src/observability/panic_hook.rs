//! Custom panic hook for short crash reports.
//!
//! A panic inside the analyzer prints what was being analyzed and in which
//! phase, instead of a bare panic message.

use super::context::{get_current_context, AnalysisContext};
use std::panic::PanicHookInfo;

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Install the crash report hook. Call early in `main`.
pub fn install_panic_hook() {
    std::panic::set_hook(Box::new(|info| {
        print_crash_report(info);
    }));
}

fn print_crash_report(info: &PanicHookInfo<'_>) {
    let context = get_current_context();
    eprintln!();
    for line in crash_report_lines(&extract_panic_message(info), &context) {
        eprintln!("{line}");
    }
    if let Some(location) = info.location() {
        eprintln!(
            "  location:  {}:{}:{}",
            location.file(),
            location.line(),
            location.column()
        );
    }
    if std::env::var("RUST_BACKTRACE").is_ok() {
        eprintln!("{}", std::backtrace::Backtrace::capture());
    } else {
        eprintln!("  Run with RUST_BACKTRACE=1 for a stack trace");
    }
}

fn crash_report_lines(message: &str, context: &AnalysisContext) -> Vec<String> {
    let mut lines = vec![
        format!("blinkreact {VERSION} crashed"),
        format!("  panic:     {}", truncate(message, 100)),
    ];
    match &context.phase {
        Some(phase) => lines.push(format!("  phase:     {phase}")),
        None => lines.push("  phase:     (not set, crash before analysis started)".to_string()),
    }
    if let Some(component) = &context.component {
        lines.push(format!("  component: {}", component.display()));
    }
    lines
}

fn extract_panic_message(info: &PanicHookInfo<'_>) -> String {
    if let Some(s) = info.payload().downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = info.payload().downcast_ref::<String>() {
        s.clone()
    } else {
        "Unknown panic".to_string()
    }
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{kept}...")
    }
}
