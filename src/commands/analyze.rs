//! The analysis pipeline and its CLI handler.
//!
//! ```text
//! read -> classify -> +-> instrument -> drive harness -> extract render metrics -+-> report
//!                     +-> extract state hooks -> redundancy analysis ------------+
//! ```
//!
//! The render branch and the state branch are independent and run
//! concurrently; the report is assembled only when both have finished.

use crate::analyzers::{analyze_state_updates, classify_with_evidence};
use crate::config::{BlinkConfig, ReportFormat};
use crate::core::{AnalysisReport, ComponentSource, RenderMetrics};
use crate::errors::{AnalysisError, Result};
use crate::formatting::OutputFormatter;
use crate::harness::HarnessDriver;
use crate::instrumentation::{instrument, RunWorkspace};
use crate::io::create_writer;
use crate::metrics::extract_render_metrics;
use crate::observability::{set_current_component, with_phase, AnalysisPhase};
use anyhow::Context;
use chrono::Utc;
use std::path::Path;
use tracing::{debug, info, info_span, Instrument};

/// Analyze one component file and return its report.
///
/// Fails before any instrumentation when the file is missing or is not a
/// React component. Every generated file is removed before this returns,
/// whether it succeeds or not.
pub async fn analyze_component(path: &Path, config: &BlinkConfig) -> Result<AnalysisReport> {
    let span = info_span!("analyze_component", component = %path.display());
    run_pipeline(path, config).instrument(span).await
}

async fn run_pipeline(path: &Path, config: &BlinkConfig) -> Result<AnalysisReport> {
    let source = in_phase(path, AnalysisPhase::Classification, || {
        let source = ComponentSource::read(path)?;
        let evidence = classify_with_evidence(source.content());
        debug!(rules = ?evidence.matched_rules, "Classification evidence");
        if !evidence.is_component() {
            return Err(AnalysisError::NotAComponent {
                path: path.to_path_buf(),
            });
        }
        Ok(source)
    })?;

    let identity = source.identity();
    let workspace = prepare_workspace(path, config)?;
    let driver = HarnessDriver::from_config(&config.harness);
    info!(
        component = %identity,
        run = %workspace.run_id(),
        steps = driver.choreography().steps().len(),
        "Starting analysis"
    );

    let render_branch = async {
        let artifact = in_phase(path, AnalysisPhase::Instrumentation, || {
            instrument(&source, &identity, &workspace)
        })?;
        let transcript = driver.drive(&artifact).await?;
        drop(artifact);

        Ok::<RenderMetrics, AnalysisError>(in_phase(path, AnalysisPhase::RenderMetrics, || {
            extract_render_metrics(transcript.as_str())
        }))
    };

    let state_branch = async {
        in_phase(path, AnalysisPhase::StateAnalysis, || {
            analyze_state_updates(source.content())
        })
    };

    let (render_metrics, state_metrics) = tokio::join!(render_branch, state_branch);
    let render_metrics = render_metrics?;

    info!(
        renders = render_metrics.total_renders,
        state_updates = state_metrics.total_state_updates,
        "Analysis complete"
    );

    Ok(AnalysisReport {
        component_name: identity,
        component_path: source.path().to_path_buf(),
        generated_at: Utc::now(),
        render_metrics,
        state_metrics,
    })
}

/// Run a synchronous pipeline stage with the crash context set. Context
/// guards are thread-local, so they are never held across an `.await`.
fn in_phase<T>(path: &Path, phase: AnalysisPhase, stage: impl FnOnce() -> T) -> T {
    let _component = set_current_component(path);
    with_phase(phase, stage)
}

fn prepare_workspace(path: &Path, config: &BlinkConfig) -> Result<RunWorkspace> {
    if let Some(dir) = &config.artifacts.dir {
        std::fs::create_dir_all(dir).map_err(|e| AnalysisError::io(e, dir))?;
    }
    Ok(RunWorkspace::beside(path, config.artifacts.dir.as_deref()))
}

/// Run [`analyze_component`] to completion on a current-thread runtime.
pub fn analyze_component_blocking(path: &Path, config: &BlinkConfig) -> Result<AnalysisReport> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| AnalysisError::harness(format!("Failed to start async runtime: {e}")))?;
    runtime.block_on(analyze_component(path, config))
}

/// Analyze `path` and write the report configured in `config.output`.
pub fn handle_analyze(
    path: &Path,
    config: &BlinkConfig,
    formatter: &dyn OutputFormatter,
) -> anyhow::Result<AnalysisReport> {
    eprintln!(
        "{}",
        formatter.header(&format!(
            "\n{} BlinkReact - Analyzing {}...\n",
            formatter.emoji("🔍", ">>"),
            path.display()
        ))
    );
    eprintln!("{}", formatter.step("Instrumenting and profiling renders, analyzing state updates..."));

    let report = analyze_component_blocking(path, config)?;

    eprintln!("{}", formatter.step("Generating performance report..."));
    in_phase(path, AnalysisPhase::ReportGeneration, || -> anyhow::Result<()> {
        let mut writer = create_writer(config.output.format, &config.output.path)?;
        writer
            .write_report(&report)
            .with_context(|| format!("Failed to write report for {}", path.display()))
    })?;

    let destination = match config.output.format {
        ReportFormat::Terminal => "to the terminal".to_string(),
        _ => format!("as {}", config.output.path.display()),
    };
    eprintln!(
        "{}",
        formatter.success(&format!(
            "\n{} Analysis complete! Report generated {}\n",
            formatter.emoji("✅", "[OK]"),
            destination
        ))
    );
    Ok(report)
}
