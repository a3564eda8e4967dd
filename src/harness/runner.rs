//! Runners that turn a choreography into a transcript.
//!
//! - [`SimulatedRunner`] plays the choreography offline. It does not execute
//!   the component; each commit is given a duration from a fixed sample
//!   table, so the transcript is identical on every run.
//! - [`ProcessRunner`] writes a harness script next to the instrumented
//!   artifact and executes it with an external JavaScript runner, capturing
//!   whatever the instrumentation logs.

use super::choreography::{Choreography, Step};
use super::clock::HarnessClock;
use super::transcript::{self, Transcript, LOG_PREFIX};
use crate::core::{RenderEvent, RenderPhase};
use crate::errors::{AnalysisError, Result};
use crate::instrumentation::{ArtifactGuard, InstrumentedArtifact, TRACKED_EXPORT};
use crate::observability::{with_phase, AnalysisPhase};
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::process::Command;
use tracing::{debug, info};

#[derive(Debug)]
pub enum HarnessRunner {
    Simulated(SimulatedRunner),
    Process(ProcessRunner),
}

impl HarnessRunner {
    pub async fn run(
        &self,
        artifact: &InstrumentedArtifact,
        choreography: &Choreography,
        clock: &HarnessClock,
    ) -> Result<Transcript> {
        match self {
            Self::Simulated(runner) => runner.run(artifact, choreography, clock).await,
            Self::Process(runner) => runner.run(artifact, choreography).await,
        }
    }
}

/// Profiler timestamps in the simulated transcript start here.
const SIMULATED_EPOCH_MS: f64 = 1000.0;

/// `(actualDuration, baseDuration, commit delay)` per commit, in order. The
/// last row repeats for longer choreographies.
const SIMULATED_SAMPLES: [(f64, f64, f64); 3] =
    [(5.23, 6.12, 10.0), (3.45, 4.23, 5.0), (3.12, 3.89, 5.0)];

#[derive(Debug, Default)]
pub struct SimulatedRunner;

impl SimulatedRunner {
    pub async fn run(
        &self,
        artifact: &InstrumentedArtifact,
        choreography: &Choreography,
        clock: &HarnessClock,
    ) -> Result<Transcript> {
        with_phase(AnalysisPhase::Harness, || ensure_instrumented(artifact.path()))?;

        let identity = artifact.identity();
        let mut instance = SimulatedInstance::default();
        let mut lines = vec![transcript::start_line()];

        for (step, offset) in choreography.steps().iter().zip(choreography.offsets()) {
            with_phase(AnalysisPhase::Harness, || -> Result<()> {
                lines.push(transcript::phase_marker_line(step.phase));
                match step.phase {
                    RenderPhase::Mount | RenderPhase::Update => {
                        let start = SIMULATED_EPOCH_MS + offset.as_secs_f64() * 1000.0;
                        let event = instance.commit(step.phase, start);
                        lines.push(transcript::render_commit_line(
                            identity,
                            instance.render_count,
                            event.actual_duration,
                        ));
                    }
                    RenderPhase::Unmount => {
                        let line = transcript::render_times_line(identity, &instance.samples)
                            .map_err(|e| {
                                AnalysisError::harness(format!("Failed to encode samples: {e}"))
                            })?;
                        lines.push(line);
                    }
                }
                Ok(())
            })?;
            if let Some(interval) = step.settle_after {
                clock.settle(interval).await;
            }
        }

        lines.push(transcript::complete_line());
        debug!(lines = lines.len(), "Simulated harness finished");
        Ok(Transcript::from_lines(lines))
    }
}

/// Render counter and samples of one simulated mounted instance.
#[derive(Debug, Default)]
struct SimulatedInstance {
    render_count: u64,
    samples: Vec<RenderEvent>,
}

impl SimulatedInstance {
    fn commit(&mut self, phase: RenderPhase, start_time: f64) -> RenderEvent {
        let row = self.samples.len().min(SIMULATED_SAMPLES.len() - 1);
        let (actual, base, delay) = SIMULATED_SAMPLES[row];
        let event = RenderEvent {
            phase,
            actual_duration: actual,
            base_duration: base,
            start_time,
            commit_time: start_time + delay,
        };
        self.render_count += 1;
        self.samples.push(event.clone());
        event
    }
}

fn ensure_instrumented(path: &Path) -> Result<()> {
    let code = std::fs::read_to_string(path).map_err(|e| AnalysisError::io(e, path))?;
    if !code.contains(TRACKED_EXPORT) {
        return Err(AnalysisError::harness(format!(
            "{} is not an instrumented artifact",
            path.display()
        )));
    }
    Ok(())
}

/// Executes the choreography for real through an external runner, e.g.
/// `npx --yes tsx`.
#[derive(Debug, Clone)]
pub struct ProcessRunner {
    command: Vec<String>,
}

impl ProcessRunner {
    pub fn new(command: Vec<String>) -> Self {
        Self { command }
    }

    /// Resolve the runner program and write the harness script beside the
    /// artifact. The script is removed when the returned guard drops.
    fn prepare(
        &self,
        artifact: &InstrumentedArtifact,
        choreography: &Choreography,
    ) -> Result<(PathBuf, &[String], ArtifactGuard)> {
        let (program, args) = self
            .command
            .split_first()
            .ok_or_else(|| AnalysisError::harness("Harness runner command is empty"))?;
        let program = which::which(program).map_err(|e| {
            AnalysisError::harness(format!("Harness runner '{program}' not found: {e}"))
        })?;

        let script = harness_script_path(artifact.path());
        let code = render_harness_script(artifact.path(), choreography)?;
        let guard = ArtifactGuard::write(script.clone(), &code)
            .map_err(|e| AnalysisError::io(e, &script))?;
        Ok((program, args, guard))
    }

    pub async fn run(
        &self,
        artifact: &InstrumentedArtifact,
        choreography: &Choreography,
    ) -> Result<Transcript> {
        let (program, args, script_guard) = with_phase(AnalysisPhase::Harness, || {
            self.prepare(artifact, choreography)
        })?;
        let script = script_guard.path();

        info!(runner = %program.display(), script = %script.display(), "Running harness");
        let mut command = Command::new(&program);
        command
            .args(args)
            .arg(script)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        if let Some(dir) = script.parent().filter(|p| !p.as_os_str().is_empty()) {
            command.current_dir(dir);
        }

        let output = command
            .output()
            .await
            .map_err(|e| AnalysisError::harness(format!("Failed to start harness runner: {e}")))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(AnalysisError::harness(format!(
                "Harness runner exited with {}: {}",
                output.status,
                tail(&stderr, 20)
            )));
        }

        Ok(Transcript::new(String::from_utf8_lossy(&output.stdout)))
    }
}

fn harness_script_path(artifact: &Path) -> PathBuf {
    let name = artifact
        .file_name()
        .and_then(|n| n.to_str())
        .and_then(|n| n.split_once(".instrumented."))
        .map(|(stem, _)| format!("{stem}.harness.jsx"))
        .unwrap_or_else(|| "harness.jsx".to_string());
    artifact.with_file_name(name)
}

fn tail(text: &str, lines: usize) -> String {
    let all: Vec<&str> = text.lines().collect();
    all[all.len().saturating_sub(lines)..].join("\n")
}

/// Runs `main` without top-level `await`, which CommonJS packages reject.
const HARNESS_ENTRY: &str = "\nmain().catch((error) => {\n  console.error(error);\n  process.exit(1);\n});\n";

/// Generate the JavaScript harness that mounts, updates twice and unmounts
/// the tracked component with the choreography's settle intervals.
pub fn render_harness_script(artifact: &Path, choreography: &Choreography) -> Result<String> {
    let module = artifact
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| AnalysisError::harness("Artifact path has no file name"))?;

    let mut script = format!(
        r#"import * as React from 'react';
import {{ flushSync }} from 'react-dom';
import {{ createRoot }} from 'react-dom/client';
import {{ {TRACKED_EXPORT} as Component }} from './{module}';

const sleep = (ms) => new Promise((resolve) => setTimeout(resolve, ms));

async function main() {{
  if (typeof document === 'undefined') {{
    const {{ JSDOM }} = await import('jsdom');
    const dom = new JSDOM('<!doctype html><html><body></body></html>');
    globalThis.window = dom.window;
    globalThis.document = dom.window.document;
  }}

  const container = document.createElement('div');
  document.body.appendChild(container);
  const root = createRoot(container);

  console.log('{LOG_PREFIX} Starting render test...');
"#
    );

    for step in choreography.steps() {
        script.push_str(&render_step(step)?);
    }
    script.push_str(&format!("  console.log('{LOG_PREFIX} Render test complete');\n}}\n"));
    script.push_str(HARNESS_ENTRY);
    Ok(script)
}

fn render_step(step: &Step) -> Result<String> {
    let mut code = format!("\n  console.log('{}');\n", transcript::phase_marker_line(step.phase));
    match step.phase {
        RenderPhase::Mount | RenderPhase::Update => {
            let props = serde_json::to_string(&step.props)
                .map_err(|e| AnalysisError::harness(format!("Failed to encode props: {e}")))?;
            code.push_str(&format!(
                "  flushSync(() => root.render(React.createElement(Component, {props})));\n"
            ));
        }
        RenderPhase::Unmount => code.push_str("  flushSync(() => root.unmount());\n"),
    }
    if let Some(interval) = step.settle_after {
        code.push_str(&format!("  await sleep({});\n", interval.as_millis()));
    }
    Ok(code)
}
