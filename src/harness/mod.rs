//! Render harness driver.
//!
//! Drives an instrumented component through the standard choreography
//! (mount, update, update, unmount) and captures the transcript the
//! instrumentation produces. The whole run is bounded by a wall-clock budget;
//! exceeding it aborts the run with [`AnalysisError::HarnessTimeout`].

pub mod choreography;
pub mod clock;
pub mod runner;
pub mod transcript;

pub use choreography::{Choreography, Step};
pub use clock::{ClockMode, HarnessClock};
pub use runner::{HarnessRunner, ProcessRunner, SimulatedRunner};
pub use transcript::{Transcript, TranscriptSegment};

use crate::config::HarnessConfig;
use crate::errors::{AnalysisError, Result};
use crate::instrumentation::InstrumentedArtifact;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info, warn};

/// How the choreography is executed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum HarnessMode {
    /// Offline, deterministic playback
    #[default]
    Simulated,
    /// External JavaScript runner
    Process,
}

#[derive(Debug)]
pub struct HarnessDriver {
    runner: HarnessRunner,
    choreography: Choreography,
    clock: HarnessClock,
    timeout: Duration,
}

impl HarnessDriver {
    pub fn new(
        runner: HarnessRunner,
        choreography: Choreography,
        clock: HarnessClock,
        timeout: Duration,
    ) -> Self {
        Self {
            runner,
            choreography,
            clock,
            timeout,
        }
    }

    pub fn from_config(config: &HarnessConfig) -> Self {
        let runner = match config.mode {
            HarnessMode::Simulated => HarnessRunner::Simulated(SimulatedRunner),
            HarnessMode::Process => {
                HarnessRunner::Process(ProcessRunner::new(config.runner.clone()))
            }
        };
        Self::new(
            runner,
            Choreography::standard(config.settle_interval()),
            HarnessClock::new(config.clock),
            config.timeout(),
        )
    }

    pub fn choreography(&self) -> &Choreography {
        &self.choreography
    }

    /// Run the choreography against `artifact` and return the captured
    /// transcript.
    pub async fn drive(&self, artifact: &InstrumentedArtifact) -> Result<Transcript> {
        info!(
            artifact = %artifact.path().display(),
            run = %artifact.run_id(),
            wrapped = artifact.wrapped_component(),
            clock = ?self.clock.mode(),
            budget_ms = self.timeout.as_millis() as u64,
            "Driving render harness"
        );

        let run = self.runner.run(artifact, &self.choreography, &self.clock);
        let transcript = match tokio::time::timeout(self.timeout, run).await {
            Ok(result) => result?,
            Err(_) => {
                warn!(budget_ms = self.timeout.as_millis() as u64, "Render harness timed out");
                return Err(AnalysisError::HarnessTimeout {
                    budget: self.timeout,
                });
            }
        };

        debug!(
            phases = ?transcript.phases(),
            elapsed_ms = self.clock.elapsed().as_millis() as u64,
            "Harness transcript captured"
        );
        Ok(transcript)
    }
}
