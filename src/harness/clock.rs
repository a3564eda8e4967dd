//! Real or virtual time for settle intervals.
//!
//! Under real time a settle interval is a `tokio` sleep. Under virtual time
//! it only advances a counter and yields once, so tests can run the full
//! choreography instantly and deterministically.

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ClockMode {
    #[default]
    Real,
    Virtual,
}

#[derive(Debug)]
pub struct HarnessClock {
    mode: ClockMode,
    started: Instant,
    virtual_elapsed_us: AtomicU64,
}

impl HarnessClock {
    pub fn new(mode: ClockMode) -> Self {
        Self {
            mode,
            started: Instant::now(),
            virtual_elapsed_us: AtomicU64::new(0),
        }
    }

    pub fn mode(&self) -> ClockMode {
        self.mode
    }

    /// Wait out one settle interval, yielding to the runtime.
    pub async fn settle(&self, interval: Duration) {
        match self.mode {
            ClockMode::Real => tokio::time::sleep(interval).await,
            ClockMode::Virtual => {
                let micros = u64::try_from(interval.as_micros()).unwrap_or(u64::MAX);
                self.virtual_elapsed_us.fetch_add(micros, Ordering::Relaxed);
                tokio::task::yield_now().await;
            }
        }
    }

    pub fn elapsed(&self) -> Duration {
        match self.mode {
            ClockMode::Real => self.started.elapsed(),
            ClockMode::Virtual => {
                Duration::from_micros(self.virtual_elapsed_us.load(Ordering::Relaxed))
            }
        }
    }
}
