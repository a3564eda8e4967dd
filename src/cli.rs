use crate::config::{BlinkConfig, ReportFormat};
use crate::harness::{ClockMode, HarnessMode};
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "blinkreact")]
#[command(about = "Analyze React component performance", long_about = None)]
#[command(version)]
pub struct Cli {
    /// React component file to analyze
    #[arg(value_name = "COMPONENT_FILE")]
    pub component_file: PathBuf,

    /// Report format
    #[arg(short, long, value_enum)]
    pub format: Option<ReportFormat>,

    /// Report file (defaults to PERFORMANCE_REPORT.md)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// How the render harness executes the component
    #[arg(long, value_enum)]
    pub mode: Option<HarnessMode>,

    /// Wait between harness steps in milliseconds
    #[arg(long = "settle-ms")]
    pub settle_ms: Option<u64>,

    /// Total harness budget in milliseconds
    #[arg(long = "timeout-ms")]
    pub timeout_ms: Option<u64>,

    /// Advance harness time virtually instead of sleeping
    #[arg(long = "virtual-time")]
    pub virtual_time: bool,

    /// Configuration file (defaults to the nearest .blinkreact.toml)
    #[arg(long, env = "BLINKREACT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Increase verbosity level (can be repeated: -v, -vv, -vvv)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    pub verbosity: u8,

    /// Plain output mode: ASCII-only, no colors, no emoji
    #[arg(long)]
    pub plain: bool,
}

impl Cli {
    /// Overlay command-line values on the file configuration.
    pub fn apply_overrides(&self, config: &mut BlinkConfig) {
        if let Some(format) = self.format {
            config.output.format = format;
        }
        if let Some(output) = &self.output {
            config.output.path = output.clone();
        }
        if let Some(mode) = self.mode {
            config.harness.mode = mode;
        }
        if let Some(settle) = self.settle_ms {
            config.harness.settle_interval_ms = settle;
        }
        if let Some(timeout) = self.timeout_ms {
            config.harness.timeout_ms = timeout;
        }
        if self.virtual_time {
            config.harness.clock = ClockMode::Virtual;
        }
    }
}
