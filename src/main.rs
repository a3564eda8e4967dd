use anyhow::{Context, Result};
use blinkreact::cli::Cli;
use blinkreact::config::{load_config, load_config_from, BlinkConfig};
use blinkreact::errors::AnalysisError;
use blinkreact::formatting::{ColoredFormatter, FormattingConfig, OutputFormatter};
use blinkreact::observability::{init_logging, install_panic_hook};
use clap::Parser;

fn main() {
    install_panic_hook();
    let cli = Cli::parse();
    init_logging(cli.verbosity);

    let formatter = ColoredFormatter::new(create_formatting_config(cli.plain));
    if let Err(error) = run(&cli, &formatter) {
        eprintln!(
            "{}",
            formatter.error(&format!(
                "\n{} {}\n",
                formatter.emoji("❌", "[ERROR]"),
                describe_error(&error)
            ))
        );
        std::process::exit(1);
    }
}

fn run(cli: &Cli, formatter: &dyn OutputFormatter) -> Result<()> {
    let config = resolve_config(cli)?;
    blinkreact::commands::handle_analyze(&cli.component_file, &config, formatter)?;
    Ok(())
}

// File (explicit or discovered), then CLI overrides, then validation
fn resolve_config(cli: &Cli) -> Result<BlinkConfig> {
    let mut config = match &cli.config {
        Some(path) => load_config_from(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => load_config(),
    };
    cli.apply_overrides(&mut config);
    config.validate()?;
    Ok(config)
}

fn create_formatting_config(plain: bool) -> FormattingConfig {
    if plain {
        FormattingConfig::plain()
    } else {
        FormattingConfig::from_env()
    }
}

// Error message with its code when the failure came from the analysis core,
// followed by the failing phase and a fix hint where they apply
fn describe_error(error: &anyhow::Error) -> String {
    let Some(analysis) = error.chain().find_map(|e| e.downcast_ref::<AnalysisError>()) else {
        return format!("Error: {error:#}");
    };

    let mut message = format!("Error [{}]: {}", analysis.code(), analysis);
    if let Some(phase) = analysis.phase() {
        message.push_str(&format!("\n  phase: {phase}"));
    }
    if analysis.is_user_fixable() {
        message.push_str("\n  hint: check the component path and configuration, then re-run");
    }
    message
}
