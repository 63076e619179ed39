//! Riskprop CLI binary.

use std::process::ExitCode;

use colored::Colorize;
use riskprop::cli::Cli;
use riskprop::output::OutputConfig;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let cli = Cli::parse_args();

    // RUST_LOG wins over -v flags
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cli.log_level())),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    tracing::debug!("Starting riskprop CLI");

    match cli.execute() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let (label, caused_by) = if OutputConfig::from_env().use_colors {
                ("error".red().bold().to_string(), "caused by".dimmed().to_string())
            } else {
                ("error".to_string(), "caused by".to_string())
            };
            eprintln!("{label}: {e}");
            // Show cause chain for nested errors
            for cause in e.chain().skip(1) {
                eprintln!("  {caused_by}: {cause}");
            }
            ExitCode::FAILURE
        }
    }
}
