use clap::Parser;
use tlsup::config::{CliConfig, Config};
use tlsup::core::error::Result;
use tlsup::probe::{ProbeSettings, probe_targets_with_progress};
use tlsup::reporting::logging;
use tlsup::ui::output;
use tlsup::ui::{Cli, ProgressReporter, cli_to_config, cli_warnings};

use std::time::Instant;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    match run_tlsup_logic(&cli).await {
        Ok(exit_code) => std::process::exit(exit_code),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}

/// Main probing logic extracted from main() for testing
pub async fn run_tlsup_logic(cli: &Cli) -> Result<i32> {
    let cli_config = cli_to_config(cli);

    if !cli_config.quiet {
        for warning in cli_warnings(cli) {
            eprintln!("Warning: {warning}");
        }
    }

    let config = load_and_merge_config(&cli_config)?;

    let verbose = config.verbose.unwrap_or(false);
    logging::init_logger(verbose, cli_config.quiet);
    logging::log_config_info(&config);

    let source = cli.target_source()?;
    let targets = source.load().inspect_err(|e| {
        logging::log_error("Could not load targets", Some(e));
    })?;
    logging::log_targets_loaded(&source, targets.len());

    let settings = ProbeSettings::from_config(&config);
    let progress = create_progress_reporter(&cli_config);

    let started = Instant::now();
    let report = probe_targets_with_progress(&targets, &settings, Some(&progress)).await?;
    progress.clear();
    logging::log_batch_complete(&report, started.elapsed().as_millis());

    output::display_report(&report, config.output_format())?;

    // Probe failures are part of the report, not of the exit status
    Ok(0)
}

/// Load configuration from file and merge with CLI arguments.
///
/// Runs before the logger exists, so failures are only returned; `main`
/// prints them.
pub fn load_and_merge_config(cli_config: &CliConfig) -> Result<Config> {
    let mut config = if cli_config.no_config {
        Config::default()
    } else if let Some(ref config_file) = cli_config.config_file {
        Config::load_from_file(config_file)?
    } else {
        Config::load_from_standard_locations()?
    };

    // CLI takes precedence
    config.merge_with_cli(cli_config);
    config.validate()?;
    Ok(config)
}

fn create_progress_reporter(cli_config: &CliConfig) -> ProgressReporter {
    ProgressReporter::new(!cli_config.quiet && !cli_config.no_progress)
}
