// Command-line interface definitions and parsing for tlsup

use crate::config::CliConfig;
use crate::core::constants::{output_formats, timeouts};
use crate::core::error::Result;
use crate::discovery::TargetSource;
use clap::builder::RangedU64ValueParser;
use clap::{ArgGroup, Parser};

const HIGH_CONCURRENCY: usize = 500;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
#[command(group(
    ArgGroup::new("input")
        .required(true)
        .args(["url", "input_file"]),
))]
pub struct Cli {
    // Input
    /// Single URL to probe
    #[arg(short = 'u', long, value_name = "URL", help_heading = "Input")]
    pub url: Option<String>,

    /// File with one URL per line
    #[arg(short = 'f', long, value_name = "FILE", help_heading = "Input")]
    pub input_file: Option<String>,

    // Probing
    /// Per-probe timeout in seconds (default: 5)
    #[arg(
        short = 't',
        long,
        value_name = "SECONDS",
        value_parser = RangedU64ValueParser::<u64>::new().range(1..),
        help_heading = "Probing"
    )]
    pub timeout: Option<u64>,

    /// Maximum probes in flight (default: unbounded)
    #[arg(
        long,
        value_name = "COUNT",
        value_parser = RangedU64ValueParser::<usize>::new().range(1..),
        help_heading = "Probing"
    )]
    pub concurrency: Option<usize>,

    /// Deadline for the whole batch in seconds; unfinished probes become timeout_error
    #[arg(
        long,
        value_name = "SECONDS",
        value_parser = RangedU64ValueParser::<u64>::new().range(1..),
        help_heading = "Probing"
    )]
    pub batch_timeout: Option<u64>,

    // Network
    /// Follow redirects and classify the final response
    #[arg(long, help_heading = "Network")]
    pub follow_redirects: bool,

    /// Refuse plain http:// targets
    #[arg(long, help_heading = "Network")]
    pub https_only: bool,

    /// Custom User-Agent header
    #[arg(long, value_name = "AGENT", help_heading = "Network")]
    pub user_agent: Option<String>,

    // Output & Verbosity
    /// Output format (default: json)
    #[arg(long, value_name = "FORMAT", value_parser = output_formats::ALL, help_heading = "Output & Verbosity")]
    pub format: Option<String>,

    /// Suppress progress output and logs
    #[arg(short = 'q', long, help_heading = "Output & Verbosity")]
    pub quiet: bool,

    /// Enable verbose logging on stderr
    #[arg(short = 'v', long, help_heading = "Output & Verbosity")]
    pub verbose: bool,

    /// Disable progress bar
    #[arg(long, help_heading = "Output & Verbosity")]
    pub no_progress: bool,

    // Configuration
    /// Use specific config file
    #[arg(long, value_name = "FILE", help_heading = "Configuration")]
    pub config: Option<String>,

    /// Ignore config files
    #[arg(long, help_heading = "Configuration")]
    pub no_config: bool,
}

impl Cli {
    /// The input source selected on the command line
    pub fn target_source(&self) -> Result<TargetSource> {
        TargetSource::from_args(self.url.as_deref(), self.input_file.as_deref())
    }
}

/// Convert CLI arguments to CliConfig
pub fn cli_to_config(cli: &Cli) -> CliConfig {
    CliConfig {
        timeout: cli.timeout,
        concurrency: cli.concurrency,
        batch_timeout: cli.batch_timeout,
        follow_redirects: cli.follow_redirects,
        https_only: cli.https_only,
        user_agent: cli.user_agent.clone(),
        quiet: cli.quiet,
        verbose: cli.verbose,
        output_format: cli.format.clone(),
        no_progress: cli.no_progress,
        config_file: cli.config.clone(),
        no_config: cli.no_config,
    }
}

/// Warnings for values that are legal but probably not what the user meant
pub fn cli_warnings(cli: &Cli) -> Vec<String> {
    let mut warnings = Vec::new();

    if let Some(timeout) = cli.timeout
        && timeout > timeouts::WARN_TIMEOUT_SECONDS
    {
        warnings.push(format!(
            "Timeout of {timeout} seconds is quite large. Consider using a smaller value for better user experience."
        ));
    }

    if let Some(concurrency) = cli.concurrency
        && concurrency > HIGH_CONCURRENCY
    {
        warnings.push(format!(
            "Concurrency of {concurrency} is quite high and may exhaust local sockets. Consider using a smaller value."
        ));
    }

    if let (Some(batch_timeout), Some(timeout)) = (cli.batch_timeout, cli.timeout)
        && batch_timeout < timeout
    {
        warnings.push(format!(
            "Batch timeout of {batch_timeout} seconds is shorter than the per-probe timeout of {timeout} seconds."
        ));
    }

    warnings
}
