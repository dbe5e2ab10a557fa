//! Configuration management
//!
//! This module handles loading and managing configuration from
//! TOML files and CLI arguments.

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::core::constants::{defaults, files, output_formats, timeouts};
use crate::core::error::{Result, TlsUpError};

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Config {
    /// Per-probe timeout in seconds
    pub timeout: Option<u64>,

    /// Maximum number of probes in flight (unbounded when unset)
    pub concurrency: Option<usize>,

    /// Wall-clock cap for the whole batch in seconds
    pub batch_timeout: Option<u64>,

    /// Follow HTTP redirects before classifying the final response
    pub follow_redirects: Option<bool>,

    /// Redirect hop limit when following redirects
    pub max_redirects: Option<usize>,

    /// Reject plain http:// targets
    pub https_only: Option<bool>,

    /// Custom User-Agent header
    pub user_agent: Option<String>,

    /// Output format (json, text, minimal)
    pub output_format: Option<String>,

    /// Enable verbose logging
    pub verbose: Option<bool>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            timeout: Some(timeouts::DEFAULT_TIMEOUT_SECONDS),
            concurrency: None, // Unbounded fan-out
            batch_timeout: None,
            follow_redirects: Some(defaults::FOLLOW_REDIRECTS),
            max_redirects: Some(defaults::MAX_REDIRECTS),
            https_only: Some(defaults::HTTPS_ONLY),
            user_agent: None,
            output_format: Some(output_formats::DEFAULT.to_string()),
            verbose: Some(false),
        }
    }
}

impl Config {
    /// Load configuration from file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            TlsUpError::Config(format!(
                "Could not read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        let config: Config = toml::from_str(&content)?;

        config.validate()?;
        Ok(config)
    }

    /// Look for a config file in `dir` and up to three parents.
    ///
    /// Returns the defaults when no file exists. A file that exists but does
    /// not load is an error rather than silently ignored.
    pub fn load_from_dir<P: AsRef<Path>>(dir: P) -> Result<Self> {
        match Self::find_config_file(dir.as_ref()) {
            Some(path) => Self::load_from_file(path),
            None => Ok(Self::default()),
        }
    }

    /// Try to find and load a config file in standard locations
    pub fn load_from_standard_locations() -> Result<Self> {
        let cwd = std::env::current_dir()?;
        Self::load_from_dir(cwd)
    }

    fn find_config_file(dir: &Path) -> Option<PathBuf> {
        dir.ancestors()
            .take(files::CONFIG_PARENT_LEVELS + 1)
            .map(|ancestor| ancestor.join(files::CONFIG_FILE_NAME))
            .find(|candidate| candidate.is_file())
    }

    /// Merge this config with CLI arguments (CLI takes precedence)
    pub fn merge_with_cli(&mut self, cli_config: &CliConfig) {
        // Probing
        if let Some(timeout) = cli_config.timeout {
            self.timeout = Some(timeout);
        }
        if let Some(concurrency) = cli_config.concurrency {
            self.concurrency = Some(concurrency);
        }
        if let Some(batch_timeout) = cli_config.batch_timeout {
            self.batch_timeout = Some(batch_timeout);
        }

        // Network
        if cli_config.follow_redirects {
            self.follow_redirects = Some(true);
        }
        if cli_config.https_only {
            self.https_only = Some(true);
        }
        if let Some(ref user_agent) = cli_config.user_agent {
            self.user_agent = Some(user_agent.clone());
        }

        // Output & format
        if cli_config.verbose {
            self.verbose = Some(true);
        }
        if let Some(ref output_format) = cli_config.output_format {
            self.output_format = Some(output_format.clone());
        }
    }

    /// Get timeout as Duration
    pub fn timeout_duration(&self) -> Duration {
        Duration::from_secs(self.timeout.unwrap_or(timeouts::DEFAULT_TIMEOUT_SECONDS))
    }

    /// Get the batch deadline as Duration, if one is set
    pub fn batch_timeout_duration(&self) -> Option<Duration> {
        self.batch_timeout.map(Duration::from_secs)
    }

    /// Output format, falling back to the default
    pub fn output_format(&self) -> &str {
        self.output_format
            .as_deref()
            .unwrap_or(output_formats::DEFAULT)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if let Some(timeout) = self.timeout {
            if timeout == 0 {
                return Err(TlsUpError::Config(
                    "Timeout cannot be 0. Expected a positive integer representing seconds."
                        .to_string(),
                ));
            }
            if timeout > timeouts::MAX_TIMEOUT_SECONDS {
                return Err(TlsUpError::Config(format!(
                    "Timeout of {timeout} seconds is extremely large (>24 hours). Consider using a smaller value."
                )));
            }
        }

        if let Some(concurrency) = self.concurrency {
            if concurrency == 0 {
                return Err(TlsUpError::Config(
                    "Concurrency cannot be 0. Expected a positive integer.".to_string(),
                ));
            }
            if concurrency > defaults::MAX_CONCURRENCY {
                return Err(TlsUpError::Config(format!(
                    "Concurrency of {concurrency} is extremely high and may exhaust sockets. Consider using a smaller value."
                )));
            }
        }

        if self.batch_timeout == Some(0) {
            return Err(TlsUpError::Config(
                "Batch timeout cannot be 0. Expected a positive integer representing seconds."
                    .to_string(),
            ));
        }

        if let Some(max_redirects) = self.max_redirects
            && max_redirects > defaults::MAX_REDIRECTS_LIMIT
        {
            return Err(TlsUpError::Config(format!(
                "Redirect limit of {max_redirects} is too high. Expected at most {}.",
                defaults::MAX_REDIRECTS_LIMIT
            )));
        }

        if let Some(ref format) = self.output_format
            && !output_formats::ALL.contains(&format.as_str())
        {
            return Err(TlsUpError::Config(format!(
                "Invalid output format '{format}'. Expected one of: {}.",
                output_formats::ALL.join(", ")
            )));
        }

        Ok(())
    }
}

/// Configuration options that can come from CLI
#[derive(Debug, Default)]
pub struct CliConfig {
    // Probing
    pub timeout: Option<u64>,        // --timeout
    pub concurrency: Option<usize>,  // --concurrency
    pub batch_timeout: Option<u64>,  // --batch-timeout

    // Network
    pub follow_redirects: bool,      // --follow-redirects
    pub https_only: bool,            // --https-only
    pub user_agent: Option<String>,  // --user-agent

    // Output & format
    pub quiet: bool,                   // --quiet
    pub verbose: bool,                 // --verbose
    pub output_format: Option<String>, // --format
    pub no_progress: bool,             // --no-progress

    // Configuration
    pub config_file: Option<String>, // --config
    pub no_config: bool,             // --no-config
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.timeout, Some(timeouts::DEFAULT_TIMEOUT_SECONDS));
        assert_eq!(config.concurrency, None);
        assert_eq!(config.batch_timeout, None);
        assert_eq!(config.follow_redirects, Some(false));
        assert_eq!(config.output_format(), output_formats::JSON);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_load_from_file() -> Result<()> {
        let mut file = tempfile::NamedTempFile::new()?;
        file.write_all(
            b"timeout = 10\nconcurrency = 16\nbatch_timeout = 120\nuser_agent = \"probe-agent\"",
        )?;

        let config = Config::load_from_file(file.path())?;
        assert_eq!(config.timeout, Some(10));
        assert_eq!(config.concurrency, Some(16));
        assert_eq!(config.batch_timeout, Some(120));
        assert_eq!(config.user_agent, Some("probe-agent".to_string()));
        // Keys missing from the file stay unset
        assert_eq!(config.output_format, None);
        assert_eq!(config.output_format(), output_formats::DEFAULT);

        Ok(())
    }

    #[test]
    fn test_config_load_from_file_invalid_toml() -> Result<()> {
        let mut file = tempfile::NamedTempFile::new()?;
        file.write_all(b"timeout = [")?;

        let result = Config::load_from_file(file.path());
        assert!(matches!(result, Err(TlsUpError::TomlParsing(_))));
        Ok(())
    }

    #[test]
    fn test_config_load_from_file_nonexistent() {
        let result = Config::load_from_file("/nonexistent/.tlsup.toml");
        assert!(matches!(result, Err(TlsUpError::Config(msg)) if msg.contains("Could not read")));
    }

    #[test]
    fn test_config_load_from_file_with_validation() -> Result<()> {
        let mut file = tempfile::NamedTempFile::new()?;
        file.write_all(b"timeout = 0")?;

        assert!(Config::load_from_file(file.path()).is_err());
        Ok(())
    }

    #[test]
    fn test_config_load_from_dir_without_file() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let nested = dir.path().join("a").join("b").join("c").join("d").join("e");
        fs::create_dir_all(&nested)?;

        let config = Config::load_from_dir(&nested)?;
        assert_eq!(config, Config::default());
        Ok(())
    }

    #[test]
    fn test_config_load_from_dir_finds_parent_file() -> Result<()> {
        let dir = tempfile::tempdir()?;
        fs::write(dir.path().join(files::CONFIG_FILE_NAME), "timeout = 3")?;
        let nested = dir.path().join("one").join("two");
        fs::create_dir_all(&nested)?;

        let config = Config::load_from_dir(&nested)?;
        assert_eq!(config.timeout, Some(3));
        Ok(())
    }

    #[test]
    fn test_config_load_from_dir_ignores_files_too_far_up() -> Result<()> {
        let dir = tempfile::tempdir()?;
        fs::write(dir.path().join(files::CONFIG_FILE_NAME), "timeout = 3")?;
        let nested = dir.path().join("1").join("2").join("3").join("4");
        fs::create_dir_all(&nested)?;

        let config = Config::load_from_dir(&nested)?;
        assert_eq!(config.timeout, Some(timeouts::DEFAULT_TIMEOUT_SECONDS));
        Ok(())
    }

    #[test]
    fn test_config_load_from_dir_invalid_file_is_error() -> Result<()> {
        let dir = tempfile::tempdir()?;
        fs::write(dir.path().join(files::CONFIG_FILE_NAME), "output_format = \"xml\"")?;

        assert!(Config::load_from_dir(dir.path()).is_err());
        Ok(())
    }

    #[test]
    fn test_config_merge_with_cli() {
        let mut config = Config::default();
        let cli_config = CliConfig {
            timeout: Some(20),
            concurrency: Some(8),
            batch_timeout: Some(90),
            follow_redirects: true,
            https_only: true,
            user_agent: Some("cli-agent".to_string()),
            verbose: true,
            output_format: Some(output_formats::TEXT.to_string()),
            ..Default::default()
        };

        config.merge_with_cli(&cli_config);

        assert_eq!(config.timeout, Some(20));
        assert_eq!(config.concurrency, Some(8));
        assert_eq!(config.batch_timeout, Some(90));
        assert_eq!(config.follow_redirects, Some(true));
        assert_eq!(config.https_only, Some(true));
        assert_eq!(config.user_agent, Some("cli-agent".to_string()));
        assert_eq!(config.verbose, Some(true));
        assert_eq!(config.output_format(), output_formats::TEXT);
    }

    #[test]
    fn test_config_merge_preserves_unset_values() {
        let mut config = Config {
            timeout: Some(42),
            concurrency: Some(2),
            follow_redirects: Some(true),
            ..Default::default()
        };

        config.merge_with_cli(&CliConfig::default());

        assert_eq!(config.timeout, Some(42));
        assert_eq!(config.concurrency, Some(2));
        // A CLI flag that was not given never turns a file setting off
        assert_eq!(config.follow_redirects, Some(true));
    }

    #[test]
    fn test_timeout_duration() {
        let config = Config {
            timeout: Some(12),
            ..Default::default()
        };
        assert_eq!(config.timeout_duration(), Duration::from_secs(12));

        let config = Config {
            timeout: None,
            ..Default::default()
        };
        assert_eq!(
            config.timeout_duration(),
            Duration::from_secs(timeouts::DEFAULT_TIMEOUT_SECONDS)
        );
    }

    #[test]
    fn test_batch_timeout_duration() {
        assert_eq!(Config::default().batch_timeout_duration(), None);

        let config = Config {
            batch_timeout: Some(30),
            ..Default::default()
        };
        assert_eq!(config.batch_timeout_duration(), Some(Duration::from_secs(30)));
    }

    #[test]
    fn test_config_validation_invalid_timeout() {
        let config = Config {
            timeout: Some(0),
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = Config {
            timeout: Some(timeouts::MAX_TIMEOUT_SECONDS + 1),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation_invalid_concurrency() {
        let config = Config {
            concurrency: Some(0),
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = Config {
            concurrency: Some(defaults::MAX_CONCURRENCY + 1),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation_invalid_batch_timeout() {
        let config = Config {
            batch_timeout: Some(0),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation_invalid_max_redirects() {
        let config = Config {
            max_redirects: Some(defaults::MAX_REDIRECTS_LIMIT + 1),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation_invalid_output_format() {
        let config = Config {
            output_format: Some("xml".to_string()),
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("json, text, minimal"));
    }

    #[test]
    fn test_config_validation_edge_case_values() -> Result<()> {
        let config = Config {
            timeout: Some(timeouts::MAX_TIMEOUT_SECONDS),
            concurrency: Some(1),
            batch_timeout: Some(1),
            max_redirects: Some(0),
            ..Default::default()
        };
        config.validate()?;
        Ok(())
    }
}
