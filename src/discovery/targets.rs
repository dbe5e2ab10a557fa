use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::core::error::{Result, TlsUpError};
use crate::core::types::ProbeTarget;

/// Where the targets of a run come from. Exactly one source per run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TargetSource {
    /// A single URL given on the command line
    Url(String),
    /// A file with one URL per line
    File(PathBuf),
}

impl TargetSource {
    /// Pick the source from the two mutually exclusive CLI inputs.
    pub fn from_args(url: Option<&str>, input_file: Option<&str>) -> Result<Self> {
        match (url, input_file) {
            (Some(url), None) => Ok(TargetSource::Url(url.to_string())),
            (None, Some(path)) => Ok(TargetSource::File(PathBuf::from(path))),
            (Some(_), Some(_)) => Err(TlsUpError::InvalidArgument(
                "--url and --input-file cannot be used together".to_string(),
            )),
            (None, None) => Err(TlsUpError::InvalidArgument(
                "one of --url or --input-file is required".to_string(),
            )),
        }
    }

    /// Produce the ordered target list.
    pub fn load(&self) -> Result<Vec<ProbeTarget>> {
        match self {
            TargetSource::Url(url) => Ok(vec![url.clone()]),
            TargetSource::File(path) => read_targets(path),
        }
    }
}

/// Read targets from a file, one per line.
pub fn read_targets<P: AsRef<Path>>(path: P) -> Result<Vec<ProbeTarget>> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => TlsUpError::FileNotFound(path.display().to_string()),
        _ => TlsUpError::Io(e),
    })?;
    Ok(parse_targets(&content))
}

/// Split file content into targets.
///
/// Every line is trimmed and kept, blank lines included: they become empty
/// targets that fail during probing instead of being dropped silently.
pub fn parse_targets(content: &str) -> Vec<ProbeTarget> {
    content.lines().map(|line| line.trim().to_string()).collect()
}
