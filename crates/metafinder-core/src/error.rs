/// Error taxonomy.
///
/// Per-file and per-directory failures are recovered by the scanner and only
/// reported; a report write failure is the one error that reaches the caller.
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// A single file whose metadata could not be read. Recovered: the file is
/// logged and left out of the report.
#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("cannot read metadata for {}: {source}", path.display())]
    Stat {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{} is not inside the scan root {}", path.display(), root.display())]
    OutsideRoot { path: PathBuf, root: PathBuf },
}

impl ExtractionError {
    /// The file the failure refers to.
    pub fn path(&self) -> &std::path::Path {
        match self {
            Self::Stat { path, .. } | Self::OutsideRoot { path, .. } => path,
        }
    }
}

/// A directory the walk could not enter. Recovered: siblings are still
/// visited.
#[derive(Debug, Error)]
#[error("cannot read directory {}: {message}", path.display())]
pub struct TraversalError {
    pub path: PathBuf,
    pub message: String,
}

/// The report could not be written. Fatal for the run.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("cannot create report {}: {source}", path.display())]
    Create {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("cannot write report {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("cannot flush report {}: {source}", path.display())]
    Flush {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// A configuration file that could not be loaded.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid config {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
