/// Scan progress reporting: lightweight messages a front end can drain
/// while a run is in progress.
use std::path::PathBuf;
use std::time::Duration;

/// Progress events emitted by the tree scanner.
///
/// The same events are always logged through `tracing`; the channel is an
/// optional extra for front ends that render status.
#[derive(Debug, Clone)]
pub enum ScanProgress {
    /// Started listing a directory.
    DirectoryEntered { path: PathBuf },
    /// Finished a directory and everything below it.
    DirectoryCompleted { path: PathBuf },
    /// A file's metadata could not be read; it is left out of the report.
    FileFailed { path: PathBuf, message: String },
    /// A directory could not be listed; its contents are left out.
    DirectoryFailed { path: PathBuf, message: String },
    /// The walk has finished.
    Complete {
        records: u64,
        failures: u64,
        duration: Duration,
    },
}
