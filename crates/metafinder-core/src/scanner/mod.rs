/// Scanner module: sequential tree walk with per-file metadata extraction.
///
/// The walk uses `jwalk` in serial mode with entries sorted by name inside
/// each directory, so the record order is the depth-first visitation order
/// and two scans of an unchanged tree produce identical sequences.
///
/// Nothing below the root can abort a scan: unreadable directories and
/// unreadable files are logged, counted, and skipped.
pub mod extract;
pub mod progress;

pub use extract::MetadataExtractor;
pub use progress::ScanProgress;

use crate::error::{ExtractionError, TraversalError};
use crate::model::{FileRecord, ScanRoot};
use crate::platform::{extended_length, OwnerResolver};
use crossbeam_channel::Sender;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Extensions of shortcut/link artifacts that are never extracted.
/// Matched case-insensitively against the end of the file name.
pub const SKIP_EXTENSIONS: &[&str] = &[".lnk", ".url"];

/// Whether a file name is on the skip-list.
pub fn is_skipped(name: &OsStr) -> bool {
    let name = name.to_string_lossy().to_lowercase();
    SKIP_EXTENSIONS.iter().any(|ext| name.ends_with(ext))
}

/// Counters and recovered failures from one scan.
#[derive(Debug, Default)]
pub struct ScanStats {
    /// Directories listed, including the root.
    pub directories: u64,
    /// File entries seen, skipped ones included.
    pub files_found: u64,
    /// File entries excluded by the skip-list.
    pub skipped: u64,
    /// Files whose metadata could not be read.
    pub failures: Vec<ExtractionError>,
    /// Directories that could not be listed.
    pub directory_failures: Vec<TraversalError>,
    pub duration: Duration,
}

/// Result of a scan: the records in visitation order plus statistics.
///
/// `records.len() == stats.files_found - stats.skipped - stats.failures.len()`.
#[derive(Debug, Default)]
pub struct ScanReport {
    pub records: Vec<FileRecord>,
    pub stats: ScanStats,
}

/// Walks a scan root and extracts a record for every eligible file.
pub struct TreeScanner<'a> {
    extractor: MetadataExtractor<'a>,
    progress: Option<Sender<ScanProgress>>,
}

impl<'a> TreeScanner<'a> {
    pub fn new(owner: &'a dyn OwnerResolver) -> Self {
        Self {
            extractor: MetadataExtractor::new(owner),
            progress: None,
        }
    }

    /// Also send progress events to `tx`.
    pub fn with_progress(mut self, tx: Sender<ScanProgress>) -> Self {
        self.progress = Some(tx);
        self
    }

    fn emit(&self, msg: ScanProgress) {
        if let Some(tx) = &self.progress {
            let _ = tx.send(msg);
        }
    }

    /// Walk every directory reachable from `root`, root included.
    ///
    /// Links are not followed; a link to a directory is neither traversed
    /// nor recorded.
    pub fn scan(&self, root: &ScanRoot) -> ScanReport {
        let start = Instant::now();
        info!("Beginning search from {}", root);

        let mut report = ScanReport::default();
        // Directories entered but not yet completed, with their depth.
        let mut open_dirs: Vec<(usize, PathBuf)> = Vec::new();

        let walker = jwalk::WalkDir::new(root.path())
            .sort(true)
            .skip_hidden(false)
            .follow_links(false)
            .parallelism(jwalk::Parallelism::Serial);

        for entry_result in walker {
            let entry = match entry_result {
                Ok(e) => e,
                Err(err) => {
                    let path = err
                        .path()
                        .map(Path::to_path_buf)
                        .unwrap_or_else(|| root.path().to_path_buf());
                    self.directory_failed(&mut report.stats, path, err.to_string());
                    continue;
                }
            };

            self.complete_dirs(&mut open_dirs, entry.depth);
            let path = entry.path();
            let file_type = entry.file_type();

            // A root given as a link to a directory is still walked as the root.
            let is_root_dir = entry.depth == 0 && file_type.is_symlink() && points_to_dir(&path);
            if file_type.is_dir() || is_root_dir {
                info!("Searching folder: {}", path.display());
                self.emit(ScanProgress::DirectoryEntered { path: path.clone() });
                report.stats.directories += 1;
                if let Some(err) = &entry.read_children_error {
                    self.directory_failed(&mut report.stats, path.clone(), err.to_string());
                }
                open_dirs.push((entry.depth, path));
                continue;
            }

            if file_type.is_symlink() && points_to_dir(&path) {
                debug!("Not following directory link {}", path.display());
                continue;
            }

            report.stats.files_found += 1;
            if is_skipped(entry.file_name()) {
                debug!("Skipping {}", path.display());
                report.stats.skipped += 1;
                continue;
            }

            match self.extractor.extract(&path, root) {
                Ok(record) => report.records.push(record),
                Err(err) => {
                    warn!("Error getting metadata for {}: {}", path.display(), err);
                    self.emit(ScanProgress::FileFailed {
                        path: err.path().to_path_buf(),
                        message: err.to_string(),
                    });
                    report.stats.failures.push(err);
                }
            }
        }

        self.complete_dirs(&mut open_dirs, 0);

        report.stats.duration = start.elapsed();
        info!(
            "Scan complete: {} records, {} skipped, {} failed, {} unreadable directories in {:?}",
            report.records.len(),
            report.stats.skipped,
            report.stats.failures.len(),
            report.stats.directory_failures.len(),
            report.stats.duration
        );
        self.emit(ScanProgress::Complete {
            records: report.records.len() as u64,
            failures: report.stats.failures.len() as u64,
            duration: report.stats.duration,
        });

        report
    }

    /// Close every open directory at `depth` or deeper; the walk has moved
    /// past them.
    fn complete_dirs(&self, open_dirs: &mut Vec<(usize, PathBuf)>, depth: usize) {
        while open_dirs.last().is_some_and(|(d, _)| *d >= depth) {
            if let Some((_, path)) = open_dirs.pop() {
                info!("Done searching folder: {}", path.display());
                self.emit(ScanProgress::DirectoryCompleted { path });
            }
        }
    }

    fn directory_failed(&self, stats: &mut ScanStats, path: PathBuf, message: String) {
        let failure = TraversalError { path, message };
        warn!("{}", failure);
        self.emit(ScanProgress::DirectoryFailed {
            path: failure.path.clone(),
            message: failure.message.clone(),
        });
        stats.directory_failures.push(failure);
    }
}

fn points_to_dir(link: &Path) -> bool {
    std::fs::metadata(extended_length(link))
        .map(|m| m.is_dir())
        .unwrap_or(false)
}
