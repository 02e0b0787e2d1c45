/// Run orchestration: root selection → scan → report.
///
/// The CLI and the GUI both call [`run`]; they differ only in the
/// [`RootSelector`] they pass and whether they listen for progress.
use crate::config::RunConfig;
use crate::error::ReportError;
use crate::model::ScanRoot;
use crate::platform::{NoOwner, OwnerResolver, SystemOwner};
use crate::report::{report_file_name, ReportWriter};
use crate::resolver;
use crate::scanner::{ScanProgress, ScanStats, TreeScanner};
use crossbeam_channel::Sender;
use std::path::PathBuf;
use tracing::{info, warn};

/// Notice shown when the selector yields no folder.
pub const NO_SELECTION_NOTICE: &str = "No directory selected";

/// Supplies the scan root, e.g. from a command-line argument or a folder
/// dialog.
pub trait RootSelector {
    /// The chosen folder, or `None` when the user made no choice.
    fn prompt(&mut self) -> Option<String>;
}

/// A root known up front (command-line argument).
#[derive(Debug, Clone, Default)]
pub struct FixedSelector(pub Option<String>);

impl RootSelector for FixedSelector {
    fn prompt(&mut self) -> Option<String> {
        self.0.take()
    }
}

/// How a run ended.
#[derive(Debug)]
pub enum RunOutcome {
    /// No folder was selected; nothing was scanned or written.
    Aborted,
    /// The report was written.
    Completed {
        root: ScanRoot,
        report_path: PathBuf,
        rows_written: usize,
        stats: ScanStats,
    },
}

/// Execute one full run.
///
/// Only a report write failure is returned as an error; per-file and
/// per-directory problems are logged and counted in the outcome's stats.
/// Nothing is retried.
pub fn run(
    selector: &mut dyn RootSelector,
    config: &RunConfig,
    progress: Option<Sender<ScanProgress>>,
) -> Result<RunOutcome, ReportError> {
    let Some(root) = resolver::resolve(selector.prompt().as_deref()) else {
        warn!("{}", NO_SELECTION_NOTICE);
        return Ok(RunOutcome::Aborted);
    };
    run_root(root, config, progress)
}

/// Execute a run for an already resolved root.
pub fn run_root(
    root: ScanRoot,
    config: &RunConfig,
    progress: Option<Sender<ScanProgress>>,
) -> Result<RunOutcome, ReportError> {
    let owner: &dyn OwnerResolver = if config.wants_owner() {
        &SystemOwner
    } else {
        &NoOwner
    };

    let mut scanner = TreeScanner::new(owner);
    if let Some(tx) = progress {
        scanner = scanner.with_progress(tx);
    }
    let scan = scanner.scan(&root);

    let report_path = root
        .path()
        .join(report_file_name(chrono::Local::now().naive_local()));
    let rows_written = ReportWriter::new(config.schema).write(&report_path, &scan.records)?;

    info!("Run complete: {} rows in {}", rows_written, report_path.display());
    Ok(RunOutcome::Completed {
        root,
        report_path,
        rows_written,
        stats: scan.stats,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_selector_yields_once() {
        let mut sel = FixedSelector(Some("x".into()));
        assert_eq!(sel.prompt().as_deref(), Some("x"));
        assert_eq!(sel.prompt(), None);
    }

    fn reports_in(dir: &std::path::Path) -> usize {
        std::fs::read_dir(dir)
            .unwrap()
            .filter_map(Result::ok)
            .filter(|e| e.file_name().to_string_lossy().starts_with("file_metadata_"))
            .count()
    }

    #[test]
    fn empty_selection_aborts_without_writing() {
        let outcome = run(&mut FixedSelector(None), &RunConfig::default(), None).unwrap();
        assert!(matches!(outcome, RunOutcome::Aborted));

        let dir = tempfile::TempDir::new().unwrap();
        let config = RunConfig::default();

        let blank = run(&mut FixedSelector(Some("   ".into())), &config, None).unwrap();
        assert!(matches!(blank, RunOutcome::Aborted));
        assert_eq!(reports_in(dir.path()), 0);

        // The same folder does receive a report once it is actually chosen.
        let chosen = Some(dir.path().to_string_lossy().into_owned());
        let done = run(&mut FixedSelector(chosen), &config, None).unwrap();
        assert!(matches!(done, RunOutcome::Completed { .. }));
        assert_eq!(reports_in(dir.path()), 1);
    }
}
