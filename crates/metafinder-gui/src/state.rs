/// Application state management.
///
/// Centralises all mutable state that the UI reads and writes. A run
/// executes on a background thread; progress and the final outcome come
/// back over channels and are applied in `process_run_messages()`, which
/// runs once per frame.
use crossbeam_channel::{bounded, Receiver, TryRecvError};
use metafinder_core::config::RunConfig;
use metafinder_core::error::ReportError;
use metafinder_core::model::ScanRoot;
use metafinder_core::orchestrator::{self, RootSelector, RunOutcome, NO_SELECTION_NOTICE};
use metafinder_core::resolver;
use metafinder_core::scanner::ScanProgress;
use std::path::PathBuf;
use std::thread;

/// Maximum number of progress messages that may queue up in the channel.
///
/// When the window stops draining (minimised), the scan blocks on `send`
/// instead of growing the queue without bound.
pub const PROGRESS_CHANNEL_CAPACITY: usize = 4_096;

/// Maximum progress messages applied per frame, so a backlog cannot stall
/// rendering.
const MAX_MESSAGES_PER_FRAME: usize = 300;

/// The current phase of the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppPhase {
    /// No folder chosen; "Start Search" is disabled.
    NoSelection,
    /// A folder is chosen and a run can start.
    Ready,
    /// A run is in progress; both buttons are disabled.
    Running,
    /// The last run wrote its report.
    Complete,
    /// The last run could not write its report.
    Failed,
}

/// All application state.
pub struct AppState {
    pub phase: AppPhase,
    pub root: Option<ScanRoot>,
    pub config: RunConfig,

    // ── Live run counters ──────────────────────────────
    pub current_dir: String,
    pub dirs_done: u64,
    pub files_failed: u64,
    pub dirs_failed: u64,

    // ── Last result ────────────────────────────────────
    pub last_report: Option<PathBuf>,
    pub last_rows: usize,
    pub last_error: Option<String>,

    progress_rx: Option<Receiver<ScanProgress>>,
    result_rx: Option<Receiver<Result<RunOutcome, ReportError>>>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(RunConfig::default())
    }
}

impl AppState {
    pub fn new(config: RunConfig) -> Self {
        Self {
            phase: AppPhase::NoSelection,
            root: None,
            config,
            current_dir: String::new(),
            dirs_done: 0,
            files_failed: 0,
            dirs_failed: 0,
            last_report: None,
            last_rows: 0,
            last_error: None,
            progress_rx: None,
            result_rx: None,
        }
    }

    /// Ask `selector` for a folder. An empty answer clears the selection.
    pub fn choose_folder(&mut self, selector: &mut dyn RootSelector) {
        if self.phase == AppPhase::Running {
            return;
        }
        self.root = resolver::resolve(selector.prompt().as_deref());
        self.phase = if self.root.is_some() {
            AppPhase::Ready
        } else {
            tracing::info!("{}", NO_SELECTION_NOTICE);
            AppPhase::NoSelection
        };
    }

    pub fn can_run(&self) -> bool {
        self.root.is_some() && self.phase != AppPhase::Running
    }

    /// The selected folder for display, or an empty string.
    pub fn folder_display(&self) -> String {
        self.root.as_ref().map(ToString::to_string).unwrap_or_default()
    }

    /// Start a run for the selected folder on a background thread.
    pub fn start_run(&mut self) {
        if !self.can_run() {
            return;
        }
        let Some(root) = self.root.clone() else {
            return;
        };

        self.current_dir.clear();
        self.dirs_done = 0;
        self.files_failed = 0;
        self.dirs_failed = 0;
        self.last_report = None;
        self.last_rows = 0;
        self.last_error = None;

        let (progress_tx, progress_rx) = bounded::<ScanProgress>(PROGRESS_CHANNEL_CAPACITY);
        let (result_tx, result_rx) = bounded(1);
        let config = self.config.clone();

        let spawned = thread::Builder::new()
            .name("metafinder-run".into())
            .spawn(move || {
                let outcome = orchestrator::run_root(root, &config, Some(progress_tx));
                let _ = result_tx.send(outcome);
            });

        match spawned {
            Ok(_) => {
                self.progress_rx = Some(progress_rx);
                self.result_rx = Some(result_rx);
                self.phase = AppPhase::Running;
            }
            Err(e) => {
                tracing::warn!("Could not start run thread: {}", e);
                self.last_error = Some(format!("could not start run: {e}"));
                self.phase = AppPhase::Failed;
            }
        }
    }

    /// Drain pending run messages. Returns `true` if anything changed.
    pub fn process_run_messages(&mut self) -> bool {
        let mut changed = false;

        if let Some(rx) = self.progress_rx.take() {
            for msg in rx.try_iter().take(MAX_MESSAGES_PER_FRAME) {
                self.apply_progress(msg);
                changed = true;
            }
            self.progress_rx = Some(rx);
        }

        let result = match &self.result_rx {
            Some(rx) => match rx.try_recv() {
                Ok(r) => Some(r),
                Err(TryRecvError::Empty) => None,
                Err(TryRecvError::Disconnected) => Some(Ok(RunOutcome::Aborted)),
            },
            None => None,
        };

        if let Some(result) = result {
            self.finish(result);
            changed = true;
        }
        changed
    }

    fn apply_progress(&mut self, msg: ScanProgress) {
        match msg {
            ScanProgress::DirectoryEntered { path } => {
                self.current_dir = path.to_string_lossy().into_owned();
            }
            ScanProgress::DirectoryCompleted { .. } => self.dirs_done += 1,
            ScanProgress::FileFailed { .. } => self.files_failed += 1,
            ScanProgress::DirectoryFailed { .. } => self.dirs_failed += 1,
            ScanProgress::Complete { .. } => {}
        }
    }

    fn finish(&mut self, result: Result<RunOutcome, ReportError>) {
        self.result_rx = None;
        // Every progress event was sent before the outcome; apply the rest.
        if let Some(rx) = self.progress_rx.take() {
            for msg in rx.try_iter() {
                self.apply_progress(msg);
            }
        }
        match result {
            Ok(RunOutcome::Completed {
                report_path,
                rows_written,
                ..
            }) => {
                self.last_report = Some(report_path);
                self.last_rows = rows_written;
                self.phase = AppPhase::Complete;
            }
            Ok(RunOutcome::Aborted) => {
                self.last_error = Some("run ended without a report".into());
                self.phase = AppPhase::Failed;
            }
            Err(e) => {
                tracing::warn!("{}", e);
                self.last_error = Some(e.to_string());
                self.phase = AppPhase::Failed;
            }
        }
    }

    /// One-line status shown under the controls.
    pub fn status_text(&self) -> String {
        match self.phase {
            AppPhase::NoSelection => "Status: No Directory Selected".into(),
            AppPhase::Ready => "Status: Ready To Run".into(),
            AppPhase::Running => "Status: Searching Files...".into(),
            AppPhase::Complete => "Status: Search Complete, Results Saved to File".into(),
            AppPhase::Failed => format!(
                "Status: Failed, {}",
                self.last_error.as_deref().unwrap_or("unknown error")
            ),
        }
    }
}
