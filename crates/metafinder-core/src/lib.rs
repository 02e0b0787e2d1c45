/// MetaFinder Core: traversal, metadata extraction, and CSV reporting.
///
/// This crate contains all business logic with zero UI dependencies.
/// The command-line entry point and the desktop GUI both drive it through
/// [`orchestrator::run`].
///
/// # Modules
///
/// - [`model`]: `FileRecord`, `ScanRoot`, and timestamp formatting.
/// - [`resolver`]: Normalises a user-supplied root path.
/// - [`scanner`]: Sequential tree walk and per-file metadata extraction.
/// - [`report`]: CSV report writer and report file naming.
/// - [`orchestrator`]: Composes a full run from root selection to report.
/// - [`platform`]: Extended-length paths and owner lookup per host OS.
/// - [`config`]: Run configuration (schema variant, owner lookup).
/// - [`error`]: Error taxonomy shared by the modules above.
pub mod config;
pub mod error;
pub mod model;
pub mod orchestrator;
pub mod platform;
pub mod report;
pub mod resolver;
pub mod scanner;
