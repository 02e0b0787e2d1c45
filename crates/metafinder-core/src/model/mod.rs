/// Data model for MetaFinder.
///
/// Re-exports the per-file record and the scan root types.
pub mod record;
pub mod root;

pub use record::{format_timestamp, local_seconds, FileRecord, TIMESTAMP_FORMAT};
pub use root::ScanRoot;
