/// MetaFinder GUI: egui-based desktop frontend.
///
/// This crate contains all UI code. Business logic lives in `metafinder-core`.
pub mod app;
pub mod selector;
pub mod state;

pub use app::MetaFinderApp;
pub use selector::DialogSelector;
pub use state::{AppPhase, AppState};
