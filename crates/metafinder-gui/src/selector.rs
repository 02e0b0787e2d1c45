/// Native folder dialog as a [`RootSelector`].
use metafinder_core::orchestrator::RootSelector;

/// Opens the platform "pick folder" dialog. Cancelling yields `None`.
#[derive(Debug, Clone, Copy, Default)]
pub struct DialogSelector;

impl RootSelector for DialogSelector {
    fn prompt(&mut self) -> Option<String> {
        rfd::FileDialog::new()
            .set_title("Select Top-Level Folder")
            .pick_folder()
            .map(|p| p.display().to_string())
    }
}
