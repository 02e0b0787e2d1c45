/// Main `eframe::App` implementation for MetaFinder.
///
/// A single window: choose a folder, start the search, watch the status.
use crate::selector::DialogSelector;
use crate::state::{AppPhase, AppState};
use metafinder_core::config::Schema;
use std::time::Duration;

/// The MetaFinder application.
pub struct MetaFinderApp {
    state: AppState,
}

impl MetaFinderApp {
    /// Create the application from pre-built state.
    pub fn with_state(cc: &eframe::CreationContext<'_>, state: AppState) -> Self {
        cc.egui_ctx.set_visuals(egui::Visuals::light());
        Self { state }
    }
}

impl eframe::App for MetaFinderApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ── Process background messages ───────────────────────────────────
        self.state.process_run_messages();
        let running = self.state.phase == AppPhase::Running;
        if running {
            ctx.request_repaint_after(Duration::from_millis(100));
        }

        // ── Bottom status bar ─────────────────────────────────────────────
        egui::TopBottomPanel::bottom("status_bar")
            .min_height(24.0)
            .show(ctx, |ui| {
                ui.add_space(2.0);
                status_bar(ui, &self.state);
                ui.add_space(2.0);
            });

        // ── Main page ─────────────────────────────────────────────────────
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.heading(egui::RichText::new("File Metadata Finder Tool").strong());
            });
            ui.add_space(8.0);

            ui.columns(2, |cols| {
                if cols[0]
                    .add_enabled(!running, egui::Button::new("Select Top-Level Folder"))
                    .clicked()
                {
                    self.state.choose_folder(&mut DialogSelector);
                }
                if cols[1]
                    .add_enabled(self.state.can_run(), egui::Button::new("Start Search"))
                    .clicked()
                {
                    self.state.start_run();
                }
            });
            ui.add_space(8.0);

            ui.label("Search all subfolders and files under:");
            let mut shown = self.state.folder_display();
            ui.add_enabled(
                false,
                egui::TextEdit::singleline(&mut shown).desired_width(f32::INFINITY),
            );
            ui.add_space(4.0);

            let mut extended = self.state.config.schema == Schema::Extended;
            if ui
                .add_enabled(
                    !running,
                    egui::Checkbox::new(&mut extended, "Include Last Accessed and File Owner"),
                )
                .changed()
            {
                self.state.config.schema = if extended {
                    Schema::Extended
                } else {
                    Schema::Base
                };
            }

            ui.add_space(8.0);
            ui.vertical_centered(|ui| {
                ui.label(egui::RichText::new(self.state.status_text()).strong());
            });
        });
    }
}

/// Counters for the current or last run.
fn status_bar(ui: &mut egui::Ui, state: &AppState) {
    let weak = ui.visuals().weak_text_color();
    ui.horizontal(|ui| match state.phase {
        AppPhase::Running => {
            ui.spinner();
            ui.label(format!("Searching {}", state.current_dir));
            ui.separator();
            ui.label(format!("{} folders done", state.dirs_done));
            if state.files_failed > 0 || state.dirs_failed > 0 {
                ui.separator();
                ui.label(format!("{} skipped", state.files_failed + state.dirs_failed));
            }
        }
        AppPhase::Complete => {
            if let Some(path) = &state.last_report {
                ui.label(format!("{} rows saved to {}", state.last_rows, path.display()));
            }
        }
        _ => {
            ui.label(egui::RichText::new("Ready").color(weak));
        }
    });
}
