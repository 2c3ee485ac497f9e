use std::path::Path;

use eframe::egui;

use crate::color::DatasetColors;
use crate::config::DashboardConfig;
use crate::data::store::DatasetStore;
use crate::export::{ComparisonReport, write_comparison};
use crate::state::{AppState, Refresh};
use crate::ui::panels::{self, MenuAction};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct RustyTrafficApp {
    pub store: DatasetStore,
    pub state: AppState,
    colors: DatasetColors,
}

impl RustyTrafficApp {
    pub fn new(store: DatasetStore, config: &DashboardConfig) -> Self {
        let state = AppState::new(&store, config);
        Self {
            store,
            state,
            colors: DatasetColors::new(),
        }
    }

    fn open_folder(&mut self, dir: &Path) -> Refresh {
        match DatasetStore::load_dir(dir) {
            Ok(store) => {
                self.store = store;
                self.state.status_message = None;
                self.state.reload(&self.store)
            }
            Err(e) => {
                // Keep the previous datasets on screen.
                log::error!("Failed to load datasets: {e:#}");
                self.state.status_message = Some(format!("Error: {e:#}"));
                Refresh::NONE
            }
        }
    }

    fn export(&mut self, path: &Path) {
        let report = ComparisonReport::build(&self.store, &self.state.selection.features);
        if let Err(e) = write_comparison(path, &report) {
            log::error!("Failed to export comparison: {e:#}");
            self.state.status_message = Some(format!("Error: {e:#}"));
        }
    }
}

impl eframe::App for RustyTrafficApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let mut controls = Vec::new();
        let mut action = None;

        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            action = panels::top_bar(ui, &self.store, &self.state);
        });

        // ---- Left side panel: controls ----
        egui::SidePanel::left("control_panel")
            .default_width(220.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &self.store, &self.state, &mut controls);
            });

        // ---- Central panel: views ----
        egui::CentralPanel::default().show(ctx, |ui| {
            panels::central_panel(ui, &self.store, &self.state, &self.colors, &mut controls);
        });

        let mut refresh = self.state.handle_all(&self.store, controls);

        match action {
            Some(MenuAction::OpenFolder(dir)) => refresh = refresh.merge(self.open_folder(&dir)),
            Some(MenuAction::Export(path)) => self.export(&path),
            None => {}
        }

        // Views changed after this frame was laid out; draw them next frame.
        if refresh.any() {
            log::trace!("Repainting for {refresh:?}");
            ctx.request_repaint();
        }
    }
}
