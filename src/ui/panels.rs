use std::path::PathBuf;

use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use super::{plot, tables};
use crate::color::DatasetColors;
use crate::data::model::DatasetLabel;
use crate::data::schema::Feature;
use crate::data::store::DatasetStore;
use crate::engine::Distribution;
use crate::game::{GamePhase, Guess, MAX_SAMPLE_SIZE, MIN_SAMPLE_SIZE};
use crate::state::{AppState, Control};

const WARNING: Color32 = Color32::from_rgb(230, 160, 40);

/// Requests from the top bar that replace or persist data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuAction {
    OpenFolder(PathBuf),
    Export(PathBuf),
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, store: &DatasetStore, state: &AppState) -> Option<MenuAction> {
    let mut action = None;
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open data folder…").clicked() {
                action = pick_data_folder(store).map(MenuAction::OpenFolder);
                ui.close_menu();
            }
            if ui.button("Export comparison…").clicked() {
                action = pick_export_file().map(MenuAction::Export);
                ui.close_menu();
            }
        });

        ui.separator();

        let counts: Vec<String> = store
            .iter()
            .map(|ds| format!("{} {}", ds.label, ds.table.len()))
            .collect();
        ui.label(format!("Rows: {}", counts.join(" · ")));

        ui.separator();

        let score = state.game.score();
        ui.label(format!("Score: {}/{}", score.correct, score.played));

        if let Some(msg) = &state.status_message {
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
    action
}

fn pick_data_folder(store: &DatasetStore) -> Option<PathBuf> {
    let mut dialog = rfd::FileDialog::new().set_title("Open traffic datasets");
    if let Some(dir) = store.source_dir() {
        dialog = dialog.set_directory(dir);
    }
    dialog.pick_folder()
}

fn pick_export_file() -> Option<PathBuf> {
    rfd::FileDialog::new()
        .set_title("Export comparison")
        .set_file_name("comparison.json")
        .add_filter("JSON", &["json"])
        .save_file()
}

// ---------------------------------------------------------------------------
// Left side panel – selection controls
// ---------------------------------------------------------------------------

pub fn side_panel(ui: &mut Ui, store: &DatasetStore, state: &AppState, controls: &mut Vec<Control>) {
    ui.heading("Controls");
    ui.separator();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            // ---- Dataset + time window ----
            ui.strong("Dataset");
            let current = state.selection.dataset;
            egui::ComboBox::from_id_salt("dataset")
                .selected_text(current.name())
                .show_ui(ui, |ui: &mut Ui| {
                    for label in DatasetLabel::ALL {
                        if ui.selectable_label(current == label, label.name()).clicked() {
                            controls.push(Control::SelectDataset(label));
                        }
                    }
                });

            let mut index = state.selection.time_index;
            let slider = egui::Slider::new(&mut index, state.time_range(store)).text("Time index");
            if ui.add(slider).changed() {
                controls.push(Control::SetTimeIndex(index));
            }
            ui.separator();

            // ---- Feature selection ----
            ui.strong("Features");
            ui.horizontal(|ui: &mut Ui| {
                if ui.small_button("All").clicked() {
                    controls.push(Control::SelectAllFeatures);
                }
                if ui.small_button("None").clicked() {
                    controls.push(Control::ClearFeatures);
                }
            });
            for feature in Feature::ALL {
                let mut checked = state.selection.features.contains(&feature);
                if ui.checkbox(&mut checked, feature.column()).changed() {
                    controls.push(Control::ToggleFeature(feature));
                }
            }
            ui.separator();

            // ---- Sampling ----
            ui.strong("Sample");
            let mut size = state.selection.sample_size;
            let slider = egui::Slider::new(&mut size, MIN_SAMPLE_SIZE..=MAX_SAMPLE_SIZE).text("rows");
            if ui.add(slider).changed() {
                controls.push(Control::SetSampleSize(size));
            }
            ui.horizontal(|ui: &mut Ui| {
                if ui.button("Resample").clicked() {
                    controls.push(Control::Resample);
                }
                if ui.button("New round").clicked() {
                    controls.push(Control::NewRound);
                }
            });
        });
}

// ---------------------------------------------------------------------------
// Central panel – the dashboard views
// ---------------------------------------------------------------------------

pub fn central_panel(
    ui: &mut Ui,
    store: &DatasetStore,
    state: &AppState,
    colors: &DatasetColors,
    controls: &mut Vec<Control>,
) {
    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            ui.heading("Real vs Synthetic Network Traffic");
            ui.add_space(8.0);

            flow_section(ui, state, colors);
            game_section(ui, store, state, controls);
            sample_section(ui, store, state);
            protocol_section(ui, state, colors);
            density_section(ui, state, colors, controls);

            ui.heading("Feature Averages (Real vs Synthetic)");
            tables::mean_table(ui, &state.views.means, colors);
            ui.add_space(12.0);

            if state.show_detection_demo {
                ui.heading("Anomaly Detection Rates");
                ui.small("Demo figures, not computed from the loaded data.");
                tables::detection_table(ui);
            }
        });
}

fn warning(ui: &mut Ui, text: impl Into<String>) {
    ui.label(RichText::new(text.into()).color(WARNING));
}

fn flow_section(ui: &mut Ui, state: &AppState, colors: &DatasetColors) {
    ui.heading("Packet Flow Over Time");
    match &state.views.flow {
        Ok(window) => {
            ui.label(format!("{} - Flow Metrics Over Time", window.dataset));
            plot::flow_chart(ui, window, colors);
        }
        Err(e) => warning(ui, e.to_string()),
    }
    ui.add_space(12.0);
}

fn game_section(ui: &mut Ui, store: &DatasetStore, state: &AppState, controls: &mut Vec<Control>) {
    ui.heading("Spot the Difference: Real vs Synthetic");
    let round = state.game.round();
    tables::rows_table(ui, "game_row", store.table(round.label), &[round.row]);

    let phase = state.game.phase();
    let locked = matches!(phase, GamePhase::Revealed(_));
    ui.horizontal(|ui: &mut Ui| {
        ui.label("Is this Real or Synthetic?");
        for guess in Guess::ALL {
            let selected = state.game.current_guess() == Some(guess);
            if ui
                .add_enabled(!locked, egui::RadioButton::new(selected, guess.name()))
                .clicked()
            {
                controls.push(Control::Guess(guess));
            }
        }
        let can_reveal = matches!(phase, GamePhase::Guessed(_));
        if ui
            .add_enabled(can_reveal, egui::Button::new("Reveal Answer"))
            .clicked()
        {
            controls.push(Control::Reveal);
        }
    });

    if let Some(verdict) = state.verdict() {
        let color = if verdict.correct {
            Color32::GREEN
        } else {
            Color32::RED
        };
        ui.label(RichText::new(verdict.message()).color(color).strong());
    }
    ui.add_space(12.0);
}

fn sample_section(ui: &mut Ui, store: &DatasetStore, state: &AppState) {
    let dataset = state.selection.dataset;
    ui.heading(format!("Sample of {} rows from {dataset}", state.views.sample.len()));
    tables::rows_table(ui, "sample_rows", store.table(dataset), &state.views.sample);
    ui.add_space(12.0);
}

fn protocol_section(ui: &mut Ui, state: &AppState, colors: &DatasetColors) {
    // Only shown when the real dataset has a protocol column.
    let Some(cmp) = &state.views.protocol else {
        return;
    };
    ui.heading("Protocol Distribution");
    ui.label("Protocol Frequency in Real vs Synthetic Data");
    plot::frequency_chart(ui, "protocol_plot", cmp, colors);
    ui.add_space(12.0);
}

fn density_section(
    ui: &mut Ui,
    state: &AppState,
    colors: &DatasetColors,
    controls: &mut Vec<Control>,
) {
    ui.heading("Feature Distribution");
    let current = state.selection.density_feature;
    egui::ComboBox::from_id_salt("density_feature")
        .selected_text(current.column())
        .show_ui(ui, |ui: &mut Ui| {
            for feature in Feature::ALL {
                if ui
                    .selectable_label(current == feature, feature.column())
                    .clicked()
                {
                    controls.push(Control::SetDensityFeature(feature));
                }
            }
        });

    match &state.views.density {
        Ok(Distribution::Density { column, curves }) => {
            if curves.is_empty() {
                warning(ui, format!("Not enough distinct {column} values to estimate a density."));
            } else {
                plot::density_chart(ui, column, curves, colors);
            }
        }
        Ok(Distribution::Frequencies(cmp)) => {
            plot::frequency_chart(ui, "density_frequency_plot", cmp, colors);
        }
        Err(e) => warning(ui, e.to_string()),
    }
    ui.add_space(12.0);
}
