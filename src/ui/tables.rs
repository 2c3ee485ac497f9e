use eframe::egui::{self, Id, RichText, Ui};
use egui_extras::{Column, TableBuilder};

use crate::color::DatasetColors;
use crate::data::model::TrafficTable;
use crate::detection::{DETECTION_DEMO, DETECTION_HEADERS};
use crate::engine::MeanComparison;

const ROW_HEIGHT: f32 = 18.0;

/// Plain striped table of pre-formatted cells.
fn grid(ui: &mut Ui, id: impl std::hash::Hash, headers: &[String], rows: &[Vec<String>]) {
    ui.push_id(Id::new(id), |ui: &mut Ui| {
        TableBuilder::new(ui)
            .striped(true)
            .resizable(false)
            .vscroll(false)
            .columns(Column::auto().at_least(60.0), headers.len().max(1))
            .header(ROW_HEIGHT + 2.0, |mut header| {
                for h in headers {
                    header.col(|ui: &mut Ui| {
                        ui.strong(h);
                    });
                }
            })
            .body(|mut body| {
                for cells in rows {
                    body.row(ROW_HEIGHT, |mut row| {
                        for cell in cells {
                            row.col(|ui: &mut Ui| {
                                ui.label(cell);
                            });
                        }
                    });
                }
            });
    });
}

/// Rows of a traffic table, all columns, each prefixed by its row index.
pub fn rows_table(ui: &mut Ui, id: &str, table: &TrafficTable, rows: &[usize]) {
    let mut headers = vec!["#".to_string()];
    headers.extend(table.column_names().iter().cloned());

    let body: Vec<Vec<String>> = rows
        .iter()
        .filter_map(|&r| {
            let cells = table.row(r)?;
            let mut line = vec![r.to_string()];
            line.extend(cells.into_iter().map(|(_, v)| v.to_string()));
            Some(line)
        })
        .collect();

    egui::ScrollArea::horizontal()
        .id_salt(id)
        .show(ui, |ui: &mut Ui| grid(ui, id, &headers, &body));
}

/// Feature averages, one row per dataset.
pub fn mean_table(ui: &mut Ui, cmp: &MeanComparison, colors: &DatasetColors) {
    if cmp.features.is_empty() {
        ui.label("No features selected.");
    }
    let mut headers = vec!["Dataset".to_string()];
    headers.extend(cmp.features.iter().map(|f| f.to_string()));

    let rows: Vec<Vec<String>> = cmp
        .rows
        .iter()
        .map(|row| {
            let mut line = vec![row.dataset.to_string()];
            line.extend(row.means.iter().map(|m| match m {
                Some(v) => format!("{v:.2}"),
                None => "n/a".to_string(),
            }));
            line
        })
        .collect();

    grid(ui, "mean_table", &headers, &rows);

    ui.horizontal(|ui: &mut Ui| {
        for (label, color) in colors.legend_entries() {
            ui.label(RichText::new(format!("■ {label}")).color(color));
        }
    });
}

/// Static detection-rate reference figures.
pub fn detection_table(ui: &mut Ui) {
    let headers: Vec<String> = DETECTION_HEADERS.iter().map(|h| h.to_string()).collect();
    let rows: Vec<Vec<String>> = DETECTION_DEMO
        .iter()
        .map(|d| {
            vec![
                d.dataset.to_string(),
                format!("{:.1}", d.detection_rate),
                format!("{:.1}", d.false_positive_rate),
            ]
        })
        .collect();
    grid(ui, "detection_table", &headers, &rows);
}
