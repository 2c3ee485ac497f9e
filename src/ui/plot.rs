use eframe::egui::Ui;
use egui_plot::{Bar, BarChart, Legend, Line, Plot, PlotPoints};

use crate::color::DatasetColors;
use crate::engine::density::DensityCurve;
use crate::engine::{FrequencyComparison, TimeWindow};

const PLOT_HEIGHT: f32 = 280.0;

// ---------------------------------------------------------------------------
// Flow metrics over time
// ---------------------------------------------------------------------------

/// Line chart of the flow columns across the time window.
pub fn flow_chart(ui: &mut Ui, window: &TimeWindow, colors: &DatasetColors) {
    Plot::new("flow_plot")
        .legend(Legend::default())
        .height(PLOT_HEIGHT)
        .x_axis_label("Packets")
        .y_axis_label("Metric Value")
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(false)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for (i, column) in window.columns.iter().enumerate() {
                let points: PlotPoints = window.series(i).into();
                let line = Line::new(points)
                    .name(column)
                    .color(colors.flow_color(i))
                    .width(1.5);
                plot_ui.line(line);
            }
        });
}

// ---------------------------------------------------------------------------
// Categorical frequencies
// ---------------------------------------------------------------------------

/// Grouped bar chart: one group per category, one bar per dataset.
pub fn frequency_chart(ui: &mut Ui, id: &str, cmp: &FrequencyComparison, colors: &DatasetColors) {
    let n_series = cmp.series.len().max(1) as f64;
    let bar_width = 0.8 / n_series;

    Plot::new(id)
        .legend(Legend::default())
        .height(PLOT_HEIGHT)
        .y_axis_label("Count")
        .allow_drag(false)
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            for (k, series) in cmp.series.iter().enumerate() {
                let offset = (k as f64 - (n_series - 1.0) / 2.0) * bar_width;
                let bars: Vec<Bar> = series
                    .counts
                    .iter()
                    .zip(&cmp.categories)
                    .enumerate()
                    .map(|(i, (&count, category))| {
                        Bar::new(i as f64 + offset, count as f64)
                            .width(bar_width)
                            .name(category)
                    })
                    .collect();
                let chart = BarChart::new(bars)
                    .name(series.dataset.name())
                    .color(colors.translucent(series.dataset));
                plot_ui.bar_chart(chart);
            }
        });

    // Category axis legend (bars are positioned by index).
    ui.horizontal_wrapped(|ui: &mut Ui| {
        for (i, category) in cmp.categories.iter().enumerate() {
            ui.small(format!("{i}: {category}"));
        }
    });
}

// ---------------------------------------------------------------------------
// Density overlay
// ---------------------------------------------------------------------------

pub fn density_chart(ui: &mut Ui, column: &str, curves: &[DensityCurve], colors: &DatasetColors) {
    Plot::new("density_plot")
        .legend(Legend::default())
        .height(PLOT_HEIGHT)
        .x_axis_label(column)
        .y_axis_label("Density")
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(false)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for curve in curves {
                let points: PlotPoints = curve.points.clone().into();
                let line = Line::new(points)
                    .name(curve.dataset.name())
                    .color(colors.color_for(curve.dataset))
                    .width(2.0);
                plot_ui.line(line);
            }
        });
}
