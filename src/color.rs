use std::collections::BTreeMap;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

use crate::data::model::DatasetLabel;

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    generate_palette_from(n, 0.0)
}

/// Like [`generate_palette`], starting at `hue_offset` degrees.
pub fn generate_palette_from(n: usize, hue_offset: f32) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (hue_offset + (i as f32 / n as f32) * 360.0) % 360.0;
            let hsl = Hsl::new(hue, 0.75, 0.55);
            let rgb: Srgb = hsl.into_color();
            Color32::from_rgb(
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            )
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Series colours: dataset label → Color32
// ---------------------------------------------------------------------------

/// Fixed colour per dataset, shared by every chart so the legend stays stable.
#[derive(Debug, Clone)]
pub struct DatasetColors {
    mapping: BTreeMap<DatasetLabel, Color32>,
    flow: Vec<Color32>,
}

impl Default for DatasetColors {
    fn default() -> Self {
        Self::new()
    }
}

impl DatasetColors {
    pub fn new() -> Self {
        let mapping = DatasetLabel::ALL
            .into_iter()
            .zip(generate_palette(DatasetLabel::ALL.len()))
            .collect();
        DatasetColors {
            mapping,
            // Offset so flow lines don't reuse the dataset hues.
            flow: generate_palette_from(3, 45.0),
        }
    }

    pub fn color_for(&self, label: DatasetLabel) -> Color32 {
        self.mapping.get(&label).copied().unwrap_or(Color32::GRAY)
    }

    /// Colour of the `i`-th flow column.
    pub fn flow_color(&self, i: usize) -> Color32 {
        self.flow.get(i).copied().unwrap_or(Color32::LIGHT_BLUE)
    }

    /// Semi-transparent variant for overlapping bars.
    pub fn translucent(&self, label: DatasetLabel) -> Color32 {
        self.color_for(label).gamma_multiply(0.5)
    }

    /// Return the legend entries (label → colour) for the UI.
    pub fn legend_entries(&self) -> Vec<(String, Color32)> {
        self.mapping
            .iter()
            .map(|(label, c)| (label.to_string(), *c))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_dataset_gets_a_distinct_colour() {
        let colors = DatasetColors::new();
        let distinct: std::collections::BTreeSet<_> = DatasetLabel::ALL
            .iter()
            .map(|l| colors.color_for(*l).to_array())
            .collect();
        assert_eq!(distinct.len(), 4);
        assert_eq!(colors.legend_entries()[0].0, "Real");
    }

    #[test]
    fn palette_has_requested_length() {
        assert!(generate_palette(0).is_empty());
        assert_eq!(generate_palette(5).len(), 5);
    }
}
