use serde::Serialize;
use statrs::statistics::{Data, Distribution};

use crate::data::model::DatasetLabel;
use crate::data::schema::Feature;
use crate::data::store::DatasetStore;

/// Per-dataset means for one row of the comparison table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MeanRow {
    pub dataset: DatasetLabel,
    /// One cell per selected feature; `None` when the dataset lacks the
    /// column or the column has no numeric value.
    pub means: Vec<Option<f64>>,
}

/// Feature averages of every dataset, rounded to 2 decimals.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MeanComparison {
    pub features: Vec<Feature>,
    /// Always one row per dataset, in [`DatasetLabel::ALL`] order.
    pub rows: Vec<MeanRow>,
}

impl MeanComparison {
    /// `(rows, columns)` of the table.
    pub fn shape(&self) -> (usize, usize) {
        (self.rows.len(), self.features.len())
    }

    pub fn get(&self, dataset: DatasetLabel, feature: Feature) -> Option<f64> {
        let col = self.features.iter().position(|f| *f == feature)?;
        self.rows
            .iter()
            .find(|r| r.dataset == dataset)
            .and_then(|r| r.means[col])
    }
}

/// Arithmetic mean; `None` for an empty slice.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Data::new(values.to_vec()).mean().filter(|m| m.is_finite())
}

pub fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

/// Build the mean table for `features`. An empty selection yields a 4×0 table.
pub fn mean_comparison(store: &DatasetStore, features: &[Feature]) -> MeanComparison {
    let rows = store
        .iter()
        .map(|ds| MeanRow {
            dataset: ds.label,
            means: features
                .iter()
                .map(|f| {
                    if !ds.capabilities.has_feature(*f) {
                        return None;
                    }
                    let values = ds.table.numeric_values(f.column())?;
                    mean(&values).map(round2)
                })
                .collect(),
        })
        .collect();

    MeanComparison {
        features: features.to_vec(),
        rows,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{CellValue, TrafficTable};
    use crate::data::store::fixtures::{store_with, without};

    #[test]
    fn means_match_column_average() {
        let store = store_with(|label, t| {
            if label == DatasetLabel::Real {
                TrafficTable::from_columns(
                    "real",
                    vec![(
                        "dur".into(),
                        vec![CellValue::Float(1.0), CellValue::Float(2.0), CellValue::Float(3.0)],
                    )],
                )
                .unwrap()
            } else {
                t
            }
        });
        let cmp = mean_comparison(&store, &[Feature::Dur]);
        assert_eq!(cmp.get(DatasetLabel::Real, Feature::Dur), Some(2.0));
        // Fixture CTGAN: dur = 1..=30 → mean 15.5
        assert_eq!(cmp.get(DatasetLabel::Ctgan, Feature::Dur), Some(15.5));
    }

    #[test]
    fn table_has_one_row_per_dataset_and_one_column_per_feature() {
        let store = store_with(|_, t| t);
        let features = Feature::default_selection();
        let cmp = mean_comparison(&store, &features);
        assert_eq!(cmp.shape(), (4, 4));
        let labels: Vec<_> = cmp.rows.iter().map(|r| r.dataset).collect();
        assert_eq!(labels, DatasetLabel::ALL.to_vec());
        assert!(cmp.rows.iter().all(|r| r.means.len() == 4));
    }

    #[test]
    fn empty_selection_is_a_well_formed_empty_table() {
        let store = store_with(|_, t| t);
        let cmp = mean_comparison(&store, &[]);
        assert_eq!(cmp.shape(), (4, 0));
        assert!(cmp.rows.iter().all(|r| r.means.is_empty()));
    }

    #[test]
    fn means_are_rounded_to_two_decimals() {
        let store = store_with(|label, t| {
            if label == DatasetLabel::Custom {
                TrafficTable::from_columns(
                    "custom",
                    vec![(
                        "rate".into(),
                        vec![CellValue::Float(1.0), CellValue::Float(1.0), CellValue::Float(2.0)],
                    )],
                )
                .unwrap()
            } else {
                t
            }
        });
        let cmp = mean_comparison(&store, &[Feature::Rate]);
        assert_eq!(cmp.get(DatasetLabel::Custom, Feature::Rate), Some(1.33));
    }

    #[test]
    fn missing_feature_leaves_a_blank_cell() {
        let store = store_with(|label, t| {
            if label == DatasetLabel::TableGan {
                without(&t, "sload")
            } else {
                t
            }
        });
        let cmp = mean_comparison(&store, &[Feature::Sload, Feature::Dur]);
        assert_eq!(cmp.get(DatasetLabel::TableGan, Feature::Sload), None);
        assert!(cmp.get(DatasetLabel::TableGan, Feature::Dur).is_some());
        assert!(cmp.get(DatasetLabel::Real, Feature::Sload).is_some());
    }

    #[test]
    fn nulls_are_skipped() {
        let table = TrafficTable::from_columns(
            "t",
            vec![(
                "dur".into(),
                vec![CellValue::Integer(4), CellValue::Null, CellValue::Integer(6)],
            )],
        )
        .unwrap();
        let store = store_with(|label, t| if label == DatasetLabel::Real { table.clone() } else { t });
        let cmp = mean_comparison(&store, &[Feature::Dur]);
        assert_eq!(cmp.get(DatasetLabel::Real, Feature::Dur), Some(5.0));
    }

    #[test]
    fn round2_handles_negative_and_exact_values() {
        assert_eq!(round2(2.0), 2.0);
        assert_eq!(round2(-1.234), -1.23);
        assert_eq!(round2(0.126), 0.13);
        assert_eq!(mean(&[]), None);
    }

    #[test]
    fn mean_of_large_flow_counts_stays_exact_after_rounding() {
        let values = [1.0e9, 1.0e9 + 1.0, 1.0e9 + 2.0];
        let m = mean(&values).unwrap();
        assert!((m - (1.0e9 + 1.0)).abs() < 1e-6);
        assert_eq!(round2(m), 1.0e9 + 1.0);
        assert_eq!(mean(&[f64::INFINITY, 1.0]), None);
    }
}
