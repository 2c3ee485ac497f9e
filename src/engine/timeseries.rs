use std::ops::RangeInclusive;

use serde::Serialize;

use crate::data::model::{CellValue, DatasetLabel};
use crate::data::schema::{FLOW_COLUMNS, TIMESTAMP_COLUMN};
use crate::data::store::LoadedDataset;
use crate::error::ViewError;

/// Slider position used when the dashboard opens.
pub const DEFAULT_TIME_INDEX: usize = 50;

const VIEW_NAME: &str = "animated view";

/// One row of the flow-over-time window.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlowPoint {
    pub timestamp: CellValue,
    /// Values of [`FLOW_COLUMNS`], in that order.
    pub values: [Option<f64>; 3],
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimeWindow {
    pub dataset: DatasetLabel,
    pub columns: [&'static str; 3],
    pub points: Vec<FlowPoint>,
}

impl TimeWindow {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// `[position, value]` pairs of one flow column, for plotting.
    pub fn series(&self, column: usize) -> Vec<[f64; 2]> {
        self.points
            .iter()
            .enumerate()
            .filter_map(|(i, p)| Some([i as f64, p.values.get(column).copied().flatten()?]))
            .collect()
    }
}

/// Valid slider positions for a table of `n_rows`.
pub fn slider_range(n_rows: usize) -> RangeInclusive<usize> {
    0..=n_rows.saturating_sub(1)
}

/// Clamp a requested slider position into [`slider_range`].
pub fn clamp_index(n_rows: usize, requested: usize) -> usize {
    requested.min(n_rows.saturating_sub(1))
}

/// The first `cutoff` rows of `dataset` in timestamp order, restricted to the
/// flow columns. Rows without a timestamp sort last.
pub fn time_window(dataset: &LoadedDataset, cutoff: usize) -> Result<TimeWindow, ViewError> {
    if !dataset.capabilities.has_timestamp {
        return Err(ViewError::MissingColumn {
            dataset: dataset.label,
            column: TIMESTAMP_COLUMN.to_string(),
            view: VIEW_NAME,
        });
    }
    if let Some(column) = dataset.capabilities.missing_flow_columns.first() {
        return Err(ViewError::MissingColumn {
            dataset: dataset.label,
            column: column.to_string(),
            view: VIEW_NAME,
        });
    }

    let table = &dataset.table;
    let timestamps = table.column(TIMESTAMP_COLUMN).unwrap_or(&[]);
    let mut order: Vec<usize> = (0..table.len()).collect();
    // Stable: equal timestamps keep file order.
    order.sort_by(|&a, &b| {
        let (ta, tb) = (&timestamps[a], &timestamps[b]);
        ta.is_null().cmp(&tb.is_null()).then_with(|| ta.cmp(tb))
    });

    let points = order
        .into_iter()
        .take(cutoff)
        .map(|row| FlowPoint {
            timestamp: timestamps[row].clone(),
            values: FLOW_COLUMNS.map(|c| table.cell(row, c).and_then(CellValue::as_f64)),
        })
        .collect();

    Ok(TimeWindow {
        dataset: dataset.label,
        columns: FLOW_COLUMNS,
        points,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::store::fixtures::{store, store_with, without};
    use proptest::prelude::*;

    #[test]
    fn window_returns_first_k_rows_by_timestamp() {
        let store = store();
        let window = time_window(store.real(), 10).unwrap();
        assert_eq!(window.len(), 10);
        assert_eq!(window.columns, ["sbytes", "dbytes", "rate"]);
        assert!(window.points.windows(2).all(|w| w[0].timestamp <= w[1].timestamp));
        // Fixture timestamps descend with row order, so the earliest is the last row.
        assert_eq!(window.points[0].timestamp, CellValue::Integer(10));
        assert_eq!(window.points[0].values[0], Some(290.0));
    }

    #[test]
    fn cutoff_past_the_end_returns_every_row() {
        let store = store();
        assert_eq!(time_window(store.real(), 1_000).unwrap().len(), 30);
        assert!(time_window(store.real(), 0).unwrap().is_empty());
    }

    #[test]
    fn missing_timestamp_is_a_warning_not_a_failure() {
        let store = store_with(|label, t| {
            if label == DatasetLabel::Custom {
                without(&t, "timestamp")
            } else {
                t
            }
        });
        let err = time_window(store.get(DatasetLabel::Custom), 10).unwrap_err();
        assert_eq!(
            err.to_string(),
            "No timestamp column found in Custom. Skipping animated view."
        );
        assert!(time_window(store.get(DatasetLabel::Real), 10).is_ok());
    }

    #[test]
    fn missing_flow_column_is_reported() {
        let store = store_with(|label, t| {
            if label == DatasetLabel::Real {
                without(&t, "dbytes")
            } else {
                t
            }
        });
        let err = time_window(store.real(), 5).unwrap_err();
        assert!(matches!(err, ViewError::MissingColumn { ref column, .. } if column == "dbytes"));
    }

    #[test]
    fn slider_bounds_follow_row_count() {
        assert_eq!(slider_range(30), 0..=29);
        assert_eq!(slider_range(0), 0..=0);
        assert_eq!(clamp_index(30, DEFAULT_TIME_INDEX), 29);
        assert_eq!(clamp_index(100, DEFAULT_TIME_INDEX), 50);
    }

    #[test]
    fn series_skips_missing_values() {
        let window = TimeWindow {
            dataset: DatasetLabel::Real,
            columns: FLOW_COLUMNS,
            points: vec![
                FlowPoint {
                    timestamp: CellValue::Integer(1),
                    values: [Some(1.0), None, Some(3.0)],
                },
                FlowPoint {
                    timestamp: CellValue::Integer(2),
                    values: [Some(4.0), Some(5.0), None],
                },
            ],
        };
        assert_eq!(window.series(0), vec![[0.0, 1.0], [1.0, 4.0]]);
        assert_eq!(window.series(1), vec![[1.0, 5.0]]);
    }

    proptest! {
        #[test]
        fn window_is_sorted_and_sized(k in 0usize..40) {
            let store = store();
            let window = time_window(store.get(DatasetLabel::Ctgan), k).unwrap();
            prop_assert_eq!(window.len(), k.min(30));
            prop_assert!(window.points.windows(2).all(|w| w[0].timestamp <= w[1].timestamp));
        }
    }
}
