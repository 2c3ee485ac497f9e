use serde::Serialize;

use super::density::{DensityCurve, density_curve};
use super::frequency::{FrequencyComparison, frequency_comparison};
use crate::data::schema::PROTOCOL_COLUMN;
use crate::data::store::DatasetStore;
use crate::error::ViewError;

/// How one column is distributed in each dataset.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Distribution {
    /// Numeric column: one smoothed curve per dataset that has enough spread.
    Density {
        column: String,
        curves: Vec<DensityCurve>,
    },
    /// Categorical column: per-dataset frequency counts.
    Frequencies(FrequencyComparison),
}

/// Compare the distribution of `column` across the four datasets.
///
/// `proto` is compared by frequency; any other column by density estimate.
pub fn compare_distribution(store: &DatasetStore, column: &str) -> Result<Distribution, ViewError> {
    if column == PROTOCOL_COLUMN {
        return frequency_comparison(store, column).map(Distribution::Frequencies);
    }

    if !store.real().table.has_column(column) {
        return Err(ViewError::MissingInReal(column.to_string()));
    }

    let curves = store
        .iter()
        .filter_map(|ds| {
            let values = ds.table.numeric_values(column)?;
            let curve = density_curve(ds.label, &values);
            if curve.is_none() {
                log::debug!("{}: too few distinct {column} values for a density", ds.label);
            }
            curve
        })
        .collect();

    Ok(Distribution::Density {
        column: column.to_string(),
        curves,
    })
}
