use std::collections::BTreeMap;

use serde::Serialize;

use crate::data::model::{DatasetLabel, TrafficTable};
use crate::data::schema::PROTOCOL_COLUMN;
use crate::data::store::DatasetStore;
use crate::error::ViewError;

/// Category counts of one dataset, aligned with [`FrequencyComparison::categories`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrequencySeries {
    pub dataset: DatasetLabel,
    pub counts: Vec<usize>,
}

/// Value counts of a categorical column across all four datasets.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrequencyComparison {
    pub column: String,
    /// Shared category axis: real categories by descending frequency, then
    /// categories only seen in synthetic data.
    pub categories: Vec<String>,
    pub series: Vec<FrequencySeries>,
}

impl FrequencyComparison {
    pub fn count(&self, dataset: DatasetLabel, category: &str) -> Option<usize> {
        let idx = self.categories.iter().position(|c| c == category)?;
        self.series
            .iter()
            .find(|s| s.dataset == dataset)
            .map(|s| s.counts[idx])
    }
}

/// Non-null value counts of `column`, most frequent first (ties by name).
pub fn value_counts(table: &TrafficTable, column: &str) -> Option<Vec<(String, usize)>> {
    let cells = table.column(column)?;
    let mut counts: BTreeMap<String, usize> = BTreeMap::new();
    for cell in cells.iter().filter(|c| !c.is_null()) {
        *counts.entry(cell.to_string()).or_default() += 1;
    }
    let mut counts: Vec<(String, usize)> = counts.into_iter().collect();
    counts.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    Some(counts)
}

/// Compare the categories of `column` across datasets.
///
/// Fails when the real dataset lacks the column; a synthetic dataset without
/// it contributes zero counts.
pub fn frequency_comparison(
    store: &DatasetStore,
    column: &str,
) -> Result<FrequencyComparison, ViewError> {
    let real_counts = value_counts(&store.real().table, column)
        .ok_or_else(|| ViewError::MissingInReal(column.to_string()))?;

    let per_dataset: Vec<(DatasetLabel, Vec<(String, usize)>)> = store
        .iter()
        .map(|ds| {
            let counts = value_counts(&ds.table, column).unwrap_or_else(|| {
                log::warn!("{} has no {column} column; counting zero", ds.label);
                Vec::new()
            });
            (ds.label, counts)
        })
        .collect();

    let mut categories: Vec<String> = real_counts.into_iter().map(|(c, _)| c).collect();
    for (_, counts) in &per_dataset {
        for (category, _) in counts {
            if !categories.contains(category) {
                categories.push(category.clone());
            }
        }
    }

    let series = per_dataset
        .into_iter()
        .map(|(dataset, counts)| {
            let lookup: BTreeMap<String, usize> = counts.into_iter().collect();
            FrequencySeries {
                dataset,
                counts: categories
                    .iter()
                    .map(|c| lookup.get(c).copied().unwrap_or(0))
                    .collect(),
            }
        })
        .collect();

    Ok(FrequencyComparison {
        column: column.to_string(),
        categories,
        series,
    })
}

/// Protocol frequencies, present only when the real dataset carries `proto`.
pub fn protocol_comparison(store: &DatasetStore) -> Option<FrequencyComparison> {
    if !store.real().capabilities.has_protocol {
        return None;
    }
    frequency_comparison(store, PROTOCOL_COLUMN).ok()
}
