use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use super::loader::{find_dataset_file, load_file};
use super::model::{DatasetLabel, TrafficTable};
use super::schema::Capabilities;
use crate::error::DataError;

// ---------------------------------------------------------------------------
// LoadedDataset – one table plus what it supports
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct LoadedDataset {
    pub label: DatasetLabel,
    pub table: TrafficTable,
    pub capabilities: Capabilities,
    /// File the table was read from; `None` for in-memory fixtures.
    pub source: Option<PathBuf>,
}

impl LoadedDataset {
    fn new(label: DatasetLabel, table: TrafficTable, source: Option<PathBuf>) -> Result<Self, DataError> {
        if table.is_empty() {
            return Err(DataError::Empty(label.to_string()));
        }
        let capabilities = Capabilities::detect(&table);
        Ok(LoadedDataset {
            label,
            table,
            capabilities,
            source,
        })
    }
}

// ---------------------------------------------------------------------------
// DatasetStore – the four tables, loaded once and shared by reference
// ---------------------------------------------------------------------------

/// Read-only access to the real table and the three synthetic ones.
///
/// Built once at startup and handed by reference to every view, so tests can
/// substitute fixture tables through [`DatasetStore::from_tables`].
#[derive(Debug, Clone)]
pub struct DatasetStore {
    /// Indexed by [`DatasetLabel::index`].
    datasets: Vec<LoadedDataset>,
    source_dir: Option<PathBuf>,
}

impl DatasetStore {
    /// Load all four datasets from `dir`. Any missing, malformed or empty file
    /// fails the whole load.
    pub fn load_dir(dir: &Path) -> Result<Self> {
        let mut datasets = Vec::with_capacity(DatasetLabel::ALL.len());
        for label in DatasetLabel::ALL {
            let path = find_dataset_file(dir, label)?;
            let table = load_file(&path)
                .with_context(|| format!("loading {label} dataset from {}", path.display()))?;
            log::info!(
                "Loaded {label}: {} rows with columns {:?}",
                table.len(),
                table.column_names()
            );
            datasets.push(LoadedDataset::new(label, table, Some(path))?);
        }
        let store = DatasetStore {
            datasets,
            source_dir: Some(dir.to_path_buf()),
        };
        store.log_schema_divergence();
        Ok(store)
    }

    /// Build a store from in-memory tables, in [`DatasetLabel::ALL`] order.
    pub fn from_tables(tables: [TrafficTable; 4]) -> Result<Self, DataError> {
        let datasets = DatasetLabel::ALL
            .into_iter()
            .zip(tables)
            .map(|(label, table)| LoadedDataset::new(label, table, None))
            .collect::<Result<Vec<_>, _>>()?;
        let store = DatasetStore {
            datasets,
            source_dir: None,
        };
        store.log_schema_divergence();
        Ok(store)
    }

    pub fn get(&self, label: DatasetLabel) -> &LoadedDataset {
        &self.datasets[label.index()]
    }

    pub fn table(&self, label: DatasetLabel) -> &TrafficTable {
        &self.get(label).table
    }

    pub fn capabilities(&self, label: DatasetLabel) -> &Capabilities {
        &self.get(label).capabilities
    }

    pub fn real(&self) -> &LoadedDataset {
        self.get(DatasetLabel::Real)
    }

    /// Datasets in [`DatasetLabel::ALL`] order.
    pub fn iter(&self) -> impl Iterator<Item = &LoadedDataset> {
        self.datasets.iter()
    }

    pub fn source_dir(&self) -> Option<&Path> {
        self.source_dir.as_deref()
    }

    /// Warn about tables whose schema differs from the real one.
    fn log_schema_divergence(&self) {
        let real_columns = self.real().table.column_set();
        for ds in &self.datasets {
            if !ds.capabilities.missing_features.is_empty() {
                log::warn!(
                    "{} is missing features {:?}; their means will be blank",
                    ds.label,
                    ds.capabilities.missing_features
                );
            }
            if ds.label.is_synthetic() {
                let columns = ds.table.column_set();
                if columns != real_columns {
                    let only_real: Vec<_> = real_columns.difference(&columns).collect();
                    let only_synth: Vec<_> = columns.difference(&real_columns).collect();
                    log::warn!(
                        "{} schema differs from Real (missing {only_real:?}, extra {only_synth:?})",
                        ds.label
                    );
                }
            }
        }
    }
}


#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;
    use crate::data::schema::Feature;

    #[test]
    fn datasets_are_indexed_by_label() {
        let store = store();
        for label in DatasetLabel::ALL {
            assert_eq!(store.get(label).label, label);
            assert!(!store.table(label).is_empty());
            assert!(store.capabilities(label).is_feature_complete());
        }
        assert_eq!(store.iter().count(), 4);
        assert!(store.source_dir().is_none());
    }

    #[test]
    fn empty_tables_are_rejected() {
        let tables = DatasetLabel::ALL.map(|label| {
            let rows = if label == DatasetLabel::Custom { 0 } else { 3 };
            traffic_table("t", 0.0, rows)
        });
        let err = DatasetStore::from_tables(tables).unwrap_err();
        assert!(matches!(err, DataError::Empty(ref name) if name == "Custom"));
    }

    #[test]
    fn capabilities_are_computed_per_table() {
        let store = store_with(|label, t| match label {
            DatasetLabel::Ctgan => without(&t, "timestamp"),
            DatasetLabel::TableGan => without(&t, Feature::Rate.column()),
            _ => t,
        });
        assert!(store.capabilities(DatasetLabel::Real).has_timestamp);
        assert!(!store.capabilities(DatasetLabel::Ctgan).has_timestamp);
        assert!(!store.capabilities(DatasetLabel::TableGan).has_feature(Feature::Rate));
    }
}
