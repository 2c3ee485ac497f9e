use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::data::schema::Feature;
use crate::data::store::DatasetStore;
use crate::engine::{FrequencyComparison, MeanComparison, mean_comparison, protocol_comparison};

/// Snapshot of the comparison views written on "Export comparison…".
#[derive(Debug, Clone, Serialize)]
pub struct ComparisonReport {
    /// Directory the datasets were loaded from, if any.
    pub source: Option<String>,
    pub rows: Vec<(String, usize)>,
    pub means: MeanComparison,
    pub protocols: Option<FrequencyComparison>,
}

impl ComparisonReport {
    pub fn build(store: &DatasetStore, features: &[Feature]) -> Self {
        ComparisonReport {
            source: store.source_dir().map(|p| p.display().to_string()),
            rows: store
                .iter()
                .map(|ds| (ds.label.to_string(), ds.table.len()))
                .collect(),
            means: mean_comparison(store, features),
            protocols: protocol_comparison(store),
        }
    }
}

/// Write `report` as pretty-printed JSON.
pub fn write_comparison(path: &Path, report: &ComparisonReport) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("creating {}", path.display()))?;
    serde_json::to_writer_pretty(BufWriter::new(file), report).context("writing comparison JSON")?;
    log::info!("Exported comparison to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::store::fixtures::store;
    use serde_json::Value;

    #[test]
    fn report_is_written_as_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("comparison.json");
        let report = ComparisonReport::build(&store(), &[Feature::Dur, Feature::Rate]);
        write_comparison(&path, &report).unwrap();

        let json: Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(json["means"]["features"], serde_json::json!(["dur", "rate"]));
        assert_eq!(json["means"]["rows"][1]["dataset"], "CTGAN");
        assert_eq!(json["means"]["rows"][0]["means"][0], 14.5);
        assert_eq!(json["rows"][0], serde_json::json!(["Real", 30]));
        assert_eq!(json["protocols"]["categories"][0], "tcp");
    }
}
