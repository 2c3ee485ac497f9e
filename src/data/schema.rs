use std::fmt;

use serde::Serialize;

use super::model::TrafficTable;

pub const TIMESTAMP_COLUMN: &str = "timestamp";
pub const PROTOCOL_COLUMN: &str = "proto";

/// Columns plotted in the flow-over-time view.
pub const FLOW_COLUMNS: [&str; 3] = ["sbytes", "dbytes", "rate"];

// ---------------------------------------------------------------------------
// Feature – the fixed allow-list of comparable numeric columns
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Feature {
    Dur,
    Spkts,
    Dpkts,
    Sbytes,
    Dbytes,
    Rate,
    Sload,
    Dload,
}

impl Feature {
    pub const ALL: [Feature; 8] = [
        Feature::Dur,
        Feature::Spkts,
        Feature::Dpkts,
        Feature::Sbytes,
        Feature::Dbytes,
        Feature::Rate,
        Feature::Sload,
        Feature::Dload,
    ];

    /// Features selected when the dashboard opens.
    pub fn default_selection() -> Vec<Feature> {
        Self::ALL[..4].to_vec()
    }

    /// Column name in the source files.
    pub fn column(self) -> &'static str {
        match self {
            Feature::Dur => "dur",
            Feature::Spkts => "spkts",
            Feature::Dpkts => "dpkts",
            Feature::Sbytes => "sbytes",
            Feature::Dbytes => "dbytes",
            Feature::Rate => "rate",
            Feature::Sload => "sload",
            Feature::Dload => "dload",
        }
    }

    pub fn from_column(column: &str) -> Option<Feature> {
        Self::ALL.into_iter().find(|f| f.column() == column)
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}

// ---------------------------------------------------------------------------
// Capabilities – what a loaded table can support
// ---------------------------------------------------------------------------

/// Schema facts computed once at load time and queried by the views.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Capabilities {
    pub has_timestamp: bool,
    pub has_protocol: bool,
    /// Allow-listed features this table does not carry.
    pub missing_features: Vec<Feature>,
    /// Flow columns this table does not carry.
    pub missing_flow_columns: Vec<&'static str>,
}

impl Capabilities {
    pub fn detect(table: &TrafficTable) -> Self {
        Capabilities {
            has_timestamp: table.has_column(TIMESTAMP_COLUMN),
            has_protocol: table.has_column(PROTOCOL_COLUMN),
            missing_features: Feature::ALL
                .into_iter()
                .filter(|f| !table.has_column(f.column()))
                .collect(),
            missing_flow_columns: FLOW_COLUMNS
                .into_iter()
                .filter(|c| !table.has_column(c))
                .collect(),
        }
    }

    pub fn has_feature(&self, feature: Feature) -> bool {
        !self.missing_features.contains(&feature)
    }

    /// Whether every allow-listed feature is present.
    pub fn is_feature_complete(&self) -> bool {
        self.missing_features.is_empty()
    }
}
