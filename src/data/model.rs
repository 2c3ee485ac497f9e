use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::Serialize;

use crate::error::DataError;

// ---------------------------------------------------------------------------
// DatasetLabel – provenance of a table
// ---------------------------------------------------------------------------

/// Which of the four compared datasets a table (or a sampled row) came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum DatasetLabel {
    Real,
    #[serde(rename = "CTGAN")]
    Ctgan,
    #[serde(rename = "TableGAN")]
    TableGan,
    Custom,
}

impl DatasetLabel {
    /// All labels in display order, real first.
    pub const ALL: [DatasetLabel; 4] = [
        DatasetLabel::Real,
        DatasetLabel::Ctgan,
        DatasetLabel::TableGan,
        DatasetLabel::Custom,
    ];

    pub fn name(self) -> &'static str {
        match self {
            DatasetLabel::Real => "Real",
            DatasetLabel::Ctgan => "CTGAN",
            DatasetLabel::TableGan => "TableGAN",
            DatasetLabel::Custom => "Custom",
        }
    }

    /// File name (without extension) the dataset is stored under.
    pub fn file_stem(self) -> &'static str {
        match self {
            DatasetLabel::Real => "real",
            DatasetLabel::Ctgan => "ctgan_synthetic",
            DatasetLabel::TableGan => "tablegan_synthetic",
            DatasetLabel::Custom => "custom_synthetic",
        }
    }

    pub fn is_synthetic(self) -> bool {
        self != DatasetLabel::Real
    }

    /// Position in [`DatasetLabel::ALL`].
    pub fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for DatasetLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ---------------------------------------------------------------------------
// CellValue – a single cell of a traffic table
// ---------------------------------------------------------------------------

/// A dynamically-typed cell mirroring the dtypes a delimited file can carry.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum CellValue {
    Integer(i64),
    Float(f64),
    Bool(bool),
    Text(String),
    Null,
}

// -- Manual Eq/Ord so cells can be sorted and used as map keys --
//
// Ordering: Null < Bool < numbers < Text. Integers and floats compare by
// numeric value; on a numeric tie the integer sorts first.

impl CellValue {
    fn rank(&self) -> u8 {
        match self {
            CellValue::Null => 0,
            CellValue::Bool(_) => 1,
            CellValue::Integer(_) | CellValue::Float(_) => 2,
            CellValue::Text(_) => 3,
        }
    }

    /// Numeric view of the cell. `NaN` floats count as missing.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Integer(i) => Some(*i as f64),
            CellValue::Float(v) if !v.is_nan() => Some(*v),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }
}

impl PartialEq for CellValue {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for CellValue {}

impl PartialOrd for CellValue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for CellValue {
    fn cmp(&self, other: &Self) -> Ordering {
        use CellValue::*;
        let (ra, rb) = (self.rank(), other.rank());
        if ra != rb {
            return ra.cmp(&rb);
        }
        match (self, other) {
            (Null, Null) => Ordering::Equal,
            (Bool(a), Bool(b)) => a.cmp(b),
            (Integer(a), Integer(b)) => a.cmp(b),
            (Float(a), Float(b)) => a.total_cmp(b),
            (Integer(a), Float(b)) => (*a as f64).total_cmp(b).then(Ordering::Less),
            (Float(a), Integer(b)) => a.total_cmp(&(*b as f64)).then(Ordering::Greater),
            (Text(a), Text(b)) => a.cmp(b),
            _ => Ordering::Equal,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Integer(i) => write!(f, "{i}"),
            CellValue::Float(v) => write!(f, "{v}"),
            CellValue::Bool(b) => write!(f, "{b}"),
            CellValue::Text(s) => write!(f, "{s}"),
            CellValue::Null => write!(f, "<null>"),
        }
    }
}

// ---------------------------------------------------------------------------
// TrafficTable – one loaded dataset
// ---------------------------------------------------------------------------

/// A column-oriented table of flow records. Every column holds `len()` cells.
#[derive(Debug, Clone)]
pub struct TrafficTable {
    pub name: String,
    /// Column names in header order.
    column_names: Vec<String>,
    columns: BTreeMap<String, Vec<CellValue>>,
    n_rows: usize,
}

impl TrafficTable {
    /// Build a table from named columns. All columns must have the same length.
    pub fn from_columns(
        name: impl Into<String>,
        columns: Vec<(String, Vec<CellValue>)>,
    ) -> Result<Self, DataError> {
        let name = name.into();
        let n_rows = columns.first().map(|(_, cells)| cells.len()).unwrap_or(0);
        let mut column_names = Vec::with_capacity(columns.len());
        let mut by_name = BTreeMap::new();

        for (column, cells) in columns {
            if cells.len() != n_rows {
                return Err(DataError::ColumnLength {
                    table: name,
                    column,
                    expected: n_rows,
                    got: cells.len(),
                });
            }
            if by_name.contains_key(&column) {
                return Err(DataError::DuplicateColumn { table: name, column });
            }
            column_names.push(column.clone());
            by_name.insert(column, cells);
        }

        Ok(TrafficTable {
            name,
            column_names,
            columns: by_name,
            n_rows,
        })
    }

    /// Build a table from a header and row-major records (the shape loaders produce).
    pub fn from_rows(
        name: impl Into<String>,
        headers: Vec<String>,
        rows: Vec<Vec<CellValue>>,
    ) -> Result<Self, DataError> {
        let name = name.into();
        let mut columns: Vec<Vec<CellValue>> = headers
            .iter()
            .map(|_| Vec::with_capacity(rows.len()))
            .collect();

        for (row_no, row) in rows.into_iter().enumerate() {
            if row.len() != headers.len() {
                return Err(DataError::RaggedRow {
                    table: name,
                    row: row_no,
                    expected: headers.len(),
                    got: row.len(),
                });
            }
            for (column, cell) in columns.iter_mut().zip(row) {
                column.push(cell);
            }
        }

        Self::from_columns(name, headers.into_iter().zip(columns).collect())
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.n_rows
    }

    pub fn is_empty(&self) -> bool {
        self.n_rows == 0
    }

    pub fn column_names(&self) -> &[String] {
        &self.column_names
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.columns.contains_key(column)
    }

    pub fn column(&self, column: &str) -> Option<&[CellValue]> {
        self.columns.get(column).map(Vec::as_slice)
    }

    /// Numeric cells of a column, skipping nulls and non-numeric cells.
    pub fn numeric_values(&self, column: &str) -> Option<Vec<f64>> {
        self.column(column)
            .map(|cells| cells.iter().filter_map(CellValue::as_f64).collect())
    }

    pub fn cell(&self, row: usize, column: &str) -> Option<&CellValue> {
        self.columns.get(column)?.get(row)
    }

    /// One row as `(column, cell)` pairs in header order.
    pub fn row(&self, row: usize) -> Option<Vec<(&str, &CellValue)>> {
        if row >= self.n_rows {
            return None;
        }
        Some(
            self.column_names
                .iter()
                .filter_map(|name| Some((name.as_str(), self.columns.get(name)?.get(row)?)))
                .collect(),
        )
    }

    /// Sorted set of column names, for schema comparison.
    pub fn column_set(&self) -> BTreeSet<&str> {
        self.column_names.iter().map(String::as_str).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_table() -> TrafficTable {
        TrafficTable::from_rows(
            "sample",
            vec!["dur".into(), "proto".into()],
            vec![
                vec![CellValue::Float(1.5), CellValue::Text("tcp".into())],
                vec![CellValue::Integer(2), CellValue::Text("udp".into())],
                vec![CellValue::Null, CellValue::Text("tcp".into())],
            ],
        )
        .unwrap()
    }

    #[test]
    fn rows_are_transposed_into_columns() {
        let table = sample_table();
        assert_eq!(table.len(), 3);
        assert_eq!(table.column_names(), &["dur".to_string(), "proto".to_string()]);
        assert_eq!(table.cell(1, "proto"), Some(&CellValue::Text("udp".into())));
        assert_eq!(table.numeric_values("dur"), Some(vec![1.5, 2.0]));
        assert_eq!(table.numeric_values("missing"), None);
    }

    #[test]
    fn row_lookup_keeps_header_order() {
        let table = sample_table();
        let row = table.row(0).unwrap();
        assert_eq!(row[0].0, "dur");
        assert_eq!(row[1].0, "proto");
        assert!(table.row(3).is_none());
    }

    #[test]
    fn ragged_rows_are_rejected() {
        let err = TrafficTable::from_rows(
            "bad",
            vec!["a".into(), "b".into()],
            vec![vec![CellValue::Integer(1)]],
        )
        .unwrap_err();
        assert!(matches!(err, DataError::RaggedRow { row: 0, got: 1, .. }));
    }

    #[test]
    fn duplicate_columns_are_rejected() {
        let err = TrafficTable::from_columns(
            "dup",
            vec![
                ("a".into(), vec![CellValue::Integer(1)]),
                ("a".into(), vec![CellValue::Integer(2)]),
            ],
        )
        .unwrap_err();
        assert!(matches!(err, DataError::DuplicateColumn { .. }));
    }

    #[test]
    fn numbers_compare_by_value_across_types() {
        assert!(CellValue::Integer(2) < CellValue::Float(2.5));
        assert!(CellValue::Float(1.5) < CellValue::Integer(2));
        assert!(CellValue::Integer(2) < CellValue::Float(2.0));
        assert!(CellValue::Null < CellValue::Bool(false));
        assert!(CellValue::Float(1e9) < CellValue::Text("a".into()));
    }

    #[test]
    fn nan_is_not_numeric() {
        assert_eq!(CellValue::Float(f64::NAN).as_f64(), None);
        assert_eq!(CellValue::Integer(7).as_f64(), Some(7.0));
    }

    #[test]
    fn labels_know_their_provenance() {
        assert!(!DatasetLabel::Real.is_synthetic());
        assert!(DatasetLabel::ALL[1..].iter().all(|l| l.is_synthetic()));
        assert_eq!(DatasetLabel::TableGan.file_stem(), "tablegan_synthetic");
        for (i, label) in DatasetLabel::ALL.iter().enumerate() {
            assert_eq!(label.index(), i);
        }
    }
}
