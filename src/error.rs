//! Error types shared across the data, engine and configuration layers.

use std::path::PathBuf;

use thiserror::Error;

use crate::data::model::DatasetLabel;

/// Structural problems with a dataset: missing files, ragged rows, empty tables.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("no data file for {label} in {}: looked for {candidates}", .dir.display())]
    MissingFile {
        label: DatasetLabel,
        dir: PathBuf,
        candidates: String,
    },

    #[error("dataset {0} contains no rows")]
    Empty(String),

    #[error("duplicate column '{column}' in {table}")]
    DuplicateColumn { table: String, column: String },

    #[error("{table}: row {row} has {got} cells, expected {expected}")]
    RaggedRow {
        table: String,
        row: usize,
        expected: usize,
        got: usize,
    },

    #[error("{table}: column '{column}' has {got} cells, expected {expected}")]
    ColumnLength {
        table: String,
        column: String,
        expected: usize,
        got: usize,
    },
}

/// A view that cannot be produced for the current selection.
///
/// These are recoverable: the dashboard shows the message in place of the
/// view and keeps rendering everything else.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ViewError {
    #[error("No {column} column found in {dataset}. Skipping {view}.")]
    MissingColumn {
        dataset: DatasetLabel,
        column: String,
        view: &'static str,
    },

    #[error("The real dataset has no {0} column.")]
    MissingInReal(String),
}

/// Invalid command-line or environment configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("data directory {} does not exist", .0.display())]
    MissingDataDir(PathBuf),

    #[error("{} is not a directory", .0.display())]
    NotADirectory(PathBuf),
}
