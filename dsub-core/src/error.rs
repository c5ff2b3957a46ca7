use std::path::PathBuf;

use thiserror::Error;

/// A connector record that breaks a geometry or numbering invariant.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SpecError {
    #[error("{id}: sum(contacts_per_row)={sum} != total_contacts={total}")]
    RowCountSum { id: String, sum: usize, total: usize },

    #[error("{id}: rows={rows} != len(contacts_per_row)={len}")]
    RowCountLength { id: String, rows: usize, len: usize },

    #[error("{id}: row {row} has no contacts")]
    EmptyRow { id: String, row: usize },

    #[error("{id}: rows={rows} != len(row_offsets)={len}")]
    RowOffsetLength { id: String, rows: usize, len: usize },

    #[error("{id}: total_contacts must be positive")]
    NoContacts { id: String },

    #[error("{id}: rows must be positive")]
    NoRows { id: String },

    #[error("{id}: {field} must be a positive finite length, got {value}")]
    InvalidLength {
        id: String,
        field: &'static str,
        value: f64,
    },

    #[error("{id}: missing {field}")]
    MissingField { id: String, field: &'static str },

    #[error("unknown shell letter: {letter:?}")]
    UnknownShell { letter: String },
}

/// Structurally invalid input reaching the geometry builders.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    #[error("rows must be 2, 3, or 4 (got {rows})")]
    UnsupportedRowCount { rows: usize },

    #[error("row_counts sum {sum} != pin_count {pin_count}")]
    RowCountSum { sum: usize, pin_count: usize },

    #[error("row_counts length {len} != rows {rows}")]
    RowCountLength { len: usize, rows: usize },

    #[error("row_offsets length {len} != rows {rows}")]
    RowOffsetLength { len: usize, rows: usize },

    #[error("polygon needs at least 3 vertices (got {count})")]
    TooFewVertices { count: usize },

    #[error("pin set is empty")]
    EmptyPinSet,

    #[error("flange width {outer_width} mm leaves no room for an opening inside the {margin} mm margin")]
    OpeningTooNarrow { outer_width: f64, margin: f64 },
}

/// Batch-level catalog failures.
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("catalog validation failed:{}", format_violations(.0))]
    Invalid(Vec<SpecError>),

    #[error("failed to parse catalog: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

fn format_violations(errors: &[SpecError]) -> String {
    let mut out = String::new();
    for e in errors {
        out.push_str("\n  - ");
        out.push_str(&e.to_string());
    }
    out
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Spec(#[from] SpecError),

    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error("invalid drawing config: {0}")]
    Config(#[source] serde_json::Error),

    #[error("failed to serialize manifest: {0}")]
    Manifest(#[source] serde_json::Error),

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
