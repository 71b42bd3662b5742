use std::path::PathBuf;

use thiserror::Error;

/// Why a dataset could not be loaded.  The session keeps whatever it had
/// before; nothing downstream runs on a failed load.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("reading {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("the file is empty (no header row)")]
    Empty,

    #[error("missing required column(s): {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    #[error("line {line}: '{value}' in column '{column}' is not a number")]
    InvalidNumber {
        line: u64,
        column: &'static str,
        value: String,
    },
}

/// An aggregate needs a column the dataset does not have.  Not fatal: the
/// one view is skipped and the others still compute.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("no '{column}' column found in the dataset")]
pub struct SchemaGap {
    pub column: &'static str,
}
