use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Every failure aborts the run. Files written before the failure stay on disk.
#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("could not open source database {path}: {source}")]
    SourceUnavailable {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    #[error("query on table {table} failed: {source}")]
    QueryError {
        table: String,
        #[source]
        source: rusqlite::Error,
    },

    #[error("malformed record {name}: {reason}")]
    MalformedRecord { name: String, reason: String },

    #[error("could not write {path}: {source}")]
    WriteError {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

pub type Result<T> = std::result::Result<T, ConvertError>;
