use polars::prelude::PolarsError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("Could not find the file {path:?} for table '{table}'.")]
    MissingFile { table: String, path: PathBuf },
    #[error("Table {0} was empty.")]
    EmptyTable(String),
    #[error(transparent)]
    Polars(#[from] PolarsError),
}
