use polars::prelude::PolarsError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Could not prepare storage: {reason}")]
    NoStorage { reason: String },
    #[error("Could not store table at {path:?}: {reason}")]
    CantStore { path: PathBuf, reason: String },
    #[error("Output column '{0}' is not part of the table.")]
    MissingColumn(String),
    #[error("Polars error: {0}")]
    PolarsError(Box<PolarsError>),
}

impl From<PolarsError> for LoadError {
    fn from(err: PolarsError) -> Self {
        LoadError::PolarsError(Box::new(err))
    }
}
