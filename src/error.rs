use crate::extract::error::ExtractionError;
use crate::load::error::LoadError;
use crate::transform::error::{StrategyError, TransformError};
use config::ConfigError;
use std::path::PathBuf;
use thiserror::Error;
use validator::ValidationErrors;

#[derive(Debug, Error)]
pub enum ConstructionError {
    #[error("No config file found at {0:?}.")]
    NoConfigFileFound(PathBuf),
    #[error(transparent)]
    ConfigError(#[from] ConfigError),
    #[error("Invalid configuration: {0}")]
    Validation(#[from] ValidationErrors),
    #[error(transparent)]
    Strategy(#[from] StrategyError),
    #[error("Could not resolve path '{path}': {reason}")]
    InvalidPath { path: String, reason: String },
}

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    ExtractionError(#[from] ExtractionError),
    #[error(transparent)]
    TransformError(#[from] TransformError),
    #[error("Invalid data source: {0}")]
    Validation(#[from] ValidationErrors),
    #[error(transparent)]
    LoadError(#[from] LoadError),
}
