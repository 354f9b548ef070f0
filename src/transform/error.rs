use polars::prelude::PolarsError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StrategyError {
    #[error("Could not find table '{0}'.")]
    MissingTable(String),
    #[error("Could not find column '{column}' in table '{table}'.")]
    MissingColumn { table: String, column: String },
    #[error("Invalid week schedule for table '{table}': {reason}")]
    InvalidSchedule { table: String, reason: String },
    #[error("Selector '{selector}' did not match any column in table '{table}'.")]
    NoColumnsSelected { table: String, selector: String },
    #[error("Invalid regex '{pattern}': {reason}")]
    InvalidRegex { pattern: String, reason: String },
    #[error("Polars error: {0}")]
    PolarsError(Box<PolarsError>),
}

impl From<PolarsError> for StrategyError {
    fn from(err: PolarsError) -> Self {
        StrategyError::PolarsError(Box::new(err))
    }
}

#[derive(Debug, Error)]
pub enum TransformError {
    #[error(transparent)]
    StrategyError(#[from] StrategyError),
    #[error(
        "Could not parse visit code '{value}' in column '{column}' of table '{table}' into a week."
    )]
    InvalidVisitCode {
        table: String,
        column: String,
        value: String,
    },
    #[error("Could not find column '{column}' in table '{table}'.")]
    MissingColumn { table: String, column: String },
    #[error("Could not find table '{0}' to merge.")]
    MissingTable(String),
    #[error("Column '{column}' of table '{table}' already exists in the merged table.")]
    ColumnCollision { table: String, column: String },
    #[error("Polars error: {0}")]
    PolarsError(Box<PolarsError>),
}

impl From<PolarsError> for TransformError {
    fn from(err: PolarsError) -> Self {
        TransformError::PolarsError(Box::new(err))
    }
}
