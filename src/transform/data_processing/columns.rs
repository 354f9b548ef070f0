use crate::transform::error::StrategyError;
use polars::prelude::{Column, DataFrame, DataType};

pub fn is_numeric_dtype(dtype: &DataType) -> bool {
    matches!(
        dtype,
        DataType::Int8
            | DataType::Int16
            | DataType::Int32
            | DataType::Int64
            | DataType::UInt8
            | DataType::UInt16
            | DataType::UInt32
            | DataType::UInt64
            | DataType::Float32
            | DataType::Float64
    )
}

/// Looks up a column of `table`, failing with `StrategyError::MissingColumn` if it is absent.
pub fn require_column<'a>(
    df: &'a DataFrame,
    table: &str,
    name: &str,
) -> Result<&'a Column, StrategyError> {
    df.column(name).map_err(|_| StrategyError::MissingColumn {
        table: table.to_string(),
        column: name.to_string(),
    })
}

pub fn column_to_i64_vec(column: &Column) -> Result<Vec<Option<i64>>, StrategyError> {
    let cast = column.cast(&DataType::Int64)?;
    Ok(cast.i64()?.into_iter().collect())
}

/// Casts the column to `Float64` and collects its values. Cells that can not be
/// represented as a number become `None`.
pub fn column_to_f64_vec(column: &Column) -> Result<Vec<Option<f64>>, StrategyError> {
    let cast = column.cast(&DataType::Float64)?;
    Ok(cast.f64()?.into_iter().collect())
}

pub fn column_to_string_vec(column: &Column) -> Result<Vec<Option<String>>, StrategyError> {
    let cast = column.cast(&DataType::String)?;
    Ok(cast
        .str()?
        .into_iter()
        .map(|cell| cell.map(str::to_string))
        .collect())
}

/// Brings a categorical code into a canonical textual form, so that `1`, `1.0`
/// and ` 1 ` all compare equal.
pub fn normalize_code(raw: &str) -> String {
    let trimmed = raw.trim();
    match trimmed.parse::<f64>() {
        Ok(number) if number.is_finite() && number.fract() == 0.0 => {
            format!("{}", number as i64)
        }
        Ok(number) => number.to_string(),
        Err(_) => trimmed.to_string(),
    }
}
