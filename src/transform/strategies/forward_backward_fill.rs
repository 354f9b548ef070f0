use crate::transform::data_processing::columns::{is_numeric_dtype, require_column};
use crate::transform::error::StrategyError;
use crate::transform::table_set::TableSet;
use crate::transform::traits::Strategy;
use log::info;
use polars::prelude::{DataType, FillNullStrategy};

/// Fills the nulls of each listed column with the last preceding value in
/// table order, and leading nulls with the first following value.
///
/// Numeric columns come out as `Float64`, all others as `String`.
#[derive(Debug)]
pub struct ForwardBackwardFillStrategy {
    table: String,
    columns: Vec<String>,
}

impl ForwardBackwardFillStrategy {
    pub fn new(table: &str, columns: &[String]) -> Self {
        ForwardBackwardFillStrategy {
            table: table.to_string(),
            columns: columns.to_vec(),
        }
    }
}

impl Strategy for ForwardBackwardFillStrategy {
    fn source_table(&self) -> &str {
        &self.table
    }

    fn internal_transform(&self, tables: &mut TableSet) -> Result<(), StrategyError> {
        info!(
            "Applying ForwardBackwardFill strategy to columns {:?} of table '{}'",
            self.columns, self.table
        );
        let mut data = tables.get(&self.table)?.clone();

        for name in &self.columns {
            let column = require_column(&data, &self.table, name)?;
            let dtype = if is_numeric_dtype(column.dtype()) {
                DataType::Float64
            } else {
                DataType::String
            };
            let filled = column
                .cast(&dtype)?
                .fill_null(FillNullStrategy::Forward(None))?
                .fill_null(FillNullStrategy::Backward(None))?;
            data.with_column(filled)?;
        }

        tables.insert(self.table.clone(), data);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::df;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    fn test_forward_backward_fill_columns() {
        let mut tables = TableSet::new();
        tables.insert(
            "dos",
            df![
                "patdeid" => ["a", "a", "a", "b"],
                "medication" => [None, Some(1i64), None, Some(2)],
                "total_dose" => [Some(30.0), None, Some(40.0), None],
            ]
            .unwrap(),
        );
        let strategy = ForwardBackwardFillStrategy::new(
            "dos",
            &["medication".to_string(), "total_dose".to_string()],
        );

        strategy.transform(&mut tables).unwrap();

        let expected = df![
            "patdeid" => ["a", "a", "a", "b"],
            "medication" => [1.0, 1.0, 1.0, 2.0],
            "total_dose" => [30.0, 30.0, 40.0, 40.0],
        ]
        .unwrap();
        assert_eq!(tables.get("dos").unwrap(), &expected);
    }

    #[rstest]
    fn test_forward_backward_fill_text_column() {
        let mut tables = TableSet::new();
        tables.insert(
            "dos",
            df![
                "patdeid" => ["a", "a", "b", "b"],
                "medication" => [None, Some("methadone"), None, Some("buprenorphine")],
            ]
            .unwrap(),
        );
        let strategy = ForwardBackwardFillStrategy::new("dos", &["medication".to_string()]);

        strategy.transform(&mut tables).unwrap();

        let expected = df![
            "patdeid" => ["a", "a", "b", "b"],
            "medication" => ["methadone", "methadone", "methadone", "buprenorphine"],
        ]
        .unwrap();
        assert_eq!(tables.get("dos").unwrap(), &expected);
    }

    #[rstest]
    fn test_forward_backward_fill_missing_column() {
        let mut tables = TableSet::new();
        tables.insert("dos", df!["patdeid" => ["a"]].unwrap());
        let strategy = ForwardBackwardFillStrategy::new("dos", &["total_dose".to_string()]);

        assert!(matches!(
            strategy.transform(&mut tables),
            Err(StrategyError::MissingColumn { .. })
        ));
    }
}
