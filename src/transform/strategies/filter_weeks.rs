use crate::transform::data_processing::columns::{column_to_i64_vec, require_column};
use crate::transform::error::StrategyError;
use crate::transform::table_set::TableSet;
use crate::transform::traits::Strategy;
use log::info;
use polars::prelude::{BooleanChunked, NewChunkedArray};

/// Keeps only the rows of the listed weeks.
#[derive(Debug)]
pub struct FilterWeeksStrategy {
    table: String,
    visit_column: String,
    weeks: Vec<i64>,
}

impl FilterWeeksStrategy {
    pub fn new(table: &str, visit_column: &str, weeks: &[i64]) -> Self {
        FilterWeeksStrategy {
            table: table.to_string(),
            visit_column: visit_column.to_string(),
            weeks: weeks.to_vec(),
        }
    }
}

impl Strategy for FilterWeeksStrategy {
    fn source_table(&self) -> &str {
        &self.table
    }

    fn internal_transform(&self, tables: &mut TableSet) -> Result<(), StrategyError> {
        info!(
            "Applying FilterWeeks strategy for weeks {:?} to table '{}'",
            self.weeks, self.table
        );
        let data = tables.get(&self.table)?;
        let visits = column_to_i64_vec(require_column(data, &self.table, &self.visit_column)?)?;

        let mask: Vec<bool> = visits
            .iter()
            .map(|visit| visit.is_some_and(|week| self.weeks.contains(&week)))
            .collect();
        let filtered = data.filter(&BooleanChunked::from_slice("keep".into(), &mask))?;

        tables.insert(self.table.clone(), filtered);
        Ok(())
    }
}
