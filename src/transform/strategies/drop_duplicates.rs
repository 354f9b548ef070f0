use crate::transform::data_processing::columns::require_column;
use crate::transform::error::StrategyError;
use crate::transform::table_set::TableSet;
use crate::transform::traits::Strategy;
use log::{debug, info};
use polars::prelude::UniqueKeepStrategy;

/// Keeps the first row for every distinct combination of the `subset` columns.
#[derive(Debug)]
pub struct DropDuplicatesStrategy {
    table: String,
    subset: Vec<String>,
}

impl DropDuplicatesStrategy {
    pub fn new(table: &str, subset: &[String]) -> Self {
        DropDuplicatesStrategy {
            table: table.to_string(),
            subset: subset.to_vec(),
        }
    }
}

impl Strategy for DropDuplicatesStrategy {
    fn source_table(&self) -> &str {
        &self.table
    }

    fn internal_transform(&self, tables: &mut TableSet) -> Result<(), StrategyError> {
        info!(
            "Applying DropDuplicates strategy to table '{}' on {:?}",
            self.table, self.subset
        );
        let data = tables.get(&self.table)?;
        for key in &self.subset {
            require_column(data, &self.table, key)?;
        }

        let unique = data.unique_stable(
            Some(self.subset.as_slice()),
            UniqueKeepStrategy::First,
            None,
        )?;
        debug!(
            "Dropped {} duplicate rows from table '{}'",
            data.height() - unique.height(),
            self.table
        );
        tables.insert(self.table.clone(), unique);
        Ok(())
    }
}
