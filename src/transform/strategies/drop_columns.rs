use crate::transform::data_processing::columns::require_column;
use crate::transform::error::StrategyError;
use crate::transform::table_set::TableSet;
use crate::transform::traits::Strategy;
use log::info;

#[derive(Debug)]
pub struct DropColumnsStrategy {
    table: String,
    columns: Vec<String>,
}

impl DropColumnsStrategy {
    pub fn new(table: &str, columns: &[String]) -> Self {
        DropColumnsStrategy {
            table: table.to_string(),
            columns: columns.to_vec(),
        }
    }
}

impl Strategy for DropColumnsStrategy {
    fn source_table(&self) -> &str {
        &self.table
    }

    fn internal_transform(&self, tables: &mut TableSet) -> Result<(), StrategyError> {
        info!(
            "Applying DropColumns strategy for {:?} to table '{}'",
            self.columns, self.table
        );
        let mut data = tables.get(&self.table)?.clone();
        for name in &self.columns {
            require_column(&data, &self.table, name)?;
            data = data.drop(name)?;
        }

        tables.insert(self.table.clone(), data);
        Ok(())
    }
}
