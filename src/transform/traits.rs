use crate::transform::error::StrategyError;
use crate::transform::table_set::TableSet;
use std::fmt::Debug;

pub trait Strategy: Debug {
    /// Applies the strategy to its source table.
    ///
    /// Fails with `StrategyError::MissingTable` if the source table does not exist.
    fn transform(&self, tables: &mut TableSet) -> Result<(), StrategyError> {
        match tables.contains(self.source_table()) {
            true => self.internal_transform(tables),
            false => Err(StrategyError::MissingTable(
                self.source_table().to_string(),
            )),
        }
    }

    /// Name of the table the strategy reads.
    fn source_table(&self) -> &str;

    fn internal_transform(&self, tables: &mut TableSet) -> Result<(), StrategyError>;
}
