use crate::transform::data_processing::columns::require_column;
use crate::transform::error::StrategyError;
use crate::transform::table_set::TableSet;
use crate::transform::traits::Strategy;
use log::info;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct RenamePair {
    pub from: String,
    pub to: String,
}

impl RenamePair {
    pub fn new(from: &str, to: &str) -> Self {
        RenamePair {
            from: from.to_string(),
            to: to.to_string(),
        }
    }
}

#[derive(Debug)]
pub struct RenameColumnsStrategy {
    table: String,
    columns: Vec<RenamePair>,
}

impl RenameColumnsStrategy {
    pub fn new(table: &str, columns: &[RenamePair]) -> Self {
        RenameColumnsStrategy {
            table: table.to_string(),
            columns: columns.to_vec(),
        }
    }
}

impl Strategy for RenameColumnsStrategy {
    fn source_table(&self) -> &str {
        &self.table
    }

    fn internal_transform(&self, tables: &mut TableSet) -> Result<(), StrategyError> {
        info!("Applying RenameColumns strategy to table '{}'", self.table);
        let mut data = tables.get(&self.table)?.clone();

        for pair in &self.columns {
            require_column(&data, &self.table, &pair.from)?;
            data.rename(&pair.from, pair.to.as_str().into())?;
        }

        tables.insert(self.table.clone(), data);
        Ok(())
    }
}
