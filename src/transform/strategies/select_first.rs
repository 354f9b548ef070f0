use crate::transform::data_processing::columns::require_column;
use crate::transform::error::StrategyError;
use crate::transform::table_set::TableSet;
use crate::transform::traits::Strategy;
use log::info;
use polars::prelude::UniqueKeepStrategy;

/// Writes the first row of every patient, reduced to `columns`, to a new table.
///
/// The patient ID is always the first column of the new table.
#[derive(Debug)]
pub struct SelectFirstStrategy {
    table: String,
    into: String,
    patient_id_column: String,
    columns: Vec<String>,
}

impl SelectFirstStrategy {
    pub fn new(table: &str, into: &str, patient_id_column: &str, columns: &[String]) -> Self {
        SelectFirstStrategy {
            table: table.to_string(),
            into: into.to_string(),
            patient_id_column: patient_id_column.to_string(),
            columns: columns.to_vec(),
        }
    }
}

impl Strategy for SelectFirstStrategy {
    fn source_table(&self) -> &str {
        &self.table
    }

    fn internal_transform(&self, tables: &mut TableSet) -> Result<(), StrategyError> {
        info!(
            "Applying SelectFirst strategy to table '{}' into '{}'",
            self.table, self.into
        );
        let data = tables.get(&self.table)?;

        let mut selection = vec![self.patient_id_column.clone()];
        selection.extend(
            self.columns
                .iter()
                .filter(|name| **name != self.patient_id_column)
                .cloned(),
        );
        for name in &selection {
            require_column(data, &self.table, name)?;
        }

        let first = data.select(selection)?.unique_stable(
            Some(std::slice::from_ref(&self.patient_id_column)),
            UniqueKeepStrategy::First,
            None,
        )?;
        tables.insert(self.into.clone(), first);
        Ok(())
    }
}
