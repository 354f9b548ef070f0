use crate::transform::data_processing::columns::require_column;
use crate::transform::error::StrategyError;
use crate::transform::table_set::TableSet;
use crate::transform::traits::Strategy;
use log::info;
use polars::prelude::{DataType, IntoLazy, col, len};

/// Counts the rows of every patient into a new table with the columns
/// `<patient id>, <column>`.
///
/// Patients appear in the order of their first row. Rows without a patient
/// ID are not counted.
#[derive(Debug)]
pub struct CountRowsStrategy {
    table: String,
    into: String,
    patient_id_column: String,
    column: String,
}

impl CountRowsStrategy {
    pub fn new(table: &str, into: &str, patient_id_column: &str, column: &str) -> Self {
        CountRowsStrategy {
            table: table.to_string(),
            into: into.to_string(),
            patient_id_column: patient_id_column.to_string(),
            column: column.to_string(),
        }
    }
}

impl Strategy for CountRowsStrategy {
    fn source_table(&self) -> &str {
        &self.table
    }

    fn internal_transform(&self, tables: &mut TableSet) -> Result<(), StrategyError> {
        info!(
            "Applying CountRows strategy to table '{}' into '{}'",
            self.table, self.into
        );
        let data = tables.get(&self.table)?;
        require_column(data, &self.table, &self.patient_id_column)?;

        let patient_id = col(self.patient_id_column.as_str());
        let counted = data
            .clone()
            .lazy()
            .filter(patient_id.clone().is_not_null())
            .group_by_stable([patient_id])
            .agg([len().cast(DataType::Int64).alias(self.column.as_str())])
            .collect()?;

        tables.insert(self.into.clone(), counted);
        Ok(())
    }
}
