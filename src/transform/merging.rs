use crate::transform::data_processing::frames::{column_names_except, left_join_on};
use crate::transform::error::TransformError;
use crate::transform::imputation::FieldCategory;
use crate::transform::table_set::TableSet;
use log::{debug, info};
use polars::prelude::{DataFrame, UniqueKeepStrategy};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A table that contributes to the patient level table, with the category
/// its columns belong to.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct MergeEntry {
    pub table: String,
    pub category: FieldCategory,
}

impl MergeEntry {
    pub fn new(table: &str, category: FieldCategory) -> Self {
        MergeEntry {
            table: table.to_string(),
            category,
        }
    }
}

/// The patient level table and the category of each of its columns.
#[derive(Debug, Clone, PartialEq)]
pub struct MergedTable {
    pub data: DataFrame,
    pub categories: HashMap<String, FieldCategory>,
}

/// Left joins the configured tables on the patient ID, in the configured order.
///
/// The first table decides which patients are in the result. After joining,
/// only the first row of every patient is kept.
#[derive(Debug, Clone, PartialEq)]
pub struct TableMerger {
    patient_id_column: String,
    entries: Vec<MergeEntry>,
}

impl TableMerger {
    pub fn new(patient_id_column: &str, entries: Vec<MergeEntry>) -> Self {
        TableMerger {
            patient_id_column: patient_id_column.to_string(),
            entries,
        }
    }

    pub fn merge(&self, tables: &TableSet) -> Result<MergedTable, TransformError> {
        let mut categories: HashMap<String, FieldCategory> = HashMap::new();
        let mut merged: Option<DataFrame> = None;

        for entry in &self.entries {
            let table = tables
                .get(&entry.table)
                .map_err(|_| TransformError::MissingTable(entry.table.clone()))?;
            if table.get_column_index(&self.patient_id_column).is_none() {
                return Err(TransformError::MissingColumn {
                    table: entry.table.clone(),
                    column: self.patient_id_column.clone(),
                });
            }

            for column in column_names_except(table, &[&self.patient_id_column]) {
                if categories.contains_key(&column) {
                    return Err(TransformError::ColumnCollision {
                        table: entry.table.clone(),
                        column,
                    });
                }
                categories.insert(column, entry.category);
            }

            merged = Some(match merged {
                None => table.clone(),
                Some(merged) => left_join_on(&merged, table, &self.patient_id_column)?,
            });
            debug!("Merged table '{}' as {}", entry.table, entry.category);
        }

        let merged = merged.unwrap_or_default();
        let data = merged.unique_stable(
            Some(std::slice::from_ref(&self.patient_id_column)),
            UniqueKeepStrategy::First,
            None,
        )?;
        info!(
            "Merged {} tables into {} columns for {} patients",
            self.entries.len(),
            data.width(),
            data.height()
        );
        Ok(MergedTable { data, categories })
    }
}
