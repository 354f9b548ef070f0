use crate::constants::{DEFAULT_BASELINE_TOKEN, DEFAULT_VISIT_PREFIX, DEFAULT_WEEK_PREFIX};
use crate::extract::named_table::NamedTable;
use crate::transform::data_processing::columns::{
    column_to_f64_vec, column_to_string_vec, is_numeric_dtype,
};
use crate::transform::data_processing::frames::column_names_except;
use crate::transform::error::TransformError;
use log::{debug, info};
use polars::prelude::{Column, DataFrame, DataType};
use serde::{Deserialize, Serialize};

/// Tokens used to spell visit codes such as `VISITBASELINE` or `VISITWK12`.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct VisitCodes {
    pub prefix: String,
    pub baseline: String,
    pub week_prefix: String,
}

impl Default for VisitCodes {
    fn default() -> Self {
        VisitCodes {
            prefix: DEFAULT_VISIT_PREFIX.to_string(),
            baseline: DEFAULT_BASELINE_TOKEN.to_string(),
            week_prefix: DEFAULT_WEEK_PREFIX.to_string(),
        }
    }
}

impl VisitCodes {
    /// Turns a visit code into its week number.
    ///
    /// The prefix token is stripped, the baseline token becomes `0` and the
    /// week prefix token is stripped, in this order.
    pub fn week_of(&self, code: &str) -> Option<i64> {
        let mut normalized = code.to_string();
        if !self.prefix.is_empty() {
            normalized = normalized.replace(&self.prefix, "");
        }
        if !self.baseline.is_empty() {
            normalized = normalized.replace(&self.baseline, "0");
        }
        if !self.week_prefix.is_empty() {
            normalized = normalized.replace(&self.week_prefix, "");
        }
        normalized.trim().parse::<i64>().ok()
    }
}

/// Reduces a raw extract to the columns of interest in a uniform shape.
///
/// After cleaning the table holds only the configured columns that exist in
/// the extract, under their new names, with the patient ID as a string in
/// first position and the visit column as integer week numbers.
#[derive(Debug, Clone, PartialEq)]
pub struct TableCleaner {
    patient_id_column: String,
    visit_column: String,
    visit_codes: VisitCodes,
}

impl TableCleaner {
    pub fn new(patient_id_column: &str, visit_column: &str, visit_codes: VisitCodes) -> Self {
        TableCleaner {
            patient_id_column: patient_id_column.to_string(),
            visit_column: visit_column.to_string(),
            visit_codes,
        }
    }

    pub fn clean(&self, table: NamedTable) -> Result<DataFrame, TransformError> {
        let table_name = table.name().to_string();
        let keep = table.spec().keep_columns();
        let renames = table.spec().rename_map();
        let data = table.into_data();

        let kept: Vec<String> = column_names_except(&data, &[])
            .into_iter()
            .filter(|name| keep.contains(name))
            .collect();
        debug!("Keeping columns {kept:?} of table '{table_name}'");
        let mut data = data.select(kept)?;

        if data.get_column_index(&self.visit_column).is_some() {
            let weeks = self.normalize_visits(&table_name, data.column(&self.visit_column)?)?;
            data.with_column(weeks)?;
        }

        for (source, target) in &renames {
            if data.get_column_index(source).is_some() {
                data.rename(source, target.as_str().into())?;
            }
        }

        let patient_ids = data
            .column(&self.patient_id_column)
            .map_err(|_| TransformError::MissingColumn {
                table: table_name.clone(),
                column: self.patient_id_column.clone(),
            })?
            .cast(&DataType::String)?;
        data.with_column(patient_ids)?;

        let mut ordered = vec![self.patient_id_column.clone()];
        ordered.extend(column_names_except(&data, &[&self.patient_id_column]));
        let data = data.select(ordered)?;

        info!("Cleaned table '{table_name}' to shape {:?}", data.shape());
        Ok(data)
    }

    fn normalize_visits(&self, table_name: &str, visits: &Column) -> Result<Column, TransformError> {
        let invalid = |value: String| TransformError::InvalidVisitCode {
            table: table_name.to_string(),
            column: self.visit_column.clone(),
            value,
        };

        let weeks: Vec<Option<i64>> = if is_numeric_dtype(visits.dtype()) {
            column_to_f64_vec(visits)?
                .into_iter()
                .map(|visit| match visit {
                    Some(week) if week.fract() == 0.0 => Ok(Some(week as i64)),
                    Some(week) => Err(invalid(week.to_string())),
                    None => Ok(None),
                })
                .collect::<Result<_, _>>()?
        } else {
            column_to_string_vec(visits)?
                .into_iter()
                .map(|visit| match visit {
                    Some(code) => self
                        .visit_codes
                        .week_of(&code)
                        .map(Some)
                        .ok_or_else(|| invalid(code)),
                    None => Ok(None),
                })
                .collect::<Result<_, _>>()?
        };

        Ok(Column::new(visits.name().clone(), weeks))
    }
}
