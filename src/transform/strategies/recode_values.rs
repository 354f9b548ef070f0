use crate::config::column_selector::ColumnSelector;
use crate::transform::data_processing::columns::{column_to_f64_vec, is_numeric_dtype};
use crate::transform::data_processing::frames::column_names_except;
use crate::transform::error::StrategyError;
use crate::transform::table_set::TableSet;
use crate::transform::traits::Strategy;
use log::{debug, info};
use polars::prelude::{Column, DataType};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Recode {
    pub from: f64,
    pub to: f64,
}

impl Recode {
    pub fn new(from: f64, to: f64) -> Self {
        Recode { from, to }
    }
}

/// Replaces numeric values of the selected columns.
///
/// All replacements are applied at once, so `0 -> 1, 1 -> 0` swaps the two
/// values. Non-numeric columns are left alone. Integer columns stay integer
/// as long as every replacement is a whole number.
#[derive(Debug)]
pub struct RecodeValuesStrategy {
    table: String,
    patient_id_column: String,
    columns: Option<ColumnSelector>,
    mapping: Vec<Recode>,
}

impl RecodeValuesStrategy {
    pub fn new(
        table: &str,
        patient_id_column: &str,
        columns: Option<ColumnSelector>,
        mapping: &[Recode],
    ) -> Self {
        RecodeValuesStrategy {
            table: table.to_string(),
            patient_id_column: patient_id_column.to_string(),
            columns,
            mapping: mapping.to_vec(),
        }
    }

    fn recode(&self, value: f64) -> f64 {
        self.mapping
            .iter()
            .find(|recode| recode.from == value)
            .map_or(value, |recode| recode.to)
    }

    fn keeps_integers(&self) -> bool {
        self.mapping.iter().all(|recode| recode.to.fract() == 0.0)
    }
}

impl Strategy for RecodeValuesStrategy {
    fn source_table(&self) -> &str {
        &self.table
    }

    fn internal_transform(&self, tables: &mut TableSet) -> Result<(), StrategyError> {
        info!(
            "Applying RecodeValues strategy with {:?} to table '{}'",
            self.mapping, self.table
        );
        let mut data = tables.get(&self.table)?.clone();
        let targets = match &self.columns {
            Some(selector) => selector.resolve(&self.table, &data, &[&self.patient_id_column])?,
            None => column_names_except(&data, &[&self.patient_id_column]),
        };

        for name in targets {
            let column = data.column(&name)?;
            let dtype = column.dtype().clone();
            if !is_numeric_dtype(&dtype) {
                debug!("Skipping non-numeric column '{name}' of table '{}'", self.table);
                continue;
            }

            let recoded: Vec<Option<f64>> = column_to_f64_vec(column)?
                .into_iter()
                .map(|value| value.map(|v| self.recode(v)))
                .collect();
            let mut recoded = Column::new(name.as_str().into(), recoded);
            if dtype != DataType::Float64 && dtype != DataType::Float32 && self.keeps_integers() {
                recoded = recoded.cast(&dtype)?;
            }
            data.with_column(recoded)?;
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
    fn test_recode_swaps_values() {
        let mut tables = TableSet::new();
        tables.insert(
            "rsa_flat",
            df!["patdeid" => ["a", "b", "c"], "dropout" => [Some(0i64), Some(1), None]].unwrap(),
        );
        let strategy = RecodeValuesStrategy::new(
            "rsa_flat",
            "patdeid",
            Some(ColumnSelector::from("dropout")),
            &[Recode::new(0.0, 1.0), Recode::new(1.0, 0.0)],
        );

        strategy.transform(&mut tables).unwrap();

        let expected =
            df!["patdeid" => ["a", "b", "c"], "dropout" => [Some(1i64), Some(0), None]].unwrap();
        assert_eq!(tables.get("rsa_flat").unwrap(), &expected);
    }

    #[rstest]
    fn test_recode_skips_patient_id_and_text() {
        let mut tables = TableSet::new();
        tables.insert(
            "rbs",
            df![
                "patdeid" => ["7", "9"],
                "rbs_cocaine" => [7.0, 2.0],
                "rbs_note" => ["7", "x"],
            ]
            .unwrap(),
        );
        let strategy = RecodeValuesStrategy::new(
            "rbs",
            "patdeid",
            None,
            &[Recode::new(7.0, 0.0), Recode::new(9.0, 0.0)],
        );

        strategy.transform(&mut tables).unwrap();

        let expected = df![
            "patdeid" => ["7", "9"],
            "rbs_cocaine" => [0.0, 2.0],
            "rbs_note" => ["7", "x"],
        ]
        .unwrap();
        assert_eq!(tables.get("rbs").unwrap(), &expected);
    }
}
