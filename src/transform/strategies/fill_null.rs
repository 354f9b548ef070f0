use crate::config::column_selector::ColumnSelector;
use crate::config::strategy_config::CellValue;
use crate::transform::data_processing::frames::column_names_except;
use crate::transform::error::StrategyError;
use crate::transform::table_set::TableSet;
use crate::transform::traits::Strategy;
use log::info;
use polars::prelude::{Expr, IntoLazy, col};

/// Replaces the nulls of the selected columns with a constant.
///
/// Without a selector every column except the patient ID is filled.
#[derive(Debug)]
pub struct FillNullStrategy {
    table: String,
    patient_id_column: String,
    columns: Option<ColumnSelector>,
    value: CellValue,
}

impl FillNullStrategy {
    pub fn new(
        table: &str,
        patient_id_column: &str,
        columns: Option<ColumnSelector>,
        value: CellValue,
    ) -> Self {
        FillNullStrategy {
            table: table.to_string(),
            patient_id_column: patient_id_column.to_string(),
            columns,
            value,
        }
    }
}

impl Strategy for FillNullStrategy {
    fn source_table(&self) -> &str {
        &self.table
    }

    fn internal_transform(&self, tables: &mut TableSet) -> Result<(), StrategyError> {
        info!(
            "Applying FillNull strategy with {:?} to table '{}'",
            self.value, self.table
        );
        let data = tables.get(&self.table)?;
        let targets = match &self.columns {
            Some(selector) => selector.resolve(&self.table, data, &[&self.patient_id_column])?,
            None => column_names_except(data, &[&self.patient_id_column]),
        };

        let fills: Vec<Expr> = targets
            .iter()
            .map(|name| col(name.as_str()).fill_null(self.value.to_lit()))
            .collect();
        let filled = data.clone().lazy().with_columns(fills).collect()?;

        tables.insert(self.table.clone(), filled);
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
    fn test_fill_all_columns_but_patient_id() {
        let mut tables = TableSet::new();
        tables.insert(
            "rsa_flat",
            df![
                "patdeid" => [Some("a"), None],
                "rsa_week_0" => [Some(1i64), None],
                "rsa_week_1" => [None, Some(1i64)],
            ]
            .unwrap(),
        );
        let strategy = FillNullStrategy::new("rsa_flat", "patdeid", None, CellValue::Int(0));

        strategy.transform(&mut tables).unwrap();

        let expected = df![
            "patdeid" => [Some("a"), None],
            "rsa_week_0" => [1i64, 0],
            "rsa_week_1" => [0i64, 1],
        ]
        .unwrap();
        assert_eq!(tables.get("rsa_flat").unwrap(), &expected);
    }

    #[rstest]
    fn test_fill_selected_columns_with_label() {
        let mut tables = TableSet::new();
        tables.insert(
            "pex",
            df![
                "patdeid" => ["a", "b"],
                "pex_skin" => [Some("normal"), None],
                "pex_other" => [None::<&str>, None],
            ]
            .unwrap(),
        );
        let strategy = FillNullStrategy::new(
            "pex",
            "patdeid",
            Some(ColumnSelector::from("pex_skin")),
            CellValue::from("not_present"),
        );

        strategy.transform(&mut tables).unwrap();

        let pex = tables.get("pex").unwrap();
        assert_eq!(
            pex.column("pex_skin").unwrap().str().unwrap().get(1),
            Some("not_present")
        );
        assert_eq!(pex.column("pex_other").unwrap().null_count(), 2);
    }
}
