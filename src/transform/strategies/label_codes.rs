use crate::config::column_selector::ColumnSelector;
use crate::transform::data_processing::columns::{column_to_string_vec, normalize_code};
use crate::transform::data_processing::frames::column_names_except;
use crate::transform::error::StrategyError;
use crate::transform::table_set::TableSet;
use crate::transform::traits::Strategy;
use log::{info, warn};
use ordermap::OrderMap;
use polars::prelude::Column;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct CodeLabel {
    pub code: String,
    pub label: String,
}

impl CodeLabel {
    pub fn new(code: &str, label: &str) -> Self {
        CodeLabel {
            code: code.to_string(),
            label: label.to_string(),
        }
    }
}

/// What happens to a code without a label.
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum UnmappedCodes {
    /// The code stays in the column as text.
    #[default]
    Keep,
    /// The cell becomes null.
    Null,
}

/// Replaces categorical codes with readable labels.
///
/// Codes are compared in normalized form, so a label for `1` also applies to
/// cells reading `1.0`. The labelled columns are text columns.
#[derive(Debug)]
pub struct LabelCodesStrategy {
    table: String,
    patient_id_column: String,
    columns: Option<ColumnSelector>,
    labels: OrderMap<String, String>,
    unmapped: UnmappedCodes,
}

impl LabelCodesStrategy {
    pub fn new(
        table: &str,
        patient_id_column: &str,
        columns: Option<ColumnSelector>,
        labels: &[CodeLabel],
        unmapped: UnmappedCodes,
    ) -> Self {
        LabelCodesStrategy {
            table: table.to_string(),
            patient_id_column: patient_id_column.to_string(),
            columns,
            labels: labels
                .iter()
                .map(|label| (normalize_code(&label.code), label.label.clone()))
                .collect(),
            unmapped,
        }
    }
}

impl Strategy for LabelCodesStrategy {
    fn source_table(&self) -> &str {
        &self.table
    }

    fn internal_transform(&self, tables: &mut TableSet) -> Result<(), StrategyError> {
        info!("Applying LabelCodes strategy to table '{}'", self.table);
        let mut data = tables.get(&self.table)?.clone();
        let targets = match &self.columns {
            Some(selector) => selector.resolve(&self.table, &data, &[&self.patient_id_column])?,
            None => column_names_except(&data, &[&self.patient_id_column]),
        };

        let mut unmapped_codes: HashSet<String> = HashSet::new();
        for name in targets {
            let labelled: Vec<Option<String>> = column_to_string_vec(data.column(&name)?)?
                .into_iter()
                .map(|cell| {
                    let code = normalize_code(&cell?);
                    match self.labels.get(&code) {
                        Some(label) => Some(label.clone()),
                        None => {
                            unmapped_codes.insert(code.clone());
                            match self.unmapped {
                                UnmappedCodes::Keep => Some(code),
                                UnmappedCodes::Null => None,
                            }
                        }
                    }
                })
                .collect();
            data.with_column(Column::new(name.as_str().into(), labelled))?;
        }

        if !unmapped_codes.is_empty() {
            warn!(
                "Found codes without label in table '{}': {unmapped_codes:?}",
                self.table
            );
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
    use rstest::{fixture, rstest};

    #[fixture]
    fn mdh_labels() -> Vec<CodeLabel> {
        vec![
            CodeLabel::new("0", "no_history"),
            CodeLabel::new("1", "yes_history"),
            CodeLabel::new("9", "not_evaluated"),
        ]
    }

    #[fixture]
    fn mdh() -> TableSet {
        let mut tables = TableSet::new();
        tables.insert(
            "mdh",
            df![
                "patdeid" => ["1", "2", "3", "4"],
                "mdh_asthma" => [Some(0.0), Some(1.0), Some(5.0), None],
            ]
            .unwrap(),
        );
        tables
    }

    #[rstest]
    fn test_label_codes_null_unmapped(mdh_labels: Vec<CodeLabel>, mut mdh: TableSet) {
        let strategy =
            LabelCodesStrategy::new("mdh", "patdeid", None, &mdh_labels, UnmappedCodes::Null);

        strategy.transform(&mut mdh).unwrap();

        let expected = df![
            "patdeid" => ["1", "2", "3", "4"],
            "mdh_asthma" => [Some("no_history"), Some("yes_history"), None, None],
        ]
        .unwrap();
        assert_eq!(mdh.get("mdh").unwrap(), &expected);
    }

    #[rstest]
    fn test_label_codes_keep_unmapped(mdh_labels: Vec<CodeLabel>, mut mdh: TableSet) {
        let strategy =
            LabelCodesStrategy::new("mdh", "patdeid", None, &mdh_labels, UnmappedCodes::Keep);

        strategy.transform(&mut mdh).unwrap();

        let expected = df![
            "patdeid" => ["1", "2", "3", "4"],
            "mdh_asthma" => [Some("no_history"), Some("yes_history"), Some("5"), None],
        ]
        .unwrap();
        assert_eq!(mdh.get("mdh").unwrap(), &expected);
    }

    #[rstest]
    fn test_labels_keep_declared_order() {
        let labels = vec![
            CodeLabel::new("1", "dependence"),
            CodeLabel::new("2", "abuse"),
            CodeLabel::new("3", "no_diagnosis"),
            CodeLabel::new("0", "not_present"),
        ];
        let first = LabelCodesStrategy::new("dsm", "patdeid", None, &labels, UnmappedCodes::Keep);
        let second = LabelCodesStrategy::new("dsm", "patdeid", None, &labels, UnmappedCodes::Keep);

        assert_eq!(format!("{first:?}"), format!("{second:?}"));
        assert_eq!(
            first.labels.keys().collect::<Vec<_>>(),
            vec!["1", "2", "3", "0"]
        );
    }
}
