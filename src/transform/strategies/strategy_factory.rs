use crate::config::strategy_config::StrategyConfig;
use crate::error::ConstructionError;
use crate::transform::strategies::{
    CountRowsStrategy, DropColumnsStrategy, DropDuplicatesStrategy, FillNullStrategy,
    FilterWeeksStrategy, FlattenStrategy, ForwardBackwardFillStrategy, LabelCodesStrategy,
    PivotCategoriesStrategy, RecodeValuesStrategy, RenameColumnsStrategy, SelectFirstStrategy,
    SumByKeysStrategy, UrineTestOutcomesStrategy,
};
use crate::transform::traits::Strategy;

/// Builds strategies from their configuration, handing them the study wide
/// patient ID and visit column names.
pub struct StrategyFactory {
    patient_id_column: String,
    visit_column: String,
}

impl StrategyFactory {
    pub fn new(patient_id_column: &str, visit_column: &str) -> Self {
        StrategyFactory {
            patient_id_column: patient_id_column.to_string(),
            visit_column: visit_column.to_string(),
        }
    }

    pub fn try_from_configs(
        &self,
        configs: &[StrategyConfig],
    ) -> Result<Vec<Box<dyn Strategy>>, ConstructionError> {
        configs
            .iter()
            .map(|config| self.try_from_config(config))
            .collect()
    }

    pub fn try_from_config(
        &self,
        config: &StrategyConfig,
    ) -> Result<Box<dyn Strategy>, ConstructionError> {
        let patient_id = self.patient_id_column.as_str();
        let strategy: Box<dyn Strategy> = match config {
            StrategyConfig::DropDuplicates { table, subset } => {
                Box::new(DropDuplicatesStrategy::new(table, subset))
            }
            StrategyConfig::CountRows {
                table,
                into,
                column,
            } => Box::new(CountRowsStrategy::new(table, into, patient_id, column)),
            StrategyConfig::Flatten {
                table,
                into,
                schedule,
            } => Box::new(FlattenStrategy::try_new(
                table,
                into.as_deref(),
                patient_id,
                &self.visit_column,
                schedule.clone(),
            )?),
            StrategyConfig::FillNull {
                table,
                columns,
                value,
            } => Box::new(FillNullStrategy::new(
                table,
                patient_id,
                columns.clone(),
                value.clone(),
            )),
            StrategyConfig::ForwardBackwardFill { table, columns } => {
                Box::new(ForwardBackwardFillStrategy::new(table, columns))
            }
            StrategyConfig::RenameColumns { table, columns } => {
                Box::new(RenameColumnsStrategy::new(table, columns))
            }
            StrategyConfig::RecodeValues {
                table,
                columns,
                mapping,
            } => Box::new(RecodeValuesStrategy::new(
                table,
                patient_id,
                columns.clone(),
                mapping,
            )),
            StrategyConfig::LabelCodes {
                table,
                columns,
                labels,
                unmapped,
            } => Box::new(LabelCodesStrategy::new(
                table,
                patient_id,
                columns.clone(),
                labels,
                *unmapped,
            )),
            StrategyConfig::FilterWeeks { table, weeks } => Box::new(FilterWeeksStrategy::new(
                table,
                &self.visit_column,
                weeks,
            )),
            StrategyConfig::DropColumns { table, columns } => {
                Box::new(DropColumnsStrategy::new(table, columns))
            }
            StrategyConfig::SumByKeys { table, keys } => {
                Box::new(SumByKeysStrategy::new(table, keys))
            }
            StrategyConfig::SelectFirst {
                table,
                into,
                columns,
            } => Box::new(SelectFirstStrategy::new(table, into, patient_id, columns)),
            StrategyConfig::PivotCategories {
                table,
                category_column,
                value_column,
                categories,
            } => Box::new(PivotCategoriesStrategy::new(
                table,
                category_column,
                value_column,
                categories.clone(),
            )),
            StrategyConfig::UrineTestOutcomes {
                table,
                into,
                columns,
                window,
            } => Box::new(UrineTestOutcomesStrategy::new(
                table,
                into,
                patient_id,
                columns.clone(),
                *window,
            )),
        };
        Ok(strategy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::column_selector::ColumnSelector;
    use crate::config::strategy_config::CellValue;
    use crate::transform::strategies::flatten::WeekSchedule;
    use crate::transform::strategies::urine_test_outcomes::ResponderWindow;
    use rstest::{fixture, rstest};

    #[fixture]
    fn factory() -> StrategyFactory {
        StrategyFactory::new("patdeid", "VISIT")
    }

    #[rstest]
    fn test_try_from_configs(factory: StrategyFactory) {
        let configs = vec![
            StrategyConfig::DropDuplicates {
                table: "rsa".to_string(),
                subset: vec!["patdeid".to_string(), "VISIT".to_string()],
            },
            StrategyConfig::FillNull {
                table: "rsa".to_string(),
                columns: None,
                value: CellValue::Int(0),
            },
            StrategyConfig::UrineTestOutcomes {
                table: "uds_flat".to_string(),
                into: "uds_features".to_string(),
                columns: ColumnSelector::from(r"^test_Opiate300_\d+$"),
                window: ResponderWindow::default(),
            },
        ];

        let strategies = factory.try_from_configs(&configs).unwrap();

        assert_eq!(strategies.len(), 3);
        assert_eq!(strategies[2].source_table(), "uds_flat");
    }

    #[rstest]
    fn test_try_from_config_invalid_schedule(factory: StrategyFactory) {
        let config = StrategyConfig::Flatten {
            table: "rsa".to_string(),
            into: None,
            schedule: WeekSchedule::new(4, 0, 1, vec![]),
        };

        let result = factory.try_from_config(&config);

        assert!(matches!(result, Err(ConstructionError::Strategy(_))));
    }
}
