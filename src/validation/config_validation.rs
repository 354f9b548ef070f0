use crate::config::column_selector::ColumnSelector;
use crate::config::ctnxtract_config::ExtractConfig;
use crate::config::pipeline_config::PipelineConfig;
use crate::config::strategy_config::StrategyConfig;
use crate::validation::validation_utils::{
    fail_validation_on_duplicates, find_duplicates, validate_regex,
};
use std::borrow::Cow;
use validator::ValidationError;

pub(crate) fn validate_extract_config(config: &ExtractConfig) -> Result<(), ValidationError> {
    if config.tables.is_empty() {
        return Err(ValidationError::new("no_tables")
            .with_message(Cow::Borrowed("At least one table has to be extracted.")));
    }

    let duplicates = find_duplicates(config.tables.iter().map(|table| table.name()));
    fail_validation_on_duplicates(
        &duplicates,
        "duplicate_tables",
        "Table names have to be unique.",
    )
}

pub(crate) fn validate_pipeline_config(config: &PipelineConfig) -> Result<(), ValidationError> {
    for strategy in &config.transform_strategies {
        validate_strategy(strategy)?;
    }

    let duplicates = find_duplicates(config.merge.iter().map(|entry| entry.table.as_str()));
    fail_validation_on_duplicates(
        &duplicates,
        "duplicate_merge_tables",
        "A table can only be merged once.",
    )
}

fn validate_strategy(strategy: &StrategyConfig) -> Result<(), ValidationError> {
    match strategy {
        StrategyConfig::Flatten {
            table, schedule, ..
        } => schedule.check().map_err(|reason| {
            let mut error = ValidationError::new("invalid_schedule");
            error.add_param(Cow::from("table"), table);
            error.with_message(Cow::Owned(reason))
        }),
        StrategyConfig::UrineTestOutcomes {
            table,
            columns,
            window,
            ..
        } => {
            validate_selector(Some(columns))?;
            if window.trailing_weeks == 0 || window.total_weeks == 0 {
                let mut error = ValidationError::new("invalid_window");
                error.add_param(Cow::from("table"), table);
                return Err(error.with_message(Cow::Borrowed(
                    "The responder window needs at least one week.",
                )));
            }
            Ok(())
        }
        StrategyConfig::FillNull { columns, .. }
        | StrategyConfig::RecodeValues { columns, .. }
        | StrategyConfig::LabelCodes { columns, .. } => validate_selector(columns.as_ref()),
        StrategyConfig::PivotCategories {
            table, categories, ..
        } => {
            let duplicates =
                find_duplicates(categories.iter().map(|category| category.column.as_str()));
            fail_validation_on_duplicates(
                &duplicates,
                "duplicate_category_columns",
                &format!("Category columns of table '{table}' have to be unique."),
            )
        }
        _ => Ok(()),
    }
}

fn validate_selector(selector: Option<&ColumnSelector>) -> Result<(), ValidationError> {
    match selector {
        Some(ColumnSelector::Regex(pattern)) => validate_regex(pattern),
        _ => Ok(()),
    }
}
