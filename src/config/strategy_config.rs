use crate::config::column_selector::ColumnSelector;
use crate::transform::strategies::flatten::WeekSchedule;
use crate::transform::strategies::label_codes::{CodeLabel, UnmappedCodes};
use crate::transform::strategies::pivot_categories::CategoryColumn;
use crate::transform::strategies::recode_values::Recode;
use crate::transform::strategies::rename_columns::RenamePair;
use crate::transform::strategies::urine_test_outcomes::ResponderWindow;
use polars::prelude::{Expr, lit};
use serde::{Deserialize, Serialize};

/// One step of the table transformation, applied in the configured order.
///
/// Every step names the table it reads. Steps with an `into` field write
/// their result to a new table and leave the source table untouched.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "snake_case")]
#[serde(deny_unknown_fields)]
pub enum StrategyConfig {
    DropDuplicates {
        table: String,
        subset: Vec<String>,
    },
    CountRows {
        table: String,
        into: String,
        column: String,
    },
    Flatten {
        table: String,
        #[serde(default)]
        into: Option<String>,
        schedule: WeekSchedule,
    },
    FillNull {
        table: String,
        #[serde(default)]
        columns: Option<ColumnSelector>,
        value: CellValue,
    },
    ForwardBackwardFill {
        table: String,
        columns: Vec<String>,
    },
    RenameColumns {
        table: String,
        columns: Vec<RenamePair>,
    },
    RecodeValues {
        table: String,
        #[serde(default)]
        columns: Option<ColumnSelector>,
        mapping: Vec<Recode>,
    },
    LabelCodes {
        table: String,
        #[serde(default)]
        columns: Option<ColumnSelector>,
        labels: Vec<CodeLabel>,
        #[serde(default)]
        unmapped: UnmappedCodes,
    },
    FilterWeeks {
        table: String,
        weeks: Vec<i64>,
    },
    DropColumns {
        table: String,
        columns: Vec<String>,
    },
    SumByKeys {
        table: String,
        keys: Vec<String>,
    },
    SelectFirst {
        table: String,
        into: String,
        columns: Vec<String>,
    },
    PivotCategories {
        table: String,
        category_column: String,
        value_column: String,
        categories: Vec<CategoryColumn>,
    },
    UrineTestOutcomes {
        table: String,
        into: String,
        columns: ColumnSelector,
        #[serde(default)]
        window: ResponderWindow,
    },
}

impl StrategyConfig {
    /// Name of the table the step reads.
    pub fn table(&self) -> &str {
        match self {
            StrategyConfig::DropDuplicates { table, .. }
            | StrategyConfig::CountRows { table, .. }
            | StrategyConfig::Flatten { table, .. }
            | StrategyConfig::FillNull { table, .. }
            | StrategyConfig::ForwardBackwardFill { table, .. }
            | StrategyConfig::RenameColumns { table, .. }
            | StrategyConfig::RecodeValues { table, .. }
            | StrategyConfig::LabelCodes { table, .. }
            | StrategyConfig::FilterWeeks { table, .. }
            | StrategyConfig::DropColumns { table, .. }
            | StrategyConfig::SumByKeys { table, .. }
            | StrategyConfig::SelectFirst { table, .. }
            | StrategyConfig::PivotCategories { table, .. }
            | StrategyConfig::UrineTestOutcomes { table, .. } => table,
        }
    }
}

/// Represents the value of a single cell, which can be one of several primitive types.
///
/// This enum uses `serde(untagged)` so that `0`, `0.5`, `true` and
/// `not_present` in a config file all deserialize into it.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(untagged)]
pub enum CellValue {
    String(String),
    Int(i64),
    Float(f64),
    Bool(bool),
}

impl CellValue {
    pub fn to_lit(&self) -> Expr {
        match self {
            CellValue::String(value) => lit(value.clone()),
            CellValue::Int(value) => lit(*value),
            CellValue::Float(value) => lit(*value),
            CellValue::Bool(value) => lit(*value),
        }
    }
}

impl From<i64> for CellValue {
    fn from(value: i64) -> Self {
        CellValue::Int(value)
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::String(value.to_string())
    }
}
