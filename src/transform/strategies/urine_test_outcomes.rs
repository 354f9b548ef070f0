use crate::config::column_selector::ColumnSelector;
use crate::constants::{
    CONSECUTIVE_NEGATIVE_TESTS_COL, DEFAULT_TOTAL_WEEKS, DEFAULT_TRAILING_WEEKS,
    NEGATIVE_TEST_RATE_COL, RESPONDER_COL, TOTAL_NEGATIVE_TESTS_COL,
};
use crate::transform::data_processing::columns::{column_to_f64_vec, require_column};
use crate::transform::error::StrategyError;
use crate::transform::table_set::TableSet;
use crate::transform::traits::Strategy;
use log::info;
use polars::prelude::{Column, DataFrame};
use serde::{Deserialize, Serialize};

/// The treatment window the outcome metrics are measured against.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ResponderWindow {
    /// Number of weeks the negative test rate is relative to.
    pub total_weeks: usize,
    /// A responder has only negative tests in this many final weeks.
    pub trailing_weeks: usize,
}

impl Default for ResponderWindow {
    fn default() -> Self {
        ResponderWindow {
            total_weeks: DEFAULT_TOTAL_WEEKS,
            trailing_weeks: DEFAULT_TRAILING_WEEKS,
        }
    }
}

/// Outcome metrics of one patient's weekly urine tests.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TestOutcome {
    pub total_negative: i64,
    pub negative_rate: f64,
    pub consecutive_negative: i64,
    pub responder: i64,
}

impl TestOutcome {
    /// Computes the metrics of one patient from the ordered weekly results,
    /// where `0` is a negative test. Missing results count as positive.
    pub fn from_weekly_results(results: &[Option<f64>], window: &ResponderWindow) -> Self {
        let negative: Vec<bool> = results.iter().map(|result| *result == Some(0.0)).collect();

        let total_negative = negative.iter().filter(|is_negative| **is_negative).count();

        let mut longest_run = 0;
        let mut run = 0;
        for is_negative in &negative {
            run = if *is_negative { run + 1 } else { 0 };
            longest_run = longest_run.max(run);
        }

        let trailing_start = negative.len().saturating_sub(window.trailing_weeks);
        let responder = !negative.is_empty() && negative[trailing_start..].iter().all(|n| *n);

        let negative_rate = if window.total_weeks == 0 {
            0.0
        } else {
            total_negative as f64 / window.total_weeks as f64
        };

        TestOutcome {
            total_negative: total_negative as i64,
            negative_rate,
            consecutive_negative: longest_run as i64,
            responder: i64::from(responder),
        }
    }
}

/// Derives per patient outcome metrics from a wide table of weekly urine tests.
///
/// The output table holds the patient ID, `TNT` (total negative tests), `NTR`
/// (negative test rate), `CNT` (longest run of consecutive negative tests) and
/// `responder`.
#[derive(Debug)]
pub struct UrineTestOutcomesStrategy {
    table: String,
    into: String,
    patient_id_column: String,
    columns: ColumnSelector,
    window: ResponderWindow,
}

impl UrineTestOutcomesStrategy {
    pub fn new(
        table: &str,
        into: &str,
        patient_id_column: &str,
        columns: ColumnSelector,
        window: ResponderWindow,
    ) -> Self {
        UrineTestOutcomesStrategy {
            table: table.to_string(),
            into: into.to_string(),
            patient_id_column: patient_id_column.to_string(),
            columns,
            window,
        }
    }
}

impl Strategy for UrineTestOutcomesStrategy {
    fn source_table(&self) -> &str {
        &self.table
    }

    fn internal_transform(&self, tables: &mut TableSet) -> Result<(), StrategyError> {
        info!(
            "Applying UrineTestOutcomes strategy to table '{}' into '{}'",
            self.table, self.into
        );
        let data = tables.get(&self.table)?;
        let patient_ids = require_column(data, &self.table, &self.patient_id_column)?.clone();

        let test_columns = self
            .columns
            .resolve(&self.table, data, &[&self.patient_id_column])?;
        if test_columns.is_empty() {
            return Err(StrategyError::NoColumnsSelected {
                table: self.table.clone(),
                selector: self.columns.to_string(),
            });
        }

        let weekly_results = test_columns
            .iter()
            .map(|name| column_to_f64_vec(data.column(name)?))
            .collect::<Result<Vec<_>, _>>()?;

        let outcomes: Vec<TestOutcome> = (0..data.height())
            .map(|row| {
                let results: Vec<Option<f64>> =
                    weekly_results.iter().map(|week| week[row]).collect();
                TestOutcome::from_weekly_results(&results, &self.window)
            })
            .collect();

        let outcome_table = DataFrame::new(vec![
            patient_ids,
            Column::new(
                TOTAL_NEGATIVE_TESTS_COL.into(),
                outcomes.iter().map(|o| o.total_negative).collect::<Vec<i64>>(),
            ),
            Column::new(
                NEGATIVE_TEST_RATE_COL.into(),
                outcomes.iter().map(|o| o.negative_rate).collect::<Vec<f64>>(),
            ),
            Column::new(
                CONSECUTIVE_NEGATIVE_TESTS_COL.into(),
                outcomes
                    .iter()
                    .map(|o| o.consecutive_negative)
                    .collect::<Vec<i64>>(),
            ),
            Column::new(
                RESPONDER_COL.into(),
                outcomes.iter().map(|o| o.responder).collect::<Vec<i64>>(),
            ),
        ])?;

        tables.insert(self.into.clone(), outcome_table);
        Ok(())
    }
}
