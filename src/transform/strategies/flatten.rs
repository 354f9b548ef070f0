use crate::transform::data_processing::columns::{column_to_i64_vec, require_column};
use crate::transform::data_processing::frames::{column_names_except, left_join_on};
use crate::transform::error::StrategyError;
use crate::transform::table_set::TableSet;
use crate::transform::traits::Strategy;
use log::{debug, info, warn};
use polars::prelude::{BooleanChunked, DataFrame, NewChunkedArray, UniqueKeepStrategy};
use serde::{Deserialize, Serialize};

/// The weeks a long table is reshaped into.
///
/// Yields `start, start + step, ...` up to and including `stop`, minus the
/// weeks listed in `skip`.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct WeekSchedule {
    pub start: i64,
    pub stop: i64,
    #[serde(default = "default_step")]
    pub step: i64,
    #[serde(default)]
    pub skip: Vec<i64>,
}

fn default_step() -> i64 {
    1
}

impl WeekSchedule {
    pub fn new(start: i64, stop: i64, step: i64, skip: Vec<i64>) -> Self {
        WeekSchedule {
            start,
            stop,
            step,
            skip,
        }
    }

    pub fn check(&self) -> Result<(), String> {
        if self.step < 1 {
            return Err(format!("step must be at least 1, got {}", self.step));
        }
        if self.start > self.stop {
            return Err(format!(
                "start {} lies after stop {}",
                self.start, self.stop
            ));
        }
        if self.skip.contains(&self.start) {
            return Err(format!("start week {} can not be skipped", self.start));
        }
        Ok(())
    }

    pub fn weeks(&self) -> Vec<i64> {
        let mut weeks = vec![];
        let mut week = self.start;
        while week <= self.stop {
            if !self.skip.contains(&week) {
                weeks.push(week);
            }
            week += self.step.max(1);
        }
        weeks
    }
}

/// Reshapes a long table with one row per patient and visit into a wide table
/// with one row per patient.
///
/// For every scheduled week the rows of that week are taken, reduced to the
/// first row per patient, and every column except the patient ID is suffixed
/// with `_<week>`. The weekly tables are then left joined onto the start week.
/// Patients without a row in the start week are dropped; patients missing at
/// a later week get nulls for that week.
#[derive(Debug)]
pub struct FlattenStrategy {
    table: String,
    into: Option<String>,
    patient_id_column: String,
    visit_column: String,
    schedule: WeekSchedule,
}

impl FlattenStrategy {
    pub fn try_new(
        table: &str,
        into: Option<&str>,
        patient_id_column: &str,
        visit_column: &str,
        schedule: WeekSchedule,
    ) -> Result<Self, StrategyError> {
        schedule
            .check()
            .map_err(|reason| StrategyError::InvalidSchedule {
                table: table.to_string(),
                reason,
            })?;
        Ok(FlattenStrategy {
            table: table.to_string(),
            into: into.map(str::to_string),
            patient_id_column: patient_id_column.to_string(),
            visit_column: visit_column.to_string(),
            schedule,
        })
    }

    fn week_table(
        &self,
        data: &DataFrame,
        visits: &[Option<i64>],
        week: i64,
    ) -> Result<DataFrame, StrategyError> {
        let mask: Vec<bool> = visits.iter().map(|visit| *visit == Some(week)).collect();
        let rows = data.filter(&BooleanChunked::from_slice("week".into(), &mask))?;
        let mut week_table = rows
            .unique_stable(
                Some(std::slice::from_ref(&self.patient_id_column)),
                UniqueKeepStrategy::First,
                None,
            )?
            .drop(&self.visit_column)?;

        if week_table.height() == 0 {
            warn!("No rows for week {week} in table '{}'", self.table);
        }

        for name in column_names_except(&week_table, &[&self.patient_id_column]) {
            week_table.rename(&name, format!("{name}_{week}").into())?;
        }
        Ok(week_table)
    }
}

impl Strategy for FlattenStrategy {
    fn source_table(&self) -> &str {
        &self.table
    }

    fn internal_transform(&self, tables: &mut TableSet) -> Result<(), StrategyError> {
        let target = self.into.as_deref().unwrap_or(&self.table);
        info!(
            "Applying Flatten strategy to table '{}' into '{target}'",
            self.table
        );

        let data = tables.get(&self.table)?;
        require_column(data, &self.table, &self.patient_id_column)?;
        let visits = column_to_i64_vec(require_column(data, &self.table, &self.visit_column)?)?;

        let week_tables = self
            .schedule
            .weeks()
            .into_iter()
            .map(|week| self.week_table(data, &visits, week))
            .collect::<Result<Vec<DataFrame>, StrategyError>>()?;

        let mut week_tables = week_tables.into_iter();
        let start = week_tables.next().ok_or_else(|| StrategyError::InvalidSchedule {
            table: self.table.clone(),
            reason: "schedule yields no weeks".to_string(),
        })?;
        let flat = week_tables.try_fold(start, |flat, week_table| {
            left_join_on(&flat, &week_table, &self.patient_id_column)
        })?;

        debug!(
            "Flattened table '{}' into shape {:?}",
            self.table,
            flat.shape()
        );
        tables.insert(target, flat);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::df;
    use polars::prelude::AnyValue;
    use pretty_assertions::assert_eq;
    use rstest::{fixture, rstest};

    #[fixture]
    fn uds() -> DataFrame {
        df![
            "patdeid" => ["a", "a", "b", "b", "c", "a"],
            "VISIT" => [0i64, 1, 0, 2, 1, 0],
            "test_Opiate300" => [0i64, 1, 1, 0, 0, 1],
        ]
        .unwrap()
    }

    fn tables_with(name: &str, df: DataFrame) -> TableSet {
        let mut tables = TableSet::new();
        tables.insert(name, df);
        tables
    }

    #[rstest]
    #[case(WeekSchedule::new(0, 4, 1, vec![]), vec![0, 1, 2, 3, 4])]
    #[case(WeekSchedule::new(0, 24, 4, vec![]), vec![0, 4, 8, 12, 16, 20, 24])]
    #[case(WeekSchedule::new(0, 10, 4, vec![]), vec![0, 4, 8])]
    #[case(WeekSchedule::new(0, 6, 1, vec![2, 3]), vec![0, 1, 4, 5, 6])]
    #[case(WeekSchedule::new(3, 3, 1, vec![]), vec![3])]
    fn test_schedule_weeks(#[case] schedule: WeekSchedule, #[case] expected: Vec<i64>) {
        assert_eq!(schedule.weeks(), expected);
    }

    #[rstest]
    #[case(WeekSchedule::new(0, 4, 0, vec![]))]
    #[case(WeekSchedule::new(5, 4, 1, vec![]))]
    #[case(WeekSchedule::new(0, 4, 1, vec![0]))]
    fn test_invalid_schedule(#[case] schedule: WeekSchedule) {
        let result = FlattenStrategy::try_new("uds", None, "patdeid", "VISIT", schedule);
        assert!(matches!(result, Err(StrategyError::InvalidSchedule { .. })));
    }

    #[rstest]
    fn test_flatten(uds: DataFrame) {
        let mut tables = tables_with("uds", uds);
        let strategy = FlattenStrategy::try_new(
            "uds",
            Some("uds_flat"),
            "patdeid",
            "VISIT",
            WeekSchedule::new(0, 2, 1, vec![]),
        )
        .unwrap();

        strategy.transform(&mut tables).unwrap();

        let expected = df![
            "patdeid" => ["a", "b"],
            "test_Opiate300_0" => [0i64, 1],
            "test_Opiate300_1" => [Some(1i64), None],
            "test_Opiate300_2" => [None, Some(0i64)],
        ]
        .unwrap();
        assert_eq!(tables.get("uds_flat").unwrap(), &expected);
        assert!(tables.contains("uds"));
    }

    #[rstest]
    fn test_flatten_cardinality_is_start_week_patients(uds: DataFrame) {
        let mut tables = tables_with("uds", uds);
        let strategy = FlattenStrategy::try_new(
            "uds",
            None,
            "patdeid",
            "VISIT",
            WeekSchedule::new(0, 2, 1, vec![]),
        )
        .unwrap();

        strategy.transform(&mut tables).unwrap();

        // "c" only attended week 1 and is dropped, "a" is reported twice at week 0
        assert_eq!(tables.get("uds").unwrap().height(), 2);
    }

    #[rstest]
    fn test_flatten_single_week(uds: DataFrame) {
        let mut tables = tables_with("uds", uds);
        let strategy = FlattenStrategy::try_new(
            "uds",
            None,
            "patdeid",
            "VISIT",
            WeekSchedule::new(1, 1, 1, vec![]),
        )
        .unwrap();

        strategy.transform(&mut tables).unwrap();

        let expected = df![
            "patdeid" => ["a", "c"],
            "test_Opiate300_1" => [1i64, 0],
        ]
        .unwrap();
        assert_eq!(tables.get("uds").unwrap(), &expected);
    }

    #[rstest]
    fn test_flatten_skipped_weeks_have_no_columns(uds: DataFrame) {
        let mut tables = tables_with("uds", uds);
        let strategy = FlattenStrategy::try_new(
            "uds",
            None,
            "patdeid",
            "VISIT",
            WeekSchedule::new(0, 2, 1, vec![1]),
        )
        .unwrap();

        strategy.transform(&mut tables).unwrap();

        let flat = tables.get("uds").unwrap();
        assert_eq!(
            column_names_except(flat, &[]),
            vec!["patdeid", "test_Opiate300_0", "test_Opiate300_2"]
        );
        assert_eq!(
            flat.column("test_Opiate300_2").unwrap().get(1).unwrap(),
            AnyValue::Int64(0)
        );
    }

    #[rstest]
    fn test_flatten_missing_visit_column() {
        let mut tables = tables_with("dem", df!["patdeid" => ["a"], "gender" => [1i64]].unwrap());
        let strategy = FlattenStrategy::try_new(
            "dem",
            None,
            "patdeid",
            "VISIT",
            WeekSchedule::new(0, 1, 1, vec![]),
        )
        .unwrap();

        let result = strategy.transform(&mut tables);
        assert!(matches!(result, Err(StrategyError::MissingColumn { .. })));
    }

    #[rstest]
    fn test_flatten_missing_table() {
        let mut tables = TableSet::new();
        let strategy = FlattenStrategy::try_new(
            "uds",
            None,
            "patdeid",
            "VISIT",
            WeekSchedule::new(0, 1, 1, vec![]),
        )
        .unwrap();

        assert!(matches!(
            strategy.transform(&mut tables),
            Err(StrategyError::MissingTable(_))
        ));
    }
}
