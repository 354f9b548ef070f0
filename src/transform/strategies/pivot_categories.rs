use crate::transform::data_processing::columns::{
    column_to_f64_vec, column_to_string_vec, normalize_code, require_column,
};
use crate::transform::error::StrategyError;
use crate::transform::table_set::TableSet;
use crate::transform::traits::Strategy;
use log::{info, warn};
use polars::prelude::Column;
use serde::{Deserialize, Serialize};

/// A category code and the column its values are moved into.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct CategoryColumn {
    pub code: String,
    pub column: String,
}

impl CategoryColumn {
    pub fn new(code: &str, column: &str) -> Self {
        CategoryColumn {
            code: code.to_string(),
            column: column.to_string(),
        }
    }
}

/// Splits a value column into one column per category.
///
/// Every declared category gets a column that holds the row's value where the
/// row belongs to the category and `0` otherwise. The category and value
/// columns are dropped afterwards.
///
/// # Examples
///
/// A dose record with `medication` and `total_dose` is split into
/// `meds_methadone` (code `1`) and `meds_buprenorphine` (code `2`):
///
/// | medication | total_dose | | meds_methadone | meds_buprenorphine |
/// |------------|------------|-|----------------|--------------------|
/// | 1          | 40         | | 40             | 0                  |
/// | 2          | 16         | | 0              | 16                 |
#[derive(Debug)]
pub struct PivotCategoriesStrategy {
    table: String,
    category_column: String,
    value_column: String,
    categories: Vec<CategoryColumn>,
}

impl PivotCategoriesStrategy {
    pub fn new(
        table: &str,
        category_column: &str,
        value_column: &str,
        categories: Vec<CategoryColumn>,
    ) -> Self {
        PivotCategoriesStrategy {
            table: table.to_string(),
            category_column: category_column.to_string(),
            value_column: value_column.to_string(),
            categories,
        }
    }
}

impl Strategy for PivotCategoriesStrategy {
    fn source_table(&self) -> &str {
        &self.table
    }

    fn internal_transform(&self, tables: &mut TableSet) -> Result<(), StrategyError> {
        info!(
            "Applying PivotCategories strategy to table '{}'",
            self.table
        );
        let mut data = tables.get(&self.table)?.clone();

        let codes: Vec<Option<String>> =
            column_to_string_vec(require_column(&data, &self.table, &self.category_column)?)?
                .into_iter()
                .map(|code| code.map(|c| normalize_code(&c)))
                .collect();
        let values = column_to_f64_vec(require_column(&data, &self.table, &self.value_column)?)?;

        let known_codes: Vec<String> = self
            .categories
            .iter()
            .map(|category| normalize_code(&category.code))
            .collect();
        let unknown = codes
            .iter()
            .flatten()
            .filter(|code| !known_codes.contains(code))
            .count();
        if unknown > 0 {
            warn!(
                "{unknown} rows of table '{}' have a category outside {known_codes:?}",
                self.table
            );
        }

        data = data
            .drop(&self.category_column)?
            .drop(&self.value_column)?;

        for (category, code) in self.categories.iter().zip(&known_codes) {
            let split: Vec<f64> = codes
                .iter()
                .zip(&values)
                .map(|(row_code, value)| match row_code {
                    Some(row_code) if row_code == code => value.unwrap_or(0.0),
                    _ => 0.0,
                })
                .collect();
            data.with_column(Column::new(category.column.as_str().into(), split))?;
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
    fn strategy() -> PivotCategoriesStrategy {
        PivotCategoriesStrategy::new(
            "dos",
            "medication",
            "total_dose",
            vec![
                CategoryColumn::new("1", "meds_methadone"),
                CategoryColumn::new("2", "meds_buprenorphine"),
            ],
        )
    }

    #[rstest]
    fn test_pivot_medication(strategy: PivotCategoriesStrategy) {
        let mut tables = TableSet::new();
        tables.insert(
            "dos",
            df![
                "patdeid" => ["a", "b", "c", "d"],
                "VISIT" => [0i64, 0, 0, 0],
                "medication" => [Some(1.0), Some(2.0), Some(3.0), None],
                "total_dose" => [Some(40.0), Some(16.0), Some(8.0), Some(5.0)],
            ]
            .unwrap(),
        );

        strategy.transform(&mut tables).unwrap();

        let expected = df![
            "patdeid" => ["a", "b", "c", "d"],
            "VISIT" => [0i64, 0, 0, 0],
            "meds_methadone" => [40.0, 0.0, 0.0, 0.0],
            "meds_buprenorphine" => [0.0, 16.0, 0.0, 0.0],
        ]
        .unwrap();
        assert_eq!(tables.get("dos").unwrap(), &expected);
    }

    #[rstest]
    fn test_pivot_string_codes_and_missing_dose(strategy: PivotCategoriesStrategy) {
        let mut tables = TableSet::new();
        tables.insert(
            "dos",
            df![
                "patdeid" => ["a", "b"],
                "medication" => ["1", "2.0"],
                "total_dose" => [None, Some(16i64)],
            ]
            .unwrap(),
        );

        strategy.transform(&mut tables).unwrap();

        let expected = df![
            "patdeid" => ["a", "b"],
            "meds_methadone" => [0.0, 0.0],
            "meds_buprenorphine" => [0.0, 16.0],
        ]
        .unwrap();
        assert_eq!(tables.get("dos").unwrap(), &expected);
    }

    #[rstest]
    fn test_pivot_missing_value_column(strategy: PivotCategoriesStrategy) {
        let mut tables = TableSet::new();
        tables.insert(
            "dos",
            df!["patdeid" => ["a"], "medication" => [1i64]].unwrap(),
        );

        assert!(matches!(
            strategy.transform(&mut tables),
            Err(StrategyError::MissingColumn { column, .. }) if column == "total_dose"
        ));
    }
}
