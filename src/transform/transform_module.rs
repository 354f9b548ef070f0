use crate::extract::named_table::NamedTable;
use crate::transform::cleaning::TableCleaner;
use crate::transform::cohort_filter::CohortFilter;
use crate::transform::error::TransformError;
use crate::transform::imputation::{Imputer, IterativeImputer};
use crate::transform::merging::TableMerger;
use crate::transform::table_set::TableSet;
use crate::transform::traits::Strategy;
use log::info;
use polars::prelude::DataFrame;

#[derive(Debug)]
pub struct TransformerModule {
    cleaner: TableCleaner,
    strategies: Vec<Box<dyn Strategy>>,
    merger: TableMerger,
    cohort_filter: Option<CohortFilter>,
    imputer: Imputer,
    regression: Option<IterativeImputer>,
}

impl TransformerModule {
    pub fn new(
        cleaner: TableCleaner,
        strategies: Vec<Box<dyn Strategy>>,
        merger: TableMerger,
        cohort_filter: Option<CohortFilter>,
        imputer: Imputer,
        regression: Option<IterativeImputer>,
    ) -> Self {
        TransformerModule {
            cleaner,
            strategies,
            merger,
            cohort_filter,
            imputer,
            regression,
        }
    }

    /// Cleans the extracted tables and applies the strategies in order.
    pub fn prepare(&self, data: Vec<NamedTable>) -> Result<TableSet, TransformError> {
        let mut tables = TableSet::new();
        for table in data {
            let name = table.name().to_string();
            tables.insert(name, self.cleaner.clean(table)?);
        }

        for strategy in &self.strategies {
            strategy.transform(&mut tables)?;
        }
        Ok(tables)
    }

    pub fn run(&self, data: Vec<NamedTable>) -> Result<DataFrame, TransformError> {
        let tables = self.prepare(data)?;

        let merged = self.merger.merge(&tables)?;
        let mut patients = merged.data;

        if let Some(cohort_filter) = &self.cohort_filter {
            patients = cohort_filter.apply(&patients)?;
        }

        patients = self.imputer.impute(patients, &merged.categories)?;
        if let Some(regression) = &self.regression {
            patients = regression.impute(patients)?;
        }

        info!(
            "Transformed {} tables into {} patients with {} columns",
            tables.len(),
            patients.height(),
            patients.width()
        );
        Ok(patients)
    }
}

impl PartialEq for TransformerModule {
    fn eq(&self, other: &Self) -> bool {
        self.cleaner == other.cleaner
            && self.merger == other.merger
            && self.cohort_filter == other.cohort_filter
            && self.imputer == other.imputer
            && self.regression == other.regression
            && self.strategies.len() == other.strategies.len()
            && self
                .strategies
                .iter()
                .zip(other.strategies.iter())
                .all(|(a, b)| format!("{:?}", a) == format!("{:?}", b))
    }
}
