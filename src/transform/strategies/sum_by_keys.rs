use crate::transform::data_processing::columns::{is_numeric_dtype, require_column};
use crate::transform::error::StrategyError;
use crate::transform::table_set::TableSet;
use crate::transform::traits::Strategy;
use log::{debug, info};
use polars::prelude::{Expr, IntoLazy, col};

/// Collapses all rows sharing the same key values into one row holding the
/// sums of the numeric columns.
///
/// Groups keep the order of their first row. Rows with a null key are
/// dropped, as are non-numeric columns that are not keys.
#[derive(Debug)]
pub struct SumByKeysStrategy {
    table: String,
    keys: Vec<String>,
}

impl SumByKeysStrategy {
    pub fn new(table: &str, keys: &[String]) -> Self {
        SumByKeysStrategy {
            table: table.to_string(),
            keys: keys.to_vec(),
        }
    }
}

impl Strategy for SumByKeysStrategy {
    fn source_table(&self) -> &str {
        &self.table
    }

    fn internal_transform(&self, tables: &mut TableSet) -> Result<(), StrategyError> {
        info!(
            "Applying SumByKeys strategy on {:?} to table '{}'",
            self.keys, self.table
        );
        let data = tables.get(&self.table)?;
        for key in &self.keys {
            require_column(data, &self.table, key)?;
        }

        let mut sums: Vec<Expr> = vec![];
        for column in data.get_columns() {
            let name = column.name().as_str();
            if self.keys.iter().any(|key| key == name) {
                continue;
            }
            if is_numeric_dtype(column.dtype()) {
                sums.push(col(name).sum());
            } else {
                debug!(
                    "Dropping non-numeric column '{name}' while summing table '{}'",
                    self.table
                );
            }
        }

        let keys: Vec<Expr> = self.keys.iter().map(|key| col(key.as_str())).collect();
        let mut lazy = data.clone().lazy();
        if let Some(keys_present) = keys
            .iter()
            .map(|key| key.clone().is_not_null())
            .reduce(|all, next| all.and(next))
        {
            lazy = lazy.filter(keys_present);
        }
        let summed = lazy.group_by_stable(keys).agg(sums).collect()?;

        debug!(
            "Summed table '{}' from {} to {} rows",
            self.table,
            data.height(),
            summed.height()
        );
        tables.insert(self.table.clone(), summed);
        Ok(())
    }
}
