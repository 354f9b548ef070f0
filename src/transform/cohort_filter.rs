use crate::transform::data_processing::columns::column_to_f64_vec;
use crate::transform::error::TransformError;
use log::info;
use polars::prelude::{BooleanChunked, DataFrame, NewChunkedArray};
use serde::{Deserialize, Serialize};

/// Drops patients that left the study early without leaving clinical data behind.
///
/// Rows whose `column` equals `equals` are kept only if every column in
/// `require_present` holds a value. The kept rows are moved behind all other
/// rows.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct CohortFilter {
    pub column: String,
    pub equals: f64,
    #[serde(default)]
    pub require_present: Vec<String>,
}

impl CohortFilter {
    pub fn new(column: &str, equals: f64, require_present: &[&str]) -> Self {
        CohortFilter {
            column: column.to_string(),
            equals,
            require_present: require_present.iter().map(|c| c.to_string()).collect(),
        }
    }

    pub fn apply(&self, data: &DataFrame) -> Result<DataFrame, TransformError> {
        let missing = |column: &str| TransformError::MissingColumn {
            table: "merged".to_string(),
            column: column.to_string(),
        };

        let matches: Vec<bool> =
            column_to_f64_vec(data.column(&self.column).map_err(|_| missing(&self.column))?)?
                .into_iter()
                .map(|value| value == Some(self.equals))
                .collect();

        let mut complete = vec![true; data.height()];
        for name in &self.require_present {
            let column = data.column(name).map_err(|_| missing(name))?;
            let nulls = column.is_null();
            for (row, is_null) in nulls.into_iter().enumerate() {
                if is_null == Some(true) {
                    complete[row] = false;
                }
            }
        }

        let others: Vec<bool> = matches.iter().map(|m| !m).collect();
        let retained: Vec<bool> = matches
            .iter()
            .zip(&complete)
            .map(|(m, c)| *m && *c)
            .collect();

        let head = data.filter(&BooleanChunked::from_slice("others".into(), &others))?;
        let tail = data.filter(&BooleanChunked::from_slice("retained".into(), &retained))?;
        info!(
            "Cohort filter on '{}' kept {} of {} matching rows",
            self.column,
            tail.height(),
            matches.iter().filter(|m| **m).count()
        );
        Ok(head.vstack(&tail)?)
    }
}
