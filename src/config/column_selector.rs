use crate::transform::error::StrategyError;
use log::{debug, warn};
use polars::prelude::DataFrame;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fmt::Display;

/// Selects one or several columns of a table.
///
/// A `Regex` selector first looks for a column whose name equals the pattern.
/// Only if there is none, the pattern is used as a regular expression over all
/// column names. A `Multi` selector lists the column names explicitly.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq, Hash)]
#[serde(untagged)]
pub enum ColumnSelector {
    Regex(String),
    Multi(Vec<String>),
}

impl ColumnSelector {
    /// Resolves the selector against the columns of `df`, in table order.
    ///
    /// Columns listed in `excluded` are never selected. Explicitly listed
    /// columns that do not exist are an error.
    pub fn resolve(
        &self,
        table_name: &str,
        df: &DataFrame,
        excluded: &[&str],
    ) -> Result<Vec<String>, StrategyError> {
        let names: Vec<String> = df
            .get_column_names()
            .into_iter()
            .map(|name| name.to_string())
            .filter(|name| !excluded.contains(&name.as_str()))
            .collect();

        let selected = match self {
            ColumnSelector::Regex(pattern) => {
                if names.contains(pattern) {
                    vec![pattern.clone()]
                } else {
                    let regex =
                        Regex::new(pattern).map_err(|err| StrategyError::InvalidRegex {
                            pattern: pattern.clone(),
                            reason: err.to_string(),
                        })?;
                    names
                        .into_iter()
                        .filter(|name| regex.is_match(name))
                        .collect()
                }
            }
            ColumnSelector::Multi(multi) => {
                if let Some(missing) = multi.iter().find(|name| !names.contains(name)) {
                    return Err(StrategyError::MissingColumn {
                        table: table_name.to_string(),
                        column: missing.clone(),
                    });
                }
                names
                    .into_iter()
                    .filter(|name| multi.contains(name))
                    .collect()
            }
        };

        if selected.is_empty() {
            warn!("Selector {self} matched no columns in table '{table_name}'");
        } else {
            debug!("Selector {self} matched {selected:?} in table '{table_name}'");
        }
        Ok(selected)
    }
}

impl From<&str> for ColumnSelector {
    fn from(value: &str) -> Self {
        ColumnSelector::Regex(value.to_string())
    }
}

impl From<Vec<&str>> for ColumnSelector {
    fn from(value: Vec<&str>) -> Self {
        ColumnSelector::Multi(value.iter().map(|s| s.to_string()).collect())
    }
}

impl Display for ColumnSelector {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ColumnSelector::Regex(regex) => write!(f, "'{regex}'"),
            ColumnSelector::Multi(multi) => write!(f, "{multi:?}"),
        }
    }
}
