use crate::transform::data_processing::columns::is_numeric_dtype;
use crate::transform::error::TransformError;
use crate::transform::imputation::{FieldCategory, ImputationRule, ImputationStrategy};
use log::{debug, info, warn};
use polars::prelude::{DataFrame, Expr, IntoLazy, col, lit};
use std::collections::HashMap;

/// Fills the missing values of the patient level table by field category.
///
/// Columns of a category without a rule are left as they are. If a category
/// is listed twice, the later rule wins.
#[derive(Debug, Clone, PartialEq)]
pub struct Imputer {
    rules: HashMap<FieldCategory, ImputationStrategy>,
}

impl Imputer {
    pub fn new(rules: &[ImputationRule]) -> Self {
        Imputer {
            rules: rules
                .iter()
                .map(|rule| (rule.category, rule.strategy.clone()))
                .collect(),
        }
    }

    pub fn strategy_for(&self, category: FieldCategory) -> &ImputationStrategy {
        self.rules
            .get(&category)
            .unwrap_or(&ImputationStrategy::Leave)
    }

    pub fn impute(
        &self,
        data: DataFrame,
        categories: &HashMap<String, FieldCategory>,
    ) -> Result<DataFrame, TransformError> {
        info!("Imputing missing values by field category");

        let mut fills: Vec<Expr> = vec![];
        for column in data.get_columns() {
            let name = column.name().as_str();
            let Some(category) = categories.get(name) else {
                continue;
            };
            if column.null_count() == 0 {
                continue;
            }

            let numeric = is_numeric_dtype(column.dtype());
            let fill = match self.strategy_for(*category) {
                ImputationStrategy::Zero if numeric => Some(col(name).fill_null(lit(0i64))),
                ImputationStrategy::Mean if numeric => {
                    Some(col(name).fill_null(col(name).mean()))
                }
                ImputationStrategy::Label(label) => {
                    Some(col(name).fill_null(lit(label.clone())))
                }
                ImputationStrategy::Zero | ImputationStrategy::Mean => {
                    warn!("Can not impute non-numeric column '{name}' of category {category}");
                    None
                }
                ImputationStrategy::Regression | ImputationStrategy::Leave => None,
            };

            if let Some(fill) = fill {
                debug!(
                    "Filling {} nulls in column '{name}' of category {category}",
                    column.null_count()
                );
                fills.push(fill);
            }
        }

        Ok(data.lazy().with_columns(fills).collect()?)
    }
}
