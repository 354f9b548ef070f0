use crate::transform::error::TransformError;
use log::{debug, info, warn};
use polars::prelude::{ChunkAgg, Column, DataFrame, DataType};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct RegressionConfig {
    /// Numeric columns whose missing values are imputed.
    pub columns: Vec<String>,
    /// Additional numeric columns used only as inputs.
    #[serde(default)]
    pub predictors: Vec<String>,
    #[serde(default = "default_max_iter")]
    pub max_iter: usize,
    #[serde(default = "default_tolerance")]
    pub tolerance: f64,
    /// Ridge penalty on the regression weights. The intercept is not penalized.
    #[serde(default = "default_ridge")]
    pub ridge: f64,
}

fn default_max_iter() -> usize {
    10
}

fn default_tolerance() -> f64 {
    1e-3
}

fn default_ridge() -> f64 {
    1e-6
}

impl RegressionConfig {
    pub fn new(columns: &[&str], predictors: &[&str]) -> Self {
        RegressionConfig {
            columns: columns.iter().map(|c| c.to_string()).collect(),
            predictors: predictors.iter().map(|c| c.to_string()).collect(),
            max_iter: default_max_iter(),
            tolerance: default_tolerance(),
            ridge: default_ridge(),
        }
    }
}

/// A numeric column taking part in the regression.
struct Feature {
    name: String,
    observed: Vec<bool>,
    values: Vec<f64>,
    is_target: bool,
}

/// Imputes a group of numeric columns from each other.
///
/// Missing cells start out as the column mean. Then, round by round, every
/// target column is regressed on all other columns of the group, using the
/// rows where it was observed, and its missing cells are replaced by the
/// predictions. Rounds stop after `max_iter` or once no imputed cell moves
/// by more than `tolerance`. A group of a single column is a mean fill.
#[derive(Debug, Clone, PartialEq)]
pub struct IterativeImputer {
    config: RegressionConfig,
}

impl IterativeImputer {
    pub fn new(config: RegressionConfig) -> Self {
        IterativeImputer { config }
    }

    pub fn impute(&self, mut data: DataFrame) -> Result<DataFrame, TransformError> {
        info!(
            "Imputing {:?} by regression on {:?}",
            self.config.columns, self.config.predictors
        );

        let mut features: Vec<Feature> = vec![];
        let names = self
            .config
            .columns
            .iter()
            .map(|name| (name, true))
            .chain(self.config.predictors.iter().map(|name| (name, false)));
        for (name, is_target) in names {
            let column = data
                .column(name)
                .map_err(|_| TransformError::MissingColumn {
                    table: "merged".to_string(),
                    column: name.clone(),
                })?;
            let numeric = column.cast(&DataType::Float64)?;
            let raw: Vec<Option<f64>> = numeric.f64()?.into_iter().collect();
            let Some(column_mean) = numeric.f64()?.mean() else {
                warn!("Column '{name}' has no observed values and is not imputed");
                continue;
            };
            features.push(Feature {
                name: name.clone(),
                observed: raw.iter().map(Option::is_some).collect(),
                values: raw.iter().map(|v| v.unwrap_or(column_mean)).collect(),
                is_target,
            });
        }

        for round in 0..self.config.max_iter {
            let mut largest_change: f64 = 0.0;
            for target in 0..features.len() {
                if !features[target].is_target || features[target].observed.iter().all(|o| *o) {
                    continue;
                }
                let Some(weights) = self.fit(&features, target) else {
                    warn!(
                        "Could not fit a regression for column '{}'",
                        features[target].name
                    );
                    continue;
                };
                for row in 0..data.height() {
                    if features[target].observed[row] {
                        continue;
                    }
                    let prediction = predict(&features, target, &weights, row);
                    largest_change =
                        largest_change.max((prediction - features[target].values[row]).abs());
                    features[target].values[row] = prediction;
                }
            }
            debug!("Regression round {round} changed imputed cells by at most {largest_change}");
            if largest_change < self.config.tolerance {
                break;
            }
        }

        for feature in features.into_iter().filter(|f| f.is_target) {
            data.with_column(Column::new(feature.name.as_str().into(), feature.values))?;
        }
        Ok(data)
    }

    /// Fits intercept and weights of `target` on all other features, over the
    /// rows where `target` was observed.
    fn fit(&self, features: &[Feature], target: usize) -> Option<Vec<f64>> {
        let inputs: Vec<&Feature> = features
            .iter()
            .enumerate()
            .filter(|(idx, _)| *idx != target)
            .map(|(_, feature)| feature)
            .collect();
        let size = inputs.len() + 1;

        let mut gram = vec![vec![0.0; size]; size];
        let mut moment = vec![0.0; size];
        let rows = features[target]
            .observed
            .iter()
            .enumerate()
            .filter(|(_, observed)| **observed)
            .map(|(row, _)| row);
        for row in rows {
            let mut x = vec![1.0];
            x.extend(inputs.iter().map(|feature| feature.values[row]));
            let y = features[target].values[row];
            for i in 0..size {
                moment[i] += x[i] * y;
                for j in 0..size {
                    gram[i][j] += x[i] * x[j];
                }
            }
        }
        for (i, row) in gram.iter_mut().enumerate().skip(1) {
            row[i] += self.config.ridge;
        }

        solve(gram, moment)
    }
}

fn predict(features: &[Feature], target: usize, weights: &[f64], row: usize) -> f64 {
    let inputs = features
        .iter()
        .enumerate()
        .filter(|(idx, _)| *idx != target)
        .map(|(_, feature)| feature.values[row]);
    weights[0]
        + weights[1..]
            .iter()
            .zip(inputs)
            .map(|(weight, value)| weight * value)
            .sum::<f64>()
}

/// Solves `a * x = b` by Gaussian elimination with partial pivoting.
fn solve(mut a: Vec<Vec<f64>>, mut b: Vec<f64>) -> Option<Vec<f64>> {
    let n = b.len();
    for col in 0..n {
        let pivot = (col..n).max_by(|&i, &j| a[i][col].abs().total_cmp(&a[j][col].abs()))?;
        if a[pivot][col].abs() < 1e-12 {
            return None;
        }
        a.swap(col, pivot);
        b.swap(col, pivot);

        for row in col + 1..n {
            let factor = a[row][col] / a[col][col];
            for k in col..n {
                a[row][k] -= factor * a[col][k];
            }
            b[row] -= factor * b[col];
        }
    }

    let mut x = vec![0.0; n];
    for row in (0..n).rev() {
        let tail: f64 = (row + 1..n).map(|k| a[row][k] * x[k]).sum();
        x[row] = (b[row] - tail) / a[row][row];
    }
    Some(x)
}
