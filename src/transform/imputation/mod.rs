pub mod imputer;
pub use imputer::Imputer;
pub mod regression;
pub use regression::{IterativeImputer, RegressionConfig};

use serde::{Deserialize, Serialize};
use strum_macros::Display;

/// The kind of information a merged table carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum FieldCategory {
    Attendance,
    Medication,
    UrineScreen,
    Survey,
    Outcome,
    Diagnosis,
    MedicalHistory,
    PhysicalExam,
    Withdrawal,
    RiskBehavior,
    Demographics,
}

/// How the missing values of a category are filled.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ImputationStrategy {
    /// Numeric columns get `0`.
    Zero,
    /// Numeric columns get the column mean.
    Mean,
    /// Columns get a fixed categorical label.
    Label(String),
    /// Columns are left to the regression imputer.
    Regression,
    Leave,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ImputationRule {
    pub category: FieldCategory,
    pub strategy: ImputationStrategy,
}

impl ImputationRule {
    pub fn new(category: FieldCategory, strategy: ImputationStrategy) -> Self {
        ImputationRule { category, strategy }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ImputationConfig {
    #[serde(default)]
    pub rules: Vec<ImputationRule>,
    #[serde(default)]
    pub regression: Option<RegressionConfig>,
}
