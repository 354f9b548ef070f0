use crate::config::loader_config::LoaderConfig;
use crate::config::strategy_config::StrategyConfig;
use crate::constants::{DEFAULT_PATIENT_ID_COLUMN, DEFAULT_VISIT_COLUMN};
use crate::transform::cleaning::VisitCodes;
use crate::transform::cohort_filter::CohortFilter;
use crate::transform::imputation::ImputationConfig;
use crate::transform::merging::MergeEntry;
use crate::validation::config_validation::validate_pipeline_config;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Represents the configuration for the transform and load stages.
///
/// The tables are transformed by `transform_strategies` in order, then the
/// tables listed in `merge` are joined into one patient level table which is
/// filtered, imputed and handed to the `loader`.
#[derive(Debug, Deserialize, Clone, Serialize, PartialEq, Validate)]
#[serde(deny_unknown_fields)]
#[validate(schema(function = "validate_pipeline_config"))]
pub struct PipelineConfig {
    #[serde(default = "default_patient_id_column")]
    #[validate(length(min = 1))]
    pub patient_id_column: String,
    #[serde(default = "default_visit_column")]
    #[validate(length(min = 1))]
    pub visit_column: String,
    #[serde(default)]
    pub visit_codes: VisitCodes,
    #[serde(default)]
    pub transform_strategies: Vec<StrategyConfig>,
    #[validate(length(min = 1))]
    pub merge: Vec<MergeEntry>,
    #[serde(default)]
    pub cohort_filter: Option<CohortFilter>,
    #[serde(default)]
    pub imputation: ImputationConfig,
    pub loader: LoaderConfig,
}

impl PipelineConfig {
    pub fn new(
        transform_strategies: Vec<StrategyConfig>,
        merge: Vec<MergeEntry>,
        imputation: ImputationConfig,
        loader: LoaderConfig,
    ) -> Self {
        Self {
            patient_id_column: default_patient_id_column(),
            visit_column: default_visit_column(),
            visit_codes: VisitCodes::default(),
            transform_strategies,
            merge,
            cohort_filter: None,
            imputation,
            loader,
        }
    }
}

fn default_patient_id_column() -> String {
    DEFAULT_PATIENT_ID_COLUMN.to_string()
}

fn default_visit_column() -> String {
    DEFAULT_VISIT_COLUMN.to_string()
}
