use crate::config::pipeline_config::PipelineConfig;
use crate::config::table_spec::TableSpec;
use crate::validation::config_validation::validate_extract_config;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use validator::Validate;

/// Represents all necessary data to construct and run the study pipeline.
#[derive(Debug, Deserialize, Serialize, Validate, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct CtnXtractConfig {
    #[validate(nested)]
    pub extract: ExtractConfig,
    #[serde(rename = "pipeline")]
    #[validate(nested)]
    pub pipeline_config: PipelineConfig,
}

/// Where the raw extracts live and which of them to read.
#[derive(Debug, Deserialize, Serialize, Validate, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
#[validate(schema(function = "validate_extract_config"))]
pub struct ExtractConfig {
    /// Directory holding the raw extracts. `~` and environment variables are expanded.
    pub data_dir: PathBuf,
    #[serde(default)]
    pub separator: Option<char>,
    #[validate(nested)]
    pub tables: Vec<TableSpec>,
}

impl CtnXtractConfig {
    pub fn pipeline_config(&self) -> PipelineConfig {
        self.pipeline_config.clone()
    }
}
