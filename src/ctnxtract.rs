use crate::config::{CTN0027_CONFIG, ConfigLoader, CtnXtractConfig};
use crate::error::{ConstructionError, PipelineError};
use crate::extract::CsvDataSource;
use crate::pipeline::Pipeline;
use config::FileFormat;
use log::info;
use std::env::VarError;
use std::path::{Path, PathBuf};
use validator::Validate;

/// A configured study run: the data sources to read and the pipeline they go through.
#[derive(Debug, PartialEq)]
pub struct CtnXtract {
    pipeline: Pipeline,
    data_sources: Vec<CsvDataSource>,
}

impl CtnXtract {
    pub fn new(pipeline: Pipeline, data_sources: Vec<CsvDataSource>) -> Self {
        CtnXtract {
            pipeline,
            data_sources,
        }
    }

    /// The CTN-0027 study as shipped with the crate.
    pub fn default_study() -> Result<Self, ConstructionError> {
        let config: CtnXtractConfig = ConfigLoader::load_from_str(CTN0027_CONFIG, FileFormat::Yaml)?;
        CtnXtract::try_from(config)
    }

    pub fn data_sources(&self) -> &[CsvDataSource] {
        &self.data_sources
    }

    pub fn run(&self) -> Result<(), PipelineError> {
        info!(
            "Running pipeline over {} data sources",
            self.data_sources.len()
        );
        self.pipeline.run(&self.data_sources)
    }
}

fn expand_data_dir(data_dir: &Path) -> Result<PathBuf, ConstructionError> {
    expand_data_dir_with(data_dir, |var| std::env::var(var).map(Some))
}

/// Expands variables through `lookup`, then a leading `~`.
fn expand_data_dir_with<L>(data_dir: &Path, lookup: L) -> Result<PathBuf, ConstructionError>
where
    L: FnMut(&str) -> Result<Option<String>, VarError>,
{
    let raw = data_dir.to_string_lossy();
    let expanded =
        shellexpand::env_with_context(&raw, lookup).map_err(|err| ConstructionError::InvalidPath {
            path: raw.to_string(),
            reason: err.to_string(),
        })?;
    Ok(PathBuf::from(shellexpand::tilde(&expanded).as_ref()))
}

impl TryFrom<CtnXtractConfig> for CtnXtract {
    type Error = ConstructionError;

    fn try_from(config: CtnXtractConfig) -> Result<Self, Self::Error> {
        config.validate()?;

        let data_dir = expand_data_dir(&config.extract.data_dir)?;
        let data_sources = config
            .extract
            .tables
            .into_iter()
            .map(|spec| CsvDataSource::from_spec(&data_dir, config.extract.separator, spec))
            .collect();
        let pipeline = Pipeline::try_from(config.pipeline_config)?;

        Ok(CtnXtract::new(pipeline, data_sources))
    }
}

impl TryFrom<PathBuf> for CtnXtract {
    type Error = ConstructionError;

    fn try_from(path: PathBuf) -> Result<Self, Self::Error> {
        if !path.exists() {
            return Err(ConstructionError::NoConfigFileFound(path));
        }
        let config: CtnXtractConfig = ConfigLoader::load(&path)?;

        CtnXtract::try_from(config)
    }
}
