use crate::config::pipeline_config::PipelineConfig;
use crate::config::{ConfigLoader, CtnXtractConfig};
use crate::error::{ConstructionError, PipelineError};
use crate::extract::named_table::NamedTable;
use crate::extract::traits::Extractable;
use crate::load::loader_factory::LoaderFactory;
use crate::load::traits::Loadable;
use crate::transform::cleaning::TableCleaner;
use crate::transform::imputation::{Imputer, IterativeImputer};
use crate::transform::merging::TableMerger;
use crate::transform::strategies::strategy_factory::StrategyFactory;
use crate::transform::transform_module::TransformerModule;
use log::info;
use polars::prelude::DataFrame;
use std::path::PathBuf;
use validator::Validate;

#[derive(Debug)]
pub struct Pipeline {
    transformer_module: TransformerModule,
    loader_module: Box<dyn Loadable>,
}

impl Pipeline {
    pub fn new(
        transformer_module: TransformerModule,
        loader_module: Box<dyn Loadable>,
    ) -> Pipeline {
        Pipeline {
            transformer_module,
            loader_module,
        }
    }

    pub fn run(&self, extractables: &[impl Extractable + Validate]) -> Result<(), PipelineError> {
        let data = self.extract(extractables)?;
        let mut patients = self.transform(data)?;
        self.load(&mut patients)?;
        Ok(())
    }

    pub fn extract(
        &self,
        extractables: &[impl Extractable + Validate],
    ) -> Result<Vec<NamedTable>, PipelineError> {
        info!("Starting extract");
        extractables.iter().try_for_each(|ex| ex.validate())?;

        let tables = extractables
            .iter()
            .map(|ex| ex.extract())
            .collect::<Result<Vec<_>, _>>()?;

        info!("Concluded extraction extracted {:?} tables", tables.len());
        Ok(tables)
    }

    pub fn transform(&self, data: Vec<NamedTable>) -> Result<DataFrame, PipelineError> {
        info!("Starting Transformation");

        let patients = self.transformer_module.run(data)?;
        info!(
            "Concluded Transformation. Found {:?} patients",
            patients.height()
        );
        Ok(patients)
    }

    pub fn load(&self, patients: &mut DataFrame) -> Result<(), PipelineError> {
        self.loader_module.load(patients)?;

        info!("Concluded Loading");
        Ok(())
    }
}

impl TryFrom<PipelineConfig> for Pipeline {
    type Error = ConstructionError;

    fn try_from(config: PipelineConfig) -> Result<Self, Self::Error> {
        config.validate()?;

        let strategy_factory = StrategyFactory::new(&config.patient_id_column, &config.visit_column);
        let strategies = strategy_factory.try_from_configs(&config.transform_strategies)?;

        let tf_module = TransformerModule::new(
            TableCleaner::new(
                &config.patient_id_column,
                &config.visit_column,
                config.visit_codes.clone(),
            ),
            strategies,
            TableMerger::new(&config.patient_id_column, config.merge.clone()),
            config.cohort_filter.clone(),
            Imputer::new(&config.imputation.rules),
            config.imputation.regression.clone().map(IterativeImputer::new),
        );
        let loader_module = LoaderFactory::from_config(config.loader);

        Ok(Pipeline::new(tf_module, loader_module))
    }
}

impl PartialEq for Pipeline {
    fn eq(&self, other: &Self) -> bool {
        self.transformer_module == other.transformer_module
            && format!("{:?}", self.loader_module) == format!("{:?}", other.loader_module)
    }
}

impl TryFrom<CtnXtractConfig> for Pipeline {
    type Error = ConstructionError;

    fn try_from(config: CtnXtractConfig) -> Result<Self, Self::Error> {
        Pipeline::try_from(config.pipeline_config)
    }
}

impl TryFrom<PathBuf> for Pipeline {
    type Error = ConstructionError;

    fn try_from(path: PathBuf) -> Result<Self, Self::Error> {
        if !path.exists() {
            return Err(ConstructionError::NoConfigFileFound(path));
        }
        let config: CtnXtractConfig = ConfigLoader::load(&path)?;

        Pipeline::try_from(config)
    }
}
