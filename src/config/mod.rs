pub mod ctnxtract_config;
pub use self::ctnxtract_config::{CtnXtractConfig, ExtractConfig};
pub mod pipeline_config;
pub use self::pipeline_config::PipelineConfig;
pub mod strategy_config;
pub use self::strategy_config::StrategyConfig;
mod config_loader;
pub use self::config_loader::ConfigLoader;
pub mod column_selector;
pub mod loader_config;
pub mod table_spec;

pub use self::column_selector::ColumnSelector;
pub use self::table_spec::{ColumnSpec, TableSpec};

/// The CTN-0027 study definition shipped with the crate.
pub const CTN0027_CONFIG: &str = include_str!("../../assets/ctn0027.yaml");
