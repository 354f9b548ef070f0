pub mod cleaning;
pub use cleaning::TableCleaner;
pub mod cohort_filter;
pub mod data_processing;
pub mod error;
pub mod imputation;
pub mod merging;
pub use merging::TableMerger;
pub mod strategies;
pub mod table_set;
pub use table_set::TableSet;
pub mod traits;
pub mod transform_module;

pub use transform_module::TransformerModule;
