pub mod config;
pub mod extract;
pub mod load;
pub use pipeline::Pipeline;
pub mod constants;
pub mod ctnxtract;
pub mod error;
pub mod pipeline;
pub mod transform;
mod validation;

pub use ctnxtract::CtnXtract;
