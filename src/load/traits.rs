use crate::load::error::LoadError;
use polars::prelude::DataFrame;
use std::fmt::Debug;

pub trait Loadable: Debug {
    /// Persists the patient level table.
    fn load(&self, table: &mut DataFrame) -> Result<(), LoadError>;
}
