use crate::config::table_spec::TableSpec;
use polars::prelude::DataFrame;

/// A raw extract together with the `TableSpec` that describes how to clean it.
#[derive(Clone, Debug, PartialEq)]
pub struct NamedTable {
    spec: TableSpec,
    data: DataFrame,
}

impl NamedTable {
    pub fn new(spec: TableSpec, data: DataFrame) -> Self {
        NamedTable { spec, data }
    }

    pub fn name(&self) -> &str {
        self.spec.name()
    }

    pub fn spec(&self) -> &TableSpec {
        &self.spec
    }

    pub fn data(&self) -> &DataFrame {
        &self.data
    }

    pub fn into_data(self) -> DataFrame {
        self.data
    }
}
