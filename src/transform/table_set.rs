use crate::transform::error::StrategyError;
use ordermap::OrderMap;
use polars::prelude::DataFrame;

/// The named tables a transformation works on, in insertion order.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct TableSet {
    tables: OrderMap<String, DataFrame>,
}

impl TableSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces the table called `name`.
    ///
    /// A replaced table keeps its position.
    pub fn insert(&mut self, name: impl Into<String>, table: DataFrame) {
        self.tables.insert(name.into(), table);
    }

    pub fn get(&self, name: &str) -> Result<&DataFrame, StrategyError> {
        self.tables
            .get(name)
            .ok_or_else(|| StrategyError::MissingTable(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.tables.contains_key(name)
    }

    pub fn names(&self) -> Vec<&str> {
        self.tables.keys().map(String::as_str).collect()
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}
