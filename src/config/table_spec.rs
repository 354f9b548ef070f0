use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;
use validator::Validate;

/// Describes one raw extract of the study and which of its columns survive cleaning.
#[derive(Debug, Validate, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct TableSpec {
    #[validate(length(min = 1))]
    name: String,
    /// File name, relative to the data directory.
    file: PathBuf,
    #[validate(length(min = 1))]
    columns: Vec<ColumnSpec>,
}

impl TableSpec {
    pub fn new(name: impl Into<String>, file: impl Into<PathBuf>, columns: Vec<ColumnSpec>) -> Self {
        TableSpec {
            name: name.into(),
            file: file.into(),
            columns,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn file(&self) -> &PathBuf {
        &self.file
    }

    pub fn columns(&self) -> &[ColumnSpec] {
        &self.columns
    }

    /// Source names of all columns to keep, in declaration order.
    pub fn keep_columns(&self) -> Vec<String> {
        self.columns
            .iter()
            .map(|spec| spec.source().to_string())
            .collect()
    }

    pub fn rename_map(&self) -> HashMap<String, String> {
        self.columns
            .iter()
            .filter_map(|spec| match spec {
                ColumnSpec::Keep(_) => None,
                ColumnSpec::Rename { source, rename } => Some((source.clone(), rename.clone())),
            })
            .collect()
    }
}

/// A column to keep, optionally under a new name.
///
/// Deserializes from either a plain string (`patdeid`) or a map
/// (`{ source: RSA001, rename: rsa_week }`).
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq, Hash)]
#[serde(untagged)]
pub enum ColumnSpec {
    Keep(String),
    Rename { source: String, rename: String },
}

impl ColumnSpec {
    pub fn rename(source: &str, rename: &str) -> Self {
        ColumnSpec::Rename {
            source: source.to_string(),
            rename: rename.to_string(),
        }
    }

    pub fn source(&self) -> &str {
        match self {
            ColumnSpec::Keep(source) => source,
            ColumnSpec::Rename { source, .. } => source,
        }
    }
}

impl From<&str> for ColumnSpec {
    fn from(source: &str) -> Self {
        ColumnSpec::Keep(source.to_string())
    }
}
