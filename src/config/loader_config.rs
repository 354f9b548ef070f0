use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Deserialize, Clone, Serialize, PartialEq)]
#[serde(rename_all = "snake_case")]
#[serde(deny_unknown_fields)]
pub enum LoaderConfig {
    CsvFile {
        output_file: PathBuf,
        #[serde(default)]
        create_dir: bool,
        #[serde(default)]
        separator: Option<char>,
        /// Explicit output columns, in output order. All columns when absent.
        #[serde(default)]
        columns: Option<Vec<String>>,
    },
}
