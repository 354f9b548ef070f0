use crate::config::table_spec::TableSpec;
use crate::extract::error::ExtractionError;
use crate::extract::named_table::NamedTable;
use crate::extract::traits::Extractable;
use log::info;
use polars::io::SerReader;
use polars::prelude::CsvReadOptions;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use validator::Validate;

/// Defines one delimited file of the study as a data source.
#[derive(Debug, Clone, PartialEq, Validate)]
pub struct CsvDataSource {
    /// The file path to the CSV source.
    pub source: PathBuf,
    /// The character used to separate fields in the file. Defaults to ','.
    pub separator: Option<char>,
    /// Name and column selection of the table read from this file.
    #[validate(nested)]
    pub spec: TableSpec,
}

impl CsvDataSource {
    pub fn new(source: PathBuf, separator: Option<char>, spec: TableSpec) -> Self {
        Self {
            source,
            separator,
            spec,
        }
    }

    /// Builds the data source for `spec`, resolving its file against `data_dir`.
    pub fn from_spec(data_dir: &Path, separator: Option<char>, spec: TableSpec) -> Self {
        let source = data_dir.join(spec.file());
        Self::new(source, separator, spec)
    }
}

impl Extractable for CsvDataSource {
    fn extract(&self) -> Result<NamedTable, ExtractionError> {
        info!(
            "Attempting to extract table '{}' from: {}",
            self.spec.name(),
            self.source.display()
        );

        if !self.source.is_file() {
            return Err(ExtractionError::MissingFile {
                table: self.spec.name().to_string(),
                path: self.source.clone(),
            });
        }

        let mut csv_read_options = CsvReadOptions::default()
            .with_has_header(true)
            .with_infer_schema_length(None);

        if let Some(sep) = self.separator {
            let new_parse_options = (*csv_read_options.parse_options)
                .clone()
                .with_separator(sep as u8);
            csv_read_options.parse_options = Arc::from(new_parse_options);
        }

        let data = csv_read_options
            .try_into_reader_with_file_path(Some(self.source.clone()))?
            .finish()?;

        if data.width() == 0 {
            return Err(ExtractionError::EmptyTable(self.spec.name().to_string()));
        }

        info!(
            "Extracted table '{}' with shape {:?} from {}",
            self.spec.name(),
            data.shape(),
            self.source.display()
        );
        Ok(NamedTable::new(self.spec.clone(), data))
    }
}
