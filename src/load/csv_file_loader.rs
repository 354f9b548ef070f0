use crate::load::error::LoadError;
use crate::load::traits::Loadable;
use log::info;
use polars::prelude::{CsvWriter, DataFrame, SerWriter};
use std::fs::File;
use std::path::PathBuf;

/// Writes the patient level table to a single CSV file with a header row.
#[derive(Debug)]
pub struct CsvFileLoader {
    output_file: PathBuf,
    create_dir: bool,
    separator: Option<char>,
    columns: Option<Vec<String>>,
}

impl CsvFileLoader {
    pub fn new(
        output_file: PathBuf,
        create_dir: bool,
        separator: Option<char>,
        columns: Option<Vec<String>>,
    ) -> Self {
        CsvFileLoader {
            output_file,
            create_dir,
            separator,
            columns,
        }
    }

    fn prepare_dir(&self) -> Result<(), LoadError> {
        let Some(parent) = self
            .output_file
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
        else {
            return Ok(());
        };
        if parent.exists() {
            return Ok(());
        }
        if !self.create_dir {
            return Err(LoadError::NoStorage {
                reason: format!("Output directory {parent:?} does not exist"),
            });
        }
        std::fs::create_dir_all(parent).map_err(|err| LoadError::NoStorage {
            reason: err.to_string(),
        })
    }

    fn select_columns(&self, table: &DataFrame) -> Result<Option<DataFrame>, LoadError> {
        let Some(columns) = &self.columns else {
            return Ok(None);
        };
        if let Some(missing) = columns
            .iter()
            .find(|name| table.get_column_index(name).is_none())
        {
            return Err(LoadError::MissingColumn(missing.clone()));
        }
        Ok(Some(table.select(columns.clone())?))
    }
}

impl Loadable for CsvFileLoader {
    fn load(&self, table: &mut DataFrame) -> Result<(), LoadError> {
        self.prepare_dir()?;
        let mut selected = self.select_columns(table)?;
        let table = selected.as_mut().unwrap_or(table);

        let file = File::create(&self.output_file).map_err(|err| LoadError::CantStore {
            path: self.output_file.clone(),
            reason: err.to_string(),
        })?;

        let mut writer = CsvWriter::new(file).include_header(true);
        if let Some(separator) = self.separator {
            writer = writer.with_separator(separator as u8);
        }
        writer.finish(table)?;

        info!(
            "Wrote {} rows and {} columns to {:?}",
            table.height(),
            table.width(),
            self.output_file
        );
        Ok(())
    }
}
