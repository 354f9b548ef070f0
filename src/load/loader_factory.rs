use crate::config::loader_config::LoaderConfig;
use crate::load::csv_file_loader::CsvFileLoader;
use crate::load::traits::Loadable;

pub struct LoaderFactory;

impl LoaderFactory {
    pub fn from_config(config: LoaderConfig) -> Box<dyn Loadable> {
        match config {
            LoaderConfig::CsvFile {
                output_file,
                create_dir,
                separator,
                columns,
            } => Box::new(CsvFileLoader::new(
                output_file,
                create_dir,
                separator,
                columns,
            )),
        }
    }
}
