pub mod csv_file_loader;
pub use csv_file_loader::CsvFileLoader;
pub mod error;
pub mod loader_factory;
pub mod traits;
