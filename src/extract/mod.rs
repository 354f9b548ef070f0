pub mod csv_data_source;
pub use csv_data_source::CsvDataSource;
pub mod error;
pub mod named_table;
pub use named_table::NamedTable;
pub mod traits;
