use crate::extract::error::ExtractionError;
use crate::extract::named_table::NamedTable;

/// A trait for types that can be extracted into a `NamedTable`.
pub trait Extractable: std::fmt::Debug {
    fn extract(&self) -> Result<NamedTable, ExtractionError>;
}
