pub mod error;
pub mod reader;
pub mod row;

pub use error::IngestError;
pub use reader::ExportReader;
pub use row::RawRow;
