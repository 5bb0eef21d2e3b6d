use thiserror::Error;

#[derive(Error, Debug)]
pub enum IngestError {
    #[error("CSV parse failed: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Export is missing required column '{0}'")]
    MissingColumn(String),

    #[error("Export {0} has no header row")]
    EmptyExport(String),
}

pub type Result<T> = std::result::Result<T, IngestError>;
