use crate::error::{IngestError, Result};
use crate::row::{RawRow, columns};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Called with the running row count while an export is read.
pub type ProgressCallback = Arc<dyn Fn(usize) + Send + Sync>;

const BOM: char = '\u{feff}';

pub struct ExportReader {
    delimiter: u8,
    required_columns: Vec<String>,
    skip_blank_rows: bool,
    progress_callback: Option<ProgressCallback>,
}

impl ExportReader {
    pub fn new() -> Self {
        Self {
            delimiter: b',',
            required_columns: vec![columns::URL.to_string()],
            skip_blank_rows: true,
            progress_callback: None,
        }
    }

    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn with_required_columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.required_columns = columns.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_skip_blank_rows(mut self, skip: bool) -> Self {
        self.skip_blank_rows = skip;
        self
    }

    pub fn with_progress_callback(mut self, callback: ProgressCallback) -> Self {
        self.progress_callback = Some(callback);
        self
    }

    /// Read an export from disk.
    pub fn read_path(&self, path: &Path) -> Result<Vec<RawRow>> {
        info!("Reading crawl export {}", path.display());
        let file = File::open(path)?;
        self.read_from(file, &path.display().to_string())
    }

    /// Read an export already held in memory.
    pub fn read_str(&self, content: &str) -> Result<Vec<RawRow>> {
        self.read_from(content.as_bytes(), "<memory>")
    }

    pub fn read_from<R: Read>(&self, source: R, source_name: &str) -> Result<Vec<RawRow>> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(self.delimiter)
            .has_headers(true)
            .flexible(true)
            .from_reader(source);

        let headers: Vec<String> = reader
            .byte_headers()?
            .iter()
            .map(|h| String::from_utf8_lossy(h).trim_start_matches(BOM).trim().to_string())
            .collect();

        if headers.iter().all(|h| h.is_empty()) {
            return Err(IngestError::EmptyExport(source_name.to_string()));
        }

        for required in &self.required_columns {
            if !headers.iter().any(|h| h == required) {
                return Err(IngestError::MissingColumn(required.clone()));
            }
        }

        debug!("Export columns: {:?}", headers);

        let mut rows = Vec::new();
        let mut skipped = 0usize;

        // Cells that are not valid UTF-8 (Windows-1252 exports) decode lossily
        for record in reader.byte_records() {
            let record = record?;
            let line = record.position().map(|p| p.line()).unwrap_or(0);

            let mut row = RawRow::new(line);
            // Short rows simply lack the trailing columns
            for (header, value) in headers.iter().zip(record.iter()) {
                if !header.is_empty() {
                    row.insert(header.clone(), String::from_utf8_lossy(value));
                }
            }

            if self.skip_blank_rows && row.is_blank() {
                skipped += 1;
                continue;
            }

            rows.push(row);

            if let Some(ref callback) = self.progress_callback {
                callback(rows.len());
            }
        }

        if skipped > 0 {
            warn!("Skipped {} blank rows in {}", skipped, source_name);
        }
        info!("Read {} rows from {}", rows.len(), source_name);

        Ok(rows)
    }
}

impl Default for ExportReader {
    fn default() -> Self {
        Self::new()
    }
}
