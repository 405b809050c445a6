//! CSV output writer.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::config::CsvSchema;
use crate::core::models::OutputRow;
use crate::error::{Result, SlackpackError};

/// Incremental CSV writer for [`OutputRow`]s.
///
/// # Format
/// - Delimiter: `,`
/// - Columns: `timestamp`, `user`, `channel`, `message` (first column is
///   `time` under [`CsvSchema::Legacy`])
/// - Quoting: only fields that need it (commas, quotes, newlines)
/// - Encoding: UTF-8
///
/// Each row is handed to the underlying writer as soon as it is written, so a
/// failure part-way leaves the rows before it in place.
pub struct CsvExporter<W: Write> {
    writer: csv::Writer<W>,
    schema: CsvSchema,
    rows: usize,
}

impl CsvExporter<File> {
    /// Creates (or truncates) `path` and returns an exporter writing to it.
    pub fn create(path: &Path, schema: CsvSchema) -> Result<Self> {
        let file = File::create(path).map_err(|e| SlackpackError::io(e, path))?;
        Ok(Self::new(file, schema))
    }
}

impl<W: Write> CsvExporter<W> {
    pub fn new(inner: W, schema: CsvSchema) -> Self {
        let writer = csv::WriterBuilder::new()
            .delimiter(b',')
            .has_headers(false)
            .from_writer(inner);
        Self {
            writer,
            schema,
            rows: 0,
        }
    }

    /// Writes the header row for the configured schema.
    pub fn write_header(&mut self) -> Result<()> {
        self.writer.write_record(self.schema.header())?;
        Ok(())
    }

    /// Writes one data row and flushes it through.
    pub fn write_row(&mut self, row: &OutputRow) -> Result<()> {
        self.writer.write_record(row.fields())?;
        self.writer.flush()?;
        self.rows += 1;
        Ok(())
    }

    /// Data rows written so far.
    pub fn rows_written(&self) -> usize {
        self.rows
    }

    /// Flushes and returns the underlying writer.
    pub fn finish(self) -> Result<W> {
        self.writer
            .into_inner()
            .map_err(|e| SlackpackError::from(e.into_error()))
    }
}

/// Renders rows (with header) into a CSV string.
pub fn to_csv(rows: &[OutputRow], schema: CsvSchema) -> Result<String> {
    let mut exporter = CsvExporter::new(Vec::new(), schema);
    exporter.write_header()?;
    for row in rows {
        exporter.write_row(row)?;
    }
    let bytes = exporter.finish()?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Writes rows (with header) to a file, replacing it.
pub fn write_csv(rows: &[OutputRow], path: &Path, schema: CsvSchema) -> Result<()> {
    let mut exporter = CsvExporter::create(path, schema)?;
    exporter.write_header()?;
    for row in rows {
        exporter.write_row(row)?;
    }
    exporter.finish()?;
    Ok(())
}
