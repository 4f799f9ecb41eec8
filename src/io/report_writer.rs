use std::{fs::File, io::Write, path::Path};

use thiserror::Error;
use tracing::debug;

use crate::report::Report;

#[derive(Debug, Error)]
pub enum ReportWriterError {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),
}

/// Writes a [`Report`] as CSV: CRLF record terminators, fields quoted only where necessary.
pub struct ReportWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl ReportWriter<File> {
    pub fn create(path: &Path) -> Result<Self, ReportWriterError> {
        debug!("Write report to {path:?}");
        Ok(Self::new(File::create(path)?))
    }
}

impl<W: Write> ReportWriter<W> {
    pub fn new(inner: W) -> Self {
        let writer = csv::WriterBuilder::new()
            .terminator(csv::Terminator::CRLF)
            .quote_style(csv::QuoteStyle::Necessary)
            .from_writer(inner);
        Self { writer }
    }

    pub fn write_report(&mut self, report: &Report) -> Result<(), ReportWriterError> {
        self.writer.write_record(&report.header)?;
        for row in &report.rows {
            self.writer.write_record(row)?;
        }
        Ok(())
    }

    pub fn finish(mut self) -> Result<(), ReportWriterError> {
        self.writer.flush()?;
        Ok(())
    }
}

/// Writes `report` to a freshly created file at `path`.
pub fn write_report_file(path: &Path, report: &Report) -> Result<(), ReportWriterError> {
    let mut writer = ReportWriter::create(path)?;
    writer.write_report(report)?;
    writer.finish()
}
