//! JSON-lines driver over a [`RowProcessor`].

use super::summary::RunSummary;
use super::{RowDisposition, RowProcessor};
use crate::core::error::{AppError, ErrorReporter, RowError};
use crate::core::row::Row;
use crate::core::types::ErrorCategory;
use std::io::{BufRead, Write};

pub struct MigrationRun<'a> {
    processor: &'a RowProcessor,
    identity: String,
    reporter: Box<dyn ErrorReporter>,
}

impl<'a> MigrationRun<'a> {
    pub fn new(
        processor: &'a RowProcessor,
        identity: impl Into<String>,
        reporter: Box<dyn ErrorReporter>,
    ) -> Self {
        MigrationRun {
            processor,
            identity: identity.into(),
            reporter,
        }
    }

    /// Read one JSON object per line, write each forwarded row as one line.
    ///
    /// Blank lines are ignored. Row failures, including lines that are not
    /// UTF-8, are recorded and the run goes on; only I/O on the reader or
    /// writer aborts it.
    pub fn execute<R: BufRead, W: Write>(
        &self,
        mut reader: R,
        mut writer: W,
    ) -> Result<RunSummary, AppError> {
        let mut summary = RunSummary::new(self.identity.clone());
        tracing::info!(
            migration = %self.identity,
            codec = self.processor.codec_name(),
            "starting run"
        );

        let mut buffer = Vec::new();
        let mut line_number = 0;
        loop {
            buffer.clear();
            let read = reader.read_until(b'\n', &mut buffer).map_err(|e| {
                AppError::from(e).with_context(format!("reading input line {}", line_number + 1))
            })?;
            if read == 0 {
                break;
            }
            line_number += 1;
            if buffer.iter().all(u8::is_ascii_whitespace) {
                continue;
            }

            match self.evaluate_line(&buffer) {
                Ok(RowDisposition::Forwarded(row)) => {
                    write_row(&mut writer, &row)?;
                    summary.record_forwarded();
                }
                Ok(RowDisposition::Skipped(signal)) => {
                    tracing::debug!(line = line_number, "{}", signal);
                    summary.record_skip(&signal.reason);
                }
                Err(error) => {
                    summary.record_failure(line_number, &error);
                    let mut app_error = AppError::from(error);
                    app_error.add_context("line", &line_number.to_string());
                    app_error.add_context("migration", &self.identity);
                    self.reporter.report_error(&app_error);
                }
            }
        }

        writer.flush().map_err(AppError::from)?;
        summary.finish();
        tracing::info!(
            migration = %self.identity,
            forwarded = summary.forwarded,
            skipped = summary.total_skipped(),
            format_errors = summary.format_errors.len(),
            "run finished"
        );
        Ok(summary)
    }

    fn evaluate_line(&self, line: &[u8]) -> Result<RowDisposition, RowError> {
        let line = std::str::from_utf8(line).map_err(|e| RowError::Unparseable {
            message: e.to_string(),
        })?;
        let value: serde_json::Value =
            serde_json::from_str(line).map_err(|e| RowError::Unparseable {
                message: e.to_string(),
            })?;
        let row = Row::from_value(value)?;
        self.processor.process(&self.identity, row)
    }
}

fn write_row<W: Write>(writer: &mut W, row: &Row) -> Result<(), AppError> {
    serde_json::to_writer(&mut *writer, row).map_err(|e| {
        AppError::new(
            ErrorCategory::SerializationError,
            format!("Failed to write row: {}", e),
        )
        .with_code("RUN-OUTPUT-001")
    })?;
    writer.write_all(b"\n").map_err(AppError::from)
}
