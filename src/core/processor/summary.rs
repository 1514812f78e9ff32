use crate::core::error::{AppError, RowError};
use crate::core::types::ErrorCategory;
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    Text,
    Json,
}

impl std::str::FromStr for ReportFormat {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_lowercase().as_str() {
            "text" => Ok(ReportFormat::Text),
            "json" => Ok(ReportFormat::Json),
            other => Err(format!("unknown report format '{}'", other)),
        }
    }
}

/// A row that could not be evaluated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowFailure {
    /// 1-based input line.
    pub line: usize,
    pub code: String,
    pub message: String,
}

/// Outcome counts for one pass over a migration's rows.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSummary {
    pub run_id: Uuid,
    pub migration: String,
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
    pub rows_read: usize,
    pub forwarded: usize,
    /// Skip reason → number of rows, in first-seen order.
    pub skipped: IndexMap<String, usize>,
    pub format_errors: Vec<RowFailure>,
}

impl RunSummary {
    pub fn new(migration: impl Into<String>) -> Self {
        RunSummary {
            run_id: Uuid::new_v4(),
            migration: migration.into(),
            started_at: Utc::now(),
            finished_at: None,
            rows_read: 0,
            forwarded: 0,
            skipped: IndexMap::new(),
            format_errors: Vec::new(),
        }
    }

    pub fn record_forwarded(&mut self) {
        self.rows_read += 1;
        self.forwarded += 1;
    }

    pub fn record_skip(&mut self, reason: &str) {
        self.rows_read += 1;
        *self.skipped.entry(reason.to_string()).or_insert(0) += 1;
    }

    pub fn record_failure(&mut self, line: usize, error: &RowError) {
        self.rows_read += 1;
        self.format_errors.push(RowFailure {
            line,
            code: error.code().to_string(),
            message: error.to_string(),
        });
    }

    pub fn finish(&mut self) {
        self.finished_at = Some(Utc::now());
    }

    pub fn total_skipped(&self) -> usize {
        self.skipped.values().sum()
    }

    pub fn has_format_errors(&self) -> bool {
        !self.format_errors.is_empty()
    }

    pub fn render(&self, format: ReportFormat) -> Result<String, AppError> {
        match format {
            ReportFormat::Text => Ok(self.render_text()),
            ReportFormat::Json => serde_json::to_string_pretty(self).map_err(|e| {
                AppError::new(
                    ErrorCategory::SerializationError,
                    format!("Failed to generate JSON report: {}", e),
                )
                .with_code("REPORT-JSON-001")
            }),
        }
    }

    fn render_text(&self) -> String {
        let mut report = String::new();
        report.push_str("=== Migration Run Summary ===\n\n");
        report.push_str(&format!("Migration: {}\n", self.migration));
        report.push_str(&format!("Run ID: {}\n", self.run_id));
        if let Some(finished_at) = self.finished_at {
            let duration = finished_at.signed_duration_since(self.started_at);
            report.push_str(&format!("Duration: {} ms\n", duration.num_milliseconds()));
        }
        report.push_str(&format!("Rows read: {}\n", self.rows_read));
        report.push_str(&format!("Forwarded: {}\n", self.forwarded));
        report.push_str(&format!("Skipped: {}\n", self.total_skipped()));
        for (reason, count) in &self.skipped {
            report.push_str(&format!("  {:>5}  {}\n", count, reason));
        }
        report.push_str(&format!("Format errors: {}\n", self.format_errors.len()));
        for failure in &self.format_errors {
            report.push_str(&format!(
                "  line {}: [{}] {}\n",
                failure.line, failure.code, failure.message
            ));
        }
        report
    }
}
