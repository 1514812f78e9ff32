use fuzion_migrate::core::{
    AppError, DefaultErrorReporter, ErrorReporter, MigrationRun, ReportFormat, RowProcessor,
    SettingsStore,
};
use fuzion_migrate::utils::{JsonSerializer, PhpSerializer};
use serde_json::Value;
use std::sync::{Arc, Mutex};

/// Collects reported errors so tests can see what reached a human.
#[derive(Clone, Default)]
struct RecordingReporter {
    errors: Arc<Mutex<Vec<String>>>,
}

impl ErrorReporter for RecordingReporter {
    fn report_error(&self, error: &AppError) {
        self.errors.lock().unwrap().push(error.code.clone());
    }

    fn report_warning(&self, _message: &str, _context: Option<String>) {}

    fn report_info(&self, _message: &str) {}
}

fn output_rows(output: &[u8]) -> Vec<Value> {
    String::from_utf8(output.to_vec())
        .unwrap()
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect()
}

#[test]
fn format_errors_are_row_scoped_and_aggregated() {
    let store = SettingsStore::new().with("d7ct_page", 1);
    let processor = RowProcessor::new(store, Box::new(PhpSerializer));
    let reporter = RecordingReporter::default();
    let run = MigrationRun::new(
        &processor,
        "upgrade_d7_field_formatter_settings",
        Box::new(reporter.clone()),
    );

    let input = [
        r#"{"bundle":"page","type":"text","data":"a:1:{s:4:\"type\";"}"#,
        r#"{"bundle":"page","type":"number_integer","data":"ignored"}"#,
        r#"{"bundle":"blog","type":"text","data":"a:0:{}"}"#,
        r#"{"bundle":"page","type":"text","data":"a:0:{}"}"#,
    ]
    .join("\n");

    let mut output = Vec::new();
    let summary = run.execute(input.as_bytes(), &mut output).unwrap();

    assert_eq!(summary.rows_read, 4);
    assert_eq!(summary.forwarded, 2);
    assert_eq!(summary.total_skipped(), 1);
    assert_eq!(summary.format_errors.len(), 1);
    assert_eq!(summary.format_errors[0].line, 1);
    assert_eq!(summary.format_errors[0].code, "ROW-FORMAT-001");
    assert_eq!(*reporter.errors.lock().unwrap(), vec!["ROW-FORMAT-001".to_string()]);

    let rows = output_rows(&output);
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["type"], "number_integer");
}

#[test]
fn json_blobs_are_rewritten_when_configured() {
    let store = SettingsStore::new().with("d7ct_article", 1);
    let processor = RowProcessor::new(store, Box::new(JsonSerializer));
    let run = MigrationRun::new(
        &processor,
        "upgrade_d7_field_formatter_settings",
        Box::new(DefaultErrorReporter::new()),
    );
    let input = r#"{"bundle":"article","type":"text","data":"{\"display\":{\"default\":{\"type\":\"default\"}}}"}"#;

    let mut output = Vec::new();
    let summary = run.execute(input.as_bytes(), &mut output).unwrap();
    assert!(!summary.has_format_errors());

    let rows = output_rows(&output);
    assert_eq!(
        rows[0]["data"],
        r#"{"display":{"default":{"type":"text_default"}}}"#
    );
}

#[test]
fn forwarded_rows_keep_field_order() {
    let store = SettingsStore::new().with("d7ct_article", 1);
    let processor = RowProcessor::new(store, Box::new(PhpSerializer));
    let run = MigrationRun::new(
        &processor,
        "upgrade_d7_node_complete_article",
        Box::new(DefaultErrorReporter::new()),
    );
    let input = r#"{"nid":5,"vid":9,"title":"","status":1}"#;

    let mut output = Vec::new();
    run.execute(input.as_bytes(), &mut output).unwrap();
    assert_eq!(
        String::from_utf8(output).unwrap(),
        "{\"nid\":5,\"vid\":9,\"title\":\"Node: 5\",\"status\":1}\n"
    );
}

#[test]
fn summary_report_formats() {
    let processor = RowProcessor::new(SettingsStore::new(), Box::new(PhpSerializer));
    let run = MigrationRun::new(
        &processor,
        "upgrade_d7_node_type",
        Box::new(DefaultErrorReporter::new()),
    );
    let input = "{\"type\":\"a\"}\n{\"type\":\"a\"}\n{\"type\":\"b\"}\n";
    let summary = run.execute(input.as_bytes(), Vec::new()).unwrap();

    let text = summary.render(ReportFormat::Text).unwrap();
    assert!(text.contains("Skipped: 3"));
    assert!(text.contains("    2  content type a not enabled in settings"));

    let json: Value = serde_json::from_str(&summary.render(ReportFormat::Json).unwrap()).unwrap();
    assert_eq!(json["skipped"]["content type b not enabled in settings"], 1);
    assert!(json["finished_at"].is_string());
}

#[test]
fn non_utf8_line_fails_only_that_row() {
    let store = SettingsStore::new().with("d7ct_article", 1);
    let processor = RowProcessor::new(store, Box::new(PhpSerializer));
    let reporter = RecordingReporter::default();
    let run = MigrationRun::new(
        &processor,
        "upgrade_d7_node_type",
        Box::new(reporter.clone()),
    );

    let mut input = Vec::new();
    input.extend_from_slice(b"{\"type\":\"article\"}\n");
    input.extend_from_slice(b"{\"type\":\"\xff\xfe\"}\n");
    input.extend_from_slice(b"{\"type\":\"article\"}");

    let mut output = Vec::new();
    let summary = run.execute(&input[..], &mut output).unwrap();

    assert_eq!(summary.rows_read, 3);
    assert_eq!(summary.forwarded, 2);
    assert_eq!(summary.format_errors.len(), 1);
    assert_eq!(summary.format_errors[0].line, 2);
    assert_eq!(summary.format_errors[0].code, "ROW-FORMAT-003");
    assert_eq!(*reporter.errors.lock().unwrap(), vec!["ROW-FORMAT-003".to_string()]);
    assert_eq!(output_rows(&output).len(), 2);
}
