use fuzion_migrate::core::transform::{destination_key, origin_key, DISALLOWED_EFFECT};
use fuzion_migrate::core::{
    FieldDataTransformer, FileScheme, Row, RowError, RuleOutcome, SettingsStore,
};
use fuzion_migrate::utils::{JsonSerializer, PhpSerializer};
use serde_json::{json, Value};

fn row(value: Value) -> Row {
    Row::from_value(value).unwrap()
}

fn apply(row: &mut Row, outcome: RuleOutcome) {
    if let RuleOutcome::Transform(patches) = outcome {
        for (field, value) in patches {
            row.set(field, value);
        }
    }
}

#[test]
fn test_path_setting_keys() {
    assert_eq!(origin_key(FileScheme::Public), "d7_public_files_url_origin");
    assert_eq!(destination_key(FileScheme::Private), "d7_private_files_url_dest");
}

#[test]
fn test_path_rewrite_replaces_all_occurrences() {
    let store = SettingsStore::new()
        .with("d7_public_files_url_origin", "sites/default/files")
        .with("d7_public_files_url_dest", "sites/new/files");
    let transformer = FieldDataTransformer::new(&store, &PhpSerializer);

    for n in 1..=3 {
        let path = vec!["sites/default/files"; n].join("|");
        let expected = vec!["sites/new/files"; n].join("|");
        let outcome = transformer.path_rewrite(&row(json!({"filepath": path})), FileScheme::Public);
        assert_eq!(outcome, RuleOutcome::patch("filepath", json!(expected)));
    }
}

#[test]
fn test_path_rewrite_without_settings_leaves_row_identical() {
    let store = SettingsStore::new().with("d7_private_files_url_dest", "private://");
    let transformer = FieldDataTransformer::new(&store, &PhpSerializer);
    let original = row(json!({"fid": 4, "filepath": "sites/default/files/private/a.pdf"}));
    let mut working = original.clone();
    apply(
        &mut working,
        transformer.path_rewrite(&original, FileScheme::Private),
    );
    assert_eq!(working, original);
}

#[test]
fn test_image_effect_filter_sequence() {
    let store = SettingsStore::new();
    let transformer = FieldDataTransformer::new(&store, &PhpSerializer);
    let mut style = row(json!({
        "name": "banner",
        "effects": [
            {"name": "image_scale", "weight": 1},
            {"name": DISALLOWED_EFFECT, "weight": 2},
            {"name": "image_desaturate", "weight": 3},
            {"name": DISALLOWED_EFFECT, "weight": 4}
        ]
    }));

    let outcome = transformer.image_effect_filter(&style);
    apply(&mut style, outcome);
    assert_eq!(
        style.get("effects"),
        Some(&json!([
            {"name": "image_scale", "weight": 1},
            {"name": "image_desaturate", "weight": 3}
        ]))
    );

    assert_eq!(transformer.image_effect_filter(&style), RuleOutcome::Continue);
}

#[test]
fn test_text_format_rewrite_with_php_blobs() {
    let legacy = r#"a:2:{s:5:"label";s:5:"above";s:7:"display";a:1:{s:7:"default";a:3:{s:5:"label";s:6:"hidden";s:4:"type";s:7:"default";s:6:"weight";i:0;}}}"#;
    let rewritten = r#"a:2:{s:5:"label";s:5:"above";s:7:"display";a:1:{s:7:"default";a:3:{s:5:"label";s:6:"hidden";s:4:"type";s:12:"text_default";s:6:"weight";i:0;}}}"#;

    let store = SettingsStore::new();
    let transformer = FieldDataTransformer::new(&store, &PhpSerializer);
    let field = row(json!({
        "field_name": "body",
        "type": "text",
        "data": legacy,
        "instances": [{"id": 1, "bundle": "page", "data": legacy}]
    }));

    let RuleOutcome::Transform(patches) = transformer.legacy_text_format_rewrite(&field).unwrap()
    else {
        panic!("expected rewritten blobs");
    };
    assert_eq!(patches["data"], json!(rewritten));
    assert_eq!(patches["instances"][0]["data"], json!(rewritten));
}

#[test]
fn test_text_format_rewrite_leaves_other_formatters() {
    let blob = r#"{"display":{"default":{"type":"text_trimmed"}}}"#;
    let store = SettingsStore::new();
    let transformer = FieldDataTransformer::new(&store, &JsonSerializer);
    let field = row(json!({"type": "text", "data": blob}));
    assert_eq!(
        transformer.legacy_text_format_rewrite(&field).unwrap(),
        RuleOutcome::Continue
    );
}

#[test]
fn test_text_format_rewrite_reports_field_level_decode_failure() {
    let store = SettingsStore::new();
    let transformer = FieldDataTransformer::new(&store, &PhpSerializer);
    let field = row(json!({"type": "text", "data": "O:8:\"stdClass\":0:{}"}));
    let err = transformer.legacy_text_format_rewrite(&field).unwrap_err();
    assert!(matches!(err, RowError::BlobFormat { ref field, .. } if field == "data"));
}
