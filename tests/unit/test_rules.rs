use fuzion_migrate::core::rules::{RuleEvaluator, RuleOutcome, SKIPPED_ACTIONS};
use fuzion_migrate::core::{Row, SettingsStore};
use serde_json::{json, Value};

fn row(value: Value) -> Row {
    Row::from_value(value).unwrap()
}

#[test]
fn test_empty_content_type_continues_for_any_settings() {
    let stores = [
        SettingsStore::new(),
        SettingsStore::new().with("d7ct_", 1),
        SettingsStore::new().with("d7ct_article", 1),
    ];
    for store in &stores {
        assert_eq!(
            RuleEvaluator::new(store).content_type_inclusion(""),
            RuleOutcome::Continue
        );
    }
}

#[test]
fn test_content_type_key_must_be_truthy() {
    for value in [json!(false), json!(0), json!("0"), json!(""), json!(null)] {
        let store = SettingsStore::new().with("d7ct_article", value.clone());
        assert!(
            RuleEvaluator::new(&store).content_type_inclusion("article").is_skip(),
            "{value} should not enable the content type"
        );
    }
    let store = SettingsStore::new().with("d7ct_article", "1");
    assert_eq!(
        RuleEvaluator::new(&store).content_type_inclusion("article"),
        RuleOutcome::Continue
    );
}

#[test]
fn test_block_module_reason() {
    let store = SettingsStore::new();
    assert_eq!(
        RuleEvaluator::new(&store).block_module_inclusion("menu").skip_reason(),
        Some("blocks from module menu not enabled in settings")
    );
}

#[test]
fn test_view_exclusion_reason_names_the_view() {
    let store = SettingsStore::new().with("d7vv_7_glossary", true);
    assert_eq!(
        RuleEvaluator::new(&store)
            .view_exclusion("7", "glossary")
            .skip_reason(),
        Some("view glossary disabled in settings")
    );
}

#[test]
fn test_action_allowlist() {
    let store = SettingsStore::new();
    let rules = RuleEvaluator::new(&store);
    assert!(rules.action_allowlist("node_export_drupal_action").is_skip());
    assert!(rules.action_allowlist("og_anything").is_skip());
    assert!(rules
        .action_allowlist("views_bulk_operations_modify_action")
        .is_skip());
    assert_eq!(rules.action_allowlist("custom_safe_action"), RuleOutcome::Continue);
    assert_eq!(rules.action_allowlist("node_publish_action"), RuleOutcome::Continue);
    assert_eq!(SKIPPED_ACTIONS.len(), 17);
}

#[test]
fn test_field_inclusion_is_idempotent_on_its_output() {
    let store = SettingsStore::new()
        .with("d7ct_article", 1)
        .with("d7ct_page", 1)
        .with("d7fci_21", 1);
    let rules = RuleEvaluator::new(&store);
    let mut field = row(json!({
        "id": 9,
        "field_name": "body",
        "module": "text",
        "instances": {
            "a": {"id": 20, "bundle": "article", "field_name": "body"},
            "b": {"id": 21, "bundle": "page", "field_name": "body"},
            "c": {"id": 22, "bundle": "", "field_name": "body"},
            "d": {"id": 23, "bundle": "page", "field_name": "body"}
        }
    }));

    let RuleOutcome::Transform(first) = rules.field_inclusion(&field) else {
        panic!("expected surviving instances");
    };
    assert_eq!(first["instances"].as_array().unwrap().len(), 2);
    for (name, value) in first.clone() {
        field.set(name, value);
    }

    let RuleOutcome::Transform(second) = rules.field_inclusion(&field) else {
        panic!("expected surviving instances");
    };
    assert_eq!(first, second);
}

#[test]
fn test_field_instance_binds_first_instance_on_field_rows() {
    let store = SettingsStore::new().with("d7ct_article", 1).with("d7fci_30", 1);
    let rules = RuleEvaluator::new(&store);
    let field = row(json!({
        "id": 3,
        "field_name": "field_image",
        "module": "image",
        "instances": [
            {"id": 30, "bundle": "article", "field_name": "field_image"},
            {"id": 31, "bundle": "article", "field_name": "field_image"}
        ]
    }));
    assert_eq!(
        rules.field_instance_inclusion(&field).skip_reason(),
        Some("field instance field_image (30) disabled in settings")
    );
}

#[test]
fn test_title_default_fill() {
    let store = SettingsStore::new();
    let rules = RuleEvaluator::new(&store);

    assert_eq!(
        rules.title_default_fill(&row(json!({"nid": "42", "title": null}))),
        RuleOutcome::patch("title", json!("Node: 42"))
    );
    assert_eq!(
        rules.title_default_fill(&row(json!({"nid": 8, "title": "0"}))),
        RuleOutcome::patch("title", json!("Node: 8"))
    );
    assert_eq!(
        rules.title_default_fill(&row(json!({"title": ""}))),
        RuleOutcome::Continue
    );
}

#[test]
fn test_always_skip_reason_is_passed_through() {
    let store = SettingsStore::new();
    assert_eq!(
        RuleEvaluator::new(&store).always_skip("broken upstream"),
        RuleOutcome::Skip("broken upstream".to_string())
    );
}
