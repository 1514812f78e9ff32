use fuzion_migrate::core::settings::store::SettingsFormat;
use fuzion_migrate::core::settings::{make_key, ConfigNamespace, ConfigStore, SettingsStore};
use serde_json::json;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_missing_file_gives_empty_store() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("fuzion_migrate.settings.yml");
    let store = SettingsStore::load(&path).unwrap();
    assert!(store.is_empty());
    assert_eq!(store.source(), Some(path.as_path()));
}

#[test]
fn test_loads_each_supported_format() {
    let temp_dir = TempDir::new().unwrap();
    let documents = [
        ("settings.yml", "d7ct_article: true\nd7bm_system: 1\n"),
        ("settings.toml", "d7ct_article = true\nd7bm_system = 1\n"),
        ("settings.json", r#"{"d7ct_article": true, "d7bm_system": 1}"#),
    ];
    for (name, content) in documents {
        let path = temp_dir.path().join(name);
        fs::write(&path, content).unwrap();
        let store = SettingsStore::load(&path).unwrap();
        assert!(
            store.is_set(&make_key(ConfigNamespace::ContentType, "article")),
            "{name}"
        );
        assert!(
            store.is_set(&make_key(ConfigNamespace::BlockModule, "system")),
            "{name}"
        );
        assert_eq!(store.len(), 2, "{name}");
    }
}

#[test]
fn test_unknown_extension_is_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("settings.ini");
    fs::write(&path, "d7ct_article=1").unwrap();
    let err = SettingsStore::load(&path).unwrap_err();
    assert_eq!(err.code, "SETTINGS-001");
}

#[test]
fn test_malformed_yaml_is_a_settings_error() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("settings.yaml");
    fs::write(&path, "d7ct_article: [unclosed\n").unwrap();
    let err = SettingsStore::load(&path).unwrap_err();
    assert_eq!(err.code, "SETTINGS-002");
}

#[test]
fn test_loose_truthiness() {
    let store: SettingsStore = vec![
        ("d7ct_null", json!(null)),
        ("d7ct_false", json!(false)),
        ("d7ct_zero", json!(0)),
        ("d7ct_zero_float", json!(0.0)),
        ("d7ct_empty", json!("")),
        ("d7ct_zero_string", json!("0")),
        ("d7ct_empty_list", json!([])),
        ("d7ct_empty_map", json!({})),
        ("d7ct_one", json!(1)),
        ("d7ct_yes", json!("yes")),
        ("d7ct_false_string", json!("false")),
        ("d7ct_list", json!(["x"])),
    ]
    .into_iter()
    .collect();

    let set: Vec<&str> = store.set_suffixes(ConfigNamespace::ContentType);
    assert_eq!(set, vec!["one", "yes", "false_string", "list"]);
}

#[test]
fn test_namespaces_do_not_overlap() {
    assert_eq!(
        ConfigNamespace::of_key("d7fci_12"),
        Some(ConfigNamespace::FieldInstance)
    );
    assert_eq!(ConfigNamespace::of_key("d7fc_12"), Some(ConfigNamespace::FieldConfig));
    assert_eq!(ConfigNamespace::of_key("d7_public_files_url_origin"), None);
    assert_eq!(make_key(ConfigNamespace::View, "4_frontpage").as_str(), "d7vv_4_frontpage");
}

#[test]
fn test_get_str_treats_non_strings_as_empty_or_text() {
    let store = SettingsStore::parse(
        "d7_public_files_url_origin: 'sites/default/files'\nd7_private_files_url_dest: ~\n",
        SettingsFormat::Yaml,
    )
    .unwrap();
    assert_eq!(store.get_str("d7_public_files_url_origin"), "sites/default/files");
    assert_eq!(store.get_str("d7_private_files_url_dest"), "");
    assert_eq!(store.get_str("absent"), "");
}
