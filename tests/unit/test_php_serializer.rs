use fuzion_migrate::core::BlobFormat;
use fuzion_migrate::utils::serialization::php::MAX_DEPTH;
use fuzion_migrate::utils::{codec_for, BlobCodec, CodecError, PhpSerializer};
use serde_json::json;

#[test]
fn test_decodes_scalars() {
    let php = PhpSerializer::new();
    assert_eq!(php.decode("N;").unwrap(), json!(null));
    assert_eq!(php.decode("b:1;").unwrap(), json!(true));
    assert_eq!(php.decode("b:0;").unwrap(), json!(false));
    assert_eq!(php.decode("i:-12;").unwrap(), json!(-12));
    assert_eq!(php.decode("d:0.5;").unwrap(), json!(0.5));
    assert_eq!(php.decode(r#"s:0:"";"#).unwrap(), json!(""));
}

#[test]
fn test_string_may_contain_delimiters() {
    let php = PhpSerializer::new();
    let blob = r#"s:10:"a";b:{c}:d";"#;
    assert_eq!(php.decode(blob).unwrap(), json!(r#"a";b:{c}:d"#));
}

#[test]
fn test_field_settings_blob_shape() {
    let blob = r#"a:3:{s:12:"translatable";i:0;s:8:"settings";a:2:{s:14:"allowed_values";a:2:{i:1;s:3:"One";i:2;s:3:"Two";}s:15:"text_processing";b:1;}s:7:"display";a:0:{}}"#;
    let php = PhpSerializer::new();
    let value = php.decode(blob).unwrap();

    assert_eq!(value["translatable"], json!(0));
    assert_eq!(value["settings"]["allowed_values"]["1"], json!("One"));
    assert_eq!(value["settings"]["text_processing"], json!(true));
    assert_eq!(value["display"], json!({}));
    assert_eq!(php.encode(&value).unwrap(), blob);
}

#[test]
fn test_sequences_encode_with_positional_keys() {
    let php = PhpSerializer::new();
    assert_eq!(
        php.encode(&json!(["x", 2])).unwrap(),
        r#"a:2:{i:0;s:1:"x";i:1;i:2;}"#
    );
}

#[test]
fn test_numeric_looking_keys_that_php_keeps_as_strings() {
    let php = PhpSerializer::new();
    let blob = r#"a:2:{s:2:"01";b:1;s:3:"1.5";b:0;}"#;
    let value = php.decode(blob).unwrap();
    assert_eq!(php.encode(&value).unwrap(), blob);
}

#[test]
fn test_errors_carry_offsets() {
    let php = PhpSerializer::new();
    match php.decode(r#"s:10:"short";"#) {
        Err(CodecError::Syntax { offset, .. }) => assert_eq!(offset, 6),
        other => panic!("unexpected result: {other:?}"),
    }
    assert!(matches!(
        php.decode("b:2;"),
        Err(CodecError::Syntax { .. })
    ));
    assert!(matches!(
        php.decode("r:1;"),
        Err(CodecError::Unsupported(_))
    ));
    assert!(php.decode("").is_err());
}

#[test]
fn test_codec_for_php_is_the_default() {
    let codec = codec_for(BlobFormat::default());
    assert_eq!(codec.name(), "php");
    assert_eq!(codec.decode("i:3;").unwrap(), json!(3));
}

fn nested_arrays(levels: usize) -> String {
    format!("{}N;{}", "a:1:{i:0;".repeat(levels), "}".repeat(levels))
}

#[test]
fn test_nesting_up_to_the_limit_decodes() {
    let value = PhpSerializer::new().decode(&nested_arrays(MAX_DEPTH)).unwrap();
    let pointer = "/0".repeat(MAX_DEPTH);
    assert_eq!(value.pointer(&pointer), Some(&json!(null)));
}

#[test]
fn test_nesting_past_the_limit_is_a_syntax_error() {
    let err = PhpSerializer::new()
        .decode(&nested_arrays(MAX_DEPTH + 1))
        .unwrap_err();
    assert!(matches!(err, CodecError::Syntax { .. }));
    assert!(err.to_string().contains("nesting exceeds 128 levels"));
}

#[test]
fn test_very_deep_blob_fails_without_overflowing() {
    let err = PhpSerializer::new()
        .decode(&nested_arrays(200_000))
        .unwrap_err();
    assert!(matches!(err, CodecError::Syntax { .. }));
}
