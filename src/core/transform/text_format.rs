use crate::core::error::RowError;
use crate::core::row::Row;
use crate::core::rules::{Patches, RuleOutcome};
use crate::utils::serialization::BlobCodec;
use serde_json::Value;

const LEGACY_FORMATTER: &str = "default";
const TEXT_FORMATTER: &str = "text_default";

pub(super) fn rewrite(codec: &dyn BlobCodec, row: &Row) -> Result<RuleOutcome, RowError> {
    if row.get("type").and_then(Value::as_str) != Some("text") {
        return Ok(RuleOutcome::Continue);
    }

    let mut patches = Patches::new();

    if let Some(data) = row.get("data") {
        if let Some(rewritten) = rewrite_blob(codec, data, "data")? {
            tracing::info!(
                field = %row.get_string("field_name"),
                "set field default formatter to text_default"
            );
            patches.insert("data".to_string(), rewritten);
        }
    }

    if let Some(instances) = rewrite_instances(codec, row)? {
        patches.insert("instances".to_string(), instances);
    }

    if patches.is_empty() {
        Ok(RuleOutcome::Continue)
    } else {
        Ok(RuleOutcome::Transform(patches))
    }
}

fn rewrite_instances(codec: &dyn BlobCodec, row: &Row) -> Result<Option<Value>, RowError> {
    let mut instances = match row.get("instances") {
        Some(value) if value.is_array() || value.is_object() => value.clone(),
        _ => return Ok(None),
    };

    let mut changed = false;
    let entries: Vec<(String, &mut Value)> = match &mut instances {
        Value::Array(items) => items
            .iter_mut()
            .enumerate()
            .map(|(index, item)| (index.to_string(), item))
            .collect(),
        Value::Object(map) => map.iter_mut().map(|(k, item)| (k.clone(), item)).collect(),
        _ => Vec::new(),
    };
    for (key, instance) in entries {
        let Value::Object(fields) = instance else {
            continue;
        };
        let Some(data) = fields.get("data") else {
            continue;
        };
        let location = format!("instances[{}].data", key);
        if let Some(rewritten) = rewrite_blob(codec, data, &location)? {
            tracing::info!(instance = %key, "set instance default formatter to text_default");
            fields.insert("data".to_string(), rewritten);
            changed = true;
        }
    }

    Ok(changed.then_some(instances))
}

/// Returns the re-encoded blob when the legacy formatter was found.
///
/// Structured (already decoded) data is rewritten in place without the
/// codec. Null and empty strings carry no settings.
fn rewrite_blob(
    codec: &dyn BlobCodec,
    data: &Value,
    location: &str,
) -> Result<Option<Value>, RowError> {
    match data {
        Value::String(blob) if blob.is_empty() => Ok(None),
        Value::String(blob) => {
            let mut decoded = codec.decode(blob).map_err(|e| RowError::BlobFormat {
                field: location.to_string(),
                message: e.to_string(),
            })?;
            if !retarget_formatter(&mut decoded) {
                return Ok(None);
            }
            let encoded = codec.encode(&decoded).map_err(|e| RowError::BlobFormat {
                field: location.to_string(),
                message: e.to_string(),
            })?;
            Ok(Some(Value::String(encoded)))
        }
        Value::Object(_) => {
            let mut structured = data.clone();
            Ok(retarget_formatter(&mut structured).then_some(structured))
        }
        _ => Ok(None),
    }
}

fn retarget_formatter(settings: &mut Value) -> bool {
    match settings.pointer_mut("/display/default/type") {
        Some(kind) if kind.as_str() == Some(LEGACY_FORMATTER) => {
            *kind = Value::String(TEXT_FORMATTER.to_string());
            true
        }
        _ => false,
    }
}
