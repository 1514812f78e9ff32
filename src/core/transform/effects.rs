use crate::core::row::Row;
use crate::core::rules::RuleOutcome;
use serde_json::Value;

/// Image effect with no destination plugin.
pub const DISALLOWED_EFFECT: &str = "canvasactions_definecanvas";

fn allowed(effect: &Value) -> bool {
    effect.get("name").and_then(Value::as_str) != Some(DISALLOWED_EFFECT)
}

/// Drop disallowed effects. Sequences stay sequences and keyed mappings keep
/// their surviving keys; relative order is preserved either way.
pub(super) fn filter(row: &Row) -> RuleOutcome {
    let filtered = match row.get("effects") {
        Some(Value::Array(effects)) => {
            let kept: Vec<Value> = effects.iter().filter(|e| allowed(e)).cloned().collect();
            if kept.len() == effects.len() {
                return RuleOutcome::Continue;
            }
            Value::Array(kept)
        }
        Some(Value::Object(effects)) => {
            let kept: serde_json::Map<String, Value> = effects
                .iter()
                .filter(|(_, e)| allowed(e))
                .map(|(k, e)| (k.clone(), e.clone()))
                .collect();
            if kept.len() == effects.len() {
                return RuleOutcome::Continue;
            }
            Value::Object(kept)
        }
        _ => return RuleOutcome::Continue,
    };
    RuleOutcome::patch("effects", filtered)
}
