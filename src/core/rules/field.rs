use super::{RuleEvaluator, RuleOutcome};
use crate::core::row::{FieldInstanceRecord, Row};
use crate::core::settings::ConfigNamespace;
use serde_json::Value;

/// Field-level check followed by per-instance filtering.
///
/// Module/field disablement short-circuits before any bundle filtering.
/// Survivors replace the row's `instances` as a plain sequence.
pub(super) fn field_inclusion(
    rules: &RuleEvaluator<'_>,
    row: &Row,
    field_config_id: &str,
) -> RuleOutcome {
    let instances = row.instances();
    let field_name = describe_field(row, &instances);

    let module = row.get_string("module");
    if rules.is_set(ConfigNamespace::FieldModule, &module)
        || rules.is_set(ConfigNamespace::FieldConfig, field_config_id)
    {
        return RuleOutcome::skip(format!("field {} disabled in settings", field_name));
    }

    let kept: Vec<Value> = instances
        .into_iter()
        .filter(|raw| keep_instance(rules, FieldInstanceRecord::new(raw)))
        .cloned()
        .collect();

    if kept.is_empty() {
        return RuleOutcome::skip(format!(
            "field {} has no content types using it",
            field_name
        ));
    }
    RuleOutcome::patch("instances", Value::Array(kept))
}

/// Instance-level disablement, then the owning field's rules.
///
/// The instance is taken from the row itself when the row is an instance
/// row (it carries `bundle` and `field_name`), otherwise from the first
/// element of `instances`.
pub(super) fn field_instance_inclusion(rules: &RuleEvaluator<'_>, row: &Row) -> RuleOutcome {
    let is_instance_row = row.has("bundle") && row.has("field_name");
    let instance_id = if is_instance_row {
        row.get_string("id")
    } else {
        row.instances()
            .first()
            .map(|raw| FieldInstanceRecord::new(raw).id())
            .unwrap_or_default()
    };

    if !instance_id.is_empty() && rules.is_set(ConfigNamespace::FieldInstance, &instance_id) {
        let name = describe_field(row, &row.instances());
        return RuleOutcome::skip(format!(
            "field instance {} ({}) disabled in settings",
            name, instance_id
        ));
    }

    // An instance row's own `id` names the instance; its field config is `field_id`.
    let field_config_id = if is_instance_row && row.has("field_id") {
        row.get_string("field_id")
    } else {
        row.get_string("id")
    };
    field_inclusion(rules, row, &field_config_id)
}

fn keep_instance(rules: &RuleEvaluator<'_>, instance: FieldInstanceRecord<'_>) -> bool {
    let Some(bundle) = instance.bundle() else {
        tracing::debug!(instance = %instance.id(), "dropping field instance without a bundle");
        return false;
    };
    if !rules.is_set(ConfigNamespace::ContentType, &bundle) {
        return false;
    }
    let id = instance.id();
    if rules.is_set(ConfigNamespace::FieldInstance, &id) {
        tracing::debug!(instance = %id, bundle = %bundle, "field instance disabled in settings");
        return false;
    }
    true
}

/// Human-readable field name for skip reasons.
fn describe_field(row: &Row, instances: &[&Value]) -> String {
    instances
        .first()
        .and_then(|raw| FieldInstanceRecord::new(raw).field_name())
        .or_else(|| {
            let name = row.get_string("field_name");
            (!name.is_empty()).then_some(name)
        })
        .unwrap_or_else(|| format!("#{}", row.get_string("id")))
}
