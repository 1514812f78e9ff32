//! Rule evaluation: pure decisions over a row and the read-only settings.
//!
//! Every rule answers with a [`RuleOutcome`]. Rules never touch the row they
//! are given; field changes are requested as patches and applied by the
//! row processor.

use crate::core::row::Row;
use crate::core::settings::{make_key, ConfigNamespace, ConfigStore};
use crate::utils::value::{is_truthy, scalar_to_string};
use indexmap::IndexMap;
use serde_json::Value;

mod action;
mod field;

pub use action::{SKIPPED_ACTIONS, SKIPPED_ACTION_PREFIXES};

/// Field name → replacement value, applied in insertion order.
pub type Patches = IndexMap<String, Value>;

#[derive(Debug, Clone, PartialEq)]
pub enum RuleOutcome {
    Continue,
    Transform(Patches),
    Skip(String),
}

impl RuleOutcome {
    pub fn skip(reason: impl Into<String>) -> Self {
        RuleOutcome::Skip(reason.into())
    }

    pub fn patch(field: impl Into<String>, value: Value) -> Self {
        let mut patches = Patches::new();
        patches.insert(field.into(), value);
        RuleOutcome::Transform(patches)
    }

    pub fn is_skip(&self) -> bool {
        matches!(self, RuleOutcome::Skip(_))
    }

    pub fn skip_reason(&self) -> Option<&str> {
        match self {
            RuleOutcome::Skip(reason) => Some(reason),
            _ => None,
        }
    }
}

/// Inclusion/exclusion rules evaluated against an injected settings store.
pub struct RuleEvaluator<'a> {
    store: &'a dyn ConfigStore,
}

impl<'a> RuleEvaluator<'a> {
    pub fn new(store: &'a dyn ConfigStore) -> Self {
        RuleEvaluator { store }
    }

    fn is_set(&self, namespace: ConfigNamespace, suffix: &str) -> bool {
        self.store.is_set(&make_key(namespace, suffix))
    }

    /// Rows for content types not enabled in settings are skipped. An empty
    /// content type has nothing to check.
    pub fn content_type_inclusion(&self, content_type: &str) -> RuleOutcome {
        if content_type.is_empty() {
            return RuleOutcome::Continue;
        }
        if !self.is_set(ConfigNamespace::ContentType, content_type) {
            return RuleOutcome::skip(format!(
                "content type {} not enabled in settings",
                content_type
            ));
        }
        RuleOutcome::Continue
    }

    pub fn block_module_inclusion(&self, module: &str) -> RuleOutcome {
        if self.is_set(ConfigNamespace::BlockModule, module) {
            RuleOutcome::Continue
        } else {
            RuleOutcome::skip(format!(
                "blocks from module {} not enabled in settings",
                module
            ))
        }
    }

    /// Inverted sense: a set view key excludes the view.
    pub fn view_exclusion(&self, view_id: &str, view_name: &str) -> RuleOutcome {
        let suffix = format!("{}_{}", view_id, view_name);
        if self.is_set(ConfigNamespace::View, &suffix) {
            RuleOutcome::skip(format!("view {} disabled in settings", view_name))
        } else {
            RuleOutcome::Continue
        }
    }

    pub fn action_allowlist(&self, action_id: &str) -> RuleOutcome {
        action::evaluate(action_id)
    }

    pub fn field_inclusion(&self, row: &Row) -> RuleOutcome {
        field::field_inclusion(self, row, &row.get_string("id"))
    }

    pub fn field_instance_inclusion(&self, row: &Row) -> RuleOutcome {
        field::field_instance_inclusion(self, row)
    }

    /// Nodes with an empty title get `Node: <nid>` so the destination does
    /// not reject them. Only applies when both properties exist on the row.
    pub fn title_default_fill(&self, row: &Row) -> RuleOutcome {
        let title_empty = row.get("title").map(|t| !is_truthy(t)).unwrap_or(true);
        if !(title_empty && row.has("nid") && row.has("title")) {
            return RuleOutcome::Continue;
        }
        let nid = row.get("nid").map(scalar_to_string).unwrap_or_default();
        tracing::warn!(
            nid = %nid,
            "missing title on node {}; defaulting to 'Node: {}'",
            nid,
            nid
        );
        RuleOutcome::patch("title", Value::String(format!("Node: {}", nid)))
    }

    /// Unconditional skip for migrations known to be broken.
    pub fn always_skip(&self, reason: &str) -> RuleOutcome {
        RuleOutcome::skip(reason)
    }
}
