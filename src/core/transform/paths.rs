use crate::core::row::Row;
use crate::core::rules::RuleOutcome;
use crate::core::settings::ConfigStore;
use crate::core::types::FileScheme;
use serde_json::Value;

pub fn origin_key(scheme: FileScheme) -> String {
    format!("d7_{}_files_url_origin", scheme)
}

pub fn destination_key(scheme: FileScheme) -> String {
    format!("d7_{}_files_url_dest", scheme)
}

/// Literal, case-sensitive replace-all in one left-to-right pass. Text
/// produced by a replacement is never rescanned.
pub(super) fn rewrite(store: &dyn ConfigStore, row: &Row, scheme: FileScheme) -> RuleOutcome {
    let origin_key = origin_key(scheme);
    let destination_key = destination_key(scheme);
    let origin = store.get_str(&origin_key);
    let destination = store.get_str(&destination_key);
    if origin.is_empty() || destination.is_empty() {
        return RuleOutcome::Continue;
    }
    if !row.has("filepath") {
        return RuleOutcome::Continue;
    }

    let filepath = row.get_string("filepath");
    let rewritten = filepath.replace(origin, destination);
    if rewritten == filepath {
        return RuleOutcome::Continue;
    }
    tracing::trace!(scheme = %scheme, from = %filepath, to = %rewritten, "rewrote file path");
    RuleOutcome::patch("filepath", Value::String(rewritten))
}
