use super::RuleOutcome;

/// Legacy action plugins with no destination equivalent.
pub const SKIPPED_ACTIONS: [&str; 17] = [
    "user_block_ip_action",
    "node_export_drupal_action",
    "pathauto_file_update_action",
    "pathauto_user_update_action",
    "pathauto_taxonomy_term_update_action",
    "pathauto_node_update_action",
    "node_gallery_set_as_cover_action",
    "imagecache_generate_all_action",
    "imagecache_flush_action",
    "messaging_debug_block_msg",
    "messaging_debug_devlog_msg",
    "messaging_debug_watchdog_msg",
    "backup_migrate_backup_action",
    "node_export_dsv_action",
    "node_export_json_action",
    "node_export_serialize_action",
    "node_export_xml_action",
];

/// Action id prefixes skipped wholesale, with the reason reported for each.
pub const SKIPPED_ACTION_PREFIXES: [(&str, &str); 2] = [
    ("og_", "Organic group prefix"),
    ("views_bulk_operations_", "Views Bulk Operations"),
];

pub(super) fn evaluate(action_id: &str) -> RuleOutcome {
    if SKIPPED_ACTIONS.iter().any(|skipped| *skipped == action_id) {
        return RuleOutcome::skip(format!("action plugin {} on skip list", action_id));
    }
    for (prefix, reason) in SKIPPED_ACTION_PREFIXES {
        if action_id.starts_with(prefix) {
            return RuleOutcome::skip(format!("action plugin {} skipped: {}", action_id, reason));
        }
    }
    RuleOutcome::Continue
}
