//! Migration identity → ordered rule steps.
//!
//! An exact-match registration table, consulted first, plus the single
//! `upgrade_d7_node_complete_<content type>` prefix rule. Identities that
//! match neither get an empty plan and pass through untouched.

use crate::core::types::FileScheme;
use indexmap::IndexMap;
use serde::Serialize;
use std::fmt;

/// Prefix of the per-content-type complete-node migrations.
pub const NODE_COMPLETE_PREFIX: &str = "upgrade_d7_node_complete_";

/// Migration whose output is known to be broken upstream.
pub const BROKEN_MAIL_SYSTEM_MIGRATION: &str = "upgrade_mail_system_settings";

/// Where a content-type check reads its content type from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentTypeSource {
    /// A row field, e.g. `type` or `bundle`.
    Field(String),
    /// A fixed value, e.g. the suffix of a prefix-matched identity.
    Fixed(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleStep {
    AlwaysSkip(String),
    ContentTypeInclusion(ContentTypeSource),
    FieldInclusion,
    FieldInstanceInclusion,
    /// Reads the action id from `aid`.
    ActionAllowlist,
    /// Reads the module from `module`.
    BlockModuleInclusion,
    /// Reads `vid` and `name`.
    ViewExclusion,
    TitleDefaultFill,
    PathRewrite(FileScheme),
    ImageEffectFilter,
    LegacyTextFormatRewrite,
}

impl RuleStep {
    pub fn content_type_field(field: &str) -> Self {
        RuleStep::ContentTypeInclusion(ContentTypeSource::Field(field.to_string()))
    }
}

impl fmt::Display for RuleStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuleStep::AlwaysSkip(_) => write!(f, "always-skip"),
            RuleStep::ContentTypeInclusion(ContentTypeSource::Field(field)) => {
                write!(f, "content-type-inclusion(row.{})", field)
            }
            RuleStep::ContentTypeInclusion(ContentTypeSource::Fixed(value)) => {
                write!(f, "content-type-inclusion(\"{}\")", value)
            }
            RuleStep::FieldInclusion => write!(f, "field-inclusion"),
            RuleStep::FieldInstanceInclusion => write!(f, "field-instance-inclusion"),
            RuleStep::ActionAllowlist => write!(f, "action-allowlist(row.aid)"),
            RuleStep::BlockModuleInclusion => write!(f, "block-module-inclusion(row.module)"),
            RuleStep::ViewExclusion => write!(f, "view-exclusion(row.vid, row.name)"),
            RuleStep::TitleDefaultFill => write!(f, "title-default-fill"),
            RuleStep::PathRewrite(scheme) => write!(f, "path-rewrite({})", scheme),
            RuleStep::ImageEffectFilter => write!(f, "image-effect-filter"),
            RuleStep::LegacyTextFormatRewrite => write!(f, "legacy-text-format-rewrite"),
        }
    }
}

/// How an identity was resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchKind {
    Exact,
    Prefix,
    None,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DispatchPlan {
    pub identity: String,
    pub matched: MatchKind,
    pub steps: Vec<RuleStep>,
}

#[derive(Debug, Clone)]
pub struct MigrationDispatcher {
    exact: IndexMap<String, Vec<RuleStep>>,
}

impl MigrationDispatcher {
    /// Dispatcher preloaded with the upgrade migrations this engine knows.
    pub fn new() -> Self {
        let mut dispatcher = Self::empty();
        for (identity, steps) in built_in_table() {
            dispatcher.register(identity, steps);
        }
        dispatcher
    }

    /// Dispatcher with an empty exact table; the prefix rule still applies.
    pub fn empty() -> Self {
        MigrationDispatcher {
            exact: IndexMap::new(),
        }
    }

    /// Register (or replace) the steps for one identity.
    pub fn register(
        &mut self,
        identity: impl Into<String>,
        steps: Vec<RuleStep>,
    ) -> Option<Vec<RuleStep>> {
        self.exact.insert(identity.into(), steps)
    }

    pub fn identities(&self) -> impl Iterator<Item = &str> {
        self.exact.keys().map(String::as_str)
    }

    pub fn dispatch(&self, identity: &str) -> DispatchPlan {
        if let Some(steps) = self.exact.get(identity) {
            return DispatchPlan {
                identity: identity.to_string(),
                matched: MatchKind::Exact,
                steps: steps.clone(),
            };
        }
        if let Some(content_type) = identity.strip_prefix(NODE_COMPLETE_PREFIX) {
            return DispatchPlan {
                identity: identity.to_string(),
                matched: MatchKind::Prefix,
                steps: vec![
                    RuleStep::TitleDefaultFill,
                    RuleStep::ContentTypeInclusion(ContentTypeSource::Fixed(
                        content_type.to_string(),
                    )),
                ],
            };
        }
        DispatchPlan {
            identity: identity.to_string(),
            matched: MatchKind::None,
            steps: Vec::new(),
        }
    }
}

impl Default for MigrationDispatcher {
    fn default() -> Self {
        Self::new()
    }
}

fn built_in_table() -> Vec<(&'static str, Vec<RuleStep>)> {
    vec![
        (
            BROKEN_MAIL_SYSTEM_MIGRATION,
            vec![RuleStep::AlwaysSkip(
                "migration is known to be broken and is never run".to_string(),
            )],
        ),
        ("upgrade_d7_image_styles", vec![RuleStep::ImageEffectFilter]),
        ("upgrade_d7_node_type", vec![RuleStep::content_type_field("type")]),
        ("upgrade_d7_field", vec![RuleStep::FieldInclusion]),
        (
            "upgrade_d7_field_instance",
            vec![
                RuleStep::content_type_field("bundle"),
                RuleStep::FieldInstanceInclusion,
            ],
        ),
        ("upgrade_d7_comment_type", vec![RuleStep::content_type_field("type")]),
        ("upgrade_d7_comment_field", vec![RuleStep::content_type_field("type")]),
        (
            "upgrade_d7_comment_field_instance",
            vec![RuleStep::content_type_field("type")],
        ),
        (
            "upgrade_d7_comment_entity_display",
            vec![RuleStep::content_type_field("type")],
        ),
        (
            "upgrade_d7_comment_entity_form_display",
            vec![RuleStep::content_type_field("type")],
        ),
        (
            "upgrade_d7_comment_entity_form_display_subject",
            vec![RuleStep::content_type_field("type")],
        ),
        (
            "upgrade_d7_field_formatter_settings",
            vec![
                RuleStep::content_type_field("bundle"),
                RuleStep::LegacyTextFormatRewrite,
            ],
        ),
        ("upgrade_d7_action", vec![RuleStep::ActionAllowlist]),
        ("upgrade_d7_block", vec![RuleStep::BlockModuleInclusion]),
        ("upgrade_d7_file", vec![RuleStep::PathRewrite(FileScheme::Public)]),
        (
            "upgrade_d7_file_private",
            vec![RuleStep::PathRewrite(FileScheme::Private)],
        ),
        (
            "upgrade_d7_comment",
            vec![RuleStep::content_type_field("node_type")],
        ),
        ("upgrade_d7_views_migration", vec![RuleStep::ViewExclusion]),
    ]
}
