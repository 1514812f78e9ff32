//! Per-row orchestration: dispatch, evaluate, patch, forward or skip.

use crate::core::dispatch::{ContentTypeSource, MigrationDispatcher, RuleStep};
use crate::core::error::RowError;
use crate::core::row::Row;
use crate::core::rules::{RuleEvaluator, RuleOutcome};
use crate::core::settings::ConfigStore;
use crate::core::transform::FieldDataTransformer;
use crate::utils::serialization::BlobCodec;
use serde::Serialize;
use std::fmt;

pub mod run;
pub mod summary;

pub use run::MigrationRun;
pub use summary::{ReportFormat, RowFailure, RunSummary};

/// A row the migration should not import. Normal control flow, not an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkipSignal {
    pub migration: String,
    pub step: String,
    pub reason: String,
}

impl fmt::Display for SkipSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.migration, self.reason)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum RowDisposition {
    Forwarded(Row),
    Skipped(SkipSignal),
}

impl RowDisposition {
    pub fn is_skipped(&self) -> bool {
        matches!(self, RowDisposition::Skipped(_))
    }

    pub fn row(&self) -> Option<&Row> {
        match self {
            RowDisposition::Forwarded(row) => Some(row),
            RowDisposition::Skipped(_) => None,
        }
    }

    pub fn skip(&self) -> Option<&SkipSignal> {
        match self {
            RowDisposition::Skipped(signal) => Some(signal),
            RowDisposition::Forwarded(_) => None,
        }
    }
}

/// Holds the read-only settings and the blob codec; keeps no per-row state,
/// so one processor can be shared across threads.
pub struct RowProcessor {
    store: Box<dyn ConfigStore>,
    codec: Box<dyn BlobCodec>,
    dispatcher: MigrationDispatcher,
}

impl RowProcessor {
    pub fn new(store: impl ConfigStore + 'static, codec: Box<dyn BlobCodec>) -> Self {
        RowProcessor {
            store: Box::new(store),
            codec,
            dispatcher: MigrationDispatcher::new(),
        }
    }

    pub fn with_dispatcher(mut self, dispatcher: MigrationDispatcher) -> Self {
        self.dispatcher = dispatcher;
        self
    }

    pub fn dispatcher(&self) -> &MigrationDispatcher {
        &self.dispatcher
    }

    pub fn codec_name(&self) -> &'static str {
        self.codec.name()
    }

    /// Run every step dispatched for `identity` against `row`.
    ///
    /// Patches from earlier steps are visible to later ones. The first skip
    /// ends evaluation. A blob that cannot be decoded fails the row.
    pub fn process(&self, identity: &str, row: Row) -> Result<RowDisposition, RowError> {
        let plan = self.dispatcher.dispatch(identity);
        let rules = RuleEvaluator::new(self.store.as_ref());
        let transformer = FieldDataTransformer::new(self.store.as_ref(), self.codec.as_ref());

        let mut working = row;
        for step in &plan.steps {
            match evaluate_step(step, &rules, &transformer, &working)? {
                RuleOutcome::Continue => {}
                RuleOutcome::Transform(patches) => {
                    for (field, value) in patches {
                        working.set(field, value);
                    }
                }
                RuleOutcome::Skip(reason) => {
                    tracing::debug!(
                        migration = %identity,
                        step = %step,
                        "skipping row: {}",
                        reason
                    );
                    return Ok(RowDisposition::Skipped(SkipSignal {
                        migration: identity.to_string(),
                        step: step.to_string(),
                        reason,
                    }));
                }
            }
        }
        Ok(RowDisposition::Forwarded(working))
    }
}

fn evaluate_step(
    step: &RuleStep,
    rules: &RuleEvaluator<'_>,
    transformer: &FieldDataTransformer<'_>,
    row: &Row,
) -> Result<RuleOutcome, RowError> {
    let outcome = match step {
        RuleStep::AlwaysSkip(reason) => rules.always_skip(reason),
        RuleStep::ContentTypeInclusion(ContentTypeSource::Field(field)) => {
            rules.content_type_inclusion(&row.get_string(field))
        }
        RuleStep::ContentTypeInclusion(ContentTypeSource::Fixed(content_type)) => {
            rules.content_type_inclusion(content_type)
        }
        RuleStep::FieldInclusion => rules.field_inclusion(row),
        RuleStep::FieldInstanceInclusion => rules.field_instance_inclusion(row),
        RuleStep::ActionAllowlist => rules.action_allowlist(&row.get_string("aid")),
        RuleStep::BlockModuleInclusion => rules.block_module_inclusion(&row.get_string("module")),
        RuleStep::ViewExclusion => {
            rules.view_exclusion(&row.get_string("vid"), &row.get_string("name"))
        }
        RuleStep::TitleDefaultFill => rules.title_default_fill(row),
        RuleStep::PathRewrite(scheme) => transformer.path_rewrite(row, *scheme),
        RuleStep::ImageEffectFilter => transformer.image_effect_filter(row),
        RuleStep::LegacyTextFormatRewrite => transformer.legacy_text_format_rewrite(row)?,
    };
    Ok(outcome)
}
