//! Narrow, migration-specific rewrites of field data.
//!
//! Like the rules, transforms only *request* changes: they return a
//! [`RuleOutcome::Transform`] carrying the new field values, or `Continue`
//! when the row needs nothing.

use crate::core::error::RowError;
use crate::core::row::Row;
use crate::core::rules::RuleOutcome;
use crate::core::settings::ConfigStore;
use crate::core::types::FileScheme;
use crate::utils::serialization::BlobCodec;

mod effects;
mod paths;
mod text_format;

pub use effects::DISALLOWED_EFFECT;
pub use paths::{destination_key, origin_key};

pub struct FieldDataTransformer<'a> {
    store: &'a dyn ConfigStore,
    codec: &'a dyn BlobCodec,
}

impl<'a> FieldDataTransformer<'a> {
    pub fn new(store: &'a dyn ConfigStore, codec: &'a dyn BlobCodec) -> Self {
        FieldDataTransformer { store, codec }
    }

    /// Swap the configured origin prefix for the destination one in
    /// `filepath`. Needs both settings; otherwise the row is left alone.
    pub fn path_rewrite(&self, row: &Row, scheme: FileScheme) -> RuleOutcome {
        paths::rewrite(self.store, row, scheme)
    }

    pub fn image_effect_filter(&self, row: &Row) -> RuleOutcome {
        effects::filter(row)
    }

    /// Point legacy `default` text formatters at `text_default`, in the
    /// field's own settings blob and in each instance's.
    pub fn legacy_text_format_rewrite(&self, row: &Row) -> Result<RuleOutcome, RowError> {
        text_format::rewrite(self.codec, row)
    }
}
