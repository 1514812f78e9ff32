pub mod config;
pub mod dispatch;
pub mod error;
pub mod processor;
pub mod row;
pub mod rules;
pub mod settings;
pub mod transform;
pub mod types;

pub use config::{ConfigLoader, ConfigValidator, MigrateConfig};
pub use dispatch::{ContentTypeSource, DispatchPlan, MatchKind, MigrationDispatcher, RuleStep};
pub use error::{AppError, DefaultErrorReporter, ErrorReporter, RowError};
pub use processor::{
    MigrationRun, ReportFormat, RowDisposition, RowFailure, RowProcessor, RunSummary, SkipSignal,
};
pub use row::{FieldInstanceRecord, Row};
pub use rules::{Patches, RuleEvaluator, RuleOutcome};
pub use settings::{make_key, ConfigKey, ConfigNamespace, ConfigStore, SettingsStore};
pub use transform::FieldDataTransformer;
pub use types::*;
