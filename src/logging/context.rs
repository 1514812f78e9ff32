use crate::cli::Command;
use std::env;
use std::path::Path;

/// Execution contexts that influence how logging is routed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExecutionContext {
    /// One-off inspection commands (`explain`, `check`).
    Interactive,
    /// `process` streaming rows to stdout; stdout carries data only.
    Pipeline,
    /// Console logging suppressed by `FUZION_MIGRATE_QUIET=1`.
    Quiet,
}

impl ExecutionContext {
    /// Returns `true` when console sinks should be disabled.
    pub fn disables_console(self) -> bool {
        matches!(self, ExecutionContext::Quiet)
    }
}

/// Derive the active execution context from a parsed CLI command plus overrides.
pub fn detect_context(command: &Command) -> ExecutionContext {
    if quiet_override_enabled() {
        return ExecutionContext::Quiet;
    }

    match command {
        Command::Process(args) if writes_to_stdout(args.output.as_deref()) => {
            ExecutionContext::Pipeline
        }
        Command::Process(_) | Command::Explain(_) | Command::Check(_) => {
            ExecutionContext::Interactive
        }
    }
}

fn writes_to_stdout(output: Option<&Path>) -> bool {
    output.map(|path| path == Path::new("-")).unwrap_or(true)
}

fn quiet_override_enabled() -> bool {
    env::var("FUZION_MIGRATE_QUIET")
        .map(|value| value.trim() == "1")
        .unwrap_or(false)
}
