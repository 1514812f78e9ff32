use crate::core::processor::ReportFormat;
use clap::Args;
use std::path::PathBuf;

#[derive(Args, Debug, Clone, Default)]
pub struct GlobalArgs {
    /// Engine config file (default: ./fuzion-migrate.toml)
    #[arg(long, global = true, value_name = "FILE", help_heading = "Configuration")]
    pub config: Option<PathBuf>,

    /// Settings export to evaluate rules against (overrides settings.file)
    #[arg(long, global = true, value_name = "FILE", help_heading = "Configuration")]
    pub settings: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct ProcessArgs {
    /// Migration identity the rows belong to
    #[arg(long, short = 'm', value_name = "ID")]
    pub migration: String,

    /// JSON-lines input, one row per line ("-" or omitted: stdin)
    #[arg(long, short = 'i', value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Where forwarded rows are written ("-" or omitted: stdout)
    #[arg(long, short = 'o', value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Also write the run summary to this file
    #[arg(long, value_name = "FILE", help_heading = "Reporting")]
    pub report: Option<PathBuf>,

    /// Format of the --report file
    #[arg(long, default_value = "json", value_name = "FORMAT", help_heading = "Reporting")]
    pub report_format: ReportFormat,
}

#[derive(Args, Debug, Clone)]
pub struct ExplainArgs {
    /// Migration identity to resolve
    #[arg(long, short = 'm', value_name = "ID")]
    pub migration: String,

    /// Print the plan as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug, Clone)]
pub struct CheckArgs {
    /// Migration identity the row belongs to
    #[arg(long, short = 'm', value_name = "ID")]
    pub migration: String,

    /// The row as a JSON object
    #[arg(long, value_name = "JSON")]
    pub row: String,
}
