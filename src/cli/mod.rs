pub mod args;
pub mod commands;

pub use args::{CheckArgs, ExplainArgs, GlobalArgs, ProcessArgs};
use crate::core::ConfigLoader;
use clap::{Parser, Subcommand};
use std::path::Path;
use std::process::ExitCode;

const HELP_TEMPLATE: &str = "\
{name} {version}\n\
{about-with-newline}\n\
USAGE:\n    {usage}\n\
\nOPTIONS:\n{options}\n\
MIGRATION COMMANDS:\n{subcommands}\n\
{after-help}";

#[derive(Parser)]
#[command(name = "fuzion-migrate")]
#[command(version = crate::VERSION)]
#[command(about = "Rule-driven row filter and transformer for Drupal 7 upgrade migrations")]
#[command(help_template = HELP_TEMPLATE)]
#[command(after_long_help = long_help_footer())]
pub struct Args {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    #[command(
        about = "Filter and rewrite a stream of source rows",
        long_about = "Process reads one JSON object per line, runs the rules dispatched for the migration, writes forwarded rows as JSON lines and prints a summary of skips and malformed rows to stderr.",
        after_help = "Example:\n    fuzion-migrate process -m upgrade_d7_node_type -i node_types.jsonl -o kept.jsonl"
    )]
    Process(ProcessArgs),
    #[command(
        about = "Show which rule steps run for a migration",
        long_about = "Explain resolves a migration identity against the registration table and the complete-node prefix rule and lists the ordered steps.",
        after_help = "Example:\n    fuzion-migrate explain -m upgrade_d7_node_complete_article"
    )]
    Explain(ExplainArgs),
    #[command(
        about = "Evaluate a single row",
        long_about = "Check runs one row through the dispatched rules and prints either the forwarded row or the skip reason.",
        after_help = "Example:\n    fuzion-migrate check -m upgrade_d7_block --row '{\"module\":\"system\"}'"
    )]
    Check(CheckArgs),
}

/// Usage notes plus the environment overrides the config loader honours.
fn long_help_footer() -> String {
    let mut footer = String::from(
        "Typical flow: explain a migration to see which rules apply, check a sample row, then process the full export.\n\nENVIRONMENT:\n",
    );
    for doc in ConfigLoader::env_var_documentation() {
        footer.push_str("    ");
        footer.push_str(doc);
        footer.push('\n');
    }
    footer
}

pub fn run(args: Args, workspace: &Path) -> crate::Result<ExitCode> {
    match args.command {
        Command::Process(process_args) => commands::process(&args.global, process_args, workspace),
        Command::Explain(explain_args) => commands::explain(explain_args),
        Command::Check(check_args) => commands::check(&args.global, check_args, workspace),
    }
}
