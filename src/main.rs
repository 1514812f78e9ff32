use clap::Parser;
use fuzion_migrate::{cli, logging};
use std::process::ExitCode;

fn main() -> ExitCode {
    let args = cli::Args::parse();

    let workspace = match std::env::current_dir() {
        Ok(dir) => dir,
        Err(err) => {
            eprintln!("error: cannot determine working directory: {}", err);
            return ExitCode::FAILURE;
        }
    };

    let _guard = match logging::init(&args.command, &workspace) {
        Ok(guard) => Some(guard),
        Err(err) => {
            eprintln!("warning: logging disabled: {:#}", err);
            None
        }
    };

    match cli::run(args, &workspace) {
        Ok(code) => code,
        Err(err) => {
            tracing::debug!("command failed: {:?}", err);
            eprintln!("error: {:#}", err);
            ExitCode::FAILURE
        }
    }
}
