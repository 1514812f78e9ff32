use crate::{
    cli::args::{CheckArgs, ExplainArgs, GlobalArgs, ProcessArgs},
    core::{
        ConfigLoader, ConfigNamespace, DefaultErrorReporter, MigrateConfig, MigrationDispatcher,
        MigrationRun, ReportFormat, Row, RowDisposition, RowProcessor, SettingsStore,
    },
    utils::{codec_for, FileSerializer, FileUtils, JsonSerializer},
    Result,
};
use anyhow::Context;
use std::{
    fs::File,
    io::{self, BufRead, BufReader, BufWriter, Write},
    path::{Path, PathBuf},
    process::ExitCode,
};

/// Exit status when rows failed on malformed data and the config says to fail.
const FORMAT_ERROR_EXIT: u8 = 2;

/// Resolve config and settings for the workspace and build the processor.
fn build_processor(global: &GlobalArgs, workspace: &Path) -> Result<(MigrateConfig, RowProcessor)> {
    let config = match &global.config {
        Some(path) => ConfigLoader::load(&resolve(workspace, path))?,
        None => ConfigLoader::load_from_workspace(workspace)?,
    };

    let settings_path = resolve(
        workspace,
        global.settings.as_deref().unwrap_or(&config.settings.file),
    );
    let store = SettingsStore::load(&settings_path)?;
    tracing::debug!(
        settings = %settings_path.display(),
        keys = store.len(),
        content_types = ?store.set_suffixes(ConfigNamespace::ContentType),
        blob_format = ?config.engine.blob_format,
        "loaded settings"
    );

    let processor = RowProcessor::new(store, codec_for(config.engine.blob_format));
    Ok((config, processor))
}

fn resolve(workspace: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        workspace.join(path)
    }
}

fn is_stdio(path: &Path) -> bool {
    path == Path::new("-")
}

/// Handles `fuzion-migrate process`.
pub fn process(global: &GlobalArgs, args: ProcessArgs, workspace: &Path) -> Result<ExitCode> {
    let (config, processor) = build_processor(global, workspace)?;

    let reader: Box<dyn BufRead> = match args.input.as_deref() {
        Some(path) if !is_stdio(path) => {
            let path = resolve(workspace, path);
            let file = File::open(&path)
                .with_context(|| format!("failed to open input {}", path.display()))?;
            Box::new(BufReader::new(file))
        }
        _ => Box::new(io::stdin().lock()),
    };

    let writer: Box<dyn Write> = match args.output.as_deref() {
        Some(path) if !is_stdio(path) => {
            let path = resolve(workspace, path);
            let file = File::create(&path)
                .with_context(|| format!("failed to create output {}", path.display()))?;
            Box::new(BufWriter::new(file))
        }
        _ => Box::new(BufWriter::new(io::stdout().lock())),
    };

    let run = MigrationRun::new(
        &processor,
        args.migration.clone(),
        Box::new(DefaultErrorReporter::new()),
    );
    let summary = run.execute(reader, writer)?;

    eprint!("{}", summary.render(ReportFormat::Text)?);

    if let Some(report_path) = &args.report {
        let report_path = resolve(workspace, report_path);
        match args.report_format {
            ReportFormat::Json => FileUtils.save_to_file(&report_path, &summary, &JsonSerializer),
            ReportFormat::Text => std::fs::write(&report_path, summary.render(ReportFormat::Text)?)
                .map_err(Into::into),
        }
        .with_context(|| format!("failed to write report {}", report_path.display()))?;
    }

    if summary.has_format_errors() && config.engine.fail_on_format_error {
        return Ok(ExitCode::from(FORMAT_ERROR_EXIT));
    }
    Ok(ExitCode::SUCCESS)
}

/// Handles `fuzion-migrate explain`.
pub fn explain(args: ExplainArgs) -> Result<ExitCode> {
    let plan = MigrationDispatcher::new().dispatch(&args.migration);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&plan)?);
        return Ok(ExitCode::SUCCESS);
    }

    println!("Migration: {}", plan.identity);
    println!("Match: {:?}", plan.matched);
    if plan.steps.is_empty() {
        println!("No rules apply; rows pass through unchanged.");
    } else {
        for (index, step) in plan.steps.iter().enumerate() {
            println!("  {}. {}", index + 1, step);
        }
    }
    Ok(ExitCode::SUCCESS)
}

/// Handles `fuzion-migrate check`.
pub fn check(global: &GlobalArgs, args: CheckArgs, workspace: &Path) -> Result<ExitCode> {
    let (_, processor) = build_processor(global, workspace)?;

    let value: serde_json::Value =
        serde_json::from_str(&args.row).context("--row is not valid JSON")?;
    let row = Row::from_value(value)?;

    match processor.process(&args.migration, row)? {
        RowDisposition::Forwarded(row) => {
            println!("forwarded");
            println!("{}", serde_json::to_string_pretty(&row)?);
        }
        RowDisposition::Skipped(signal) => {
            println!("skipped by {}: {}", signal.step, signal.reason);
        }
    }
    Ok(ExitCode::SUCCESS)
}
