use crate::logging::config::{FileFormat, LoggingConfig, STATE_DIR};
use crate::Result;
use anyhow::{anyhow, Context};
use dirs_next::home_dir;
use std::fs::{create_dir_all, OpenOptions};
use std::path::{Component, Path, PathBuf};
use tracing::Subscriber;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt::{self as tracing_fmt, writer::BoxMakeWriter};
use tracing_subscriber::layer::Layer;
use tracing_subscriber::registry::LookupSpan;

pub const LOG_FILE_NAME: &str = "fuzion-migrate.log";

/// Boxed file sink; the concrete type depends on the configured format.
pub type FileLayer<S> = Box<dyn Layer<S> + Send + Sync>;

/// Determine the file layout used by the logging file sink.
pub fn log_file_path(config: &LoggingConfig, workspace_root: Option<&Path>) -> Result<PathBuf> {
    let directory = resolve_log_dir(config, workspace_root)?;
    Ok(directory.join(LOG_FILE_NAME))
}

/// Build the file sink, or `None` when file logging is disabled.
///
/// Writes go through a non-blocking appender; keep the returned guard alive
/// until the command finishes or buffered lines are lost.
pub fn file_layer<S>(
    log_file: &Path,
    config: &LoggingConfig,
) -> Result<Option<(FileLayer<S>, WorkerGuard)>>
where
    S: Subscriber + for<'a> LookupSpan<'a> + 'static,
{
    if !config.enable_file {
        return Ok(None);
    }

    ensure_log_dir(log_file)?;
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file)
        .with_context(|| format!("failed to open log file {}", log_file.display()))?;

    let (non_blocking, guard) = tracing_appender::non_blocking(file);
    let writer = BoxMakeWriter::new(non_blocking);
    let base = tracing_fmt::layer()
        .with_writer(writer)
        .with_ansi(false)
        .with_target(true);

    let layer: FileLayer<S> = match config.file_format {
        FileFormat::Text => Box::new(base),
        FileFormat::Json => Box::new(base.json().with_current_span(false)),
    };
    Ok(Some((layer, guard)))
}

fn ensure_log_dir(log_file: &Path) -> Result<()> {
    let directory = log_file.parent().ok_or_else(|| {
        anyhow!(
            "log file path {} has no parent directory",
            log_file.display()
        )
    })?;
    create_dir_all(directory)
        .with_context(|| format!("failed to create log directory {}", directory.display()))?;
    Ok(())
}

/// `log_dir` may be absolute; a relative one is anchored at the workspace
/// (or home) and must stay inside it.
fn resolve_log_dir(config: &LoggingConfig, workspace_root: Option<&Path>) -> Result<PathBuf> {
    if let Some(custom) = config.log_dir.as_ref().filter(|dir| dir.is_absolute()) {
        return Ok(custom.clone());
    }

    let anchor = match workspace_root {
        Some(workspace) => canonicalize_or_clone(workspace),
        None => {
            let home = home_dir().ok_or_else(|| anyhow!("$HOME directory unavailable"))?;
            canonicalize_or_clone(&home)
        }
    };

    let base_dir = match &config.log_dir {
        Some(custom) => anchor.join(custom),
        None => anchor.join(STATE_DIR).join("logs"),
    };

    let normalized = canonicalize_or_clone(&base_dir);
    let escapes = normalized
        .components()
        .any(|component| component == Component::ParentDir);
    if escapes || !normalized.starts_with(&anchor) {
        return Err(anyhow!(
            "logging.log_dir resolves outside {}",
            anchor.display()
        ));
    }
    Ok(normalized)
}

fn canonicalize_or_clone(path: &Path) -> PathBuf {
    path.canonicalize().unwrap_or_else(|_| path.to_path_buf())
}
