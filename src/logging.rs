use std::path::Path;

use anyhow::{anyhow, Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::EnvFilter;

use crate::settings::GdbSettings;

/// Install the global subscriber. With `debug` on, records are appended to
/// `debug_file` rather than written to stderr.
///
/// The returned guard flushes the debug file when dropped; keep it alive for
/// as long as logging should reach the file.
pub fn init_logging(settings: &GdbSettings) -> Result<Option<WorkerGuard>> {
    let default_level = if settings.debug { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    if !settings.debug {
        builder
            .with_writer(std::io::stderr)
            .try_init()
            .map_err(|e| anyhow!("failed to install log subscriber: {}", e))?;
        return Ok(None);
    }

    let appender = debug_file_appender(&settings.debug_file)?;
    let (writer, guard) = tracing_appender::non_blocking(appender);
    builder
        .with_ansi(false)
        .with_writer(writer)
        .try_init()
        .map_err(|e| anyhow!("failed to install log subscriber: {}", e))?;
    Ok(Some(guard))
}

// Never rotated: the debug log is a single file the user names.
fn debug_file_appender(path: &Path) -> Result<RollingFileAppender> {
    let name = path
        .file_name()
        .ok_or_else(|| anyhow!("debug_file has no file name: {}", path.display()))?;
    let dir = match path.parent() {
        Some(d) if !d.as_os_str().is_empty() => d,
        _ => Path::new("."),
    };
    RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(name.to_string_lossy())
        .build(dir)
        .with_context(|| format!("failed to open debug log {}", path.display()))
}
