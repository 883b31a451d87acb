use crate::config::APP_DIR;
use anyhow::Context;
use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter, e.g. `CCAL_LOG=debug`.
/// Logging stays off when it is unset.
const LOG_ENV_VAR: &str = "CCAL_LOG";

const LOG_FILE: &str = "ccal.log";

/// Initialize tracing if `CCAL_LOG` is set.
///
/// The terminal is taken over by the calendar, so events are appended to
/// `~/.ccal/ccal.log` instead of stderr.  Returns the path of the log file
/// when logging was enabled.  On error no subscriber is installed, and the
/// caller carries on without logging.
pub(crate) fn init() -> anyhow::Result<Option<PathBuf>> {
    let Some(directives) = std::env::var_os(LOG_ENV_VAR) else {
        return Ok(None);
    };
    let filter = parse_filter(&directives.to_string_lossy())?;
    let dir = dirs::home_dir()
        .context("could not determine home directory for log file")?
        .join(APP_DIR);
    let (path, file) = open_log(&dir)?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(Some(path))
}

fn parse_filter(directives: &str) -> anyhow::Result<EnvFilter> {
    EnvFilter::try_new(directives).with_context(|| format!("invalid {LOG_ENV_VAR} filter"))
}

fn open_log(dir: &Path) -> anyhow::Result<(PathBuf, File)> {
    fs::create_dir_all(dir)
        .with_context(|| format!("failed to create log directory {}", dir.display()))?;
    let path = dir.join(LOG_FILE);
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("failed to open log file {}", path.display()))?;
    Ok((path, file))
}
