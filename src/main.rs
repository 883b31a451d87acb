mod app;
mod calendar;
mod config;
mod logging;
mod theme;
use crate::app::{App, AppState};
use crate::calendar::Names;
use crate::config::{Config, ConfigStore};
use anyhow::Context;
use ratatui::{layout::Size, DefaultTerminal};
use time::{Date, OffsetDateTime};

// Command-line arguments are not consulted; the calendar always opens on
// today's date
fn main() -> anyhow::Result<()> {
    match logging::init() {
        Ok(Some(path)) => tracing::info!(path = %path.display(), "Logging enabled"),
        Ok(None) => (),
        Err(e) => eprintln!("ccal: logging disabled: {e:#}"),
    }
    let today = OffsetDateTime::now_local()
        .unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Could not determine local time zone; using UTC");
            OffsetDateTime::now_utc()
        })
        .date();
    let store = ConfigStore::locate();
    match &store {
        Some(s) => tracing::debug!(path = %s.path().display(), "Using config file"),
        None => tracing::warn!("Could not determine home directory; settings will not be saved"),
    }
    let (state, config) = startup(today, store.as_ref(), Names::from_env());
    tracing::info!(
        %today,
        first_weekday = %state.first_weekday,
        names = ?state.names,
        "Starting calendar"
    );
    with_terminal(|mut terminal| {
        check_size(terminal.size().context("failed to query terminal size")?)?;
        terminal.hide_cursor().context("failed to hide cursor")?;
        App::new(state, config, store)
            .run(terminal)
            .context("terminal I/O failed")
    })
}

/// Initial state of the calendar: today selected, the first weekday taken
/// from the config file
fn startup(today: Date, store: Option<&ConfigStore>, names: Names) -> (AppState, Config) {
    let config = store.map(ConfigStore::load).unwrap_or_default();
    let state = AppState::new(today, config.first_weekday).with_names(names);
    (state, config)
}

/// Fail if the terminal has no room for even the resize prompt
fn check_size(size: Size) -> anyhow::Result<()> {
    if size.width == 0 || size.height == 0 {
        anyhow::bail!(
            "terminal is too small to display anything ({}x{})",
            size.width,
            size.height
        );
    }
    Ok(())
}

fn with_terminal<F, T>(func: F) -> anyhow::Result<T>
where
    F: FnOnce(DefaultTerminal) -> anyhow::Result<T>,
{
    let terminal = match ratatui::try_init() {
        Ok(terminal) => terminal,
        Err(e) => {
            // Undo whatever part of the setup did succeed
            ratatui::restore();
            return Err(e).context("failed to initialize terminal");
        }
    };
    let r = func(terminal);
    ratatui::restore();
    if let Err(e) = &r {
        tracing::error!(error = ?e, "Exiting on error");
    }
    r
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::{FirstWeekday, ViewMode};
    use std::fs;
    use tempfile::TempDir;
    use time::macros::date;

    #[test]
    fn test_startup_selects_today() {
        let (state, config) = startup(date!(2024 - 02 - 29), None, Names::default());
        assert_eq!(state.selected, date!(2024 - 02 - 29));
        assert_eq!(state.today, date!(2024 - 02 - 29));
        assert_eq!(state.view, ViewMode::Month);
        assert_eq!(state.first_weekday, FirstWeekday::Monday);
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_startup_reads_config() {
        let tmp = TempDir::new().unwrap();
        let store = ConfigStore::new(tmp.path().join("config.json"));
        fs::write(store.path(), r#"{"first_weekday": "sun"}"#).unwrap();
        let (state, config) = startup(date!(2024 - 02 - 29), Some(&store), Names::default());
        assert_eq!(state.selected, date!(2024 - 02 - 29));
        assert_eq!(state.first_weekday, FirstWeekday::Sunday);
        assert_eq!(config.first_weekday, FirstWeekday::Sunday);
    }

    #[test]
    fn test_check_size() {
        assert!(check_size(Size::new(1, 1)).is_ok());
        assert!(check_size(Size::new(36, 10)).is_ok());
        assert!(check_size(Size::new(0, 0)).is_err());
        assert!(check_size(Size::new(80, 0)).is_err());
        assert!(check_size(Size::new(0, 24)).is_err());
    }
}
