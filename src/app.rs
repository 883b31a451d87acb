use crate::calendar::{add_days, shift_month, FirstWeekday, Names, OutOfTimeError, ViewMode};
use crate::config::{Config, ConfigStore};
use crossterm::event::{read, Event, KeyCode, KeyEvent, KeyModifiers};
use ratatui::{backend::Backend, Terminal};
use std::io::{self, Write};
use time::Date;

static STARTUP_STATUS: &str = "Use arrows/PgUp/PgDn, T=Today, W=Week start, V=View";

/// Everything the calendar display depends on
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct AppState {
    pub(crate) today: Date,
    pub(crate) selected: Date,
    pub(crate) view: ViewMode,
    pub(crate) first_weekday: FirstWeekday,
    pub(crate) names: Names,
    pub(crate) status: String,
}

impl AppState {
    pub(crate) fn new(today: Date, first_weekday: FirstWeekday) -> AppState {
        AppState {
            today,
            selected: today,
            view: ViewMode::default(),
            first_weekday,
            names: Names::default(),
            status: String::from(STARTUP_STATUS),
        }
    }

    pub(crate) fn with_names(mut self, names: Names) -> AppState {
        self.names = names;
        self
    }

    #[cfg(test)]
    pub(crate) fn select(mut self, date: Date) -> AppState {
        self.selected = date;
        self
    }

    /// Perform `action`, returning the resulting state and what the caller
    /// still needs to do about it
    pub(crate) fn apply(mut self, action: Action) -> (AppState, Effect) {
        let target = match action {
            Action::PrevDay => add_days(self.selected, -1),
            Action::NextDay => add_days(self.selected, 1),
            Action::PrevWeek => add_days(self.selected, -7),
            Action::NextWeek => add_days(self.selected, 7),
            Action::PrevMonth => shift_month(self.selected, -1),
            Action::NextMonth => shift_month(self.selected, 1),
            Action::Today => Ok(self.today),
            Action::ToggleWeekStart => {
                self.first_weekday = self.first_weekday.toggle();
                self.status = format!("Week starts on {}", self.first_weekday);
                return (self, Effect::SaveConfig);
            }
            Action::ToggleView => {
                self.view = self.view.toggle();
                self.status = format!("View: {}", self.view);
                return (self, Effect::None);
            }
            Action::Quit => return (self, Effect::Quit),
        };
        match target {
            Ok(date) => {
                self.selected = date;
                match action {
                    Action::PrevMonth => self.status = String::from("Previous month"),
                    Action::NextMonth => self.status = String::from("Next month"),
                    Action::Today => self.status = String::from("Today"),
                    _ => (),
                }
                (self, Effect::None)
            }
            Err(OutOfTimeError) => {
                tracing::debug!(selected = %self.selected, ?action, "Cannot move past the end of time");
                (self, Effect::Rejected)
            }
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub(crate) enum Action {
    PrevDay,
    NextDay,
    PrevWeek,
    NextWeek,
    PrevMonth,
    NextMonth,
    Today,
    ToggleWeekStart,
    ToggleView,
    Quit,
}

impl Action {
    // Letters are matched case-insensitively
    pub(crate) fn from_key(key: KeyCode) -> Option<Action> {
        match key {
            KeyCode::Left => Some(Action::PrevDay),
            KeyCode::Right => Some(Action::NextDay),
            KeyCode::Up => Some(Action::PrevWeek),
            KeyCode::Down => Some(Action::NextWeek),
            KeyCode::PageUp => Some(Action::PrevMonth),
            KeyCode::PageDown => Some(Action::NextMonth),
            KeyCode::Esc => Some(Action::Quit),
            KeyCode::Char(c) => match c.to_ascii_lowercase() {
                'h' => Some(Action::PrevDay),
                'l' => Some(Action::NextDay),
                'k' => Some(Action::PrevWeek),
                'j' => Some(Action::NextWeek),
                't' => Some(Action::Today),
                'w' => Some(Action::ToggleWeekStart),
                'v' => Some(Action::ToggleView),
                'q' => Some(Action::Quit),
                _ => None,
            },
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub(crate) enum Effect {
    None,
    /// The first weekday changed and should be written to the config file
    SaveConfig,
    /// The action could not be performed; the state is unchanged
    Rejected,
    Quit,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct App {
    state: AppState,
    config: Config,
    store: Option<ConfigStore>,
    quitting: bool,
}

impl App {
    pub(crate) fn new(state: AppState, config: Config, store: Option<ConfigStore>) -> App {
        App {
            state,
            config,
            store,
            quitting: false,
        }
    }

    pub(crate) fn run<B: Backend>(mut self, mut terminal: Terminal<B>) -> io::Result<()> {
        while !self.quitting {
            self.draw(&mut terminal)?;
            self.handle_input()?;
        }
        tracing::info!("Quitting");
        Ok(())
    }

    fn draw<B: Backend>(&self, terminal: &mut Terminal<B>) -> io::Result<()> {
        terminal.draw(|frame| frame.render_widget(&self.state, frame.area()))?;
        Ok(())
    }

    fn handle_input(&mut self) -> io::Result<()> {
        let normal_modifiers = KeyModifiers::NONE | KeyModifiers::SHIFT;
        let event = read()?;
        if let Some(KeyEvent {
            code, modifiers, ..
        }) = event.as_key_press_event()
        {
            if modifiers == KeyModifiers::CONTROL && code == KeyCode::Char('c') {
                self.quitting = true;
            } else if !normal_modifiers.contains(modifiers) || !self.handle_key(code) {
                self.beep()?;
            }
        } else if let Event::Resize(width, height) = event {
            tracing::debug!(width, height, "Terminal resized");
        }
        // Every event is followed by a redraw, which picks up the new size
        Ok(())
    }

    // Returns `false` if the user pressed an invalid key
    fn handle_key(&mut self, key: KeyCode) -> bool {
        let Some(action) = Action::from_key(key) else {
            tracing::trace!(?key, "Ignoring unbound key");
            return false;
        };
        let (state, effect) = self.state.clone().apply(action);
        self.state = state;
        match effect {
            Effect::None => true,
            Effect::SaveConfig => {
                self.persist();
                true
            }
            Effect::Rejected => false,
            Effect::Quit => {
                self.quitting = true;
                true
            }
        }
    }

    fn persist(&mut self) {
        self.config.first_weekday = self.state.first_weekday;
        if let Some(store) = &self.store {
            if let Err(e) = store.save(&self.config) {
                tracing::warn!(error = ?e, "Failed to save config");
                self.state.status.push_str(" (not saved)");
            }
        }
    }

    fn beep(&self) -> io::Result<()> {
        let mut stdout = io::stdout();
        stdout.write_all(b"\x07")?;
        stdout.flush()
    }
}
