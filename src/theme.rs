use ratatui::style::{Color, Modifier, Style};

pub(crate) const BASE_STYLE: Style = Style::new().fg(Color::White).bg(Color::Black);

pub(crate) const HEADER_STYLE: Style = BASE_STYLE.fg(Color::Cyan).add_modifier(Modifier::BOLD);

pub(crate) const HINT_STYLE: Style = BASE_STYLE.fg(Color::Yellow);

pub(crate) const WEEKDAY_STYLE: Style = BASE_STYLE.add_modifier(Modifier::BOLD);

pub(crate) const WEEKEND_STYLE: Style = BASE_STYLE.fg(Color::Magenta);

pub(crate) const OUTSIDE_MONTH_STYLE: Style = BASE_STYLE.fg(Color::DarkGray);

pub(crate) const TODAY_STYLE: Style = BASE_STYLE
    .fg(Color::Green)
    .add_modifier(Modifier::BOLD)
    .add_modifier(Modifier::UNDERLINED);

// Patched over whatever style the day already has, so a selected "today"
// keeps its underline
pub(crate) const SELECTED_STYLE: Style = Style::new()
    .fg(Color::Black)
    .bg(Color::Yellow)
    .add_modifier(Modifier::BOLD);

pub(crate) const STATUS_STYLE: Style = Style::new().fg(Color::Black).bg(Color::Cyan);
