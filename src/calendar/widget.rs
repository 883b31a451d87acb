use super::util::{day_of_week, WeekdayExt, DAYS_IN_WEEK};
use super::weeks::{month_weeks, Week};
use super::ViewMode;
use crate::app::AppState;
use crate::theme::{
    BASE_STYLE, HEADER_STYLE, HINT_STYLE, OUTSIDE_MONTH_STYLE, SELECTED_STYLE, STATUS_STYLE,
    TODAY_STYLE, WEEKDAY_STYLE, WEEKEND_STYLE,
};
use ratatui::{prelude::*, widgets::*};
use std::iter::zip;
use time::Date;

/// Smallest terminal size at which the calendar is drawn at all
const MIN_WIDTH: u16 = 36;
const MIN_HEIGHT: u16 = 10;

static RESIZE_MESSAGE: &str = "Resize terminal (min 36x10)";

static HINT: &str =
    "[ Arrows: Day | PgUp/PgDn: Month | T: Today | W: Week start | V: View | Q: Quit ]";

static WEEK_VIEW_TITLE: &str = "Week view";

const HEADER_ROW: u16 = 0;

const HINT_ROW: u16 = 1;

/// Row of the weekday header or week view title, with the month grid or
/// week list below it
const BODY_TOP: u16 = 2;

/// Columns of padding to the left of the month grid or week list
const BODY_LEFT: u16 = 2;

/// Number of columns per day of the month grid
const CELL_WIDTH: u16 = 4;

impl Widget for &AppState {
    fn render(self, area: Rect, buf: &mut Buffer) {
        buf.set_style(area, BASE_STYLE);
        let mut canvas = BufferCanvas::new(area, buf);
        if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
            canvas.mvprint(0, 0, RESIZE_MESSAGE, BASE_STYLE);
            return;
        }
        canvas.draw_header(&self.names.month(self.selected.month()), self.selected.year());
        canvas.draw_hint();
        match self.view {
            ViewMode::Month => draw_month(&mut canvas, self),
            ViewMode::Week => draw_week(&mut canvas, self),
        }
        canvas.draw_status(&self.status);
    }
}

fn draw_month(canvas: &mut BufferCanvas<'_>, state: &AppState) {
    let month = state.selected.month();
    let header = state
        .first_weekday
        .ordered_weekdays()
        .iter()
        .map(|&wd| {
            let abbrev = state.names.weekday_abbrev(wd);
            format!("{:>3}", abbrev.chars().take(2).collect::<String>())
        })
        .collect::<Vec<_>>()
        .join(" ");
    canvas.mvprint(BODY_TOP, BODY_LEFT, header, WEEKDAY_STYLE);
    let weeks = month_weeks(state.selected.year(), month, state.first_weekday);
    for (y, week) in zip(BODY_TOP + 1.., weeks) {
        if y >= canvas.status_row() {
            break;
        }
        for (col, date) in week.enumerate() {
            let style = day_style(state, date, date.month() == month);
            canvas.mvprint(y, cell_x(col), format!("{:>2}", date.day()), style);
        }
    }
}

// The title is left out when it would push a day off the screen
fn draw_week(canvas: &mut BufferCanvas<'_>, state: &AppState) {
    let mut top = BODY_TOP;
    if usize::from(canvas.status_row().saturating_sub(BODY_TOP)) > DAYS_IN_WEEK {
        canvas.mvprint(BODY_TOP, BODY_LEFT, WEEK_VIEW_TITLE, WEEKDAY_STYLE);
        top += 1;
    }
    let week = Week::containing(state.selected, state.first_weekday);
    for (y, (_, date)) in zip(top.., week.enumerate()) {
        if y >= canvas.status_row() {
            break;
        }
        let label = format!("{} {date}", state.names.weekday_abbrev(day_of_week(date)));
        canvas.mvprint(y, BODY_LEFT, label, day_style(state, date, true));
    }
}

// Selection is patched over today's emphasis rather than replacing it
fn day_style(state: &AppState, date: Date, in_month: bool) -> Style {
    let mut style = if !in_month {
        OUTSIDE_MONTH_STYLE
    } else if day_of_week(date).is_weekend() {
        WEEKEND_STYLE
    } else {
        BASE_STYLE
    };
    if date == state.today {
        style = TODAY_STYLE;
    }
    if date == state.selected {
        style = style.patch(SELECTED_STYLE);
    }
    style
}

/// Column at which the two-digit day number in the given grid column starts
fn cell_x(col: usize) -> u16 {
    let col = u16::try_from(col).unwrap_or(u16::MAX);
    BODY_LEFT
        .saturating_add(CELL_WIDTH.saturating_mul(col))
        .saturating_add(1)
}

#[derive(Debug, Eq, PartialEq)]
struct BufferCanvas<'a> {
    area: Rect,
    buf: &'a mut Buffer,
}

impl<'a> BufferCanvas<'a> {
    fn new(area: Rect, buf: &'a mut Buffer) -> Self {
        Self { area, buf }
    }

    fn status_row(&self) -> u16 {
        self.area.height.saturating_sub(1)
    }

    fn draw_header(&mut self, month: &str, year: i32) {
        let title = format!("{month} {year}");
        let width = u16::try_from(Line::raw(title.as_str()).width()).unwrap_or(u16::MAX);
        let x = self.area.width.saturating_sub(width) / 2;
        self.mvprint(HEADER_ROW, x, title, HEADER_STYLE);
    }

    fn draw_hint(&mut self) {
        self.mvprint(HINT_ROW, 0, HINT, HINT_STYLE);
    }

    fn draw_status(&mut self, status: &str) {
        let y = self.status_row();
        self.buf.set_style(
            Rect {
                x: self.area.x,
                y: self.area.y + y,
                width: self.area.width,
                height: 1,
            },
            STATUS_STYLE,
        );
        self.mvprint(y, 0, format!(" {status}"), STATUS_STYLE);
    }

    fn mvprint<S: AsRef<str>>(&mut self, y: u16, x: u16, s: S, style: Style) {
        if y < self.area.height && x < self.area.width {
            let text = Text::styled(s.as_ref(), style);
            let width = u16::try_from(text.width()).unwrap_or(u16::MAX);
            // Using a Paragraph lets us truncate text that extends beyond the
            // area, though we need to be sure that the Rect passed to the
            // Paragraph is entirely within the frame lest a panic result.
            Paragraph::new(text).render(
                Rect {
                    x: x + self.area.x,
                    y: y + self.area.y,
                    width: (self.area.width - x).min(width),
                    height: 1,
                },
                self.buf,
            );
        }
    }
}
