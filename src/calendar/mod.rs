mod names;
mod util;
mod weeks;
mod widget;
pub(crate) use self::names::Names;
pub(crate) use self::util::{add_days, shift_month, OutOfTimeError};
use serde::Serialize;
use std::fmt;
use time::Weekday;

/// The day on which displayed weeks begin
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize)]
pub(crate) enum FirstWeekday {
    #[default]
    #[serde(rename = "mon")]
    Monday,
    #[serde(rename = "sun")]
    Sunday,
}

impl FirstWeekday {
    pub(crate) fn toggle(self) -> FirstWeekday {
        match self {
            FirstWeekday::Monday => FirstWeekday::Sunday,
            FirstWeekday::Sunday => FirstWeekday::Monday,
        }
    }

    pub(crate) fn weekday(self) -> Weekday {
        match self {
            FirstWeekday::Monday => Weekday::Monday,
            FirstWeekday::Sunday => Weekday::Sunday,
        }
    }

    /// All seven weekdays in display order
    pub(crate) fn ordered_weekdays(self) -> [Weekday; 7] {
        let mut wd = self.weekday();
        std::array::from_fn(|_| {
            let day = wd;
            wd = wd.next();
            day
        })
    }
}

impl fmt::Display for FirstWeekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FirstWeekday::Monday => write!(f, "Monday"),
            FirstWeekday::Sunday => write!(f, "Sunday"),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub(crate) enum ViewMode {
    #[default]
    Month,
    Week,
}

impl ViewMode {
    pub(crate) fn toggle(self) -> ViewMode {
        match self {
            ViewMode::Month => ViewMode::Week,
            ViewMode::Week => ViewMode::Month,
        }
    }
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViewMode::Month => write!(f, "month"),
            ViewMode::Week => write!(f, "week"),
        }
    }
}
