use super::FirstWeekday;
use thiserror::Error;
use time::{
    util::is_leap_year,
    Date, Duration, Month,
    Month::{April, February, June, November, September},
    Weekday::{self, *},
};

pub(crate) const DAYS_IN_WEEK: usize = 7;

pub(crate) trait WeekdayExt {
    /// Position of the weekday in a week beginning on `first`
    fn column(&self, first: FirstWeekday) -> usize;

    fn is_weekend(&self) -> bool;
}

impl WeekdayExt for Weekday {
    fn column(&self, first: FirstWeekday) -> usize {
        let n = match first {
            FirstWeekday::Monday => self.number_days_from_monday(),
            FirstWeekday::Sunday => self.number_days_from_sunday(),
        };
        usize::from(n)
    }

    fn is_weekend(&self) -> bool {
        matches!(self, Saturday | Sunday)
    }
}

#[derive(Copy, Clone, Debug, Eq, Error, PartialEq)]
#[error("reached the end of time")]
pub(crate) struct OutOfTimeError;

pub(crate) fn day_of_week(date: Date) -> Weekday {
    date.weekday()
}

pub(crate) fn days_in_month(year: i32, month: Month) -> u8 {
    match month {
        February if is_leap_year(year) => 29,
        February => 28,
        April | June | September | November => 30,
        _ => 31,
    }
}

pub(crate) fn add_days(date: Date, n: i64) -> Result<Date, OutOfTimeError> {
    date.checked_add(Duration::days(n)).ok_or(OutOfTimeError)
}

/// Move `date` by `delta` months, keeping the day of month where possible
/// and otherwise clamping it to the last day of the target month
pub(crate) fn shift_month(date: Date, delta: i32) -> Result<Date, OutOfTimeError> {
    let index = i64::from(date.year()) * 12 + i64::from(u8::from(date.month()) - 1);
    let target = index + i64::from(delta);
    let year = i32::try_from(target.div_euclid(12)).map_err(|_| OutOfTimeError)?;
    let month = u8::try_from(target.rem_euclid(12) + 1)
        .ok()
        .and_then(|m| Month::try_from(m).ok())
        .ok_or(OutOfTimeError)?;
    let day = date.day().min(days_in_month(year, month));
    Date::from_calendar_date(year, month, day).map_err(|_| OutOfTimeError)
}
