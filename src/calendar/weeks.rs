use super::util::{day_of_week, days_in_month, WeekdayExt, DAYS_IN_WEEK};
use super::FirstWeekday;
use std::iter::successors;
use time::{Date, Month};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
// Invariant: At least one element of the array is Some
pub(super) struct Week([Option<Date>; DAYS_IN_WEEK]);

impl Week {
    /// Returns the week containing the given date, which can be at any day of
    /// the week, with days ordered starting from `first`.  Days that would
    /// fall outside the representable range of dates are left as `None`.
    pub(super) fn containing(date: Date, first: FirstWeekday) -> Week {
        let i = day_of_week(date).column(first);
        let mut week = Week([None; DAYS_IN_WEEK]);
        week.0[i] = Some(date);
        for (j, d) in (0..i).rev().zip(iter_days_before(date)) {
            week.0[j] = Some(d);
        }
        for (j, d) in (i + 1..DAYS_IN_WEEK).zip(iter_days_after(date)) {
            week.0[j] = Some(d);
        }
        week
    }

    /// Iterate over `(column, date)` pairs for the days present in the week
    pub(super) fn enumerate(&self) -> impl Iterator<Item = (usize, Date)> + '_ {
        self.0
            .iter()
            .enumerate()
            .filter_map(|(i, d)| d.map(|d| (i, d)))
    }

    pub(super) fn last(&self) -> Option<Date> {
        self.0.iter().rev().flatten().next().copied()
    }
}

/// Returns the weeks spanning the given month, including the days of the
/// neighboring months that share a week with its first and last days
pub(super) fn month_weeks(year: i32, month: Month, first: FirstWeekday) -> Vec<Week> {
    let mut weeks = Vec::with_capacity(6);
    let Ok(start) = Date::from_calendar_date(year, month, 1) else {
        return weeks;
    };
    let mut week = Week::containing(start, first);
    loop {
        weeks.push(week);
        match week.last().and_then(Date::next_day) {
            Some(d) if d.month() == month && d.year() == year => {
                week = Week::containing(d, first);
            }
            _ => break,
        }
    }
    debug_assert!(
        weeks.len() * DAYS_IN_WEEK >= usize::from(days_in_month(year, month)),
        "weeks should cover the whole month"
    );
    weeks
}

fn iter_days_after(date: Date) -> impl Iterator<Item = Date> {
    successors(Some(date), |&d| d.next_day()).skip(1)
}

fn iter_days_before(date: Date) -> impl Iterator<Item = Date> {
    successors(Some(date), |&d| d.previous_day()).skip(1)
}
