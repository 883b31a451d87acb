use chrono::{Locale, NaiveDate};
use std::env;
use time::{Month, Weekday};

/// Locale variables in order of precedence
const LOCALE_VARS: [&str; 3] = ["LC_ALL", "LC_TIME", "LANG"];

/// Month and weekday names in the user's locale
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Names(Locale);

impl Names {
    pub(crate) fn new(locale: Locale) -> Names {
        Names(locale)
    }

    /// Names for the locale given by `LC_ALL`, `LC_TIME`, or `LANG`, falling
    /// back to POSIX (English) names
    pub(crate) fn from_env() -> Names {
        let value = LOCALE_VARS
            .iter()
            .filter_map(|var| env::var(var).ok())
            .find(|value| !value.is_empty());
        let Some(value) = value else {
            return Names::default();
        };
        match parse_locale(&value) {
            Some(locale) => Names(locale),
            None => {
                tracing::debug!(%value, "Unsupported locale; using English names");
                Names::default()
            }
        }
    }

    pub(crate) fn month(&self, month: Month) -> String {
        NaiveDate::from_ymd_opt(2001, u32::from(u8::from(month)), 1).map_or_else(
            || month.to_string(),
            |d| d.format_localized("%B", self.0).to_string(),
        )
    }

    pub(crate) fn weekday_abbrev(&self, wd: Weekday) -> String {
        // 2001-01-01 was a Monday
        let day = 1 + u32::from(wd.number_days_from_monday());
        NaiveDate::from_ymd_opt(2001, 1, day).map_or_else(
            || wd.to_string(),
            |d| d.format_localized("%a", self.0).to_string(),
        )
    }
}

impl Default for Names {
    fn default() -> Names {
        Names(Locale::POSIX)
    }
}

/// Parse a locale variable such as `de_DE.UTF-8` or `sr_RS@latin`, ignoring
/// the codeset and modifier
fn parse_locale(value: &str) -> Option<Locale> {
    let name = value.split(['.', '@']).next().unwrap_or(value);
    match name {
        "C" | "POSIX" => Some(Locale::POSIX),
        _ => Locale::try_from(name).ok(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_locale() {
        assert_eq!(parse_locale("de_DE.UTF-8"), Some(Locale::de_DE));
        assert_eq!(parse_locale("fr_FR"), Some(Locale::fr_FR));
        assert_eq!(parse_locale("C"), Some(Locale::POSIX));
        assert_eq!(parse_locale("C.UTF-8"), Some(Locale::POSIX));
        assert_eq!(parse_locale("tlh_QO"), None);
    }

    #[test]
    fn test_posix_names() {
        let names = Names::default();
        assert_eq!(names.month(Month::January), "January");
        assert_eq!(names.month(Month::September), "September");
        assert_eq!(names.weekday_abbrev(Weekday::Monday), "Mon");
        assert_eq!(names.weekday_abbrev(Weekday::Sunday), "Sun");
    }

    #[test]
    fn test_german_names() {
        let names = Names::new(Locale::de_DE);
        assert_eq!(names.month(Month::January), "Januar");
        assert_eq!(names.month(Month::March), "März");
        assert_eq!(names.weekday_abbrev(Weekday::Tuesday), "Di");
        assert_eq!(names.weekday_abbrev(Weekday::Sunday), "So");
    }
}
