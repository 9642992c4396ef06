//! Working day calendars.
//!
//! This module provides:
//! - The [`WorkingDayCalendar`] capability consumed by schedule generation
//! - A weekend-only calendar and a configurable holiday calendar
//! - Rolling a date forward to the next working day

mod holiday;

pub use holiday::{CalendarData, HolidayCalendar};

use crate::error::{CoreError, CoreResult};
use crate::types::Date;

/// Longest run of consecutive non-working days searched before giving up.
pub const MAX_ROLL_FORWARD_DAYS: i64 = 366;

/// Trait for working day calendars.
///
/// A working day is any date that is not a Saturday, not a Sunday and not
/// one of the calendar's holidays.
pub trait WorkingDayCalendar: Send + Sync {
    /// Returns the name of the calendar.
    fn name(&self) -> &str;

    /// Returns true if the date is a working day.
    fn is_working_day(&self, date: Date) -> bool;

    /// Returns true if the date is a weekend day or a holiday.
    fn is_holiday(&self, date: Date) -> bool {
        !self.is_working_day(date)
    }

    /// Returns the first working day on or after the given date.
    ///
    /// The date itself is returned when it is already a working day.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::CalendarError` if no working day exists within
    /// [`MAX_ROLL_FORWARD_DAYS`] of `date`.
    fn first_working_day_on_or_after(&self, date: Date) -> CoreResult<Date> {
        roll_forward(date, self)
    }

    /// Returns the first working day strictly after the given date.
    fn first_working_day_after(&self, date: Date) -> CoreResult<Date> {
        roll_forward(date.add_days(1), self)
    }
}

fn roll_forward<C: WorkingDayCalendar + ?Sized>(date: Date, calendar: &C) -> CoreResult<Date> {
    let mut result = date;
    for _ in 0..=MAX_ROLL_FORWARD_DAYS {
        if calendar.is_working_day(result) {
            return Ok(result);
        }
        result = result.add_days(1);
    }
    tracing::warn!(calendar = calendar.name(), %date, "no working day found");
    Err(CoreError::calendar_error(format!(
        "{}: no working day within {} days of {}",
        calendar.name(),
        MAX_ROLL_FORWARD_DAYS,
        date
    )))
}

/// A simple weekend-only calendar (no holidays).
///
/// Useful for testing or when holiday data is not available.
#[derive(Debug, Clone, Copy, Default)]
pub struct WeekendCalendar;

impl WorkingDayCalendar for WeekendCalendar {
    fn name(&self) -> &str {
        "Weekend Only"
    }

    fn is_working_day(&self, date: Date) -> bool {
        !date.is_weekend()
    }
}

impl<C: WorkingDayCalendar + ?Sized> WorkingDayCalendar for &C {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn is_working_day(&self, date: Date) -> bool {
        (**self).is_working_day(date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct NeverOpen;

    impl WorkingDayCalendar for NeverOpen {
        fn name(&self) -> &str {
            "Never Open"
        }

        fn is_working_day(&self, _date: Date) -> bool {
            false
        }
    }

    #[test]
    fn test_weekend_calendar() {
        let cal = WeekendCalendar;

        // Monday
        let monday = Date::from_ymd(2025, 1, 6).unwrap();
        assert!(cal.is_working_day(monday));

        // Saturday
        let saturday = Date::from_ymd(2025, 1, 4).unwrap();
        assert!(!cal.is_working_day(saturday));
        assert!(cal.is_holiday(saturday));

        // Sunday
        let sunday = Date::from_ymd(2025, 1, 5).unwrap();
        assert!(!cal.is_working_day(sunday));
    }

    #[test]
    fn test_working_day_unchanged() {
        let cal = WeekendCalendar;
        let monday = Date::from_ymd(2025, 1, 6).unwrap();
        assert_eq!(cal.first_working_day_on_or_after(monday).unwrap(), monday);
    }

    #[test]
    fn test_weekend_rolls_to_monday() {
        let cal = WeekendCalendar;
        let saturday = Date::from_ymd(2025, 1, 4).unwrap();
        let sunday = Date::from_ymd(2025, 1, 5).unwrap();
        let monday = Date::from_ymd(2025, 1, 6).unwrap();

        assert_eq!(cal.first_working_day_on_or_after(saturday).unwrap(), monday);
        assert_eq!(cal.first_working_day_on_or_after(sunday).unwrap(), monday);
    }

    #[test]
    fn test_first_working_day_after_is_strict() {
        let cal = WeekendCalendar;
        let friday = Date::from_ymd(2025, 1, 3).unwrap();
        assert_eq!(
            cal.first_working_day_after(friday).unwrap(),
            Date::from_ymd(2025, 1, 6).unwrap()
        );
    }

    #[test]
    fn test_roll_forward_is_bounded() {
        let start = Date::from_ymd(2025, 1, 1).unwrap();
        let err = NeverOpen.first_working_day_on_or_after(start).unwrap_err();
        assert!(matches!(err, CoreError::CalendarError { .. }));
        assert!(err.to_string().contains("Never Open"));
    }

    fn is_open<C: WorkingDayCalendar>(calendar: C, date: Date) -> bool {
        calendar.is_working_day(date)
    }

    #[test]
    fn test_calendar_by_reference() {
        let cal = WeekendCalendar;
        let saturday = Date::from_ymd(2025, 1, 4).unwrap();
        assert!(!is_open(&cal, saturday));
        assert!(is_open(&cal, saturday.add_days(2)));
    }
}
