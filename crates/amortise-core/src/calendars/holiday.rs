//! Holiday calendar for runtime-configurable payment calendars.
//!
//! Bank holidays are supplied by the surrounding lending system, either as a
//! list of dates or as JSON configuration.
//!
//! # Example
//!
//! ```
//! use amortise_core::calendars::{HolidayCalendar, WorkingDayCalendar};
//! use amortise_core::types::Date;
//!
//! let holidays = vec![
//!     Date::from_ymd(2021, 4, 2).unwrap(),
//!     Date::from_ymd(2021, 4, 5).unwrap(),
//! ];
//! let cal = HolidayCalendar::from_dates("Easter 2021", holidays);
//!
//! assert!(!cal.is_working_day(Date::from_ymd(2021, 4, 5).unwrap()));
//! assert!(cal.is_working_day(Date::from_ymd(2021, 4, 6).unwrap()));
//! ```

use std::collections::BTreeSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::WorkingDayCalendar;
use crate::error::{CoreError, CoreResult};
use crate::types::Date;

/// A Saturday/Sunday weekend calendar with a configurable set of holidays.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HolidayCalendar {
    /// Name of the calendar
    name: String,
    /// Holiday dates, ordered
    holidays: BTreeSet<Date>,
}

impl HolidayCalendar {
    /// Create a new calendar with no holidays.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            holidays: BTreeSet::new(),
        }
    }

    /// Create a calendar from a list of holiday dates.
    ///
    /// Duplicate dates are collapsed.
    pub fn from_dates(name: impl Into<String>, holidays: impl IntoIterator<Item = Date>) -> Self {
        Self {
            name: name.into(),
            holidays: holidays.into_iter().collect(),
        }
    }

    /// Load a calendar from JSON data.
    ///
    /// # JSON Format
    ///
    /// ```json
    /// {
    ///   "name": "UK Bank Holidays",
    ///   "holidays": ["2020-12-25", "2020-12-28"]
    /// }
    /// ```
    pub fn from_json(json: &str) -> CoreResult<Self> {
        let data: CalendarData = serde_json::from_str(json)
            .map_err(|e| CoreError::calendar_error(format!("Failed to parse JSON: {}", e)))?;
        Self::from_calendar_data(data)
    }

    /// Load a calendar from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> CoreResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            CoreError::calendar_error(format!("Failed to read {}: {}", path.display(), e))
        })?;
        let calendar = Self::from_json(&content)?;
        tracing::debug!(
            path = %path.display(),
            name = %calendar.name,
            holidays = calendar.holiday_count(),
            "loaded holiday calendar"
        );
        Ok(calendar)
    }

    /// Build a calendar from already-parsed [`CalendarData`].
    pub fn from_calendar_data(data: CalendarData) -> CoreResult<Self> {
        let holidays = data
            .holidays
            .iter()
            .map(|s| {
                Date::parse(s).map_err(|e| {
                    CoreError::calendar_error(format!("Invalid holiday '{}': {}", s, e))
                })
            })
            .collect::<CoreResult<BTreeSet<_>>>()?;

        Ok(Self {
            name: data.name,
            holidays,
        })
    }

    /// Export calendar data to a serializable struct.
    pub fn to_calendar_data(&self) -> CalendarData {
        CalendarData {
            name: self.name.clone(),
            holidays: self.holidays.iter().map(ToString::to_string).collect(),
        }
    }

    /// Export to a JSON string.
    pub fn to_json(&self) -> CoreResult<String> {
        serde_json::to_string_pretty(&self.to_calendar_data())
            .map_err(|e| CoreError::calendar_error(format!("Failed to serialize calendar: {}", e)))
    }

    /// Add a holiday date.
    pub fn add_holiday(&mut self, date: Date) {
        self.holidays.insert(date);
    }

    /// Add multiple holidays.
    pub fn add_holidays(&mut self, dates: impl IntoIterator<Item = Date>) {
        self.holidays.extend(dates);
    }

    /// Remove a holiday date.
    pub fn remove_holiday(&mut self, date: Date) {
        self.holidays.remove(&date);
    }

    /// Returns true if the date is one of the configured holidays.
    ///
    /// Weekends are not reported here; see [`WorkingDayCalendar::is_working_day`].
    pub fn is_bank_holiday(&self, date: Date) -> bool {
        self.holidays.contains(&date)
    }

    /// Iterates the holidays in date order.
    pub fn holidays(&self) -> impl Iterator<Item = Date> + '_ {
        self.holidays.iter().copied()
    }

    /// Count configured holidays.
    pub fn holiday_count(&self) -> usize {
        self.holidays.len()
    }
}

impl WorkingDayCalendar for HolidayCalendar {
    fn name(&self) -> &str {
        &self.name
    }

    fn is_working_day(&self, date: Date) -> bool {
        !date.is_weekend() && !self.holidays.contains(&date)
    }
}

/// Calendar data structure for JSON serialization.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CalendarData {
    /// Name of the calendar
    pub name: String,

    /// List of holiday dates in YYYY-MM-DD format
    #[serde(default)]
    pub holidays: Vec<String>,
}

impl CalendarData {
    /// Create a new CalendarData.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            holidays: Vec::new(),
        }
    }

    /// Add a holiday date string.
    pub fn with_holiday(mut self, date: &str) -> Self {
        self.holidays.push(date.to_string());
        self
    }

    /// Build into a HolidayCalendar.
    pub fn build(self) -> CoreResult<HolidayCalendar> {
        HolidayCalendar::from_calendar_data(self)
    }
}
