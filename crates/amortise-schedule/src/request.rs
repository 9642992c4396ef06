//! Loan requests loaded from JSON configuration.
//!
//! # JSON Format
//!
//! ```json
//! {
//!   "principal": 100000,
//!   "annual_interest_rate": 0.30,
//!   "number_of_payments": 24,
//!   "amortisation_years": 3,
//!   "disbursal_date": "2020-09-05",
//!   "calendar_name": "UK Bank Holidays",
//!   "holidays": ["2020-12-25", "2020-12-28"]
//! }
//! ```

use std::path::Path;

use amortise_core::calendars::HolidayCalendar;
use amortise_core::types::Date;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{ScheduleError, ScheduleResult};
use crate::generator::ScheduleGenerator;
use crate::schedule::AmortisedSchedule;
use crate::terms::LoanTerms;

/// Everything needed to generate one schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanRequest {
    /// Amount disbursed.
    pub principal: Decimal,
    /// Annual interest rate as a fraction.
    pub annual_interest_rate: f64,
    /// Number of monthly instalments.
    pub number_of_payments: u32,
    /// Notional amortisation term in years.
    pub amortisation_years: u32,
    /// Date the funds are released.
    pub disbursal_date: Date,
    /// Name for the holiday calendar.
    #[serde(default = "default_calendar_name")]
    pub calendar_name: String,
    /// Bank holidays excluded from payment dates.
    #[serde(default)]
    pub holidays: Vec<Date>,
}

fn default_calendar_name() -> String {
    "Bank Holidays".to_string()
}

impl LoanRequest {
    /// Parses a request from JSON.
    pub fn from_json(json: &str) -> ScheduleResult<Self> {
        serde_json::from_str(json)
            .map_err(|e| ScheduleError::config(format!("Failed to parse loan request: {}", e)))
    }

    /// Reads a request from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> ScheduleResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            ScheduleError::config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::from_json(&content)
    }

    /// The loan terms of this request.
    #[must_use]
    pub fn terms(&self) -> LoanTerms {
        LoanTerms::new(
            self.principal,
            self.annual_interest_rate,
            self.number_of_payments,
            self.amortisation_years,
            self.disbursal_date,
        )
    }

    /// The holiday calendar of this request.
    #[must_use]
    pub fn calendar(&self) -> HolidayCalendar {
        HolidayCalendar::from_dates(self.calendar_name.clone(), self.holidays.iter().copied())
    }

    /// Validates the terms and generates the schedule.
    pub fn generate(&self) -> ScheduleResult<AmortisedSchedule> {
        ScheduleGenerator::new(self.terms())?.generate(&self.calendar())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use amortise_core::calendars::WorkingDayCalendar;
    use rust_decimal_macros::dec;

    const REQUEST: &str = r#"{
        "principal": 100000,
        "annual_interest_rate": 0.30,
        "number_of_payments": 24,
        "amortisation_years": 3,
        "disbursal_date": "2020-09-05",
        "holidays": ["2020-12-25", "2020-12-28"]
    }"#;

    #[test]
    fn test_parse_request() {
        let request = LoanRequest::from_json(REQUEST).unwrap();

        assert_eq!(request.principal, dec!(100000));
        assert_eq!(request.number_of_payments, 24);
        assert_eq!(request.disbursal_date, Date::from_ymd(2020, 9, 5).unwrap());
        assert_eq!(request.calendar_name, "Bank Holidays");

        let calendar = request.calendar();
        assert_eq!(calendar.holiday_count(), 2);
        assert_eq!(calendar.name(), "Bank Holidays");
    }

    #[test]
    fn test_generate_from_request() {
        let schedule = LoanRequest::from_json(REQUEST).unwrap().generate().unwrap();
        assert_eq!(schedule.len(), 24);
        assert_eq!(schedule.balloon_amount().round_dp(2), dec!(33333.33));
    }

    #[test]
    fn test_invalid_terms_in_request() {
        let json = REQUEST.replace("\"amortisation_years\": 3", "\"amortisation_years\": 0");
        let err = LoanRequest::from_json(&json).unwrap().generate().unwrap_err();
        assert!(matches!(
            err,
            ScheduleError::InvalidLoanTerms { ref field, .. } if field == "amortisation_years"
        ));
    }

    #[test]
    fn test_malformed_request() {
        let err = LoanRequest::from_json(r#"{"principal": 100000}"#).unwrap_err();
        assert!(matches!(err, ScheduleError::Config { .. }));

        let json = REQUEST.replace("2020-09-05", "2020-09-31");
        assert!(LoanRequest::from_json(&json).is_err());
    }

    #[test]
    fn test_from_json_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("loan.json");
        std::fs::write(&path, REQUEST).unwrap();

        let request = LoanRequest::from_json_file(&path).unwrap();
        assert_eq!(request.amortisation_years, 3);

        let missing = LoanRequest::from_json_file(dir.path().join("missing.json"));
        assert!(matches!(missing, Err(ScheduleError::Config { .. })));
    }
}
