//! # Amortise Schedule
//!
//! Balloon-adjusted amortisation schedules for fixed-term loans.
//!
//! This crate provides:
//!
//! - **Loan terms**: Principal, APY, payment count and notional amortisation
//!   term, validated before any calculation
//! - **Generation**: Level-payment schedules whose final instalment carries
//!   the balloon, with payment dates rolled onto working days
//! - **Summaries**: Totals, minor-unit rounding and repayment records
//!
//! ## Example
//!
//! ```rust
//! use amortise_core::prelude::*;
//! use amortise_schedule::prelude::*;
//! use rust_decimal_macros::dec;
//!
//! let terms = LoanTerms::new(dec!(100000), 0.36, 24, 7, Date::from_ymd(2020, 9, 5).unwrap());
//! let generator = ScheduleGenerator::new(terms).unwrap();
//! assert_eq!(generator.balloon_amount().round_dp(2), dec!(71428.57));
//!
//! let schedule = generator.generate(&WeekendCalendar).unwrap();
//! assert_eq!(schedule.len(), 24);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::float_cmp)]
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::return_self_not_must_use)]

pub mod error;
pub mod generator;
pub mod repayment;
pub mod request;
pub mod schedule;
pub mod terms;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{ScheduleError, ScheduleResult, Validate};
    pub use crate::generator::{generate, ScheduleGenerator};
    pub use crate::repayment::Repayment;
    pub use crate::request::LoanRequest;
    pub use crate::schedule::{AmortisedSchedule, ScheduleEntry};
    pub use crate::terms::LoanTerms;
}

pub use error::{ScheduleError, ScheduleResult, Validate, ValidationError};
pub use generator::{generate, ScheduleGenerator};
pub use repayment::Repayment;
pub use request::LoanRequest;
pub use schedule::{AmortisedSchedule, ScheduleEntry};
pub use terms::LoanTerms;
