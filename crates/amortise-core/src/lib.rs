//! # Amortise Core
//!
//! Core types shared by the Amortise loan schedule library.
//!
//! This crate provides the foundational building blocks used by the schedule
//! generator:
//!
//! - **Types**: A date-only [`Date`] newtype with calendar-month arithmetic
//! - **Working Day Calendars**: Weekend and holiday-aware payment calendars
//! - **Errors**: Structured error types for date and calendar failures
//!
//! ## Example
//!
//! ```rust
//! use amortise_core::prelude::*;
//!
//! let christmas = Date::from_ymd(2020, 12, 25).unwrap();
//! let calendar = HolidayCalendar::from_dates("UK", [christmas]);
//!
//! // Friday 25th is a holiday, the weekend follows, so Monday 28th is next.
//! let rolled = calendar.first_working_day_on_or_after(christmas).unwrap();
//! assert_eq!(rolled, Date::from_ymd(2020, 12, 28).unwrap());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::trivially_copy_pass_by_ref)]

pub mod calendars;
pub mod error;
pub mod types;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::calendars::{HolidayCalendar, WeekendCalendar, WorkingDayCalendar};
    pub use crate::error::{CoreError, CoreResult};
    pub use crate::types::Date;
}

// Re-export commonly used types at crate root
pub use error::{CoreError, CoreResult};
pub use types::Date;
