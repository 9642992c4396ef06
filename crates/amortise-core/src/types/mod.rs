//! Domain types for loan schedules.
//!
//! - [`Date`]: Calendar date (no time of day) for payment scheduling

mod date;

pub use date::Date;
