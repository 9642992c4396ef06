//! Loan terms accepted by the schedule generator.

use amortise_core::types::Date;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{Validate, ValidationError};

/// Months in a year.
pub const MONTHS_PER_YEAR: u32 = 12;

/// Immutable description of a balloon loan.
///
/// `number_of_payments` is the count of monthly instalments actually
/// scheduled, while `amortisation_years` is the notional term over which the
/// loan would fully amortise. When the scheduled payments cover less than the
/// notional term, the remaining principal falls due as a balloon with the
/// final payment.
///
/// # Example
///
/// ```rust
/// use amortise_core::types::Date;
/// use amortise_schedule::{LoanTerms, Validate};
/// use rust_decimal_macros::dec;
///
/// let terms = LoanTerms::new(
///     dec!(100000),
///     0.30,
///     24,
///     3,
///     Date::from_ymd(2020, 9, 5).unwrap(),
/// );
/// assert!(terms.is_valid());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanTerms {
    /// Amount disbursed.
    pub principal: Decimal,
    /// Annual (APY-style) interest rate as a fraction, e.g. 0.30 for 30%.
    pub annual_interest_rate: f64,
    /// Number of monthly instalments scheduled.
    pub number_of_payments: u32,
    /// Notional full-amortisation term used to size the balloon.
    pub amortisation_years: u32,
    /// Date the funds are released.
    pub disbursal_date: Date,
}

impl LoanTerms {
    /// Creates loan terms. Validation happens when a generator is built.
    #[must_use]
    pub fn new(
        principal: Decimal,
        annual_interest_rate: f64,
        number_of_payments: u32,
        amortisation_years: u32,
        disbursal_date: Date,
    ) -> Self {
        Self {
            principal,
            annual_interest_rate,
            number_of_payments,
            amortisation_years,
            disbursal_date,
        }
    }

    /// Returns true when the scheduled payments cover the full notional term.
    #[must_use]
    pub fn is_fully_amortising(&self) -> bool {
        u64::from(self.number_of_payments)
            == u64::from(self.amortisation_years) * u64::from(MONTHS_PER_YEAR)
    }
}

impl Validate for LoanTerms {
    fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        if self.principal <= Decimal::ZERO {
            errors.push(ValidationError::new(
                "principal",
                format!("must be positive, got {}", self.principal),
            ));
        }
        if !self.annual_interest_rate.is_finite() {
            errors.push(ValidationError::new(
                "annual_interest_rate",
                format!("must be finite, got {}", self.annual_interest_rate),
            ));
        } else if self.annual_interest_rate < -1.0 {
            errors.push(ValidationError::new(
                "annual_interest_rate",
                format!("must not be below -100%, got {}", self.annual_interest_rate),
            ));
        }
        if self.number_of_payments == 0 {
            errors.push(ValidationError::new("number_of_payments", "must be positive"));
        } else if i32::try_from(self.number_of_payments).is_err() {
            errors.push(ValidationError::new(
                "number_of_payments",
                format!("too large, got {}", self.number_of_payments),
            ));
        }
        if self.amortisation_years == 0 {
            errors.push(ValidationError::new("amortisation_years", "must be positive"));
        }

        errors
    }
}
