//! Error types for schedule generation.

use amortise_core::CoreError;
use thiserror::Error;

/// A specialized Result type for schedule operations.
pub type ScheduleResult<T> = Result<T, ScheduleError>;

/// Errors that can occur while building an amortisation schedule.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ScheduleError {
    /// A loan parameter is outside its valid domain, or the combination of
    /// parameters would produce a negative principal repayment.
    #[error("Invalid loan terms: {field}: {reason}")]
    InvalidLoanTerms {
        /// The offending parameter.
        field: String,
        /// Why it was rejected.
        reason: String,
    },

    /// A rate or payment calculation produced a value that cannot be
    /// represented as a monetary amount (NaN, infinite, or out of range).
    #[error("Arithmetic error: {reason}")]
    ArithmeticError {
        /// Description of the failure.
        reason: String,
    },

    /// Payment date calculation failed.
    #[error(transparent)]
    Calendar(#[from] CoreError),

    /// Loan request configuration could not be read or parsed.
    #[error("Configuration error: {reason}")]
    Config {
        /// Description of the configuration error.
        reason: String,
    },
}

impl ScheduleError {
    /// Creates an invalid loan terms error.
    #[must_use]
    pub fn invalid_terms(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidLoanTerms {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Creates an arithmetic error.
    #[must_use]
    pub fn arithmetic(reason: impl Into<String>) -> Self {
        Self::ArithmeticError {
            reason: reason.into(),
        }
    }

    /// Creates a configuration error.
    #[must_use]
    pub fn config(reason: impl Into<String>) -> Self {
        Self::Config {
            reason: reason.into(),
        }
    }
}

/// A single validation failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Field that failed validation.
    pub field: String,
    /// Validation error message.
    pub message: String,
}

impl ValidationError {
    /// Creates a new validation error.
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl From<ValidationError> for ScheduleError {
    fn from(err: ValidationError) -> Self {
        ScheduleError::InvalidLoanTerms {
            field: err.field,
            reason: err.message,
        }
    }
}

/// Trait for validatable inputs.
pub trait Validate {
    /// Returns every validation failure, or an empty vector if valid.
    fn validate(&self) -> Vec<ValidationError>;

    /// Returns true if the input is valid.
    fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }

    /// Validates and returns the first failure as an error.
    fn validate_or_error(&self) -> ScheduleResult<()> {
        match self.validate().into_iter().next() {
            Some(err) => Err(err.into()),
            None => Ok(()),
        }
    }
}
