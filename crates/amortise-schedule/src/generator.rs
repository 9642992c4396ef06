//! Balloon-adjusted amortisation schedule generation.
//!
//! Rate compounding is done in `f64`, where exponentiation is available;
//! every monetary amount is a `Decimal`. Values cross from one to the other
//! once, when the generator is built.
//!
//! # Example
//!
//! ```rust
//! use amortise_core::calendars::WeekendCalendar;
//! use amortise_core::types::Date;
//! use amortise_schedule::{LoanTerms, ScheduleGenerator};
//! use rust_decimal_macros::dec;
//!
//! let terms = LoanTerms::new(dec!(12000), 0.0, 12, 1, Date::from_ymd(2021, 1, 15).unwrap());
//! let generator = ScheduleGenerator::new(terms).unwrap();
//! assert_eq!(generator.level_payment(), dec!(1000));
//!
//! let schedule = generator.generate(&WeekendCalendar).unwrap();
//! assert!(schedule.iter().all(|e| e.principal_amount == dec!(1000)));
//! ```

use amortise_core::calendars::{HolidayCalendar, WorkingDayCalendar};
use amortise_core::types::Date;
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tracing::{debug, trace, warn};

use crate::error::{ScheduleError, ScheduleResult, Validate};
use crate::schedule::{AmortisedSchedule, ScheduleEntry};
use crate::terms::{LoanTerms, MONTHS_PER_YEAR};

const MONTHS_PER_YEAR_DEC: Decimal = dec!(12);

/// Builds amortisation schedules for one set of validated loan terms.
///
/// The derived quantities are computed once at construction and exposed as
/// read-only accessors for callers that only need the figures.
#[derive(Debug, Clone)]
pub struct ScheduleGenerator {
    terms: LoanTerms,
    monthly_rate: f64,
    balloon_fraction: Decimal,
    balloon_amount: Decimal,
    level_payment: Decimal,
}

impl ScheduleGenerator {
    /// Validates the terms and derives the rate, balloon and payment.
    ///
    /// # Errors
    ///
    /// Returns `ScheduleError::InvalidLoanTerms` for out-of-domain terms and
    /// `ScheduleError::ArithmeticError` if a derived amount is not
    /// representable.
    pub fn new(terms: LoanTerms) -> ScheduleResult<Self> {
        terms.validate_or_error()?;

        let monthly_rate = monthly_rate(terms.annual_interest_rate);
        let balloon_fraction = balloon_fraction(terms.number_of_payments, terms.amortisation_years);
        let balloon_amount = balloon_fraction
            .checked_mul(terms.principal)
            .ok_or_else(|| ScheduleError::arithmetic("balloon amount overflows"))?;
        let level_payment = level_payment(
            terms.principal,
            balloon_amount,
            monthly_rate,
            terms.number_of_payments,
        )?;

        debug!(
            principal = %terms.principal,
            annual_interest_rate = terms.annual_interest_rate,
            number_of_payments = terms.number_of_payments,
            amortisation_years = terms.amortisation_years,
            monthly_rate,
            %balloon_fraction,
            %balloon_amount,
            %level_payment,
            "derived loan quantities"
        );

        Ok(Self {
            terms,
            monthly_rate,
            balloon_fraction,
            balloon_amount,
            level_payment,
        })
    }

    /// The validated loan terms.
    #[must_use]
    pub fn terms(&self) -> &LoanTerms {
        &self.terms
    }

    /// Effective monthly rate, `(1 + annual)^(1/12) - 1`.
    #[must_use]
    pub fn monthly_rate(&self) -> f64 {
        self.monthly_rate
    }

    /// Share of principal left unamortised at the end of the schedule.
    #[must_use]
    pub fn balloon_fraction(&self) -> Decimal {
        self.balloon_fraction
    }

    /// Principal outstanding after the level payments, due with the final one.
    #[must_use]
    pub fn balloon_amount(&self) -> Decimal {
        self.balloon_amount
    }

    /// Constant monthly payment that reduces the principal to the balloon.
    #[must_use]
    pub fn level_payment(&self) -> Decimal {
        self.level_payment
    }

    /// Generates the full schedule, rolling payment dates forward with
    /// `calendar`.
    ///
    /// The final entry's principal clears the whole outstanding balance,
    /// absorbing the balloon and any rounding drift, so principal portions
    /// sum to the loan principal.
    ///
    /// # Errors
    ///
    /// Returns `ScheduleError::InvalidLoanTerms` if any period would repay a
    /// negative principal, and `ScheduleError::Calendar` if a payment date
    /// cannot be found.
    pub fn generate<C: WorkingDayCalendar + ?Sized>(
        &self,
        calendar: &C,
    ) -> ScheduleResult<AmortisedSchedule> {
        let rate = Decimal::from_f64(self.monthly_rate).ok_or_else(|| {
            ScheduleError::arithmetic(format!(
                "monthly rate {} is not representable",
                self.monthly_rate
            ))
        })?;

        let n = self.terms.number_of_payments;
        let mut entries = Vec::with_capacity(n as usize);
        let mut balance = self.terms.principal;
        let mut previous_date: Option<Date> = None;

        for sequence in 1..=n {
            let interest = rate.checked_mul(balance).ok_or_else(|| {
                ScheduleError::arithmetic(format!("interest overflows in period {sequence}"))
            })?;
            let scheduled = self.level_payment - interest;

            let principal = if sequence == n {
                // Balloon residual plus rounding drift.
                let residual = balance - scheduled;
                debug!(%residual, "final instalment clears outstanding balance");
                scheduled + residual
            } else {
                scheduled
            };

            if principal < Decimal::ZERO {
                return Err(ScheduleError::invalid_terms(
                    "terms",
                    format!("principal repaid in period {sequence} is negative ({principal})"),
                ));
            }

            let date = self.payment_date(sequence, previous_date, calendar)?;
            trace!(sequence, %date, %principal, %interest, %balance, "scheduled instalment");

            balance -= principal;
            previous_date = Some(date);
            entries.push(ScheduleEntry::new(sequence, date, principal, interest));
        }

        let schedule = AmortisedSchedule::new(
            self.terms.principal,
            self.level_payment,
            self.balloon_amount,
            entries,
        );

        debug!(
            calendar = calendar.name(),
            payments = schedule.len(),
            first_payment = ?schedule.first_payment_date(),
            final_payment = ?schedule.final_payment_date(),
            total_interest = %schedule.total_interest(),
            "generated amortisation schedule"
        );

        Ok(schedule)
    }

    /// Disbursal date plus `sequence` months, rolled forward to a working day.
    ///
    /// Dates must strictly increase; if holidays push a date onto or before
    /// the previous payment, it moves to the next working day after that
    /// payment instead.
    fn payment_date<C: WorkingDayCalendar + ?Sized>(
        &self,
        sequence: u32,
        previous: Option<Date>,
        calendar: &C,
    ) -> ScheduleResult<Date> {
        let offset = i32::try_from(sequence)
            .map_err(|_| ScheduleError::invalid_terms("number_of_payments", "too large"))?;
        let target = self.terms.disbursal_date.add_months(offset)?;
        let date = calendar.first_working_day_on_or_after(target)?;

        match previous {
            Some(prev) if date <= prev => {
                let escalated = calendar.first_working_day_after(prev)?;
                warn!(
                    sequence,
                    %target,
                    rolled = %date,
                    previous = %prev,
                    %escalated,
                    "payment date collided with previous payment, moved forward"
                );
                Ok(escalated)
            }
            _ => Ok(date),
        }
    }
}

/// Generates a schedule from raw loan parameters and a set of bank holidays.
///
/// Saturdays, Sundays and `holidays` are never payment dates.
///
/// # Example
///
/// ```rust
/// use amortise_core::types::Date;
/// use rust_decimal_macros::dec;
///
/// let schedule = amortise_schedule::generate(
///     dec!(100000),
///     0.28,
///     24,
///     2,
///     Date::from_ymd(2020, 9, 5).unwrap(),
///     [Date::from_ymd(2020, 12, 25).unwrap()],
/// )
/// .unwrap();
///
/// assert_eq!(schedule.len(), 24);
/// assert_eq!(schedule.total_principal().round_dp(2), dec!(100000));
/// ```
pub fn generate(
    principal: Decimal,
    annual_interest_rate: f64,
    number_of_payments: u32,
    amortisation_years: u32,
    disbursal_date: Date,
    holidays: impl IntoIterator<Item = Date>,
) -> ScheduleResult<AmortisedSchedule> {
    let terms = LoanTerms::new(
        principal,
        annual_interest_rate,
        number_of_payments,
        amortisation_years,
        disbursal_date,
    );
    let calendar = HolidayCalendar::from_dates("Bank Holidays", holidays);
    ScheduleGenerator::new(terms)?.generate(&calendar)
}

/// Geometric monthly equivalent of an annual rate.
fn monthly_rate(annual_rate: f64) -> f64 {
    (1.0 + annual_rate).powf(1.0 / f64::from(MONTHS_PER_YEAR)) - 1.0
}

/// `1 - (payments / 12) / years`; zero for a fully amortising loan.
fn balloon_fraction(number_of_payments: u32, amortisation_years: u32) -> Decimal {
    Decimal::ONE
        - Decimal::from(number_of_payments) / MONTHS_PER_YEAR_DEC / Decimal::from(amortisation_years)
}

/// Annuity payment taking `principal` to `balloon` over `n` periods.
fn level_payment(
    principal: Decimal,
    balloon: Decimal,
    monthly_rate: f64,
    n: u32,
) -> ScheduleResult<Decimal> {
    if monthly_rate == 0.0 {
        return Ok((principal - balloon) / Decimal::from(n));
    }

    let p = to_f64(principal, "principal")?;
    let b = to_f64(balloon, "balloon amount")?;
    let periods = i32::try_from(n)
        .map_err(|_| ScheduleError::invalid_terms("number_of_payments", "too large"))?;

    let growth = (1.0 + monthly_rate).powi(periods);
    let payment = (monthly_rate * (b - p * growth) / (growth - 1.0)).abs();

    if !payment.is_finite() {
        return Err(ScheduleError::arithmetic(format!(
            "level payment is not finite (monthly rate {monthly_rate}, {n} payments)"
        )));
    }

    Decimal::from_f64(payment).ok_or_else(|| {
        ScheduleError::arithmetic(format!("level payment {payment} is not representable"))
    })
}

fn to_f64(amount: Decimal, what: &str) -> ScheduleResult<f64> {
    amount
        .to_f64()
        .ok_or_else(|| ScheduleError::arithmetic(format!("{what} {amount} has no f64 value")))
}
