//! Repayment records handed to the lending system.
//!
//! Payment types and repayment statuses are owned by the lending system; only
//! their numeric identities are carried here.

use amortise_core::types::Date;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::schedule::ScheduleEntry;

/// Payment type id for direct debit collections.
pub const PAYMENT_TYPE_DIRECT_DEBIT: u32 = 1;

/// Repayment status id for a newly created scheduled repayment.
pub const REPAYMENT_STATUS_CREATED: u32 = 1;

/// Party responsible for scheduled instalments.
pub const BORROWER: &str = "Borrower";

/// A scheduled repayment as recorded by the lending system.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Repayment {
    /// Payment date.
    pub date: Date,
    /// 1-based instalment number.
    pub sequence_number: u32,
    /// Month offset from disbursal.
    pub month_number: u32,
    /// Principal portion.
    pub principal_amount: Decimal,
    /// Interest portion.
    pub interest_amount: Decimal,
    /// Payment type id.
    pub payment_type_id: u32,
    /// Repayment status id.
    pub status_id: u32,
    /// Whether the repayment is expected to be collected.
    pub is_expected: bool,
    /// Who pays the instalment.
    pub payer: String,
    /// Whether the repayment has been processed.
    pub processed: bool,
}

impl From<&ScheduleEntry> for Repayment {
    fn from(entry: &ScheduleEntry) -> Self {
        Self {
            date: entry.date,
            sequence_number: entry.sequence_number,
            month_number: entry.sequence_number,
            principal_amount: entry.principal_amount,
            interest_amount: entry.interest_amount,
            payment_type_id: PAYMENT_TYPE_DIRECT_DEBIT,
            status_id: REPAYMENT_STATUS_CREATED,
            is_expected: true,
            payer: BORROWER.to_string(),
            processed: false,
        }
    }
}
