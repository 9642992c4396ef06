//! Amortisation schedule entries and the generated schedule.

use amortise_core::types::Date;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::error::ScheduleError;
use crate::repayment::Repayment;

/// A single monthly instalment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleEntry {
    /// 1-based instalment number, also the month offset from disbursal.
    pub sequence_number: u32,
    /// Payment date, always a working day.
    pub date: Date,
    /// Portion of the payment that reduces the outstanding balance.
    pub principal_amount: Decimal,
    /// Interest on the balance outstanding at the start of the period.
    pub interest_amount: Decimal,
}

impl ScheduleEntry {
    /// Creates a new schedule entry.
    #[must_use]
    pub fn new(
        sequence_number: u32,
        date: Date,
        principal_amount: Decimal,
        interest_amount: Decimal,
    ) -> Self {
        Self {
            sequence_number,
            date,
            principal_amount,
            interest_amount,
        }
    }

    /// Total amount due for this instalment.
    #[must_use]
    pub fn payment(&self) -> Decimal {
        self.principal_amount + self.interest_amount
    }

    /// Returns a copy with both amounts rounded to `dp` decimal places.
    #[must_use]
    pub fn rounded(&self, dp: u32) -> Self {
        Self {
            principal_amount: round_money(self.principal_amount, dp),
            interest_amount: round_money(self.interest_amount, dp),
            ..*self
        }
    }
}

/// A complete balloon-adjusted amortisation schedule.
///
/// Entries are ordered by `sequence_number` (1..=n) and their payment dates
/// strictly increase. The principal portions sum to the loan principal; the
/// final entry carries any balloon residual.
///
/// Deserialisation rejects schedules with no entries or with gaps in the
/// sequence numbers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ScheduleData")]
pub struct AmortisedSchedule {
    principal: Decimal,
    level_payment: Decimal,
    balloon_amount: Decimal,
    entries: Vec<ScheduleEntry>,
}

impl AmortisedSchedule {
    pub(crate) fn new(
        principal: Decimal,
        level_payment: Decimal,
        balloon_amount: Decimal,
        entries: Vec<ScheduleEntry>,
    ) -> Self {
        debug_assert!(!entries.is_empty());
        Self {
            principal,
            level_payment,
            balloon_amount,
            entries,
        }
    }

    /// The loan principal this schedule repays.
    #[must_use]
    pub fn principal(&self) -> Decimal {
        self.principal
    }

    /// The level monthly payment (principal plus interest) before the final
    /// balloon reconciliation.
    #[must_use]
    pub fn level_payment(&self) -> Decimal {
        self.level_payment
    }

    /// The balloon sized from the amortisation term.
    #[must_use]
    pub fn balloon_amount(&self) -> Decimal {
        self.balloon_amount
    }

    /// Schedule entries in payment order.
    #[must_use]
    pub fn entries(&self) -> &[ScheduleEntry] {
        &self.entries
    }

    /// Consumes the schedule, returning its entries.
    #[must_use]
    pub fn into_entries(self) -> Vec<ScheduleEntry> {
        self.entries
    }

    /// Number of instalments.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false: generation and deserialisation both require entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over the entries.
    pub fn iter(&self) -> std::slice::Iter<'_, ScheduleEntry> {
        self.entries.iter()
    }

    /// The first instalment.
    #[must_use]
    pub fn first_entry(&self) -> Option<&ScheduleEntry> {
        self.entries.first()
    }

    /// The final instalment, including the balloon.
    #[must_use]
    pub fn final_entry(&self) -> Option<&ScheduleEntry> {
        self.entries.last()
    }

    /// Date of the first instalment.
    #[must_use]
    pub fn first_payment_date(&self) -> Option<Date> {
        self.first_entry().map(|e| e.date)
    }

    /// Date of the final instalment.
    #[must_use]
    pub fn final_payment_date(&self) -> Option<Date> {
        self.final_entry().map(|e| e.date)
    }

    /// Sum of principal portions.
    #[must_use]
    pub fn total_principal(&self) -> Decimal {
        self.entries.iter().map(|e| e.principal_amount).sum()
    }

    /// Sum of interest portions.
    #[must_use]
    pub fn total_interest(&self) -> Decimal {
        self.entries.iter().map(|e| e.interest_amount).sum()
    }

    /// Everything the borrower pays over the life of the schedule.
    #[must_use]
    pub fn total_repayable(&self) -> Decimal {
        self.total_principal() + self.total_interest()
    }

    /// Returns the schedule rounded to `dp` decimal places (2 for pence/cents).
    ///
    /// Each amount is rounded half away from zero. The final principal is
    /// then recomputed from the principal less the other rounded portions, so
    /// the rounded principal portions still sum to the principal exactly.
    #[must_use]
    pub fn rounded(&self, dp: u32) -> Self {
        let mut entries: Vec<ScheduleEntry> = self.entries.iter().map(|e| e.rounded(dp)).collect();

        if let Some((last, rest)) = entries.split_last_mut() {
            let allocated: Decimal = rest.iter().map(|e| e.principal_amount).sum();
            last.principal_amount = self.principal - allocated;
        }

        Self {
            principal: self.principal,
            level_payment: round_money(self.level_payment, dp),
            balloon_amount: round_money(self.balloon_amount, dp),
            entries,
        }
    }

    /// Repayment records for the lending system, one per entry.
    #[must_use]
    pub fn repayments(&self) -> Vec<Repayment> {
        self.entries.iter().map(Repayment::from).collect()
    }
}

impl<'a> IntoIterator for &'a AmortisedSchedule {
    type Item = &'a ScheduleEntry;
    type IntoIter = std::slice::Iter<'a, ScheduleEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[derive(Deserialize)]
struct ScheduleData {
    principal: Decimal,
    level_payment: Decimal,
    balloon_amount: Decimal,
    entries: Vec<ScheduleEntry>,
}

impl TryFrom<ScheduleData> for AmortisedSchedule {
    type Error = ScheduleError;

    fn try_from(data: ScheduleData) -> Result<Self, Self::Error> {
        if data.entries.is_empty() {
            return Err(ScheduleError::config("schedule has no entries"));
        }
        if let Some((expected, entry)) = (1u32..)
            .zip(&data.entries)
            .find(|(expected, entry)| entry.sequence_number != *expected)
        {
            return Err(ScheduleError::config(format!(
                "entry {} found where entry {} was expected",
                entry.sequence_number, expected
            )));
        }

        Ok(Self::new(
            data.principal,
            data.level_payment,
            data.balloon_amount,
            data.entries,
        ))
    }
}

fn round_money(amount: Decimal, dp: u32) -> Decimal {
    amount.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> Date {
        Date::from_ymd(y, m, d).unwrap()
    }

    fn three_thirds() -> AmortisedSchedule {
        AmortisedSchedule::new(
            dec!(100),
            dec!(34.335),
            dec!(0),
            vec![
                ScheduleEntry::new(1, date(2021, 1, 5), dec!(33.335), dec!(1.0)),
                ScheduleEntry::new(2, date(2021, 2, 5), dec!(33.335), dec!(0.665)),
                ScheduleEntry::new(3, date(2021, 3, 5), dec!(33.330), dec!(0.3333)),
            ],
        )
    }

    #[test]
    fn test_entry_payment() {
        let entry = ScheduleEntry::new(1, date(2021, 1, 5), dec!(3255.76), dec!(2078.47));
        assert_eq!(entry.payment(), dec!(5334.23));
    }

    #[test]
    fn test_totals() {
        let s = three_thirds();
        assert_eq!(s.total_principal(), dec!(100));
        assert_eq!(s.total_interest(), dec!(1.9983));
        assert_eq!(s.total_repayable(), dec!(101.9983));
        assert_eq!(s.len(), 3);
        assert!(!s.is_empty());
        assert_eq!(s.first_payment_date(), Some(date(2021, 1, 5)));
        assert_eq!(s.final_payment_date(), Some(date(2021, 3, 5)));
    }

    #[test]
    fn test_rounded_preserves_principal() {
        let rounded = three_thirds().rounded(2);
        let principals: Vec<_> = rounded.iter().map(|e| e.principal_amount).collect();

        // 33.335 rounds half away from zero; the last entry absorbs the difference.
        assert_eq!(principals, vec![dec!(33.34), dec!(33.34), dec!(33.32)]);
        assert_eq!(rounded.total_principal(), dec!(100));
        assert_eq!(rounded.entries()[1].interest_amount, dec!(0.67));
        assert_eq!(rounded.level_payment(), dec!(34.34));
    }

    #[test]
    fn test_iteration_order() {
        let s = three_thirds();
        let seq: Vec<_> = (&s).into_iter().map(|e| e.sequence_number).collect();
        assert_eq!(seq, vec![1, 2, 3]);
        assert_eq!(s.into_entries().len(), 3);
    }

    #[test]
    fn test_serde_roundtrip() {
        let s = three_thirds();
        let json = serde_json::to_string(&s).unwrap();
        assert!(json.contains("\"2021-02-05\""));
        assert!(json.contains("\"33.335\""));
        let parsed: AmortisedSchedule = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, s);
    }

    #[test]
    fn test_deserialise_rejects_empty_schedule() {
        let json = r#"{"principal":"100","level_payment":"34.335","balloon_amount":"0","entries":[]}"#;
        let err = serde_json::from_str::<AmortisedSchedule>(json).unwrap_err();
        assert!(err.to_string().contains("no entries"));
    }

    #[test]
    fn test_deserialise_rejects_sequence_gap() {
        let mut s = three_thirds();
        s.entries[1].sequence_number = 5;
        let json = serde_json::to_string(&s).unwrap();
        let err = serde_json::from_str::<AmortisedSchedule>(&json).unwrap_err();
        assert!(err.to_string().contains("entry 5 found where entry 2 was expected"));
    }
}
