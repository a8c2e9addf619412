use serde::{Deserialize, Serialize};

use crate::decimal::Money;
use crate::loan::{LedgerEntry, Loan};
use crate::types::LedgerEntryType;

/// snapshot derived from a loan's transaction ledger
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerValuation {
    /// principal after replaying increases and decreases, never negative
    pub current_principal: Money,
    /// the stored balance of the latest entry; authoritative, not recomputed
    pub current_outstanding: Money,
    /// interest the system recorded as accruing (accrual entries only)
    pub total_interest_accrued: Money,
    /// cash collected through payment entries
    pub total_paid: Money,
}

/// value a loan from its ordered ledger of typed entries
///
/// Outstanding balance comes straight from the chronologically-latest
/// entry's `balance_after`; with no entries it defaults to the loan's
/// principal. Principal is replayed independently from the entry history.
pub fn evaluate_ledger(loan: &Loan, entries: &[LedgerEntry]) -> LedgerValuation {
    let current_outstanding = entries
        .iter()
        .max_by_key(|e| e.entry_date)
        .map(|e| e.balance_after)
        .unwrap_or(loan.principal_amount);

    let mut ordered: Vec<&LedgerEntry> = entries.iter().collect();
    ordered.sort_by_key(|e| e.entry_date);

    let mut current_principal = loan.principal_amount;
    let mut total_interest_accrued = Money::ZERO;
    let mut total_paid = Money::ZERO;

    for entry in ordered {
        match entry.entry_type {
            LedgerEntryType::PrincipalIncrease => {
                current_principal += entry.principal_change;
            }
            LedgerEntryType::PrincipalDecrease => {
                current_principal =
                    (current_principal - entry.principal_change).max(Money::ZERO);
            }
            LedgerEntryType::InterestAccrual => {
                total_interest_accrued += entry.interest_portion;
            }
            LedgerEntryType::Payment => {
                total_paid += entry.paid_amount;
            }
        }
    }

    LedgerValuation {
        current_principal,
        current_outstanding,
        total_interest_accrued,
        total_paid,
    }
}
