use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// unique identifier for a loan
pub type LoanId = Uuid;

/// unique identifier for a repayment
pub type RepaymentId = Uuid;

/// unique identifier for a ledger entry
pub type EntryId = Uuid;

/// how interest accrues on a loan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InterestType {
    /// no interest, balance is principal minus repayments
    None,
    /// simple interest on the original principal
    Simple,
    /// compound interest at a fixed frequency
    Compound,
}

/// compounding frequency
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CompoundingFrequency {
    Daily,
    Monthly,
    Quarterly,
    Yearly,
}

impl CompoundingFrequency {
    /// get number of compounding periods per year
    pub fn periods_per_year(&self) -> u32 {
        match self {
            CompoundingFrequency::Daily => 365,
            CompoundingFrequency::Monthly => 12,
            CompoundingFrequency::Quarterly => 4,
            CompoundingFrequency::Yearly => 1,
        }
    }
}

/// loan lifecycle status, derived from outstanding balance and due date
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LoanStatus {
    /// balance outstanding, not past due
    Active,
    /// balance outstanding past the due date
    Overdue,
    /// fully repaid
    Closed,
}

/// how a repayment was made; descriptive only, no computational effect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentMethod {
    Cash,
    BankTransfer,
    MobileMoney,
    Card,
    Other,
}

/// kind of ledger entry in the transaction valuation model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LedgerEntryType {
    /// cash received against the balance
    Payment,
    /// principal topped up
    PrincipalIncrease,
    /// principal forgiven or written down
    PrincipalDecrease,
    /// interest recorded as accrued
    InterestAccrual,
}

/// which valuation model a loan's records belong to
///
/// The two models are not reconciled; a loan commits to one for its
/// lifetime depending on which flow created its records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValuationStrategy {
    /// flat repayment list against principal plus accrued interest
    FlatRepayment,
    /// ordered ledger of typed entries with stored running balances
    Ledger,
}
