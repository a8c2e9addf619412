use chrono::{DateTime, Utc};
use hourglass_rs::SafeTimeProvider;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::decimal::{Money, Rate};
use crate::events::{Event, EventStore};
use crate::types::{
    CompoundingFrequency, EntryId, InterestType, LedgerEntryType, LoanId, LoanStatus,
    PaymentMethod, RepaymentId,
};

/// a single lending agreement between two people
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Loan {
    pub id: LoanId,
    pub lender_name: String,
    pub borrower_name: String,
    /// whether the acting user is the lender; selects which name is the counterparty
    pub is_user_lender: bool,
    pub principal_amount: Money,
    /// display label only, never converted
    pub currency: String,
    pub interest_type: InterestType,
    /// annual rate; None when interest_type is None
    pub interest_rate: Option<Rate>,
    /// required when interest_type is Compound
    pub compounding_frequency: Option<CompoundingFrequency>,
    pub start_date: DateTime<Utc>,
    /// open-ended loans have no due date
    pub due_date: Option<DateTime<Utc>>,
    /// derived from repayment state, persisted between recomputations
    pub status: LoanStatus,
    pub tags: Vec<String>,
    pub notes: String,
    pub created_at: DateTime<Utc>,
}

impl Loan {
    /// create a new interest-free loan starting at the given date
    pub fn originate(
        lender_name: impl Into<String>,
        borrower_name: impl Into<String>,
        is_user_lender: bool,
        principal_amount: Money,
        start_date: DateTime<Utc>,
        time_provider: &SafeTimeProvider,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            lender_name: lender_name.into(),
            borrower_name: borrower_name.into(),
            is_user_lender,
            principal_amount,
            currency: "USD".to_string(),
            interest_type: InterestType::None,
            interest_rate: None,
            compounding_frequency: None,
            start_date,
            due_date: None,
            status: LoanStatus::Active,
            tags: Vec::new(),
            notes: String::new(),
            created_at: time_provider.now(),
        }
    }

    /// attach simple interest at an annual rate
    pub fn with_simple_interest(mut self, annual_rate: Rate) -> Self {
        self.interest_type = InterestType::Simple;
        self.interest_rate = Some(annual_rate);
        self.compounding_frequency = None;
        self
    }

    /// attach compound interest at an annual rate and frequency
    pub fn with_compound_interest(
        mut self,
        annual_rate: Rate,
        frequency: CompoundingFrequency,
    ) -> Self {
        self.interest_type = InterestType::Compound;
        self.interest_rate = Some(annual_rate);
        self.compounding_frequency = Some(frequency);
        self
    }

    pub fn with_due_date(mut self, due_date: DateTime<Utc>) -> Self {
        self.due_date = Some(due_date);
        self
    }

    pub fn with_currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = currency.into();
        self
    }

    /// emit the creation event and return the loan
    pub fn record(self, events: &mut EventStore) -> Self {
        events.emit(Event::LoanCreated {
            loan_id: self.id,
            principal: self.principal_amount,
            timestamp: self.created_at,
        });
        self
    }

    /// the name of the other party from the acting user's perspective
    pub fn counterparty_name(&self) -> &str {
        if self.is_user_lender {
            &self.borrower_name
        } else {
            &self.lender_name
        }
    }

    pub fn has_interest(&self) -> bool {
        self.interest_type != InterestType::None
    }

    pub fn is_closed(&self) -> bool {
        self.status == LoanStatus::Closed
    }
}

/// a single payment against a loan's flat running balance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Repayment {
    pub id: RepaymentId,
    pub loan_id: LoanId,
    pub payment_amount: Money,
    pub payment_date: DateTime<Utc>,
    pub payment_method: PaymentMethod,
    pub notes: String,
}

impl Repayment {
    pub fn new(
        loan_id: LoanId,
        payment_amount: Money,
        payment_date: DateTime<Utc>,
        payment_method: PaymentMethod,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            loan_id,
            payment_amount,
            payment_date,
            payment_method,
            notes: String::new(),
        }
    }

    /// emit the repayment event and return the repayment
    pub fn record(self, events: &mut EventStore) -> Self {
        events.emit(Event::RepaymentRecorded {
            loan_id: self.loan_id,
            repayment_id: self.id,
            amount: self.payment_amount,
            timestamp: self.payment_date,
        });
        self
    }
}

/// a typed entry in the ledger valuation model
///
/// `balance_after` is the outstanding balance computed by whoever wrote the
/// entry; the latest entry's value is authoritative and never recomputed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerEntry {
    pub id: EntryId,
    pub loan_id: LoanId,
    pub entry_type: LedgerEntryType,
    /// signed effect on principal; meaningful for increase/decrease entries
    pub principal_change: Money,
    /// interest component of a payment, or the accrued amount for accruals
    pub interest_portion: Money,
    /// cash paid or received
    pub paid_amount: Money,
    pub balance_after: Money,
    pub entry_date: DateTime<Utc>,
    pub notes: String,
}

impl LedgerEntry {
    fn new(
        loan_id: LoanId,
        entry_type: LedgerEntryType,
        entry_date: DateTime<Utc>,
        balance_after: Money,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            loan_id,
            entry_type,
            principal_change: Money::ZERO,
            interest_portion: Money::ZERO,
            paid_amount: Money::ZERO,
            balance_after,
            entry_date,
            notes: String::new(),
        }
    }

    /// cash payment, splitting out the interest portion it covered
    pub fn payment(
        loan_id: LoanId,
        paid_amount: Money,
        interest_portion: Money,
        balance_after: Money,
        entry_date: DateTime<Utc>,
    ) -> Self {
        let mut entry = Self::new(loan_id, LedgerEntryType::Payment, entry_date, balance_after);
        entry.paid_amount = paid_amount;
        entry.interest_portion = interest_portion;
        entry
    }

    /// principal top-up
    pub fn principal_increase(
        loan_id: LoanId,
        amount: Money,
        balance_after: Money,
        entry_date: DateTime<Utc>,
    ) -> Self {
        let mut entry = Self::new(
            loan_id,
            LedgerEntryType::PrincipalIncrease,
            entry_date,
            balance_after,
        );
        entry.principal_change = amount;
        entry
    }

    /// partial principal forgiveness
    pub fn principal_decrease(
        loan_id: LoanId,
        amount: Money,
        balance_after: Money,
        entry_date: DateTime<Utc>,
    ) -> Self {
        let mut entry = Self::new(
            loan_id,
            LedgerEntryType::PrincipalDecrease,
            entry_date,
            balance_after,
        );
        entry.principal_change = amount;
        entry
    }

    /// interest recorded as having accrued
    pub fn interest_accrual(
        loan_id: LoanId,
        amount: Money,
        balance_after: Money,
        entry_date: DateTime<Utc>,
    ) -> Self {
        let mut entry = Self::new(
            loan_id,
            LedgerEntryType::InterestAccrual,
            entry_date,
            balance_after,
        );
        entry.interest_portion = amount;
        entry
    }

    /// emit the ledger event and return the entry
    pub fn record(self, events: &mut EventStore) -> Self {
        events.emit(Event::LedgerEntryRecorded {
            loan_id: self.loan_id,
            entry_id: self.id,
            entry_type: self.entry_type,
            balance_after: self.balance_after,
            timestamp: self.entry_date,
        });
        self
    }
}
