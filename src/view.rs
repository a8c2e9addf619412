/// serialization support for reporting snapshots
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::decimal::{Money, Rate};
use crate::loan::Loan;
use crate::types::{CompoundingFrequency, InterestType, LoanId, LoanStatus};
use crate::valuation::LoanValuation;

/// serializable view of a loan and its valuation at one instant
#[derive(Debug, Serialize, Deserialize)]
pub struct LoanView {
    pub id: LoanId,
    pub lender_name: String,
    pub borrower_name: String,
    pub counterparty: String,
    pub is_user_lender: bool,
    pub currency: String,
    pub status: LoanStatus,
    pub start_date: DateTime<Utc>,
    pub due_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub terms: TermsView,
    pub amounts: AmountsView,
    /// whole days past due, when the loan is past its due date
    pub days_overdue: Option<i64>,
    /// whole days until due, when the due date is still ahead
    pub days_until_due: Option<i64>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TermsView {
    pub principal: Money,
    pub interest_type: InterestType,
    pub interest_rate: Option<Rate>,
    pub compounding_frequency: Option<CompoundingFrequency>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AmountsView {
    pub interest_amount: Money,
    pub total_amount_due: Money,
    pub total_repaid: Money,
    pub current_outstanding: Money,
    pub progress_ratio: Decimal,
}

impl LoanView {
    pub fn from_loan(loan: &Loan, valuation: &LoanValuation, now: DateTime<Utc>) -> Self {
        let (days_overdue, days_until_due) = match loan.due_date {
            Some(due) if now > due => (Some((now - due).num_days()), None),
            Some(due) => (None, Some((due - now).num_days())),
            None => (None, None),
        };

        LoanView {
            id: loan.id,
            lender_name: loan.lender_name.clone(),
            borrower_name: loan.borrower_name.clone(),
            counterparty: loan.counterparty_name().to_string(),
            is_user_lender: loan.is_user_lender,
            currency: loan.currency.clone(),
            status: loan.status,
            start_date: loan.start_date,
            due_date: loan.due_date,
            created_at: loan.created_at,
            terms: TermsView {
                principal: loan.principal_amount,
                interest_type: loan.interest_type,
                interest_rate: loan.interest_rate,
                compounding_frequency: loan.compounding_frequency,
            },
            amounts: AmountsView {
                interest_amount: valuation.interest_amount,
                total_amount_due: valuation.total_amount_due,
                total_repaid: valuation.total_repaid,
                current_outstanding: valuation.current_outstanding,
                progress_ratio: valuation.progress_ratio(),
            },
            days_overdue,
            days_until_due,
        }
    }

    /// convert to pretty-printed json string
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
