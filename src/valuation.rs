use hourglass_rs::SafeTimeProvider;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::decimal::{Money, Rate};
use crate::errors::Result;
use crate::interest::compute_interest;
use crate::loan::{Loan, Repayment};

/// snapshot of a loan's financial position at one evaluation instant
///
/// Interest accrues continuously with wall-clock time, so a valuation is
/// only valid for the instant it was produced and is never cached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanValuation {
    pub principal: Money,
    pub interest_amount: Money,
    pub total_amount_due: Money,
    pub total_repaid: Money,
    pub current_outstanding: Money,
}

impl LoanValuation {
    /// fraction of the total due already repaid, clamped to 0..=1
    pub fn progress_ratio(&self) -> Decimal {
        if !self.total_amount_due.is_positive() {
            return Decimal::ZERO;
        }
        let ratio = self.total_repaid.as_decimal() / self.total_amount_due.as_decimal();
        ratio.max(Decimal::ZERO).min(Decimal::ONE)
    }
}

/// value a loan against its full repayment list as of "now"
///
/// Interest runs from the loan's start date to the evaluation instant.
/// Overpayment is absorbed: outstanding never goes below zero.
pub fn evaluate_loan(
    loan: &Loan,
    repayments: &[Repayment],
    time_provider: &SafeTimeProvider,
) -> Result<LoanValuation> {
    let interest_amount = compute_interest(
        loan.principal_amount,
        loan.interest_rate.unwrap_or(Rate::ZERO),
        loan.interest_type,
        loan.compounding_frequency,
        loan.start_date,
        time_provider.now(),
    )?;

    let total_amount_due = loan.principal_amount + interest_amount;

    let total_repaid = repayments
        .iter()
        .fold(Money::ZERO, |sum, r| sum + r.payment_amount);

    let current_outstanding = (total_amount_due - total_repaid).max(Money::ZERO);

    Ok(LoanValuation {
        principal: loan.principal_amount,
        interest_amount,
        total_amount_due,
        total_repaid,
        current_outstanding,
    })
}
