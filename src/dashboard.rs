use chrono::{DateTime, Duration, Utc};
use hourglass_rs::SafeTimeProvider;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::config::EngineConfig;
use crate::decimal::Money;
use crate::errors::Result;
use crate::loan::{Loan, Repayment};
use crate::types::LoanId;
use crate::valuation::evaluate_loan;

/// portfolio-wide snapshot for the dashboard
///
/// The three due-date buckets are disjoint and hold only loans with a
/// positive outstanding balance; a loan lands in the most urgent bucket it
/// qualifies for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardMetrics {
    pub total_lent: Money,
    pub total_borrowed: Money,
    pub net_balance: Money,
    pub overdue: Vec<LoanId>,
    pub due_within_week: Vec<LoanId>,
    pub due_within_month: Vec<LoanId>,
}

/// roll a loan set up into dashboard metrics as of "now"
pub fn aggregate(
    loans: &[Loan],
    repayments_by_loan: &HashMap<LoanId, Vec<Repayment>>,
    config: &EngineConfig,
    time_provider: &SafeTimeProvider,
) -> Result<DashboardMetrics> {
    let now = time_provider.now();
    let soon = now + Duration::days(config.due_soon_days);
    let later = now + Duration::days(config.due_later_days);

    let mut metrics = DashboardMetrics {
        total_lent: Money::ZERO,
        total_borrowed: Money::ZERO,
        net_balance: Money::ZERO,
        overdue: Vec::new(),
        due_within_week: Vec::new(),
        due_within_month: Vec::new(),
    };

    for loan in loans {
        let repayments = repayments_by_loan
            .get(&loan.id)
            .map(|r| r.as_slice())
            .unwrap_or(&[]);
        let valuation = evaluate_loan(loan, repayments, time_provider)?;

        if !valuation.current_outstanding.is_positive() {
            continue;
        }

        if loan.is_user_lender {
            metrics.total_lent += valuation.current_outstanding;
        } else {
            metrics.total_borrowed += valuation.current_outstanding;
        }

        // most urgent bucket wins; loans due beyond the window or
        // open-ended loans stay unbucketed
        if let Some(due_date) = loan.due_date {
            if now > due_date {
                metrics.overdue.push(loan.id);
            } else if due_date <= soon {
                metrics.due_within_week.push(loan.id);
            } else if due_date <= later {
                metrics.due_within_month.push(loan.id);
            }
        }
    }

    metrics.net_balance = metrics.total_lent - metrics.total_borrowed;
    Ok(metrics)
}

/// the most recent thing that happened on a loan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanActivity {
    pub loan_id: LoanId,
    pub last_activity: DateTime<Utc>,
}

/// per-loan latest repayment date, falling back to loan creation
///
/// The caller sorts by activity date; this only derives the dates.
pub fn recent_activity(
    loans: &[Loan],
    repayments_by_loan: &HashMap<LoanId, Vec<Repayment>>,
) -> Vec<LoanActivity> {
    loans
        .iter()
        .map(|loan| {
            let last_activity = repayments_by_loan
                .get(&loan.id)
                .and_then(|repayments| repayments.iter().map(|r| r.payment_date).max())
                .unwrap_or(loan.created_at);
            LoanActivity {
                loan_id: loan.id,
                last_activity,
            }
        })
        .collect()
}
