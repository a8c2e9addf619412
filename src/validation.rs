use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::config::EngineConfig;
use crate::decimal::{Money, Rate};
use crate::loan::Loan;
use crate::types::{CompoundingFrequency, InterestType, PaymentMethod};

/// how strongly an issue blocks acceptance
///
/// Errors block submission; warnings are soft and the caller decides the
/// confirmation UX.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Severity {
    Warning,
    Error,
}

/// a single human-readable finding from a validator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationIssue {
    pub severity: Severity,
    pub message: String,
}

impl ValidationIssue {
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            message: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.severity {
            Severity::Error => write!(f, "error: {}", self.message),
            Severity::Warning => write!(f, "warning: {}", self.message),
        }
    }
}

/// true when any issue in the list blocks acceptance
pub fn has_errors(issues: &[ValidationIssue]) -> bool {
    issues.iter().any(ValidationIssue::is_error)
}

/// candidate loan terms before acceptance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanDraft {
    pub lender_name: String,
    pub borrower_name: String,
    pub is_user_lender: bool,
    pub principal_amount: Money,
    pub currency: String,
    pub interest_type: InterestType,
    pub interest_rate: Option<Rate>,
    pub compounding_frequency: Option<CompoundingFrequency>,
    pub start_date: Option<DateTime<Utc>>,
    pub due_date: Option<DateTime<Utc>>,
    pub tags: Vec<String>,
    pub notes: String,
}

impl Default for LoanDraft {
    fn default() -> Self {
        Self {
            lender_name: String::new(),
            borrower_name: String::new(),
            is_user_lender: true,
            principal_amount: Money::ZERO,
            currency: "USD".to_string(),
            interest_type: InterestType::None,
            interest_rate: None,
            compounding_frequency: None,
            start_date: None,
            due_date: None,
            tags: Vec::new(),
            notes: String::new(),
        }
    }
}

/// candidate repayment before acceptance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepaymentDraft {
    pub payment_amount: Money,
    pub payment_date: Option<DateTime<Utc>>,
    pub payment_method: Option<PaymentMethod>,
    pub notes: String,
}

impl Default for RepaymentDraft {
    fn default() -> Self {
        Self {
            payment_amount: Money::ZERO,
            payment_date: None,
            payment_method: None,
            notes: String::new(),
        }
    }
}

/// check a loan draft's structural and business validity
///
/// Returns every violation at once; an empty error set means the draft is
/// acceptable. Run the sanitizer first so the checks see normalized input.
pub fn validate_loan(draft: &LoanDraft, config: &EngineConfig) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();

    if draft.lender_name.trim().is_empty() {
        issues.push(ValidationIssue::error("lender name is required"));
    }
    if draft.borrower_name.trim().is_empty() {
        issues.push(ValidationIssue::error("borrower name is required"));
    }

    if !draft.principal_amount.is_positive() {
        issues.push(ValidationIssue::error(
            "principal amount must be greater than zero",
        ));
    } else if draft.principal_amount > config.max_principal {
        issues.push(ValidationIssue::error(format!(
            "principal amount cannot exceed {}",
            config.max_principal
        )));
    } else if draft.principal_amount > config.large_amount_threshold {
        issues.push(ValidationIssue::warning(format!(
            "principal amount {} is unusually large; please confirm",
            draft.principal_amount
        )));
    }

    match draft.start_date {
        None => issues.push(ValidationIssue::error("start date is required")),
        Some(start) => {
            if let Some(due) = draft.due_date {
                if due < start {
                    issues.push(ValidationIssue::error(
                        "due date cannot be before the start date",
                    ));
                }
            }
        }
    }

    if draft.interest_type != InterestType::None {
        match draft.interest_rate {
            None => issues.push(ValidationIssue::error(
                "interest rate is required for interest-bearing loans",
            )),
            Some(rate) => {
                if rate.as_decimal() < Decimal::ZERO || rate.as_decimal() > Decimal::ONE {
                    issues.push(ValidationIssue::error(
                        "interest rate must be between 0% and 100%",
                    ));
                }
            }
        }
    }

    if draft.interest_type == InterestType::Compound && draft.compounding_frequency.is_none() {
        issues.push(ValidationIssue::error(
            "compounding frequency is required for compound interest",
        ));
    }

    issues
}

/// check a repayment draft against its loan and the current outstanding balance
pub fn validate_repayment(
    draft: &RepaymentDraft,
    loan: &Loan,
    current_outstanding: Money,
    config: &EngineConfig,
) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();

    if !draft.payment_amount.is_positive() {
        issues.push(ValidationIssue::error(
            "payment amount must be greater than zero",
        ));
    } else {
        let ceiling = current_outstanding * config.overpayment_tolerance;
        if draft.payment_amount > ceiling {
            issues.push(ValidationIssue::error(format!(
                "payment amount {} exceeds the outstanding balance {} beyond tolerance",
                draft.payment_amount, current_outstanding
            )));
        } else if draft.payment_amount > current_outstanding {
            issues.push(ValidationIssue::warning(
                "payment amount exceeds the outstanding balance; the excess will be absorbed",
            ));
        }
    }

    match draft.payment_date {
        None => issues.push(ValidationIssue::error("payment date is required")),
        Some(date) => {
            if date < loan.start_date {
                issues.push(ValidationIssue::error(
                    "payment date cannot be before the loan start date",
                ));
            }
        }
    }

    if draft.payment_method.is_none() {
        issues.push(ValidationIssue::error("payment method is required"));
    }

    issues
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use hourglass_rs::{SafeTimeProvider, TimeSource};
    use rust_decimal_macros::dec;

    fn valid_draft() -> LoanDraft {
        LoanDraft {
            lender_name: "Me".to_string(),
            borrower_name: "Sam".to_string(),
            principal_amount: Money::from_major(1_000),
            start_date: Some(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()),
            ..LoanDraft::default()
        }
    }

    fn fixture_loan() -> Loan {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let time = SafeTimeProvider::new(TimeSource::Test(start));
        Loan::originate("Me", "Sam", true, Money::from_major(1_000), start, &time)
    }

    #[test]
    fn test_valid_loan_has_no_issues() {
        let issues = validate_loan(&valid_draft(), &EngineConfig::default());
        assert!(issues.is_empty());
    }

    #[test]
    fn test_negative_principal_mentions_principal() {
        let draft = LoanDraft {
            principal_amount: Money::from_major(-5),
            ..valid_draft()
        };

        let issues = validate_loan(&draft, &EngineConfig::default());

        assert!(has_errors(&issues));
        assert!(issues.iter().any(|i| i.message.contains("principal amount")));
    }

    #[test]
    fn test_blank_names_are_rejected() {
        let draft = LoanDraft {
            lender_name: "   ".to_string(),
            borrower_name: String::new(),
            ..valid_draft()
        };

        let issues = validate_loan(&draft, &EngineConfig::default());

        assert_eq!(issues.iter().filter(|i| i.is_error()).count(), 2);
    }

    #[test]
    fn test_due_before_start_is_rejected() {
        let start = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
        let draft = LoanDraft {
            start_date: Some(start),
            due_date: Some(start - Duration::days(1)),
            ..valid_draft()
        };

        let issues = validate_loan(&draft, &EngineConfig::default());

        assert!(issues.iter().any(|i| i.message.contains("due date")));
    }

    #[test]
    fn test_interest_terms_are_checked() {
        let missing_rate = LoanDraft {
            interest_type: InterestType::Simple,
            ..valid_draft()
        };
        assert!(has_errors(&validate_loan(
            &missing_rate,
            &EngineConfig::default()
        )));

        let out_of_range = LoanDraft {
            interest_type: InterestType::Simple,
            interest_rate: Some(Rate::from_percentage(150)),
            ..valid_draft()
        };
        assert!(has_errors(&validate_loan(
            &out_of_range,
            &EngineConfig::default()
        )));

        let missing_frequency = LoanDraft {
            interest_type: InterestType::Compound,
            interest_rate: Some(Rate::from_percentage(5)),
            ..valid_draft()
        };
        let issues = validate_loan(&missing_frequency, &EngineConfig::default());
        assert!(issues.iter().any(|i| i.message.contains("compounding frequency")));
    }

    #[test]
    fn test_large_principal_warns_but_does_not_block() {
        let draft = LoanDraft {
            principal_amount: Money::from_major(5_000_000),
            ..valid_draft()
        };

        let issues = validate_loan(&draft, &EngineConfig::default());

        assert!(!has_errors(&issues));
        assert!(issues.iter().any(|i| i.severity == Severity::Warning));
    }

    #[test]
    fn test_repayment_within_tolerance_is_accepted() {
        let loan = fixture_loan();
        let outstanding = Money::from_major(100);
        let draft = RepaymentDraft {
            payment_amount: Money::from_decimal(dec!(105)),
            payment_date: Some(loan.start_date + Duration::days(10)),
            payment_method: Some(PaymentMethod::Cash),
            ..RepaymentDraft::default()
        };

        let issues = validate_repayment(&draft, &loan, outstanding, &EngineConfig::default());

        assert!(!has_errors(&issues));
        // over the balance but within tolerance: soft warning only
        assert!(issues.iter().any(|i| i.severity == Severity::Warning));
    }

    #[test]
    fn test_repayment_beyond_tolerance_is_rejected() {
        let loan = fixture_loan();
        let outstanding = Money::from_major(100);
        let draft = RepaymentDraft {
            payment_amount: Money::from_decimal(dec!(120)),
            payment_date: Some(loan.start_date + Duration::days(10)),
            payment_method: Some(PaymentMethod::Cash),
            ..RepaymentDraft::default()
        };

        let issues = validate_repayment(&draft, &loan, outstanding, &EngineConfig::default());

        assert!(has_errors(&issues));
    }

    #[test]
    fn test_repayment_requires_date_method_and_amount() {
        let loan = fixture_loan();
        let draft = RepaymentDraft::default();

        let issues =
            validate_repayment(&draft, &loan, Money::from_major(100), &EngineConfig::default());

        assert_eq!(issues.iter().filter(|i| i.is_error()).count(), 3);
    }

    #[test]
    fn test_repayment_before_loan_start_is_rejected() {
        let loan = fixture_loan();
        let draft = RepaymentDraft {
            payment_amount: Money::from_major(50),
            payment_date: Some(loan.start_date - Duration::days(1)),
            payment_method: Some(PaymentMethod::BankTransfer),
            ..RepaymentDraft::default()
        };

        let issues =
            validate_repayment(&draft, &loan, Money::from_major(100), &EngineConfig::default());

        assert!(issues.iter().any(|i| i.message.contains("payment date")));
    }
}
