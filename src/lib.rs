pub mod config;
pub mod dashboard;
pub mod decimal;
pub mod errors;
pub mod events;
pub mod interest;
pub mod ledger;
pub mod loan;
pub mod sanitize;
pub mod status;
pub mod types;
pub mod validation;
pub mod valuation;
pub mod view;

// re-export key types
pub use config::EngineConfig;
pub use dashboard::{aggregate, recent_activity, DashboardMetrics, LoanActivity};
pub use decimal::{Money, Rate};
pub use errors::{LoanError, Result};
pub use events::{Event, EventStore};
pub use interest::{
    compute_interest, CompoundingEngine, InterestCalculation, InterestCalculator,
    SimpleInterestEngine,
};
pub use ledger::{evaluate_ledger, LedgerValuation};
pub use loan::{LedgerEntry, Loan, Repayment};
pub use sanitize::{sanitize_loan_draft, sanitize_repayment_draft};
pub use status::{refresh_status, resolve_status, status_transition};
pub use types::{
    CompoundingFrequency, EntryId, InterestType, LedgerEntryType, LoanId, LoanStatus,
    PaymentMethod, RepaymentId, ValuationStrategy,
};
pub use validation::{
    has_errors, validate_loan, validate_repayment, LoanDraft, RepaymentDraft, Severity,
    ValidationIssue,
};
pub use valuation::{evaluate_loan, LoanValuation};
pub use view::LoanView;

// re-export external dependencies that users will need
pub use chrono;
pub use hourglass_rs::{SafeTimeProvider, TimeSource};
pub use rust_decimal::Decimal;
pub use uuid::Uuid;
