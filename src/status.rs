use chrono::{DateTime, Utc};
use hourglass_rs::SafeTimeProvider;

use crate::decimal::Money;
use crate::events::{Event, EventStore};
use crate::loan::Loan;
use crate::types::LoanStatus;

/// derive a loan's lifecycle status from its outstanding balance and due date
///
/// A settled balance closes the loan regardless of the due date. With a
/// balance outstanding, the loan is overdue only when "now" is strictly
/// after the due date; open-ended loans stay active.
pub fn resolve_status(loan: &Loan, outstanding: Money, now: DateTime<Utc>) -> LoanStatus {
    if !outstanding.is_positive() {
        return LoanStatus::Closed;
    }

    match loan.due_date {
        Some(due_date) if now > due_date => LoanStatus::Overdue,
        _ => LoanStatus::Active,
    }
}

/// decide whether a freshly computed status should be persisted
///
/// Returns the new status only when it differs from the stored one, so
/// callers skip redundant writes. `Closed` is terminal here; reopening a
/// settled loan takes a manual edit of its terms, not a resolver pass.
pub fn status_transition(current: LoanStatus, computed: LoanStatus) -> Option<LoanStatus> {
    if current == LoanStatus::Closed || computed == current {
        return None;
    }
    Some(computed)
}

/// recompute a loan's status after a repayment or term edit
///
/// Applies the transition in place and emits the corresponding events.
/// Returns the new status when one was persisted.
pub fn refresh_status(
    loan: &mut Loan,
    outstanding: Money,
    time_provider: &SafeTimeProvider,
    events: &mut EventStore,
) -> Option<LoanStatus> {
    let now = time_provider.now();
    let computed = resolve_status(loan, outstanding, now);
    let new_status = status_transition(loan.status, computed)?;

    let old_status = loan.status;
    loan.status = new_status;

    events.emit(Event::StatusChanged {
        loan_id: loan.id,
        old_status,
        new_status,
        timestamp: now,
    });
    if new_status == LoanStatus::Closed {
        events.emit(Event::LoanClosed {
            loan_id: loan.id,
            timestamp: now,
        });
    }

    Some(new_status)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use hourglass_rs::TimeSource;

    fn provider_at(y: i32, m: u32, d: u32) -> SafeTimeProvider {
        SafeTimeProvider::new(TimeSource::Test(
            Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap(),
        ))
    }

    fn loan_due(due_offset_days: i64, time: &SafeTimeProvider) -> Loan {
        let now = time.now();
        Loan::originate(
            "Me",
            "Sam",
            true,
            Money::from_major(1_000),
            now - Duration::days(60),
            time,
        )
        .with_due_date(now + Duration::days(due_offset_days))
    }

    #[test]
    fn test_overdue_when_past_due_with_balance() {
        let time = provider_at(2024, 6, 1);
        let loan = loan_due(-1, &time);

        let status = resolve_status(&loan, Money::from_major(50), time.now());

        assert_eq!(status, LoanStatus::Overdue);
    }

    #[test]
    fn test_closed_takes_priority_over_overdue() {
        let time = provider_at(2024, 6, 1);
        let loan = loan_due(-1, &time);

        let status = resolve_status(&loan, Money::ZERO, time.now());

        assert_eq!(status, LoanStatus::Closed);
    }

    #[test]
    fn test_due_date_boundary_is_not_overdue() {
        let time = provider_at(2024, 6, 1);
        let loan = loan_due(0, &time);

        // exactly at the due instant: still active, overdue is strictly after
        let status = resolve_status(&loan, Money::from_major(50), time.now());

        assert_eq!(status, LoanStatus::Active);
    }

    #[test]
    fn test_open_ended_loan_stays_active() {
        let time = provider_at(2024, 6, 1);
        let now = time.now();
        let loan = Loan::originate(
            "Me",
            "Sam",
            true,
            Money::from_major(1_000),
            now - Duration::days(3_650),
            &time,
        );

        let status = resolve_status(&loan, Money::from_major(1_000), now);

        assert_eq!(status, LoanStatus::Active);
    }

    #[test]
    fn test_transition_only_on_change() {
        assert_eq!(
            status_transition(LoanStatus::Active, LoanStatus::Overdue),
            Some(LoanStatus::Overdue)
        );
        assert_eq!(status_transition(LoanStatus::Active, LoanStatus::Active), None);
    }

    #[test]
    fn test_closed_is_terminal() {
        assert_eq!(status_transition(LoanStatus::Closed, LoanStatus::Active), None);
        assert_eq!(status_transition(LoanStatus::Closed, LoanStatus::Overdue), None);
    }

    #[test]
    fn test_refresh_applies_and_emits() {
        let time = provider_at(2024, 6, 1);
        let mut loan = loan_due(-1, &time);
        let mut events = EventStore::new();

        let changed = refresh_status(&mut loan, Money::from_major(50), &time, &mut events);

        assert_eq!(changed, Some(LoanStatus::Overdue));
        assert_eq!(loan.status, LoanStatus::Overdue);
        assert!(matches!(events.events()[0], Event::StatusChanged { .. }));
    }

    #[test]
    fn test_refresh_to_closed_emits_closed_event() {
        let time = provider_at(2024, 6, 1);
        let mut loan = loan_due(30, &time);
        let mut events = EventStore::new();

        let changed = refresh_status(&mut loan, Money::ZERO, &time, &mut events);

        assert_eq!(changed, Some(LoanStatus::Closed));
        assert_eq!(events.events().len(), 2);
        assert!(matches!(events.events()[1], Event::LoanClosed { .. }));
    }

    #[test]
    fn test_refresh_skips_redundant_write() {
        let time = provider_at(2024, 6, 1);
        let mut loan = loan_due(30, &time);
        let mut events = EventStore::new();

        let changed = refresh_status(&mut loan, Money::from_major(50), &time, &mut events);

        assert_eq!(changed, None);
        assert!(events.events().is_empty());
    }
}
