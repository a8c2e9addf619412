//! data-hygiene pass over user input
//!
//! Runs before validation so the validators see normalized data. This is
//! plumbing, not financial logic: free text loses markup and control
//! characters, numeric fields lose their sign, tag lists lose duplicates.

use std::collections::HashSet;

use crate::decimal::Money;
use crate::validation::{LoanDraft, RepaymentDraft};

/// strip HTML-like markup and control characters, then trim
pub fn sanitize_text(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut in_tag = false;

    for c in input.chars() {
        match c {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if in_tag => {}
            _ if c.is_control() => {}
            _ => out.push(c),
        }
    }

    out.trim().to_string()
}

/// clamp an amount to a non-negative value
pub fn clamp_amount(amount: Money) -> Money {
    amount.max(Money::ZERO)
}

/// sanitize each tag and drop duplicates, case-insensitively, first wins
pub fn dedupe_tags(tags: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut out = Vec::new();

    for tag in tags {
        let clean = sanitize_text(&tag);
        if clean.is_empty() {
            continue;
        }
        if seen.insert(clean.to_lowercase()) {
            out.push(clean);
        }
    }

    out
}

/// normalize a loan draft before validation
pub fn sanitize_loan_draft(draft: LoanDraft) -> LoanDraft {
    LoanDraft {
        lender_name: sanitize_text(&draft.lender_name),
        borrower_name: sanitize_text(&draft.borrower_name),
        currency: sanitize_text(&draft.currency),
        principal_amount: clamp_amount(draft.principal_amount),
        tags: dedupe_tags(draft.tags),
        notes: sanitize_text(&draft.notes),
        ..draft
    }
}

/// normalize a repayment draft before validation
pub fn sanitize_repayment_draft(draft: RepaymentDraft) -> RepaymentDraft {
    RepaymentDraft {
        payment_amount: clamp_amount(draft.payment_amount),
        notes: sanitize_text(&draft.notes),
        ..draft
    }
}
