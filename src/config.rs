use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::decimal::Money;
use crate::errors::{LoanError, Result};

/// tunable business limits for validation and dashboard bucketing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// hard cap on principal; anything above is treated as fat-finger entry
    pub max_principal: Money,
    /// soft threshold above which a principal draws a confirmation warning
    pub large_amount_threshold: Money,
    /// multiple of the outstanding balance a repayment may exceed before
    /// it is rejected as likely error
    pub overpayment_tolerance: Decimal,
    /// window for the "due soon" dashboard bucket
    pub due_soon_days: i64,
    /// window for the wider "due later" dashboard bucket
    pub due_later_days: i64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_principal: Money::from_major(1_000_000_000),
            large_amount_threshold: Money::from_major(1_000_000),
            overpayment_tolerance: dec!(1.1),
            due_soon_days: 7,
            due_later_days: 30,
        }
    }
}

impl EngineConfig {
    /// check the limits are self-consistent
    pub fn validate(&self) -> Result<()> {
        if !self.max_principal.is_positive() {
            return Err(LoanError::InvalidConfiguration {
                message: "max_principal must be positive".to_string(),
            });
        }
        if self.large_amount_threshold > self.max_principal {
            return Err(LoanError::InvalidConfiguration {
                message: "large_amount_threshold cannot exceed max_principal".to_string(),
            });
        }
        if self.overpayment_tolerance < Decimal::ONE {
            return Err(LoanError::InvalidConfiguration {
                message: "overpayment_tolerance must be at least 1".to_string(),
            });
        }
        if self.due_soon_days <= 0 || self.due_later_days <= self.due_soon_days {
            return Err(LoanError::InvalidConfiguration {
                message: "due windows must be positive and ordered".to_string(),
            });
        }
        Ok(())
    }
}
