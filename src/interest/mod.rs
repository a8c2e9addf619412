pub mod compound;
pub mod simple;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::decimal::{Money, Rate};
use crate::errors::{LoanError, Result};
use crate::types::{CompoundingFrequency, InterestType};

pub use compound::CompoundingEngine;
pub use simple::{elapsed_days, SimpleInterestEngine};

/// interest calculation result
#[derive(Debug, Clone, PartialEq)]
pub struct InterestCalculation {
    pub interest_amount: Money,
    pub daily_rate: Rate,
    /// whole calendar days between the two dates; negative for inverted ranges
    pub days: i64,
    pub principal_base: Money,
    pub calculation_method: String,
}

/// trait for interest calculations
pub trait InterestCalculator {
    fn calculate_interest(
        &self,
        principal: Money,
        rate: Rate,
        start_date: DateTime<Utc>,
        end_date: DateTime<Utc>,
    ) -> Result<InterestCalculation>;

    fn get_daily_rate(&self, annual_rate: Rate) -> Rate;
}

/// compute the interest a loan's terms produce over a date range
///
/// Dispatches on the interest type; `InterestType::None` is always zero
/// regardless of rate and dates. Results are rounded to 2 decimal places
/// at the point of calculation.
pub fn compute_interest(
    principal: Money,
    annual_rate: Rate,
    interest_type: InterestType,
    frequency: Option<CompoundingFrequency>,
    start_date: DateTime<Utc>,
    end_date: DateTime<Utc>,
) -> Result<Money> {
    match interest_type {
        InterestType::None => Ok(Money::ZERO),
        InterestType::Simple => {
            check_rate_bounds(annual_rate)?;
            let calc = SimpleInterestEngine
                .calculate_interest(principal, annual_rate, start_date, end_date)?;
            Ok(calc.interest_amount)
        }
        InterestType::Compound => {
            check_rate_bounds(annual_rate)?;
            let frequency = frequency.ok_or(LoanError::MissingCompoundingFrequency)?;
            let calc = CompoundingEngine::new(frequency)
                .calculate_interest(principal, annual_rate, start_date, end_date)?;
            Ok(calc.interest_amount)
        }
    }
}

fn check_rate_bounds(rate: Rate) -> Result<()> {
    if rate.as_decimal() < Decimal::ZERO || rate.as_decimal() > Decimal::ONE {
        return Err(LoanError::InvalidInterestRate { rate });
    }
    Ok(())
}
