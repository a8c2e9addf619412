use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::decimal::{Money, Rate};
use crate::errors::Result;
use crate::interest::{InterestCalculation, InterestCalculator};

/// whole calendar days between two instants, actual/365 convention
///
/// Negative when `end` precedes `start`; callers that must not see negative
/// interest guard the range themselves.
pub fn elapsed_days(start: DateTime<Utc>, end: DateTime<Utc>) -> i64 {
    (end - start).num_days()
}

/// engine for simple (non-compounding) interest on the original principal
pub struct SimpleInterestEngine;

impl SimpleInterestEngine {
    /// calculate simple interest for a whole number of days
    pub fn calculate_simple_interest(
        &self,
        principal: Money,
        annual_rate: Rate,
        days: i64,
    ) -> Money {
        let interest = principal.as_decimal() * annual_rate.as_decimal() * Decimal::from(days)
            / Decimal::from(365);
        Money::from_decimal(interest)
    }
}

impl InterestCalculator for SimpleInterestEngine {
    fn calculate_interest(
        &self,
        principal: Money,
        rate: Rate,
        start_date: DateTime<Utc>,
        end_date: DateTime<Utc>,
    ) -> Result<InterestCalculation> {
        let days = elapsed_days(start_date, end_date);
        let interest = self.calculate_simple_interest(principal, rate, days);

        Ok(InterestCalculation {
            interest_amount: interest,
            daily_rate: self.get_daily_rate(rate),
            days,
            principal_base: principal,
            calculation_method: "simple actual/365".to_string(),
        })
    }

    fn get_daily_rate(&self, annual_rate: Rate) -> Rate {
        annual_rate.daily_rate()
    }
}
