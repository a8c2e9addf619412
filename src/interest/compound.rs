use chrono::{DateTime, Utc};
use rust_decimal::{Decimal, MathematicalOps};

use crate::decimal::{Money, Rate};
use crate::errors::{LoanError, Result};
use crate::interest::simple::elapsed_days;
use crate::interest::{InterestCalculation, InterestCalculator};
use crate::types::CompoundingFrequency;

/// engine for compound interest calculations
///
/// Uses a fractional exponent, so a date range that does not land on a
/// period boundary still compounds smoothly rather than snapping to whole
/// periods.
pub struct CompoundingEngine {
    pub frequency: CompoundingFrequency,
}

impl CompoundingEngine {
    pub fn new(frequency: CompoundingFrequency) -> Self {
        Self { frequency }
    }

    /// calculate compound interest for a whole number of days
    ///
    /// `amount = principal * (1 + rate/n)^(n * days/365)`, interest is the
    /// growth over principal.
    pub fn calculate_compound(
        &self,
        principal: Money,
        annual_rate: Rate,
        days: i64,
    ) -> Result<Money> {
        let n = Decimal::from(self.frequency.periods_per_year());
        let period_rate = annual_rate.as_decimal() / n;

        let exponent = n * Decimal::from(days) / Decimal::from(365);
        let base = Decimal::ONE + period_rate;

        let compound_factor = base
            .checked_powd(exponent)
            .ok_or_else(|| LoanError::CalculationError {
                message: format!("compound factor overflow: ({})^({})", base, exponent),
            })?;

        let interest = principal.as_decimal() * (compound_factor - Decimal::ONE);
        Ok(Money::from_decimal(interest))
    }
}

impl InterestCalculator for CompoundingEngine {
    fn calculate_interest(
        &self,
        principal: Money,
        rate: Rate,
        start_date: DateTime<Utc>,
        end_date: DateTime<Utc>,
    ) -> Result<InterestCalculation> {
        let days = elapsed_days(start_date, end_date);
        let interest = self.calculate_compound(principal, rate, days)?;

        Ok(InterestCalculation {
            interest_amount: interest,
            daily_rate: self.get_daily_rate(rate),
            days,
            principal_base: principal,
            calculation_method: format!("{:?} compounding", self.frequency),
        })
    }

    fn get_daily_rate(&self, annual_rate: Rate) -> Rate {
        annual_rate.daily_rate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_yearly_single_period_degenerates_to_simple() {
        let engine = CompoundingEngine::new(CompoundingFrequency::Yearly);
        let principal = Money::from_major(1_000);
        let rate = Rate::from_percentage(10);

        // one period over exactly one year: interest = principal * rate
        let interest = engine.calculate_compound(principal, rate, 365).unwrap();

        assert_eq!(interest, Money::from_major(100));
    }

    #[test]
    fn test_monthly_compounding_over_a_year() {
        let engine = CompoundingEngine::new(CompoundingFrequency::Monthly);
        let principal = Money::from_major(10_000);
        let rate = Rate::from_percentage(12);

        // (1 + 0.01)^12 - 1 on 10,000 is about 1268.25
        let interest = engine.calculate_compound(principal, rate, 365).unwrap();

        assert!(interest > Money::from_major(1_268));
        assert!(interest < Money::from_major(1_269));
    }

    #[test]
    fn test_daily_compounding() {
        let engine = CompoundingEngine::new(CompoundingFrequency::Daily);
        let principal = Money::from_major(10_000);
        let rate = Rate::from_percentage(18);

        let interest = engine.calculate_compound(principal, rate, 30).unwrap();

        assert!(interest > Money::from_major(148));
        assert!(interest < Money::from_major(150));
    }

    #[test]
    fn test_fractional_periods() {
        let engine = CompoundingEngine::new(CompoundingFrequency::Quarterly);
        let principal = Money::from_major(10_000);
        let rate = Rate::from_percentage(8);

        // 45 days is about half a quarter, so the exponent is fractional
        let interest = engine.calculate_compound(principal, rate, 45).unwrap();

        assert!(interest > Money::from_major(98));
        assert!(interest < Money::from_major(99));
    }

    #[test]
    fn test_compounding_beats_simple_for_multiple_periods() {
        let monthly = CompoundingEngine::new(CompoundingFrequency::Monthly);
        let daily = CompoundingEngine::new(CompoundingFrequency::Daily);
        let principal = Money::from_major(10_000);
        let rate = Rate::from_percentage(12);

        let monthly_interest = monthly.calculate_compound(principal, rate, 365).unwrap();
        let daily_interest = daily.calculate_compound(principal, rate, 365).unwrap();

        // more frequent compounding accrues more
        assert!(daily_interest > monthly_interest);
        assert!(monthly_interest > Money::from_major(1_200));
    }

    #[test]
    fn test_zero_days_is_zero() {
        let engine = CompoundingEngine::new(CompoundingFrequency::Monthly);
        let interest = engine
            .calculate_compound(Money::from_major(10_000), Rate::from_percentage(12), 0)
            .unwrap();
        assert_eq!(interest, Money::ZERO);
    }
}
