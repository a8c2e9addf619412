use thiserror::Error;

use crate::decimal::Rate;

#[derive(Error, Debug)]
pub enum LoanError {
    #[error("invalid interest rate: {rate} is outside 0%..=100%")]
    InvalidInterestRate {
        rate: Rate,
    },

    #[error("compound interest requires a compounding frequency")]
    MissingCompoundingFrequency,

    #[error("invalid configuration: {message}")]
    InvalidConfiguration {
        message: String,
    },

    #[error("calculation error: {message}")]
    CalculationError {
        message: String,
    },
}

pub type Result<T> = std::result::Result<T, LoanError>;
