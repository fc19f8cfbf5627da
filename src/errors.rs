use thiserror::Error;

use crate::decimal::{Money, Rate};

/// errors raised by the calculators
///
/// Every variant means the caller supplied terms the engine cannot price; none of them
/// is retried internally and no partial result accompanies them.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CalculatorError {
    #[error("invalid principal: {amount} must be greater than zero")]
    InvalidPrincipal {
        amount: Money,
    },

    #[error("invalid term: {months} months")]
    InvalidTerm {
        months: u32,
    },

    #[error("invalid interest rate: {rate}")]
    InvalidRate {
        rate: Rate,
    },

    #[error("terms out of calculable range: {message}")]
    OutOfRange {
        message: String,
    },

    #[error("invalid prepayment: {message}")]
    InvalidPrepayment {
        message: String,
    },

    #[error("outside limits of product {product}: {message}")]
    OutsideProductLimits {
        product: String,
        message: String,
    },

    #[error("invalid configuration: {message}")]
    InvalidConfiguration {
        message: String,
    },
}

impl From<serde_json::Error> for CalculatorError {
    fn from(e: serde_json::Error) -> Self {
        CalculatorError::InvalidConfiguration {
            message: e.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, CalculatorError>;
