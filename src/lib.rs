//! Loan amortization and deposit interest calculations.
//!
//! Every entry point is a pure synchronous function over value types: identical terms
//! always give identical results, and invalid terms give a [`CalculatorError`] instead
//! of a partial result.

pub mod config;
pub mod decimal;
pub mod errors;
pub mod interest;
pub mod payments;
pub mod serialization;
pub mod types;

// re-export key types
pub use config::{DepositProduct, EngineConfig, LoanProduct, TermBonusTier};
pub use decimal::{Money, Rate};
pub use errors::{CalculatorError, Result};
pub use interest::{
    accrue_interest, annual_yield, compose_rate, project_deposit, DepositAccrualCalculator,
    DepositAccrualRow, DepositProjection, RateComposer, CAPITALIZATION_BONUS,
};
pub use payments::{
    annuity_payment, compute_schedule, AmortizationCalculator, AmortizationRow,
    AmortizationSchedule, PrepaymentOutcome,
};
pub use serialization::{DepositQuoteView, LoanQuoteView};
pub use types::{
    DepositTerms, InterestMode, LoanTerms, PrepaymentStrategy, RepaymentMethod, MAX_TERM_MONTHS,
};

// re-export external dependencies that users will need
pub use chrono::NaiveDate;
pub use rust_decimal::Decimal;
