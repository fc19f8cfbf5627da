pub mod deposit;
pub mod rate;

use rust_decimal::Decimal;

use crate::decimal::Rate;
use crate::errors::{CalculatorError, Result};
use crate::types::InterestMode;

pub use deposit::{
    accrue_interest, project_deposit, DepositAccrualCalculator, DepositAccrualRow,
    DepositProjection,
};
pub use rate::{compose_rate, RateComposer, CAPITALIZATION_BONUS};

/// calculate (1 + r)^n by repeated multiplication
///
/// Fails instead of panicking when the factor leaves the decimal range.
pub fn compound_factor(period_rate: Decimal, periods: u32) -> Result<Decimal> {
    let base = Decimal::ONE + period_rate;
    let mut factor = Decimal::ONE;
    for _ in 0..periods {
        factor = factor.checked_mul(base).ok_or_else(|| CalculatorError::OutOfRange {
            message: format!("(1 + {period_rate})^{periods} overflows"),
        })?;
    }
    Ok(factor)
}

/// realised yearly return of a nominal annual rate
pub fn annual_yield(annual_rate: Rate, mode: InterestMode) -> Result<Rate> {
    match mode {
        InterestMode::Simple => Ok(annual_rate),
        InterestMode::Capitalized => {
            let factor = compound_factor(annual_rate.monthly_rate().as_decimal(), 12)?;
            Ok(Rate::from_decimal(factor - Decimal::ONE))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_compound_factor() {
        assert_eq!(compound_factor(dec!(0.01), 0).unwrap(), Decimal::ONE);
        assert_eq!(compound_factor(dec!(0.1), 2).unwrap(), dec!(1.21));
        assert_eq!(compound_factor(Decimal::ZERO, 360).unwrap(), Decimal::ONE);
    }

    #[test]
    fn test_compound_factor_overflow() {
        let result = compound_factor(dec!(1), 200);
        assert!(matches!(result, Err(CalculatorError::OutOfRange { .. })));
    }

    #[test]
    fn test_annual_yield() {
        let apr = Rate::from_percentage(18);

        assert_eq!(annual_yield(apr, InterestMode::Simple).unwrap(), apr);

        let monthly_apy = annual_yield(apr, InterestMode::Capitalized).unwrap();
        assert!(monthly_apy.as_percentage() > dec!(19.5));
        assert!(monthly_apy.as_percentage() < dec!(19.6));
    }
}
