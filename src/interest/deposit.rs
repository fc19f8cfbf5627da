use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::decimal::{Money, Rate};
use crate::errors::{CalculatorError, Result};
use crate::interest::{annual_yield, compound_factor, RateComposer};
use crate::types::{DepositTerms, InterestMode};

/// projected outcome of a deposit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DepositProjection {
    pub effective_annual_rate: Rate,
    /// realised yearly return of the effective rate under the chosen mode
    pub annual_yield: Rate,
    pub projected_interest: Money,
    pub projected_final_balance: Money,
}

/// one month of a deposit's accrual
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DepositAccrualRow {
    pub month: u32,
    pub interest_for_month: Money,
    pub accrued_interest: Money,
    pub balance: Money,
}

/// engine for deposit income projections
#[derive(Debug, Clone, Copy, Default)]
pub struct DepositAccrualCalculator {
    composer: RateComposer,
}

impl DepositAccrualCalculator {
    pub fn new(composer: RateComposer) -> Self {
        Self { composer }
    }

    pub fn composer(&self) -> &RateComposer {
        &self.composer
    }

    /// effective rate and projected income over the whole term
    pub fn project(&self, terms: &DepositTerms) -> Result<DepositProjection> {
        terms.validate()?;

        let effective_annual_rate = self.effective_rate(terms);
        let mode = terms.interest_mode();
        let projected_interest =
            accrue_interest(terms.principal, effective_annual_rate, terms.term_months, mode)?;

        let projected_final_balance = terms
            .principal
            .checked_add(projected_interest)
            .ok_or_else(|| overflow(terms.term_months))?;

        let projection = DepositProjection {
            effective_annual_rate,
            annual_yield: annual_yield(effective_annual_rate, mode)?,
            projected_interest,
            projected_final_balance,
        };

        debug!(
            principal = %terms.principal,
            rate = %effective_annual_rate,
            term_months = terms.term_months,
            ?mode,
            interest = %projection.projected_interest,
            "projected deposit"
        );

        Ok(projection)
    }

    /// month-by-month accrual; the last row matches `project`
    pub fn accrual_schedule(&self, terms: &DepositTerms) -> Result<Vec<DepositAccrualRow>> {
        terms.validate()?;

        let rate = self.effective_rate(terms);
        let principal = terms.principal.as_decimal();
        let monthly_rate = rate.monthly_rate().as_decimal();
        let base = Decimal::ONE + monthly_rate;

        let mut rows = Vec::with_capacity(terms.term_months as usize);
        let mut factor = Decimal::ONE;
        let mut previous = Money::ZERO;

        for month in 1..=terms.term_months {
            let accrued = match terms.interest_mode() {
                InterestMode::Capitalized => {
                    factor = factor.checked_mul(base).ok_or_else(|| overflow(terms.term_months))?;
                    let balance = principal
                        .checked_mul(factor)
                        .ok_or_else(|| overflow(terms.term_months))?;
                    Money::from_decimal(balance) - terms.principal
                }
                InterestMode::Simple => simple_interest(terms.principal, rate, month)?,
            };

            trace!(month, accrued = %accrued, "deposit accrual");

            let balance = terms
                .principal
                .checked_add(accrued)
                .ok_or_else(|| overflow(terms.term_months))?;

            rows.push(DepositAccrualRow {
                month,
                interest_for_month: accrued - previous,
                accrued_interest: accrued,
                balance,
            });
            previous = accrued;
        }

        Ok(rows)
    }

    fn effective_rate(&self, terms: &DepositTerms) -> Rate {
        self.composer.compose(
            terms.base_annual_rate,
            terms.term_bonus,
            terms.capitalization_enabled,
        )
    }
}

/// interest earned on `principal` at an already-effective annual rate
pub fn accrue_interest(
    principal: Money,
    annual_rate: Rate,
    term_months: u32,
    mode: InterestMode,
) -> Result<Money> {
    match mode {
        InterestMode::Capitalized => {
            let factor = compound_factor(annual_rate.monthly_rate().as_decimal(), term_months)?;
            let final_balance = principal
                .as_decimal()
                .checked_mul(factor)
                .ok_or_else(|| overflow(term_months))?;
            Ok(Money::from_decimal(final_balance) - principal)
        }
        InterestMode::Simple => simple_interest(principal, annual_rate, term_months),
    }
}

/// project a deposit with the standard capitalization bonus
pub fn project_deposit(terms: &DepositTerms) -> Result<DepositProjection> {
    DepositAccrualCalculator::default().project(terms)
}

fn simple_interest(principal: Money, annual_rate: Rate, months: u32) -> Result<Money> {
    // multiply before dividing by 12 so whole years stay exact
    let interest = principal
        .as_decimal()
        .checked_mul(annual_rate.as_decimal())
        .and_then(|yearly| yearly.checked_mul(Decimal::from(months)))
        .ok_or_else(|| overflow(months))?
        / Decimal::from(12);
    Ok(Money::from_decimal(interest))
}

fn overflow(term_months: u32) -> CalculatorError {
    CalculatorError::OutOfRange {
        message: format!("deposit balance over {term_months} months overflows"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn savings(capitalization: bool, term_months: u32) -> DepositTerms {
        DepositTerms::new(Money::from_major(100_000), Rate::from_percentage(12), term_months)
            .with_term_bonus(Rate::from_percentage(1))
            .with_capitalization(capitalization)
    }

    #[test]
    fn test_capitalized_projection() {
        let projection = project_deposit(&savings(true, 12)).unwrap();

        assert_eq!(projection.effective_annual_rate.as_percentage(), dec!(13.5));
        assert_eq!(
            projection.projected_final_balance,
            Money::from_str_exact("114367.44").unwrap()
        );
        assert_eq!(
            projection.projected_interest,
            Money::from_str_exact("14367.44").unwrap()
        );
        assert_eq!(projection.annual_yield.as_decimal().round_dp(6), dec!(0.143674));
    }

    #[test]
    fn test_simple_projection() {
        let projection = project_deposit(&savings(false, 12)).unwrap();

        assert_eq!(projection.effective_annual_rate.as_percentage(), dec!(13));
        assert_eq!(projection.projected_interest, Money::from_major(13_000));
        assert_eq!(projection.projected_final_balance, Money::from_major(113_000));
        assert_eq!(projection.annual_yield, projection.effective_annual_rate);

        let half_year = project_deposit(&savings(false, 6)).unwrap();
        assert_eq!(half_year.projected_interest, Money::from_major(6_500));
    }

    #[test]
    fn test_zero_term_yields_nothing() {
        for capitalization in [true, false] {
            let projection = project_deposit(&savings(capitalization, 0)).unwrap();
            assert_eq!(projection.projected_interest, Money::ZERO);
            assert_eq!(projection.projected_final_balance, Money::from_major(100_000));
        }
    }

    #[test]
    fn test_invalid_principal() {
        let terms = DepositTerms::new(Money::ZERO, Rate::from_percentage(12), 12);
        assert!(matches!(
            project_deposit(&terms),
            Err(CalculatorError::InvalidPrincipal { .. })
        ));

        let terms = DepositTerms::new(Money::from_major(-500), Rate::from_percentage(12), 12);
        assert!(project_deposit(&terms).is_err());
    }

    #[test]
    fn test_balance_overflow_is_reported() {
        let principal = Money::from_decimal(Decimal::MAX);
        let terms = DepositTerms::new(principal, Rate::from_percentage(1), 12);
        let calculator = DepositAccrualCalculator::default();

        assert!(matches!(
            calculator.project(&terms),
            Err(CalculatorError::OutOfRange { .. })
        ));
        assert!(matches!(
            calculator.accrual_schedule(&terms),
            Err(CalculatorError::OutOfRange { .. })
        ));
    }

    #[test]
    fn test_custom_capitalization_bonus() {
        let calculator = DepositAccrualCalculator::new(RateComposer::new(Rate::from_percentage(1)));
        let projection = calculator.project(&savings(true, 12)).unwrap();
        assert_eq!(projection.effective_annual_rate.as_percentage(), dec!(14));
    }

    #[test]
    fn test_capitalization_dominates_simple() {
        let principal = Money::from_major(250_000);
        let rate = Rate::from_percent(dec!(14.2));

        for months in 2..=60 {
            let compound =
                accrue_interest(principal, rate, months, InterestMode::Capitalized).unwrap();
            let simple = accrue_interest(principal, rate, months, InterestMode::Simple).unwrap();
            assert!(compound >= simple, "month {}: {} < {}", months, compound, simple);
        }

        // a single month compounds nothing yet
        let compound = accrue_interest(principal, rate, 1, InterestMode::Capitalized).unwrap();
        let simple = accrue_interest(principal, rate, 1, InterestMode::Simple).unwrap();
        assert_eq!(compound, simple);
    }

    #[test]
    fn test_accrual_schedule_matches_projection() {
        let calculator = DepositAccrualCalculator::default();

        for capitalization in [true, false] {
            let terms = savings(capitalization, 24);
            let rows = calculator.accrual_schedule(&terms).unwrap();
            let projection = calculator.project(&terms).unwrap();

            assert_eq!(rows.len(), 24);
            let last = rows.last().unwrap();
            assert_eq!(last.accrued_interest, projection.projected_interest);
            assert_eq!(last.balance, projection.projected_final_balance);

            let summed: Money = rows.iter().map(|r| r.interest_for_month).sum();
            assert_eq!(summed, projection.projected_interest);
        }
    }

    #[test]
    fn test_capitalized_monthly_interest_grows() {
        let rows = DepositAccrualCalculator::default()
            .accrual_schedule(&savings(true, 12))
            .unwrap();

        // interest on interest: each month earns at least as much as the previous one
        for pair in rows.windows(2) {
            assert!(pair[1].interest_for_month >= pair[0].interest_for_month);
        }
        assert_eq!(rows[0].interest_for_month, Money::from_major(1_125));
    }
}
