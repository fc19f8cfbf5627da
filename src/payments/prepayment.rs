use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::decimal::{Money, Rate};
use crate::errors::{CalculatorError, Result};
use crate::types::{PrepaymentStrategy, RepaymentMethod};

use super::amortization::{AmortizationCalculator, AmortizationSchedule};

/// result of applying an early repayment to a schedule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrepaymentOutcome {
    pub strategy: PrepaymentStrategy,
    pub amount_applied: Money,
    pub old_payment: Money,
    pub new_payment: Money,
    pub old_term_months: u32,
    pub new_term_months: u32,
    pub interest_saved: Money,
    pub schedule: AmortizationSchedule,
}

impl AmortizationSchedule {
    /// pay `amount` on top of installment `after_payment` and re-amortise the rest
    ///
    /// Returns a new schedule; `self` is left untouched.
    pub fn apply_prepayment(
        &self,
        amount: Money,
        after_payment: u32,
        strategy: PrepaymentStrategy,
    ) -> Result<PrepaymentOutcome> {
        let old_term_months = self.payment_count();

        if !amount.is_positive() {
            return Err(CalculatorError::InvalidPrepayment {
                message: format!("amount {amount} must be greater than zero"),
            });
        }

        if after_payment == 0 || after_payment >= old_term_months {
            return Err(CalculatorError::InvalidPrepayment {
                message: format!(
                    "payment number {after_payment} must be between 1 and {}",
                    old_term_months.saturating_sub(1)
                ),
            });
        }

        let outstanding = self.balance_after_payment(after_payment);
        if amount > outstanding {
            return Err(CalculatorError::InvalidPrepayment {
                message: format!("amount {amount} exceeds outstanding balance {outstanding}"),
            });
        }

        let mut rows = self.rows[..after_payment as usize].to_vec();
        let balance = outstanding - amount;
        if let Some(row) = rows.last_mut() {
            row.principal_portion += amount;
            row.total_payment += amount;
            row.remaining_balance = balance;
        }

        let remaining_months = old_term_months - after_payment;
        let mut terms = self.terms.clone();

        let (new_payment, new_term_months) = if balance.is_zero() {
            // paid off in full
            terms.term_months = after_payment;
            (Money::ZERO, after_payment)
        } else {
            let months = match strategy {
                PrepaymentStrategy::ReducePayment => remaining_months,
                PrepaymentStrategy::ReduceTerm => {
                    self.term_after_prepayment(balance, remaining_months)
                }
            };

            let calculator = AmortizationCalculator::new(self.method);
            let (payment, tail) = calculator.build_rows(
                balance,
                self.terms.annual_rate,
                months,
                after_payment,
                self.terms.first_payment_date,
            )?;
            rows.extend(tail);
            terms.term_months = after_payment + months;
            (payment, after_payment + months)
        };

        let schedule = AmortizationSchedule::from_rows(terms, self.method, new_payment, rows);
        // same principal either way, so the difference in charges is interest
        let interest_saved = self.scheduled_total - schedule.scheduled_total;

        debug!(
            amount = %amount,
            after_payment,
            ?strategy,
            new_term_months,
            interest_saved = %interest_saved,
            "applied prepayment"
        );

        Ok(PrepaymentOutcome {
            strategy,
            amount_applied: amount,
            old_payment: self.monthly_payment,
            new_payment,
            old_term_months,
            new_term_months,
            interest_saved,
            schedule,
        })
    }

    /// months needed to clear `balance` while keeping the current installment size
    fn term_after_prepayment(&self, balance: Money, remaining_months: u32) -> u32 {
        let months = match self.method {
            RepaymentMethod::Annuity => term_for_payment(
                balance,
                self.terms.annual_rate,
                self.monthly_payment,
                remaining_months,
            ),
            RepaymentMethod::Differentiated => {
                let level = self
                    .rows
                    .first()
                    .map(|r| r.principal_portion)
                    .unwrap_or(balance);
                (balance.as_decimal() / level.as_decimal())
                    .ceil()
                    .to_u32()
                    .unwrap_or(remaining_months)
            }
        };
        months.clamp(1, remaining_months)
    }
}

/// count installments of `payment` needed to repay `principal`, capped at `max_months`
fn term_for_payment(principal: Money, annual_rate: Rate, payment: Money, max_months: u32) -> u32 {
    let monthly_rate = annual_rate.monthly_rate().as_decimal();

    let mut remaining = principal;
    let mut months = 0;

    while remaining > Money::ZERO && months < max_months {
        let interest = Money::from_decimal(remaining.as_decimal() * monthly_rate);
        let principal_payment = payment - interest;

        if !principal_payment.is_positive() {
            return max_months;
        }

        remaining = (remaining - principal_payment).max(Money::ZERO);
        months += 1;
    }

    months
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::payments::compute_schedule;
    use crate::types::LoanTerms;

    fn loan() -> AmortizationSchedule {
        compute_schedule(&LoanTerms::new(
            Money::from_major(1_000_000),
            Rate::from_percentage(12),
            24,
        ))
        .unwrap()
    }

    #[test]
    fn test_reduce_payment() {
        let original = loan();
        let outcome = original
            .apply_prepayment(Money::from_major(200_000), 6, PrepaymentStrategy::ReducePayment)
            .unwrap();

        assert_eq!(outcome.new_term_months, 24);
        assert!(outcome.new_payment < outcome.old_payment);
        assert!(outcome.interest_saved.is_positive());

        let schedule = &outcome.schedule;
        assert_eq!(schedule.payment_count(), 24);
        assert_eq!(
            schedule.rows[5].remaining_balance,
            original.rows[5].remaining_balance - Money::from_major(200_000)
        );
        assert_eq!(schedule.rows[6].payment_number, 7);
        assert_eq!(schedule.total_principal(), Money::from_major(1_000_000));
        assert_eq!(schedule.rows.last().unwrap().remaining_balance, Money::ZERO);

        // untouched original
        assert_eq!(original, loan());
    }

    #[test]
    fn test_reduce_term() {
        let original = loan();
        let outcome = original
            .apply_prepayment(Money::from_major(200_000), 6, PrepaymentStrategy::ReduceTerm)
            .unwrap();

        assert!(outcome.new_term_months < 24);
        assert!(outcome.new_payment <= outcome.old_payment);
        assert_eq!(outcome.schedule.payment_count(), outcome.new_term_months);
        assert_eq!(outcome.schedule.total_principal(), Money::from_major(1_000_000));

        let by_payment = original
            .apply_prepayment(Money::from_major(200_000), 6, PrepaymentStrategy::ReducePayment)
            .unwrap();
        // shortening the term saves more interest than lowering the installment
        assert!(outcome.interest_saved > by_payment.interest_saved);
    }

    #[test]
    fn test_full_early_repayment() {
        let original = loan();
        let outstanding = original.balance_after_payment(10);
        let outcome = original
            .apply_prepayment(outstanding, 10, PrepaymentStrategy::ReduceTerm)
            .unwrap();

        assert_eq!(outcome.new_term_months, 10);
        assert_eq!(outcome.new_payment, Money::ZERO);
        assert_eq!(outcome.schedule.payment_count(), 10);
        assert_eq!(outcome.schedule.rows[9].remaining_balance, Money::ZERO);
        assert_eq!(outcome.schedule.total_principal(), Money::from_major(1_000_000));
    }

    #[test]
    fn test_differentiated_reduce_term() {
        let terms = LoanTerms::new(Money::from_major(120_000), Rate::from_percentage(12), 12);
        let original = AmortizationCalculator::new(RepaymentMethod::Differentiated)
            .compute_schedule(&terms)
            .unwrap();

        // 60k left after 6 payments, 20k prepaid leaves 40k at 10k a month
        let outcome = original
            .apply_prepayment(Money::from_major(20_000), 6, PrepaymentStrategy::ReduceTerm)
            .unwrap();
        assert_eq!(outcome.new_term_months, 10);
        assert_eq!(outcome.schedule.rows[6].principal_portion, Money::from_major(10_000));
        assert_eq!(outcome.schedule.total_principal(), Money::from_major(120_000));
    }

    #[test]
    fn test_invalid_prepayments() {
        let original = loan();

        for (amount, after) in [
            (Money::ZERO, 6),
            (Money::from_major(-1), 6),
            (Money::from_major(1_000), 0),
            (Money::from_major(1_000), 24),
            (Money::from_major(5_000_000), 6),
        ] {
            let result =
                original.apply_prepayment(amount, after, PrepaymentStrategy::ReducePayment);
            assert!(
                matches!(result, Err(CalculatorError::InvalidPrepayment { .. })),
                "amount {} after {} should be rejected",
                amount,
                after
            );
        }
    }
}
