use chrono::{Months, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::decimal::{Money, Rate};
use crate::errors::{CalculatorError, Result};
use crate::interest::compound_factor;
use crate::types::{LoanTerms, RepaymentMethod};

/// one installment of an amortization schedule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmortizationRow {
    pub payment_number: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_date: Option<NaiveDate>,
    pub principal_portion: Money,
    pub interest_portion: Money,
    pub total_payment: Money,
    pub remaining_balance: Money,
}

/// amortization schedule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmortizationSchedule {
    pub terms: LoanTerms,
    pub method: RepaymentMethod,
    /// installment for annuity loans, first (largest) installment for differentiated ones
    pub monthly_payment: Money,
    pub rows: Vec<AmortizationRow>,
    /// `monthly_payment * n` for annuity loans, otherwise the sum of the rows
    pub total_payment: Money,
    /// `total_payment - principal`
    pub total_interest: Money,
    /// what the rows actually charge, including the final-row rounding residue
    pub scheduled_total: Money,
}

impl AmortizationSchedule {
    pub(crate) fn from_rows(
        terms: LoanTerms,
        method: RepaymentMethod,
        monthly_payment: Money,
        rows: Vec<AmortizationRow>,
    ) -> Self {
        let scheduled_total: Money = rows.iter().map(|r| r.total_payment).sum();

        Self {
            total_payment: scheduled_total,
            total_interest: scheduled_total - terms.principal,
            scheduled_total,
            terms,
            method,
            monthly_payment,
            rows,
        }
    }

    /// level installment totals: `monthly_payment * n` and what it charges over the principal
    fn with_level_totals(mut self) -> Self {
        self.total_payment = self.monthly_payment * Decimal::from(self.terms.term_months);
        self.total_interest = self.total_payment - self.terms.principal;
        self
    }

    /// get payment for specific period
    pub fn get_payment(&self, payment_number: u32) -> Option<&AmortizationRow> {
        payment_number
            .checked_sub(1)
            .and_then(|index| self.rows.get(index as usize))
    }

    /// get remaining balance after payment
    pub fn balance_after_payment(&self, payment_number: u32) -> Money {
        self.get_payment(payment_number)
            .map(|p| p.remaining_balance)
            .unwrap_or(self.terms.principal)
    }

    /// number of installments actually scheduled
    pub fn payment_count(&self) -> u32 {
        self.rows.len() as u32
    }

    pub fn total_principal(&self) -> Money {
        self.rows.iter().map(|r| r.principal_portion).sum()
    }
}

/// amortization calculator
#[derive(Debug, Clone, Copy, Default)]
pub struct AmortizationCalculator {
    method: RepaymentMethod,
}

impl AmortizationCalculator {
    pub fn new(method: RepaymentMethod) -> Self {
        Self { method }
    }

    pub fn method(&self) -> RepaymentMethod {
        self.method
    }

    /// calculate full amortization schedule
    pub fn compute_schedule(&self, terms: &LoanTerms) -> Result<AmortizationSchedule> {
        terms.validate()?;

        let (monthly_payment, rows) = self.build_rows(
            terms.principal,
            terms.annual_rate,
            terms.term_months,
            0,
            terms.first_payment_date,
        )?;

        let schedule =
            AmortizationSchedule::from_rows(terms.clone(), self.method, monthly_payment, rows);
        let schedule = match self.method {
            RepaymentMethod::Annuity => schedule.with_level_totals(),
            RepaymentMethod::Differentiated => schedule,
        };

        debug!(
            principal = %terms.principal,
            rate = %terms.annual_rate,
            term_months = terms.term_months,
            method = ?self.method,
            monthly_payment = %schedule.monthly_payment,
            total_interest = %schedule.total_interest,
            "computed amortization schedule"
        );

        Ok(schedule)
    }

    /// installments for `balance` over `term_months`, numbered after `offset`
    ///
    /// The last row always takes the whole remaining balance, so principal portions sum
    /// to `balance` and the schedule ends at exactly zero.
    pub(crate) fn build_rows(
        &self,
        balance: Money,
        annual_rate: Rate,
        term_months: u32,
        offset: u32,
        first_payment_date: Option<NaiveDate>,
    ) -> Result<(Money, Vec<AmortizationRow>)> {
        let monthly_rate = annual_rate.monthly_rate().as_decimal();

        let level_payment = match self.method {
            RepaymentMethod::Annuity => annuity_payment(balance, annual_rate, term_months)?,
            RepaymentMethod::Differentiated => balance / Decimal::from(term_months),
        };

        let mut rows = Vec::with_capacity(term_months as usize);
        let mut remaining = balance;

        for i in 1..=term_months {
            let payment_number = offset + i;
            let interest_portion = Money::from_decimal(remaining.as_decimal() * monthly_rate);

            let principal_portion = if i == term_months {
                remaining
            } else {
                let scheduled = match self.method {
                    RepaymentMethod::Annuity => (level_payment - interest_portion).max(Money::ZERO),
                    RepaymentMethod::Differentiated => level_payment,
                };
                scheduled.min(remaining)
            };

            remaining = (remaining - principal_portion).max(Money::ZERO);

            rows.push(AmortizationRow {
                payment_number,
                payment_date: payment_date(first_payment_date, payment_number)?,
                principal_portion,
                interest_portion,
                total_payment: principal_portion + interest_portion,
                remaining_balance: remaining,
            });
        }

        let monthly_payment = match self.method {
            RepaymentMethod::Annuity => level_payment,
            RepaymentMethod::Differentiated => rows
                .first()
                .map(|r| r.total_payment)
                .unwrap_or(Money::ZERO),
        };

        Ok((monthly_payment, rows))
    }
}

/// annuity schedule for the given terms
pub fn compute_schedule(terms: &LoanTerms) -> Result<AmortizationSchedule> {
    AmortizationCalculator::default().compute_schedule(terms)
}

/// calculate the level annuity installment
pub fn annuity_payment(principal: Money, annual_rate: Rate, months: u32) -> Result<Money> {
    if months == 0 {
        return Err(CalculatorError::InvalidTerm { months });
    }

    let r = annual_rate.monthly_rate().as_decimal();

    if r.is_zero() {
        return Ok(principal / Decimal::from(months));
    }

    // P * r * (1 + r)^n / ((1 + r)^n - 1)
    let compound = compound_factor(r, months)?;
    let numerator = principal
        .as_decimal()
        .checked_mul(r)
        .and_then(|x| x.checked_mul(compound))
        .ok_or_else(|| CalculatorError::OutOfRange {
            message: format!("installment for {principal} over {months} months overflows"),
        })?;
    let denominator = compound - Decimal::ONE;

    Ok(Money::from_decimal(numerator / denominator))
}

fn payment_date(first: Option<NaiveDate>, payment_number: u32) -> Result<Option<NaiveDate>> {
    first
        .map(|date| {
            date.checked_add_months(Months::new(payment_number - 1))
                .ok_or_else(|| CalculatorError::OutOfRange {
                    message: format!("payment {payment_number} falls outside the calendar"),
                })
        })
        .transpose()
}
