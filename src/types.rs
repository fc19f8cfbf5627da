use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::decimal::{Money, Rate};
use crate::errors::{CalculatorError, Result};

/// longest term accepted for loans and deposits (50 years)
pub const MAX_TERM_MONTHS: u32 = 600;

/// repayment method for loans
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RepaymentMethod {
    /// equal payment amounts throughout term
    #[default]
    Annuity,
    /// equal principal portions, interest on the remaining balance
    Differentiated,
}

/// how a deposit accrues interest
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InterestMode {
    /// interest accrues on the original principal only
    Simple,
    /// monthly interest is added to the balance before the next accrual
    Capitalized,
}

impl InterestMode {
    pub fn from_capitalization(enabled: bool) -> Self {
        if enabled {
            InterestMode::Capitalized
        } else {
            InterestMode::Simple
        }
    }
}

/// what an early repayment shortens
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PrepaymentStrategy {
    /// keep the end date, lower the installment
    ReducePayment,
    /// keep the installment, finish earlier
    ReduceTerm,
}

/// loan terms for one calculation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanTerms {
    pub principal: Money,
    /// nominal annual rate
    pub annual_rate: Rate,
    pub term_months: u32,
    /// date of the first installment, if the caller wants a dated schedule
    #[serde(default)]
    pub first_payment_date: Option<NaiveDate>,
}

impl LoanTerms {
    pub fn new(principal: Money, annual_rate: Rate, term_months: u32) -> Self {
        Self {
            principal,
            annual_rate,
            term_months,
            first_payment_date: None,
        }
    }

    pub fn with_first_payment_date(mut self, date: NaiveDate) -> Self {
        self.first_payment_date = Some(date);
        self
    }

    pub fn validate(&self) -> Result<()> {
        if !self.principal.is_positive() {
            return Err(CalculatorError::InvalidPrincipal {
                amount: self.principal,
            });
        }

        if self.term_months == 0 || self.term_months > MAX_TERM_MONTHS {
            return Err(CalculatorError::InvalidTerm {
                months: self.term_months,
            });
        }

        if self.annual_rate.is_negative() {
            return Err(CalculatorError::InvalidRate {
                rate: self.annual_rate,
            });
        }

        Ok(())
    }
}

/// deposit terms for one projection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DepositTerms {
    pub principal: Money,
    pub base_annual_rate: Rate,
    /// bonus awarded by the term-length tier
    pub term_bonus: Rate,
    pub capitalization_enabled: bool,
    pub term_months: u32,
}

impl DepositTerms {
    pub fn new(principal: Money, base_annual_rate: Rate, term_months: u32) -> Self {
        Self {
            principal,
            base_annual_rate,
            term_bonus: Rate::ZERO,
            capitalization_enabled: false,
            term_months,
        }
    }

    pub fn with_term_bonus(mut self, term_bonus: Rate) -> Self {
        self.term_bonus = term_bonus;
        self
    }

    pub fn with_capitalization(mut self, enabled: bool) -> Self {
        self.capitalization_enabled = enabled;
        self
    }

    pub fn interest_mode(&self) -> InterestMode {
        InterestMode::from_capitalization(self.capitalization_enabled)
    }

    /// a zero term is accepted and projects no interest
    pub fn validate(&self) -> Result<()> {
        if !self.principal.is_positive() {
            return Err(CalculatorError::InvalidPrincipal {
                amount: self.principal,
            });
        }

        if self.term_months > MAX_TERM_MONTHS {
            return Err(CalculatorError::InvalidTerm {
                months: self.term_months,
            });
        }

        if self.base_annual_rate.is_negative() {
            return Err(CalculatorError::InvalidRate {
                rate: self.base_annual_rate,
            });
        }

        if self.term_bonus.is_negative() {
            return Err(CalculatorError::InvalidRate {
                rate: self.term_bonus,
            });
        }

        Ok(())
    }
}
