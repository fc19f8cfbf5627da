use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::decimal::{Money, Rate};
use crate::errors::{CalculatorError, Result};
use crate::interest::{DepositAccrualCalculator, RateComposer, CAPITALIZATION_BONUS};
use crate::payments::AmortizationCalculator;
use crate::types::{DepositTerms, LoanTerms, RepaymentMethod, MAX_TERM_MONTHS};

/// engine configuration: rate policy plus the product catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    #[serde(default = "default_capitalization_bonus")]
    pub capitalization_bonus: Rate,
    #[serde(default)]
    pub loan_products: Vec<LoanProduct>,
    #[serde(default)]
    pub deposit_products: Vec<DepositProduct>,
}

fn default_capitalization_bonus() -> Rate {
    CAPITALIZATION_BONUS
}

/// loan product offered by the bank
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanProduct {
    pub name: String,
    pub annual_rate: Rate,
    #[serde(default)]
    pub repayment_method: RepaymentMethod,
    pub min_amount: Money,
    pub max_amount: Money,
    pub min_term_months: u32,
    pub max_term_months: u32,
}

/// deposit product offered by the bank
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DepositProduct {
    pub name: String,
    pub base_rate: Rate,
    /// bonus tiers, any order
    #[serde(default)]
    pub term_tiers: Vec<TermBonusTier>,
    pub capitalization_available: bool,
    pub min_amount: Money,
    pub min_term_months: u32,
    pub max_term_months: u32,
}

/// rate bonus for terms of at least `min_term_months`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TermBonusTier {
    pub min_term_months: u32,
    pub bonus: Rate,
}

impl EngineConfig {
    /// load configuration from json
    pub fn from_json(json: &str) -> Result<Self> {
        let config: EngineConfig = serde_json::from_str(json)?;
        config.validate()?;
        debug!(
            loans = config.loan_products.len(),
            deposits = config.deposit_products.len(),
            "loaded engine config"
        );
        Ok(config)
    }

    /// standard retail catalog
    pub fn standard() -> Self {
        Self {
            capitalization_bonus: CAPITALIZATION_BONUS,
            loan_products: vec![
                LoanProduct::consumer_loan(),
                LoanProduct::car_loan(),
                LoanProduct::mortgage(),
            ],
            deposit_products: vec![DepositProduct::savings(), DepositProduct::flexible()],
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.capitalization_bonus.is_negative() {
            return Err(CalculatorError::InvalidConfiguration {
                message: format!("capitalization bonus {} is negative", self.capitalization_bonus),
            });
        }

        for product in &self.loan_products {
            product.validate()?;
        }
        for product in &self.deposit_products {
            product.validate()?;
        }

        Ok(())
    }

    pub fn rate_composer(&self) -> RateComposer {
        RateComposer::new(self.capitalization_bonus)
    }

    pub fn deposit_calculator(&self) -> DepositAccrualCalculator {
        DepositAccrualCalculator::new(self.rate_composer())
    }

    pub fn loan_product(&self, name: &str) -> Option<&LoanProduct> {
        self.loan_products.iter().find(|p| p.name == name)
    }

    pub fn deposit_product(&self, name: &str) -> Option<&DepositProduct> {
        self.deposit_products.iter().find(|p| p.name == name)
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::standard()
    }
}

impl LoanProduct {
    /// create consumer loan product
    pub fn consumer_loan() -> Self {
        Self {
            name: "consumer".to_string(),
            annual_rate: Rate::from_percentage(18),
            repayment_method: RepaymentMethod::Annuity,
            min_amount: Money::from_major(50_000),
            max_amount: Money::from_major(5_000_000),
            min_term_months: 3,
            max_term_months: 60,
        }
    }

    /// create car loan product
    pub fn car_loan() -> Self {
        Self {
            name: "car".to_string(),
            annual_rate: Rate::from_percent(dec!(14.5)),
            repayment_method: RepaymentMethod::Annuity,
            min_amount: Money::from_major(1_000_000),
            max_amount: Money::from_major(30_000_000),
            min_term_months: 12,
            max_term_months: 84,
        }
    }

    /// create mortgage product
    pub fn mortgage() -> Self {
        Self {
            name: "mortgage".to_string(),
            annual_rate: Rate::from_percent(dec!(11.5)),
            repayment_method: RepaymentMethod::Differentiated,
            min_amount: Money::from_major(3_000_000),
            max_amount: Money::from_major(90_000_000),
            min_term_months: 36,
            max_term_months: 360,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.annual_rate.is_negative()
            || self.min_amount > self.max_amount
            || self.min_term_months == 0
            || self.min_term_months > self.max_term_months
            || self.max_term_months > MAX_TERM_MONTHS
        {
            return Err(CalculatorError::InvalidConfiguration {
                message: format!("loan product {} has inconsistent limits", self.name),
            });
        }
        Ok(())
    }

    /// build loan terms within the product limits
    pub fn terms(&self, principal: Money, term_months: u32) -> Result<LoanTerms> {
        if principal < self.min_amount || principal > self.max_amount {
            return Err(self.outside_limits(format!(
                "amount {principal} not in {}..={}",
                self.min_amount, self.max_amount
            )));
        }

        if term_months < self.min_term_months || term_months > self.max_term_months {
            return Err(self.outside_limits(format!(
                "term {term_months} not in {}..={} months",
                self.min_term_months, self.max_term_months
            )));
        }

        Ok(LoanTerms::new(principal, self.annual_rate, term_months))
    }

    pub fn calculator(&self) -> AmortizationCalculator {
        AmortizationCalculator::new(self.repayment_method)
    }

    fn outside_limits(&self, message: String) -> CalculatorError {
        CalculatorError::OutsideProductLimits {
            product: self.name.clone(),
            message,
        }
    }
}

impl DepositProduct {
    /// create fixed-term savings deposit
    pub fn savings() -> Self {
        Self {
            name: "savings".to_string(),
            base_rate: Rate::from_percentage(12),
            term_tiers: vec![
                TermBonusTier {
                    min_term_months: 6,
                    bonus: Rate::from_percent(dec!(0.5)),
                },
                TermBonusTier {
                    min_term_months: 12,
                    bonus: Rate::from_percentage(1),
                },
                TermBonusTier {
                    min_term_months: 24,
                    bonus: Rate::from_percent(dec!(1.5)),
                },
            ],
            capitalization_available: true,
            min_amount: Money::from_major(10_000),
            min_term_months: 3,
            max_term_months: 36,
        }
    }

    /// create flexible deposit, no term bonus and no capitalization
    pub fn flexible() -> Self {
        Self {
            name: "flexible".to_string(),
            base_rate: Rate::from_percent(dec!(9.5)),
            term_tiers: Vec::new(),
            capitalization_available: false,
            min_amount: Money::from_major(1_000),
            min_term_months: 1,
            max_term_months: 12,
        }
    }

    pub fn validate(&self) -> Result<()> {
        let bad_tier = self.term_tiers.iter().any(|t| t.bonus.is_negative());
        if self.base_rate.is_negative()
            || bad_tier
            || self.min_term_months > self.max_term_months
            || self.max_term_months > MAX_TERM_MONTHS
        {
            return Err(CalculatorError::InvalidConfiguration {
                message: format!("deposit product {} has inconsistent limits", self.name),
            });
        }
        Ok(())
    }

    /// bonus of the highest tier the term qualifies for
    pub fn term_bonus(&self, term_months: u32) -> Rate {
        self.term_tiers
            .iter()
            .filter(|t| t.min_term_months <= term_months)
            .max_by_key(|t| t.min_term_months)
            .map(|t| t.bonus)
            .unwrap_or(Rate::ZERO)
    }

    /// build deposit terms within the product limits
    pub fn terms(
        &self,
        principal: Money,
        term_months: u32,
        capitalization_enabled: bool,
    ) -> Result<DepositTerms> {
        if principal < self.min_amount {
            return Err(self.outside_limits(format!(
                "amount {principal} below minimum {}",
                self.min_amount
            )));
        }

        if term_months < self.min_term_months || term_months > self.max_term_months {
            return Err(self.outside_limits(format!(
                "term {term_months} not in {}..={} months",
                self.min_term_months, self.max_term_months
            )));
        }

        if capitalization_enabled && !self.capitalization_available {
            return Err(self.outside_limits("capitalization is not offered".to_string()));
        }

        Ok(DepositTerms::new(principal, self.base_rate, term_months)
            .with_term_bonus(self.term_bonus(term_months))
            .with_capitalization(capitalization_enabled))
    }

    fn outside_limits(&self, message: String) -> CalculatorError {
        CalculatorError::OutsideProductLimits {
            product: self.name.clone(),
            message,
        }
    }
}
