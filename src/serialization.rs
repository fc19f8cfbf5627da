//! serializable quote views for calculator screens

use serde::{Deserialize, Serialize};

use crate::decimal::{Money, Rate};
use crate::interest::DepositProjection;
use crate::payments::AmortizationSchedule;
use crate::types::{DepositTerms, RepaymentMethod};

/// summary of a loan schedule without the rows
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanQuoteView {
    pub principal: Money,
    pub annual_rate: Rate,
    pub term_months: u32,
    pub repayment_method: RepaymentMethod,
    pub monthly_payment: Money,
    pub last_payment: Money,
    pub total_payment: Money,
    pub total_interest: Money,
    pub scheduled_total: Money,
    /// total interest as a percentage of the principal
    pub overpayment_percent: rust_decimal::Decimal,
}

/// summary of a deposit projection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DepositQuoteView {
    pub principal: Money,
    pub term_months: u32,
    pub capitalization_enabled: bool,
    pub effective_annual_rate: Rate,
    pub annual_yield: Rate,
    pub projected_interest: Money,
    pub projected_final_balance: Money,
}

impl LoanQuoteView {
    pub fn from_schedule(schedule: &AmortizationSchedule) -> Self {
        let principal = schedule.terms.principal;
        LoanQuoteView {
            principal,
            annual_rate: schedule.terms.annual_rate,
            term_months: schedule.payment_count(),
            repayment_method: schedule.method,
            monthly_payment: schedule.monthly_payment,
            last_payment: schedule
                .rows
                .last()
                .map(|r| r.total_payment)
                .unwrap_or(Money::ZERO),
            total_payment: schedule.total_payment,
            total_interest: schedule.total_interest,
            scheduled_total: schedule.scheduled_total,
            overpayment_percent: (schedule.total_interest.as_decimal()
                / principal.as_decimal()
                * rust_decimal::Decimal::ONE_HUNDRED)
                .round_dp(2),
        }
    }

    /// convert to pretty-printed json string
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

impl DepositQuoteView {
    pub fn from_projection(terms: &DepositTerms, projection: &DepositProjection) -> Self {
        DepositQuoteView {
            principal: terms.principal,
            term_months: terms.term_months,
            capitalization_enabled: terms.capitalization_enabled,
            effective_annual_rate: projection.effective_annual_rate,
            annual_yield: projection.annual_yield,
            projected_interest: projection.projected_interest,
            projected_final_balance: projection.projected_final_balance,
        }
    }

    /// convert to pretty-printed json string
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
