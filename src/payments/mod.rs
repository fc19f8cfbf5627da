pub mod amortization;
pub mod prepayment;

pub use amortization::{
    annuity_payment, compute_schedule, AmortizationCalculator, AmortizationRow,
    AmortizationSchedule,
};
pub use prepayment::PrepaymentOutcome;
