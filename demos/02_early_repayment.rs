/// early repayment - compare shortening the term with lowering the installment
use loan_deposit_engine::{EngineConfig, Money, PrepaymentStrategy};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== early repayment ===\n");

    let config = EngineConfig::standard();
    let car = config.loan_product("car").ok_or("no car loan product")?;
    let terms = car.terms(Money::from_major(8_000_000), 48)?;

    let schedule = car.calculator().compute_schedule(&terms)?;
    println!(
        "original: {} x {} months, interest {}",
        schedule.monthly_payment,
        schedule.payment_count(),
        schedule.total_interest
    );

    for strategy in [PrepaymentStrategy::ReducePayment, PrepaymentStrategy::ReduceTerm] {
        let outcome = schedule.apply_prepayment(Money::from_major(1_500_000), 12, strategy)?;
        println!(
            "{:?}: {} x {} months, interest saved {}",
            strategy, outcome.new_payment, outcome.new_term_months, outcome.interest_saved
        );
    }

    Ok(())
}
