/// deposit projection - product catalog, term bonus and capitalization
use loan_deposit_engine::{DepositQuoteView, EngineConfig, Money};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== deposit projection ===\n");

    let config = EngineConfig::standard();
    let calculator = config.deposit_calculator();
    let savings = config.deposit_product("savings").ok_or("no savings product")?;

    for capitalization in [false, true] {
        let terms = savings.terms(Money::from_major(100_000), 12, capitalization)?;
        let projection = calculator.project(&terms)?;

        println!("capitalization: {}", capitalization);
        println!("{}\n", DepositQuoteView::from_projection(&terms, &projection).to_json_pretty()?);
    }

    // month by month with interest on interest
    let terms = savings.terms(Money::from_major(100_000), 12, true)?;
    for row in calculator.accrual_schedule(&terms)? {
        println!(
            "month {:>2}: +{:>8}  accrued {:>9}  balance {:>10}",
            row.month, row.interest_for_month, row.accrued_interest, row.balance
        );
    }

    Ok(())
}
