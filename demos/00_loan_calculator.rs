/// loan calculator - installment, totals and schedule for a consumer loan
use loan_deposit_engine::{compute_schedule, LoanQuoteView, LoanTerms, Money, NaiveDate, Rate};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== loan calculator ===\n");

    let terms = LoanTerms::new(Money::from_major(500_000), Rate::from_percentage(18), 12)
        .with_first_payment_date(NaiveDate::from_ymd_opt(2024, 2, 15).ok_or("bad date")?);

    let schedule = compute_schedule(&terms)?;

    println!("{}", LoanQuoteView::from_schedule(&schedule).to_json_pretty()?);

    println!("\n  #  date        principal   interest    payment     balance");
    for row in &schedule.rows {
        let date = row.payment_date.map(|d| d.to_string()).unwrap_or_default();
        println!(
            "{:>3}  {:<10}  {:>10}  {:>9}  {:>10}  {:>10}",
            row.payment_number,
            date,
            row.principal_portion,
            row.interest_portion,
            row.total_payment,
            row.remaining_balance,
        );
    }

    Ok(())
}
