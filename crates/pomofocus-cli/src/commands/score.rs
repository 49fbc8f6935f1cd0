use chrono::Utc;

use super::common;

pub fn run(json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let app = common::open_app()?;
    let metrics = app.metrics(Utc::now().date_naive());

    if json {
        println!("{}", serde_json::to_string_pretty(&metrics)?);
        return Ok(());
    }

    println!("Focus score: {} ({})", metrics.score, metrics.tier.label());
    println!(
        "Streak: {} day(s)   Today: {} pomodoro(s)",
        metrics.streak, metrics.today
    );
    println!();
    println!("Last 7 days:");
    for day in &metrics.last_7_days {
        println!("  {:<4} {:>2}  {}", day.label, day.count, "#".repeat(day.count as usize));
    }
    Ok(())
}
