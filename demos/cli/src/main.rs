use std::path::PathBuf;

use anyhow::Context;
use chrono::{Local, Timelike};
use clap::Parser;
use embrace_core::metrics::{average_score, best_day, weekly_average, weekly_change_percent};
use embrace_core::motivation::{greeting_for_hour, motivational_message};
use embrace_core::{DashboardConfig, DashboardData, DashboardSnapshot};
use tracing::debug;

#[derive(Parser, Debug)]
#[command(
    name = "embrace-cli",
    about = "In bảng chỉ số sức khỏe từ một file dữ liệu JSON đã tải về."
)]
struct Args {
    /// Đường dẫn tới file JSON chứa dữ liệu bảng điều khiển.
    #[arg(short, long)]
    input: PathBuf,

    /// In snapshot dưới dạng JSON thay vì bảng tóm tắt.
    #[arg(long)]
    json: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let raw = std::fs::read_to_string(&args.input)
        .with_context(|| format!("Không đọc được file {:?}", args.input))?;

    let data = DashboardData::from_json(&raw)?;
    debug!(entries = data.diet.len(), "đã nạp dữ liệu bảng điều khiển");

    let now = Local::now();
    let snapshot = DashboardSnapshot::derive(&data, &now, &DashboardConfig::default());

    if args.json {
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
        return Ok(());
    }

    println!(
        "{}! {}",
        greeting_for_hour(now.hour()),
        motivational_message()
    );
    println!("Health status: {}", snapshot.status.label());
    println!();
    println!("Today's calories: {} kcal", snapshot.todays_calories);
    println!("Sleep last night: {:.1} hrs", snapshot.last_night_sleep);
    println!("Weekly activity:  {} entries", snapshot.weekly_activity);
    println!("Symptoms (7d):    {}", snapshot.recent_symptoms);
    println!("Health score:     {}/100", snapshot.health_score);
    println!();
    println!(
        "7-day averages: sleep {:.1} hrs, exercise {:.0} min, water {:.1} l",
        weekly_average(&data.lifestyle, |e| e.sleep_hours, &now),
        weekly_average(&data.lifestyle, |e| e.exercise_minutes.map(f64::from), &now),
        weekly_average(&data.lifestyle, |e| e.water_intake, &now)
    );
    for goal in &snapshot.goals {
        println!(
            "[{}] {}: {:.0}% ({:.0}/{:.0} {})",
            goal.status,
            goal.kind.title(),
            goal.progress,
            goal.current,
            goal.target,
            goal.kind.unit()
        );
    }
    println!();
    println!(
        "Weekly report: average {:.1}, best day {}, change {:.0}%",
        average_score(&snapshot.daily_scores),
        best_day(&snapshot.daily_scores)
            .map(|day| day.date.format("%a").to_string())
            .unwrap_or_else(|| "N/A".to_string()),
        weekly_change_percent(&snapshot.daily_scores)
    );
    for day in &snapshot.daily_scores {
        println!("  {}  {:>3}", day.date.format("%a %Y-%m-%d"), day.score);
    }

    Ok(())
}
