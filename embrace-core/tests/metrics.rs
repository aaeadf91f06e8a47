use chrono::{DateTime, TimeZone, Utc};
use embrace_core::metrics::{
    average_score, best_day, calorie_trend, daily_activity_scores, group_by_day, health_score,
    health_status, last_night_sleep, recent_count, sleep_trend, symptom_trend, todays_calories,
    weekly_average, weekly_change_percent, DailyScore, HealthStatus, Trend,
};
use embrace_core::{
    DietEntry, Insights, LifestyleEntry, MedicationEntry, SymptomEntry, WeeklyCounts,
    WeeklySummary,
};

fn diet(id: i64, calories: Option<u32>, created_at: DateTime<Utc>) -> DietEntry {
    DietEntry {
        id,
        meal_type: "Lunch".to_string(),
        food_items: "Cơm gà".to_string(),
        calories,
        notes: None,
        created_at,
    }
}

fn lifestyle(id: i64, sleep_hours: Option<f64>, created_at: DateTime<Utc>) -> LifestyleEntry {
    LifestyleEntry {
        id,
        sleep_hours,
        sleep_quality: None,
        exercise_minutes: None,
        exercise_type: None,
        stress_level: None,
        water_intake: None,
        notes: None,
        created_at,
    }
}

fn symptom(id: i64, created_at: DateTime<Utc>) -> SymptomEntry {
    SymptomEntry {
        id,
        symptom_name: "Headache".to_string(),
        severity: Some("Mild".to_string()),
        notes: None,
        created_at,
    }
}

fn medication(id: i64, created_at: DateTime<Utc>) -> MedicationEntry {
    MedicationEntry {
        id,
        medicine_name: "Paracetamol".to_string(),
        dosage: Some("500mg".to_string()),
        frequency: None,
        notes: None,
        created_at,
    }
}

fn summary(diet: u32, symptoms: u32, medications: u32, lifestyle: u32) -> WeeklySummary {
    WeeklySummary {
        counts: WeeklyCounts {
            diet,
            symptoms,
            medications,
            lifestyle,
        },
        ..WeeklySummary::default()
    }
}

fn insights(risk_points: u32) -> Insights {
    Insights {
        risk_level: "moderate".to_string(),
        risk_points,
        confidence: 0.8,
    }
}

fn noon(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 12, 0, 0).unwrap()
}

#[test]
fn todays_calories_is_zero_without_entries_dated_today() {
    let now = noon(2025, 6, 15);
    assert_eq!(todays_calories(&[], &now), 0);

    let yesterday_only = vec![diet(1, Some(700), noon(2025, 6, 14))];
    assert_eq!(todays_calories(&yesterday_only, &now), 0);
}

#[test]
fn todays_calories_sums_and_treats_missing_as_zero() {
    let now = noon(2025, 6, 15);
    let entries = vec![
        diet(1, Some(500), now - chrono::Duration::hours(3)),
        diet(2, None, now - chrono::Duration::hours(2)),
        diet(3, Some(300), now - chrono::Duration::hours(1)),
        diet(4, Some(900), noon(2025, 6, 13)),
    ];
    assert_eq!(todays_calories(&entries, &now), 800);
}

#[test]
fn today_means_calendar_day_not_trailing_window() {
    let now = noon(2025, 6, 15);
    // 23:00 hôm qua cách now 13 giờ nhưng không thuộc hôm nay.
    let late_yesterday = Utc.with_ymd_and_hms(2025, 6, 14, 23, 0, 0).unwrap();
    // 00:30 hôm nay thuộc hôm nay dù mới cách 11,5 giờ.
    let early_today = Utc.with_ymd_and_hms(2025, 6, 15, 0, 30, 0).unwrap();

    let entries = vec![diet(1, Some(100), late_yesterday), diet(2, Some(40), early_today)];
    assert_eq!(todays_calories(&entries, &now), 40);
}

#[test]
fn today_is_bucketed_in_the_callers_timezone() {
    // 16:30Z ngày 15 là 01:30 ngày 16 theo múi +09:00.
    let entry_at = Utc.with_ymd_and_hms(2025, 6, 15, 16, 30, 0).unwrap();
    let tz = chrono::FixedOffset::east_opt(9 * 3600).unwrap();
    let now = tz.with_ymd_and_hms(2025, 6, 16, 9, 0, 0).unwrap();

    let entries = vec![diet(1, Some(250), entry_at)];
    assert_eq!(todays_calories(&entries, &now), 250);
}

#[test]
fn last_night_sleep_sums_multiple_same_day_entries() {
    let now = noon(2025, 6, 15);
    let entries = vec![
        lifestyle(1, Some(7.5), now - chrono::Duration::hours(5)),
        lifestyle(2, Some(1.0), now - chrono::Duration::hours(1)),
        lifestyle(3, Some(8.0), noon(2025, 6, 13)),
    ];
    assert_eq!(last_night_sleep(&entries, &now), 8.5);
}

#[test]
fn weekly_average_is_zero_on_empty_window() {
    let now = noon(2025, 6, 15);
    assert_eq!(weekly_average(&[], |e: &LifestyleEntry| e.sleep_hours, &now), 0.0);

    let stale = vec![lifestyle(1, Some(8.0), noon(2025, 5, 1))];
    assert_eq!(weekly_average(&stale, |e| e.sleep_hours, &now), 0.0);
}

#[test]
fn weekly_average_divides_by_entry_count_not_field_count() {
    let now = noon(2025, 6, 15);
    let entries = vec![
        lifestyle(1, Some(8.0), now - chrono::Duration::days(1)),
        lifestyle(2, None, now - chrono::Duration::days(2)),
    ];
    // Bản ghi thiếu trường vẫn nằm trong mẫu số và kéo trung bình xuống.
    assert_eq!(weekly_average(&entries, |e| e.sleep_hours, &now), 4.0);
}

#[test]
fn recent_count_uses_trailing_seven_day_timestamp_window() {
    let now = noon(2025, 6, 15);
    let entries = vec![
        symptom(1, now - chrono::Duration::days(7)),
        symptom(2, now - chrono::Duration::days(8)),
        symptom(3, now - chrono::Duration::hours(1)),
    ];
    assert_eq!(recent_count(&entries, &now), 2);
}

#[test]
fn health_score_is_zero_without_any_entries() {
    let empty = summary(0, 0, 0, 0);
    assert_eq!(health_score(&empty, &insights(0)), 0);
    assert_eq!(health_score(&empty, &insights(5)), 0);
}

#[test]
fn health_score_is_monotone_and_bounded() {
    let some_data = summary(2, 1, 0, 3);
    let mut previous = 101_i64;
    for risk_points in 0..=15 {
        let score = health_score(&some_data, &insights(risk_points));
        assert!(score <= 100);
        assert!(i64::from(score) <= previous);
        previous = i64::from(score);
    }
    assert_eq!(health_score(&some_data, &insights(3)), 70);
    assert_eq!(health_score(&some_data, &insights(20)), 0);
}

#[test]
fn group_by_day_separates_calendar_days_most_recent_last_in_map() {
    let now = noon(2025, 6, 15);
    let entries = vec![
        diet(1, Some(100), noon(2025, 6, 14)),
        diet(2, Some(200), noon(2025, 6, 15)),
        diet(3, Some(300), noon(2025, 6, 14)),
    ];

    let grouped = group_by_day(&entries, &now.timezone());
    assert_eq!(grouped.len(), 2);

    let day_14 = chrono::NaiveDate::from_ymd_opt(2025, 6, 14).unwrap();
    let day_15 = chrono::NaiveDate::from_ymd_opt(2025, 6, 15).unwrap();
    assert_eq!(grouped[&day_14].len(), 2);
    assert_eq!(grouped[&day_15].len(), 1);
    assert!(grouped[&day_14].iter().all(|e| e.created_at.date_naive() == day_14));

    // Duyệt ngược cho hiển thị: ngày mới nhất đứng trước.
    let mut descending = grouped.keys().rev();
    assert_eq!(descending.next(), Some(&day_15));
    assert_eq!(descending.next(), Some(&day_14));
}

#[test]
fn daily_activity_scores_cover_seven_days_and_clamp() {
    let now = noon(2025, 6, 15);
    let diet_entries = vec![diet(1, Some(500), now), diet(2, Some(300), now)];
    let lifestyle_entries = vec![lifestyle(1, Some(7.0), now)];
    // 10 triệu chứng hôm kia kéo điểm xuống dưới 0 và bị chặn lại.
    let symptom_entries: Vec<SymptomEntry> = (0..10_i64)
        .map(|i| symptom(i, noon(2025, 6, 13)))
        .collect();
    let medication_entries = vec![medication(1, noon(2025, 6, 14))];

    let scores = daily_activity_scores(
        &diet_entries,
        &symptom_entries,
        &medication_entries,
        &lifestyle_entries,
        &now,
    );

    assert_eq!(scores.len(), 7);
    assert_eq!(scores[0].date, chrono::NaiveDate::from_ymd_opt(2025, 6, 9).unwrap());
    assert_eq!(scores[6].date, chrono::NaiveDate::from_ymd_opt(2025, 6, 15).unwrap());
    // Hôm nay: (2 bữa ăn + 1 sinh hoạt) * 15 = 45.
    assert_eq!(scores[6].score, 45);
    // Hôm kia: chỉ triệu chứng, điểm âm bị chặn về 0.
    assert_eq!(scores[4].score, 0);
    // Hôm qua: một thuốc = 10.
    assert_eq!(scores[5].score, 10);
}

#[test]
fn trend_thresholds_match_dashboard_rules() {
    assert_eq!(calorie_trend(1500, 1800.0), Trend::Up);
    assert_eq!(calorie_trend(1000, 1800.0), Trend::Neutral);
    assert_eq!(calorie_trend(900, 1800.0), Trend::Down);

    assert_eq!(sleep_trend(7.0), Trend::Up);
    assert_eq!(sleep_trend(5.0), Trend::Neutral);
    assert_eq!(sleep_trend(4.9), Trend::Down);

    assert_eq!(symptom_trend(3), Trend::Down);
    assert_eq!(symptom_trend(1), Trend::Neutral);
    assert_eq!(symptom_trend(0), Trend::Up);
}

#[test]
fn health_status_labels_follow_score_bands() {
    assert_eq!(
        health_status(&summary(0, 0, 0, 0), &insights(0)),
        HealthStatus::GettingStarted
    );
    let with_data = summary(1, 0, 0, 1);
    assert_eq!(health_status(&with_data, &insights(1)), HealthStatus::Excellent);
    assert_eq!(health_status(&with_data, &insights(4)), HealthStatus::Good);
    assert_eq!(health_status(&with_data, &insights(6)), HealthStatus::Fair);
    assert_eq!(
        health_status(&with_data, &insights(7)),
        HealthStatus::NeedsAttention
    );
}

#[test]
fn weekly_report_helpers_handle_edges() {
    assert_eq!(average_score(&[]), 0.0);
    assert_eq!(weekly_change_percent(&[]), 0.0);
    assert!(best_day(&[]).is_none());

    let day = |d: u32, score: u32| DailyScore {
        date: chrono::NaiveDate::from_ymd_opt(2025, 6, d).unwrap(),
        score,
    };

    let scores = vec![day(9, 20), day(10, 60), day(11, 60), day(12, 40)];
    assert_eq!(average_score(&scores), 45.0);
    // Hòa điểm thì giữ ngày sớm hơn.
    assert_eq!(best_day(&scores).unwrap().date, day(10, 60).date);
    assert_eq!(weekly_change_percent(&scores), 100.0);

    // Ngày đầu bằng 0 thì không chia.
    let from_zero = vec![day(9, 0), day(10, 50)];
    assert_eq!(weekly_change_percent(&from_zero), 0.0);
}
