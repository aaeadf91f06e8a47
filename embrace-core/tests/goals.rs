use embrace_core::goals::{build_goals, classify, progress_percent, GoalKind, GoalStatus};
use embrace_core::DashboardConfig;

#[test]
fn calorie_goal_classification_uses_fixed_thresholds() {
    let config = DashboardConfig::default();
    assert_eq!(classify(1800.0, &config.calories), GoalStatus::Completed);
    assert_eq!(classify(1350.0, &config.calories), GoalStatus::OnTrack);
    assert_eq!(classify(1000.0, &config.calories), GoalStatus::Behind);
}

#[test]
fn sleep_activity_and_score_goals_classify_at_their_own_thresholds() {
    let config = DashboardConfig::default();
    assert_eq!(classify(8.0, &config.sleep), GoalStatus::Completed);
    assert_eq!(classify(6.5, &config.sleep), GoalStatus::OnTrack);
    assert_eq!(classify(5.9, &config.sleep), GoalStatus::Behind);

    assert_eq!(classify(7.0, &config.weekly_activity), GoalStatus::Completed);
    assert_eq!(classify(5.0, &config.weekly_activity), GoalStatus::OnTrack);
    assert_eq!(classify(4.0, &config.weekly_activity), GoalStatus::Behind);

    assert_eq!(classify(80.0, &config.health_score), GoalStatus::Completed);
    assert_eq!(classify(60.0, &config.health_score), GoalStatus::OnTrack);
    assert_eq!(classify(59.0, &config.health_score), GoalStatus::Behind);
}

#[test]
fn progress_is_clamped_to_one_hundred() {
    assert_eq!(progress_percent(3000.0, 1800.0), 100.0);
    assert_eq!(progress_percent(900.0, 1800.0), 50.0);
    assert_eq!(progress_percent(0.0, 1800.0), 0.0);
}

#[test]
fn zero_target_yields_zero_progress() {
    assert_eq!(progress_percent(500.0, 0.0), 0.0);
}

#[test]
fn build_goals_produces_the_four_standard_goals_in_order() {
    let config = DashboardConfig::default();
    let goals = build_goals(1400, 8.5, 5, 60, &config);

    assert_eq!(goals.len(), 4);
    assert_eq!(goals[0].kind, GoalKind::DailyCalories);
    assert_eq!(goals[0].status, GoalStatus::OnTrack);
    assert_eq!(goals[0].target, 1800.0);

    assert_eq!(goals[1].kind, GoalKind::Sleep);
    assert_eq!(goals[1].status, GoalStatus::Completed);
    assert_eq!(goals[1].progress, 100.0);

    assert_eq!(goals[2].kind, GoalKind::WeeklyActivity);
    assert_eq!(goals[2].status, GoalStatus::OnTrack);

    assert_eq!(goals[3].kind, GoalKind::HealthScore);
    assert_eq!(goals[3].status, GoalStatus::OnTrack);
    assert_eq!(goals[3].progress, 75.0);
}

#[test]
fn status_serializes_with_kebab_case_labels() {
    assert_eq!(GoalStatus::Completed.as_str(), "completed");
    assert_eq!(GoalStatus::OnTrack.as_str(), "on-track");
    assert_eq!(GoalStatus::Behind.as_str(), "behind");

    let json = serde_json::to_string(&GoalStatus::OnTrack).expect("Không serialize được status");
    assert_eq!(json, r#""on-track""#);
}
