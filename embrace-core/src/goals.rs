//! Phân loại tiến độ mục tiêu theo ngưỡng cố định.

use serde::{Deserialize, Serialize};

use crate::DashboardConfig;

/// Trạng thái ba mức của một mục tiêu.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum GoalStatus {
    Completed,
    OnTrack,
    Behind,
}

impl GoalStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Completed => "completed",
            Self::OnTrack => "on-track",
            Self::Behind => "behind",
        }
    }
}

impl std::fmt::Display for GoalStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Cặp ngưỡng của một mục tiêu; `complete_at` đồng thời là đích hiển thị.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct GoalThresholds {
    pub complete_at: f64,
    pub on_track_at: f64,
}

/// Xếp trạng thái cho giá trị hiện tại so với cặp ngưỡng.
pub fn classify(current: f64, thresholds: &GoalThresholds) -> GoalStatus {
    if current >= thresholds.complete_at {
        GoalStatus::Completed
    } else if current >= thresholds.on_track_at {
        GoalStatus::OnTrack
    } else {
        GoalStatus::Behind
    }
}

/// Phần trăm tiến độ hiển thị, chặn trong [0, 100]; đích 0 trả về 0.
pub fn progress_percent(current: f64, target: f64) -> f64 {
    if target <= 0.0 {
        return 0.0;
    }
    (current / target * 100.0).clamp(0.0, 100.0)
}

/// Bốn mục tiêu cố định của bảng điều khiển.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum GoalKind {
    DailyCalories,
    Sleep,
    WeeklyActivity,
    HealthScore,
}

impl GoalKind {
    pub fn title(&self) -> &'static str {
        match self {
            Self::DailyCalories => "Daily Calorie Goal",
            Self::Sleep => "Sleep Target",
            Self::WeeklyActivity => "Weekly Activity",
            Self::HealthScore => "Health Score",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::DailyCalories => "Maintain healthy eating habits",
            Self::Sleep => "Get quality rest every night",
            Self::WeeklyActivity => "Stay active throughout the week",
            Self::HealthScore => "Overall wellness improvement",
        }
    }

    pub fn unit(&self) -> &'static str {
        match self {
            Self::DailyCalories => "kcal",
            Self::Sleep => "hours",
            Self::WeeklyActivity => "days",
            Self::HealthScore => "/100",
        }
    }
}

/// Một mục tiêu đã chấm điểm, sẵn sàng hiển thị.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Goal {
    pub kind: GoalKind,
    pub current: f64,
    pub target: f64,
    pub progress: f64,
    pub status: GoalStatus,
}

fn scored(kind: GoalKind, current: f64, thresholds: &GoalThresholds) -> Goal {
    Goal {
        kind,
        current,
        target: thresholds.complete_at,
        progress: progress_percent(current, thresholds.complete_at),
        status: classify(current, thresholds),
    }
}

/// Dựng bốn mục tiêu chuẩn từ các chỉ số đã tổng hợp.
pub fn build_goals(
    todays_calories: u32,
    last_night_sleep: f64,
    weekly_activity: u32,
    health_score: u32,
    config: &DashboardConfig,
) -> Vec<Goal> {
    vec![
        scored(
            GoalKind::DailyCalories,
            f64::from(todays_calories),
            &config.calories,
        ),
        scored(GoalKind::Sleep, last_night_sleep, &config.sleep),
        scored(
            GoalKind::WeeklyActivity,
            f64::from(weekly_activity),
            &config.weekly_activity,
        ),
        scored(
            GoalKind::HealthScore,
            f64::from(health_score),
            &config.health_score,
        ),
    ]
}
