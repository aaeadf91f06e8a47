//! Kiểu dữ liệu và logic lõi cho bảng điều khiển sức khỏe EMBRACE.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub mod chat;
pub mod goals;
pub mod metrics;
pub mod motivation;

pub use chat::{AuthTransition, ChatMemory, InMemoryStore, MemoryStore, GREETING};
pub use goals::{classify, progress_percent, Goal, GoalKind, GoalStatus, GoalThresholds};
pub use metrics::{DailyScore, DashboardData, DashboardSnapshot, HealthStatus, Trend};

/// Cấu hình ngưỡng cho các mục tiêu trên bảng điều khiển.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DashboardConfig {
    /// Mục tiêu calo trong ngày (kcal).
    pub calories: GoalThresholds,
    /// Mục tiêu giấc ngủ đêm qua (giờ).
    pub sleep: GoalThresholds,
    /// Mục tiêu số lần ghi nhận sinh hoạt trong tuần.
    pub weekly_activity: GoalThresholds,
    /// Mục tiêu điểm sức khỏe tổng hợp.
    pub health_score: GoalThresholds,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            calories: GoalThresholds {
                complete_at: 1800.0,
                on_track_at: 1350.0,
            },
            sleep: GoalThresholds {
                complete_at: 8.0,
                on_track_at: 6.0,
            },
            weekly_activity: GoalThresholds {
                complete_at: 7.0,
                on_track_at: 5.0,
            },
            health_score: GoalThresholds {
                complete_at: 80.0,
                on_track_at: 60.0,
            },
        }
    }
}

/// Truy cập thời điểm tạo bản ghi, dùng cho các phép lọc theo ngày và theo tuần.
pub trait Dated {
    fn created_at(&self) -> DateTime<Utc>;
}

/// Một bữa ăn người dùng đã ghi lại.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DietEntry {
    pub id: i64,
    /// Breakfast/Lunch/Dinner/Snack theo quy ước, không ràng buộc.
    pub meal_type: String,
    pub food_items: String,
    pub calories: Option<u32>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Một bản ghi sinh hoạt (ngủ, vận động, nước uống, căng thẳng).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LifestyleEntry {
    pub id: i64,
    pub sleep_hours: Option<f64>,
    /// Thang 1-5.
    pub sleep_quality: Option<u8>,
    pub exercise_minutes: Option<u32>,
    pub exercise_type: Option<String>,
    /// Thang 1-5.
    pub stress_level: Option<u8>,
    /// Lít.
    pub water_intake: Option<f64>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Một triệu chứng người dùng đã ghi lại.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SymptomEntry {
    pub id: i64,
    pub symptom_name: String,
    /// Mild/Moderate/Severe, chuỗi tự do.
    pub severity: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Một loại thuốc đang dùng.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MedicationEntry {
    pub id: i64,
    pub medicine_name: String,
    pub dosage: Option<String>,
    pub frequency: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Dated for DietEntry {
    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

impl Dated for LifestyleEntry {
    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

impl Dated for SymptomEntry {
    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

impl Dated for MedicationEntry {
    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// Số bản ghi theo từng nhóm trong tuần gần nhất, do backend tổng hợp.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct WeeklyCounts {
    #[serde(default)]
    pub diet: u32,
    #[serde(default)]
    pub symptoms: u32,
    #[serde(default)]
    pub medications: u32,
    #[serde(default)]
    pub lifestyle: u32,
}

impl WeeklyCounts {
    /// Tổng bản ghi trên cả bốn nhóm theo dõi.
    pub fn total(&self) -> u32 {
        self.diet + self.symptoms + self.medications + self.lifestyle
    }
}

/// Tóm tắt tuần do backend trả về: số lượng kèm chính các bản ghi.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct WeeklySummary {
    pub counts: WeeklyCounts,
    #[serde(default)]
    pub diet_entries: Vec<DietEntry>,
    #[serde(default)]
    pub symptoms: Vec<SymptomEntry>,
    #[serde(default)]
    pub medications: Vec<MedicationEntry>,
    #[serde(default)]
    pub lifestyle: Vec<LifestyleEntry>,
}

/// Phân loại rủi ro do backend tính, đầu vào cho điểm sức khỏe.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Insights {
    pub risk_level: String,
    pub risk_points: u32,
    /// Khoảng 0-1.
    pub confidence: f64,
}

/// Vai người gửi trong hội thoại với trợ lý.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

/// Một tin nhắn trong hội thoại.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Assistant,
            content: content.into(),
        }
    }
}

/// Lỗi chung của tầng logic lõi.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Không đọc được dữ liệu: {0}")]
    Parse(String),
}
