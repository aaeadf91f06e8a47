//! Tổng hợp chỉ số từ các bản ghi đã tải về, thuần túy và không trạng thái.

use std::collections::BTreeMap;

use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::goals::{build_goals, progress_percent, Goal};
use crate::{
    CoreError, DashboardConfig, Dated, DietEntry, Insights, LifestyleEntry, MedicationEntry,
    SymptomEntry, WeeklySummary,
};

/// Hướng thay đổi của một chỉ số so với ngưỡng kỳ vọng.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Up,
    Neutral,
    Down,
}

/// Nhãn trạng thái sức khỏe hiển thị trên lời chào.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum HealthStatus {
    GettingStarted,
    Excellent,
    Good,
    Fair,
    NeedsAttention,
}

impl HealthStatus {
    pub fn label(&self) -> &'static str {
        match self {
            Self::GettingStarted => "Getting Started",
            Self::Excellent => "Excellent",
            Self::Good => "Good",
            Self::Fair => "Fair",
            Self::NeedsAttention => "Needs Attention",
        }
    }
}

/// Điểm hoạt động của một ngày trong tuần vừa qua.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DailyScore {
    pub date: NaiveDate,
    pub score: u32,
}

fn same_day<T: Dated, Tz: TimeZone>(entry: &T, now: &DateTime<Tz>) -> bool {
    entry.created_at().with_timezone(&now.timezone()).date_naive() == now.date_naive()
}

fn week_cutoff<Tz: TimeZone>(now: &DateTime<Tz>) -> DateTime<Utc> {
    (now.clone() - Duration::days(7)).with_timezone(&Utc)
}

/// Tổng calo của các bữa ăn ghi trong ngày hôm nay; thiếu calo tính là 0.
pub fn todays_calories<Tz: TimeZone>(entries: &[DietEntry], now: &DateTime<Tz>) -> u32 {
    entries
        .iter()
        .filter(|entry| same_day(*entry, now))
        .map(|entry| entry.calories.unwrap_or(0))
        .sum()
}

/// Số giờ ngủ đêm qua, lấy từ các bản ghi sinh hoạt ghi trong ngày hôm nay.
///
/// Nhiều bản ghi cùng ngày được CỘNG DỒN, không lấy trung bình.
pub fn last_night_sleep<Tz: TimeZone>(entries: &[LifestyleEntry], now: &DateTime<Tz>) -> f64 {
    entries
        .iter()
        .filter(|entry| same_day(*entry, now))
        .map(|entry| entry.sleep_hours.unwrap_or(0.0))
        .sum()
}

/// Trung bình một trường số trong cửa sổ 7 ngày gần nhất; 0 nếu cửa sổ rỗng.
///
/// Mẫu số là số bản ghi trong cửa sổ: bản ghi thiếu trường vẫn được đếm
/// và góp 0 vào tử số.
pub fn weekly_average<T, Tz, F>(entries: &[T], field: F, now: &DateTime<Tz>) -> f64
where
    T: Dated,
    Tz: TimeZone,
    F: Fn(&T) -> Option<f64>,
{
    let cutoff = week_cutoff(now);
    let mut count = 0_usize;
    let mut sum = 0.0;
    for entry in entries.iter().filter(|entry| entry.created_at() >= cutoff) {
        count += 1;
        sum += field(entry).unwrap_or(0.0);
    }

    if count == 0 {
        return 0.0;
    }
    sum / count as f64
}

/// Số bản ghi trong cửa sổ 7 ngày gần nhất.
pub fn recent_count<T: Dated, Tz: TimeZone>(entries: &[T], now: &DateTime<Tz>) -> usize {
    let cutoff = week_cutoff(now);
    entries
        .iter()
        .filter(|entry| entry.created_at() >= cutoff)
        .count()
}

/// Điểm sức khỏe 0-100 suy từ điểm rủi ro.
///
/// Bằng 0 khi cả bốn nhóm theo dõi đều chưa có bản ghi nào, bất kể
/// `risk_points`.
pub fn health_score(summary: &WeeklySummary, insights: &Insights) -> u32 {
    if summary.counts.total() == 0 {
        return 0;
    }

    let raw = 100_i64 - i64::from(insights.risk_points) * 10;
    raw.clamp(0, 100) as u32
}

/// Gom bản ghi theo ngày dương lịch của múi giờ `tz`.
///
/// Khi hiển thị, duyệt ngược (`iter().rev()`) để ngày mới nhất lên trước.
pub fn group_by_day<'a, T: Dated, Tz: TimeZone>(
    entries: &'a [T],
    tz: &Tz,
) -> BTreeMap<NaiveDate, Vec<&'a T>> {
    let mut grouped: BTreeMap<NaiveDate, Vec<&'a T>> = BTreeMap::new();
    for entry in entries {
        let date = entry.created_at().with_timezone(tz).date_naive();
        grouped.entry(date).or_default().push(entry);
    }
    grouped
}

fn count_on_day<T: Dated, Tz: TimeZone>(entries: &[T], day: NaiveDate, tz: &Tz) -> i64 {
    entries
        .iter()
        .filter(|entry| entry.created_at().with_timezone(tz).date_naive() == day)
        .count() as i64
}

/// Điểm hoạt động từng ngày trong 7 ngày vừa qua, ngày cũ nhất đứng trước.
///
/// Điểm = (bữa ăn + sinh hoạt) * 15 + thuốc * 10 - triệu chứng * 5,
/// chặn trong [0, 100].
pub fn daily_activity_scores<Tz: TimeZone>(
    diet: &[DietEntry],
    symptoms: &[SymptomEntry],
    medications: &[MedicationEntry],
    lifestyle: &[LifestyleEntry],
    now: &DateTime<Tz>,
) -> Vec<DailyScore> {
    let tz = now.timezone();
    (0..7_i64)
        .rev()
        .map(|offset| {
            let day = (now.clone() - Duration::days(offset)).date_naive();
            let diet_count = count_on_day(diet, day, &tz);
            let symptom_count = count_on_day(symptoms, day, &tz);
            let medication_count = count_on_day(medications, day, &tz);
            let lifestyle_count = count_on_day(lifestyle, day, &tz);

            let raw =
                (diet_count + lifestyle_count) * 15 + medication_count * 10 - symptom_count * 5;
            DailyScore {
                date: day,
                score: raw.clamp(0, 100) as u32,
            }
        })
        .collect()
}

/// Trung bình điểm hoạt động trong tuần; 0 nếu chưa có ngày nào.
pub fn average_score(scores: &[DailyScore]) -> f64 {
    if scores.is_empty() {
        return 0.0;
    }
    scores.iter().map(|day| f64::from(day.score)).sum::<f64>() / scores.len() as f64
}

/// Ngày có điểm cao nhất; khi hòa, giữ ngày sớm hơn.
pub fn best_day(scores: &[DailyScore]) -> Option<&DailyScore> {
    scores
        .iter()
        .reduce(|best, day| if day.score > best.score { day } else { best })
}

/// Phần trăm thay đổi giữa ngày đầu và ngày cuối của tuần; 0 khi không đủ
/// dữ liệu hoặc ngày đầu bằng 0.
pub fn weekly_change_percent(scores: &[DailyScore]) -> f64 {
    if scores.len() < 2 {
        return 0.0;
    }
    let first = f64::from(scores[0].score);
    let last = f64::from(scores[scores.len() - 1].score);
    if first == 0.0 {
        return 0.0;
    }
    (last - first) / first * 100.0
}

/// Xu hướng calo hôm nay so với mục tiêu.
pub fn calorie_trend(todays: u32, target: f64) -> Trend {
    let todays = f64::from(todays);
    if todays > target * 0.8 {
        Trend::Up
    } else if todays > target * 0.5 {
        Trend::Neutral
    } else {
        Trend::Down
    }
}

/// Xu hướng giấc ngủ đêm qua.
pub fn sleep_trend(hours: f64) -> Trend {
    if hours >= 7.0 {
        Trend::Up
    } else if hours >= 5.0 {
        Trend::Neutral
    } else {
        Trend::Down
    }
}

/// Xu hướng triệu chứng: càng ít càng tốt.
pub fn symptom_trend(recent: usize) -> Trend {
    if recent > 2 {
        Trend::Down
    } else if recent > 0 {
        Trend::Neutral
    } else {
        Trend::Up
    }
}

/// Nhãn trạng thái suy từ điểm sức khỏe, hoặc `GettingStarted` khi chưa có
/// bản ghi nào.
pub fn health_status(summary: &WeeklySummary, insights: &Insights) -> HealthStatus {
    if summary.counts.total() == 0 {
        return HealthStatus::GettingStarted;
    }

    match health_score(summary, insights) {
        score if score >= 80 => HealthStatus::Excellent,
        score if score >= 60 => HealthStatus::Good,
        score if score >= 40 => HealthStatus::Fair,
        _ => HealthStatus::NeedsAttention,
    }
}

/// Toàn bộ dữ liệu một lượt tải bảng điều khiển cần đến.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct DashboardData {
    pub summary: WeeklySummary,
    pub insights: Insights,
    #[serde(default)]
    pub diet: Vec<DietEntry>,
    #[serde(default)]
    pub lifestyle: Vec<LifestyleEntry>,
    #[serde(default)]
    pub symptoms: Vec<SymptomEntry>,
}

impl DashboardData {
    /// Đọc dữ liệu bảng điều khiển từ một chuỗi JSON.
    pub fn from_json(raw: &str) -> Result<Self, CoreError> {
        serde_json::from_str(raw).map_err(|err| CoreError::Parse(err.to_string()))
    }
}

/// Kết quả tổng hợp cuối cùng cho một lần hiển thị bảng điều khiển.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DashboardSnapshot {
    pub generated_at: DateTime<Utc>,
    pub todays_calories: u32,
    pub calorie_progress: f64,
    pub calorie_trend: Trend,
    pub last_night_sleep: f64,
    pub sleep_progress: f64,
    pub sleep_trend: Trend,
    pub weekly_activity: u32,
    pub activity_progress: f64,
    pub recent_symptoms: usize,
    pub symptom_trend: Trend,
    pub health_score: u32,
    pub status: HealthStatus,
    pub goals: Vec<Goal>,
    pub daily_scores: Vec<DailyScore>,
}

impl DashboardSnapshot {
    /// Suy toàn bộ chỉ số hiển thị từ một ảnh chụp dữ liệu bất biến.
    pub fn derive<Tz: TimeZone>(
        data: &DashboardData,
        now: &DateTime<Tz>,
        config: &DashboardConfig,
    ) -> Self {
        let todays_calories = todays_calories(&data.diet, now);
        let last_night_sleep = last_night_sleep(&data.lifestyle, now);
        let weekly_activity = data.summary.counts.lifestyle;
        let recent_symptoms = recent_count(&data.symptoms, now);
        let score = health_score(&data.summary, &data.insights);

        let goals = build_goals(
            todays_calories,
            last_night_sleep,
            weekly_activity,
            score,
            config,
        );

        Self {
            generated_at: Utc::now(),
            todays_calories,
            calorie_progress: progress_percent(f64::from(todays_calories), config.calories.complete_at),
            calorie_trend: calorie_trend(todays_calories, config.calories.complete_at),
            last_night_sleep,
            sleep_progress: progress_percent(last_night_sleep, config.sleep.complete_at),
            sleep_trend: sleep_trend(last_night_sleep),
            weekly_activity,
            activity_progress: progress_percent(
                f64::from(weekly_activity),
                config.weekly_activity.complete_at,
            ),
            recent_symptoms,
            symptom_trend: symptom_trend(recent_symptoms),
            health_score: score,
            status: health_status(&data.summary, &data.insights),
            goals,
            daily_scores: daily_activity_scores(
                &data.summary.diet_entries,
                &data.summary.symptoms,
                &data.summary.medications,
                &data.summary.lifestyle,
                now,
            ),
        }
    }
}
