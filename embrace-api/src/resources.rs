//! Typed CRUD accessors, one per backend resource.
//!
//! Every accessor borrows the gateway and surfaces its [`ApiError`]
//! unchanged. Create/update payloads keep optional fields as `Option` with
//! `skip_serializing_if`, so an empty form field is omitted from the JSON
//! body rather than submitted as an empty string, the only "validation"
//! performed on the client.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use embrace_core::{
    DietEntry, Insights, LifestyleEntry, MedicationEntry, SymptomEntry, WeeklySummary,
};

use crate::{ApiError, Gateway};

/// Turn an empty or whitespace-only form field into field absence, so it is
/// omitted from the payload instead of submitted as an empty string.
pub fn none_if_empty(value: impl Into<String>) -> Option<String> {
    let value = value.into();
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}

/// Login/register request body.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// Successful login/register response.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct TokenResponse {
    pub access_token: String,
}

/// Profile as returned by the backend.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct UserProfile {
    pub id: i64,
    pub email: String,
    pub full_name: Option<String>,
    pub age: Option<u32>,
    pub gender: Option<String>,
    pub height: Option<u32>,
    pub weight: Option<u32>,
    pub wake_up_time: Option<String>,
    pub sleep_time: Option<String>,
    pub meals_per_day: Option<u32>,
    pub exercise_frequency: Option<u32>,
    pub water_intake: Option<u32>,
    pub medical_conditions: Option<String>,
    pub health_goals: Option<String>,
}

/// Partial profile update; absent fields are left untouched by the backend.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wake_up_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sleep_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meals_per_day: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exercise_frequency: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub water_intake: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub medical_conditions: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub health_goals: Option<String>,
}

/// Diet create/update payload.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct NewDietEntry {
    pub meal_type: String,
    pub food_items: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub calories: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Symptom create/update payload.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct NewSymptomEntry {
    pub symptom_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub severity: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Medication create/update payload.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct NewMedicationEntry {
    pub medicine_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dosage: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frequency: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Lifestyle create/update payload.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct NewLifestyleEntry {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sleep_hours: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sleep_quality: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exercise_minutes: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exercise_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stress_level: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub water_intake: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Weekly insight response: the risk classification plus the rule signals it
/// was derived from.
#[derive(Debug, Clone, Deserialize)]
pub struct WeeklyInsights {
    #[serde(flatten)]
    pub insights: Insights,
    #[serde(default)]
    pub signals: Value,
    #[serde(default)]
    pub observations: Vec<Value>,
}

/// Assistant reply to one chat message.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct ChatReply {
    pub reply: String,
}

/// AI-generated narrative layered over the rule-based insight data.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct AiNarrative {
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub key_patterns: Vec<String>,
    #[serde(default)]
    pub suggestions: Vec<String>,
}

/// Detailed insight payload from the AI insights endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct InsightsDetail {
    #[serde(default)]
    pub risk_level: String,
    #[serde(default)]
    pub risk_points: u32,
    #[serde(default)]
    pub observations: Vec<Value>,
    #[serde(default)]
    pub ai_insights: Option<AiNarrative>,
}

impl Gateway {
    pub fn auth(&self) -> AuthApi<'_> {
        AuthApi { gateway: self }
    }

    pub fn health(&self) -> HealthApi<'_> {
        HealthApi { gateway: self }
    }

    pub fn insights(&self) -> InsightsApi<'_> {
        InsightsApi { gateway: self }
    }

    pub fn diet(&self) -> DietApi<'_> {
        DietApi { gateway: self }
    }

    pub fn symptoms(&self) -> SymptomApi<'_> {
        SymptomApi { gateway: self }
    }

    pub fn medications(&self) -> MedicationApi<'_> {
        MedicationApi { gateway: self }
    }

    pub fn lifestyle(&self) -> LifestyleApi<'_> {
        LifestyleApi { gateway: self }
    }

    pub fn chat(&self) -> ChatApi<'_> {
        ChatApi { gateway: self }
    }

    pub fn ai_insights(&self) -> AiInsightsApi<'_> {
        AiInsightsApi { gateway: self }
    }
}

/// Login, registration, and profile management. Login and register are the
/// only unauthenticated calls; neither touches the session. Storing the
/// returned token is the caller's decision.
pub struct AuthApi<'a> {
    gateway: &'a Gateway,
}

impl AuthApi<'_> {
    pub async fn login(&self, credentials: &Credentials) -> Result<TokenResponse, ApiError> {
        self.gateway.post("/auth/login", credentials).await
    }

    pub async fn register(&self, credentials: &Credentials) -> Result<TokenResponse, ApiError> {
        self.gateway.post("/auth/register", credentials).await
    }

    pub async fn profile(&self) -> Result<UserProfile, ApiError> {
        self.gateway.get("/auth/profile").await
    }

    pub async fn update_profile(&self, update: &ProfileUpdate) -> Result<UserProfile, ApiError> {
        self.gateway.put("/auth/profile", update).await
    }

    pub async fn delete_profile(&self) -> Result<(), ApiError> {
        self.gateway.delete("/auth/profile").await
    }
}

/// Backend-computed weekly summary.
pub struct HealthApi<'a> {
    gateway: &'a Gateway,
}

impl HealthApi<'_> {
    pub async fn weekly_summary(&self) -> Result<WeeklySummary, ApiError> {
        self.gateway.get("/health/weekly-summary").await
    }
}

/// Rule-based weekly risk insights.
pub struct InsightsApi<'a> {
    gateway: &'a Gateway,
}

impl InsightsApi<'_> {
    pub async fn weekly(&self) -> Result<WeeklyInsights, ApiError> {
        self.gateway.get("/insights/weekly").await
    }
}

pub struct DietApi<'a> {
    gateway: &'a Gateway,
}

impl DietApi<'_> {
    pub async fn list(&self) -> Result<Vec<DietEntry>, ApiError> {
        self.gateway.get("/diets/me").await
    }

    pub async fn create(&self, entry: &NewDietEntry) -> Result<DietEntry, ApiError> {
        self.gateway.post("/diets/", entry).await
    }

    pub async fn update(&self, id: i64, entry: &NewDietEntry) -> Result<DietEntry, ApiError> {
        self.gateway.put(&format!("/diets/{id}"), entry).await
    }

    pub async fn delete(&self, id: i64) -> Result<(), ApiError> {
        self.gateway.delete(&format!("/diets/{id}")).await
    }
}

pub struct SymptomApi<'a> {
    gateway: &'a Gateway,
}

impl SymptomApi<'_> {
    pub async fn list(&self) -> Result<Vec<SymptomEntry>, ApiError> {
        self.gateway.get("/symptoms/me").await
    }

    pub async fn create(&self, entry: &NewSymptomEntry) -> Result<SymptomEntry, ApiError> {
        self.gateway.post("/symptoms/", entry).await
    }

    pub async fn update(&self, id: i64, entry: &NewSymptomEntry) -> Result<SymptomEntry, ApiError> {
        self.gateway.put(&format!("/symptoms/{id}"), entry).await
    }

    pub async fn delete(&self, id: i64) -> Result<(), ApiError> {
        self.gateway.delete(&format!("/symptoms/{id}")).await
    }
}

pub struct MedicationApi<'a> {
    gateway: &'a Gateway,
}

impl MedicationApi<'_> {
    pub async fn list(&self) -> Result<Vec<MedicationEntry>, ApiError> {
        self.gateway.get("/medications/me").await
    }

    pub async fn create(&self, entry: &NewMedicationEntry) -> Result<MedicationEntry, ApiError> {
        self.gateway.post("/medications/", entry).await
    }

    pub async fn update(
        &self,
        id: i64,
        entry: &NewMedicationEntry,
    ) -> Result<MedicationEntry, ApiError> {
        self.gateway.put(&format!("/medications/{id}"), entry).await
    }

    pub async fn delete(&self, id: i64) -> Result<(), ApiError> {
        self.gateway.delete(&format!("/medications/{id}")).await
    }
}

pub struct LifestyleApi<'a> {
    gateway: &'a Gateway,
}

impl LifestyleApi<'_> {
    pub async fn list(&self) -> Result<Vec<LifestyleEntry>, ApiError> {
        self.gateway.get("/lifestyles/me").await
    }

    pub async fn create(&self, entry: &NewLifestyleEntry) -> Result<LifestyleEntry, ApiError> {
        self.gateway.post("/lifestyles/", entry).await
    }

    pub async fn update(
        &self,
        id: i64,
        entry: &NewLifestyleEntry,
    ) -> Result<LifestyleEntry, ApiError> {
        self.gateway.put(&format!("/lifestyles/{id}"), entry).await
    }

    pub async fn delete(&self, id: i64) -> Result<(), ApiError> {
        self.gateway.delete(&format!("/lifestyles/{id}")).await
    }
}

/// One chat turn with the assistant. The UI disables its input while a send
/// is outstanding, so at most one request is in flight per session.
pub struct ChatApi<'a> {
    gateway: &'a Gateway,
}

impl ChatApi<'_> {
    pub async fn send(&self, message: &str) -> Result<ChatReply, ApiError> {
        self.gateway
            .post("/ai/chat", &json!({ "message": message }))
            .await
    }
}

/// Detailed AI insight report.
pub struct AiInsightsApi<'a> {
    gateway: &'a Gateway,
}

impl AiInsightsApi<'_> {
    pub async fn insights(&self) -> Result<InsightsDetail, ApiError> {
        self.gateway.get("/ai-insights/insights").await
    }
}
