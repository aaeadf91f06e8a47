//! Typed REST client for the EMBRACE backend.
//!
//! One [`Gateway`] wraps a pooled `reqwest::Client`, injects the bearer token
//! held by an explicit [`Session`], and normalizes failures into [`ApiError`].
//! Resource accessors ([`Gateway::diet`] and friends) map 1:1 onto the REST
//! endpoints; nothing here retries, caches, or deduplicates requests.

use std::sync::{Arc, RwLock};
use std::time::Duration;

use reqwest::{Client, ClientBuilder, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

pub mod dashboard;
pub mod resources;

pub use dashboard::{abortable, fetch_dashboard, load_dashboard, ViewLoad};
pub use resources::{
    none_if_empty, AiInsightsApi, AiNarrative, AuthApi, ChatApi, ChatReply, Credentials, DietApi,
    HealthApi, InsightsApi, InsightsDetail, LifestyleApi, MedicationApi, NewDietEntry,
    NewLifestyleEntry, NewMedicationEntry, NewSymptomEntry, ProfileUpdate, SymptomApi,
    TokenResponse, UserProfile, WeeklyInsights,
};

/// Request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Connection timeout in seconds.
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

/// Detail used when an error body cannot be parsed at all.
const FALLBACK_DETAIL: &str = "An error occurred";

/// Failures surfaced by the gateway and every resource client built on it.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The request never produced an HTTP response.
    #[error("network failure: {0}")]
    Network(reqwest::Error),
    /// A non-2xx response; `detail` is the backend's message when one could
    /// be extracted from the JSON body.
    #[error("HTTP {status}: {detail}")]
    Http { status: u16, detail: String },
    /// A 2xx response whose body did not deserialize into the expected type.
    #[error("malformed response: {0}")]
    Malformed(String),
    /// The view that issued the request was cancelled before it resolved.
    #[error("request aborted")]
    Aborted,
}

/// Explicit session store passed to the gateway and to the chat memory
/// wiring, replacing any ambient "token in storage, read anywhere" state.
/// Cloning is cheap; clones share the same token.
#[derive(Debug, Clone, Default)]
pub struct Session {
    token: Arc<RwLock<Option<String>>>,
}

impl Session {
    /// A fresh logged-out session.
    pub fn new() -> Self {
        Self::default()
    }

    /// A session that already holds a token (e.g. restored at startup).
    pub fn with_token(token: impl Into<String>) -> Self {
        let session = Self::new();
        session.login(token);
        session
    }

    pub fn login(&self, token: impl Into<String>) {
        if let Ok(mut guard) = self.token.write() {
            *guard = Some(token.into());
        }
    }

    pub fn logout(&self) {
        if let Ok(mut guard) = self.token.write() {
            *guard = None;
        }
    }

    pub fn token(&self) -> Option<String> {
        self.token.read().ok().and_then(|guard| guard.clone())
    }

    pub fn is_authenticated(&self) -> bool {
        self.token().is_some()
    }
}

/// Uniform request wrapper over the backend's JSON API.
#[derive(Debug, Clone)]
pub struct Gateway {
    http: Client,
    base_url: String,
    session: Session,
}

impl Gateway {
    /// Build a gateway for `base_url` (no trailing slash) using `session`
    /// for bearer-token injection.
    pub fn new(base_url: impl Into<String>, session: Session) -> Self {
        let http = ClientBuilder::new()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .connect_timeout(Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            http,
            base_url: base_url.into(),
            session,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.execute("GET", path, self.http.get(self.url(path)))
            .await
    }

    pub async fn post<T, B>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.execute("POST", path, self.http.post(self.url(path)).json(body))
            .await
    }

    pub async fn put<T, B>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.execute("PUT", path, self.http.put(self.url(path)).json(body))
            .await
    }

    /// DELETE endpoints return no body of interest, so only the status is
    /// checked.
    pub async fn delete(&self, path: &str) -> Result<(), ApiError> {
        debug!(path, "DELETE request");
        let response = self
            .authorized(self.http.delete(self.url(path)))
            .send()
            .await
            .map_err(ApiError::Network)?;

        let status = response.status();
        if !status.is_success() {
            return Err(self.http_error(path, status.as_u16(), response).await);
        }
        Ok(())
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Attach `Authorization: Bearer <token>` only when the session holds a
    /// token; auth requirements are otherwise left to the backend.
    fn authorized(&self, builder: RequestBuilder) -> RequestBuilder {
        match self.session.token() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        method: &str,
        path: &str,
        builder: RequestBuilder,
    ) -> Result<T, ApiError> {
        debug!(method, path, "{method} request");
        let response = self
            .authorized(builder)
            .send()
            .await
            .map_err(ApiError::Network)?;

        let status = response.status();
        if !status.is_success() {
            return Err(self.http_error(path, status.as_u16(), response).await);
        }

        response
            .json::<T>()
            .await
            .map_err(|err| ApiError::Malformed(err.to_string()))
    }

    async fn http_error(&self, path: &str, status: u16, response: reqwest::Response) -> ApiError {
        let body = response.text().await.ok();
        let detail = error_detail(status, body.as_deref());
        warn!(status, path, %detail, "request failed");
        ApiError::Http { status, detail }
    }
}

/// Extract the backend's `detail` message from an error body.
///
/// A JSON body without a `detail` field yields the status-based message; a
/// body that is not JSON at all yields the fixed fallback.
fn error_detail(status: u16, body: Option<&str>) -> String {
    match body.and_then(|raw| serde_json::from_str::<Value>(raw).ok()) {
        Some(value) => value
            .get("detail")
            .and_then(Value::as_str)
            .map(str::to_owned)
            .unwrap_or_else(|| format!("HTTP error! status: {status}")),
        None => FALLBACK_DETAIL.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::error_detail;
    use super::resources::none_if_empty;

    #[test]
    fn empty_form_fields_become_absent() {
        assert_eq!(none_if_empty(""), None);
        assert_eq!(none_if_empty("   "), None);
        assert_eq!(none_if_empty("2 tablets"), Some("2 tablets".to_string()));
    }

    #[test]
    fn detail_field_wins() {
        let detail = error_detail(401, Some(r#"{"detail":"Invalid credentials"}"#));
        assert_eq!(detail, "Invalid credentials");
    }

    #[test]
    fn json_without_detail_falls_back_to_status() {
        let detail = error_detail(404, Some(r#"{"message":"gone"}"#));
        assert_eq!(detail, "HTTP error! status: 404");
    }

    #[test]
    fn unparseable_body_gets_generic_detail() {
        assert_eq!(error_detail(500, Some("<html>boom</html>")), "An error occurred");
        assert_eq!(error_detail(500, None), "An error occurred");
    }
}
