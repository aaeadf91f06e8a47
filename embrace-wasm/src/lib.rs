//! Cầu nối WASM <-> JavaScript trung lập framework.

use chrono::Local;
use serde::Deserialize;
use serde_wasm_bindgen::{from_value, to_value};
use wasm_bindgen::prelude::*;
use web_sys::Storage;

use embrace_core::chat::{AuthTransition, ChatMemory, MemoryStore};
use embrace_core::{DashboardConfig, DashboardData, DashboardSnapshot, GoalThresholds};

#[derive(Deserialize)]
struct JsGoalThresholds {
    complete_at: f64,
    on_track_at: f64,
}

impl From<JsGoalThresholds> for GoalThresholds {
    fn from(thresholds: JsGoalThresholds) -> Self {
        Self {
            complete_at: thresholds.complete_at,
            on_track_at: thresholds.on_track_at,
        }
    }
}

#[derive(Deserialize)]
struct JsDashboardConfig {
    #[serde(default)]
    calories: Option<JsGoalThresholds>,
    #[serde(default)]
    sleep: Option<JsGoalThresholds>,
    #[serde(default)]
    weekly_activity: Option<JsGoalThresholds>,
    #[serde(default)]
    health_score: Option<JsGoalThresholds>,
}

impl From<JsDashboardConfig> for DashboardConfig {
    fn from(cfg: JsDashboardConfig) -> Self {
        let mut base = DashboardConfig::default();
        if let Some(calories) = cfg.calories {
            base.calories = calories.into();
        }
        if let Some(sleep) = cfg.sleep {
            base.sleep = sleep.into();
        }
        if let Some(weekly_activity) = cfg.weekly_activity {
            base.weekly_activity = weekly_activity.into();
        }
        if let Some(health_score) = cfg.health_score {
            base.health_score = health_score.into();
        }
        base
    }
}

/// Suy bảng chỉ số hiển thị từ dữ liệu đã tải, theo giờ địa phương hiện tại.
#[wasm_bindgen]
pub fn derive_dashboard(data: JsValue, config: Option<JsValue>) -> Result<JsValue, JsValue> {
    #[cfg(target_arch = "wasm32")]
    console_error_panic_hook::set_once();

    // Đi vòng qua serde_json::Value để nhận cả object JS lẫn chuỗi đã parse.
    let data = from_value::<serde_json::Value>(data)
        .map_err(|err| JsValue::from_str(&format!("Không đọc được JSON dữ liệu: {err}")))?;
    let data: DashboardData = serde_json::from_value(data)
        .map_err(|err| JsValue::from_str(&format!("Không đọc được dữ liệu bảng điều khiển: {err}")))?;

    let cfg = match config {
        Some(js_cfg) => {
            let cfg: JsDashboardConfig = from_value(js_cfg)
                .map_err(|err| JsValue::from_str(&format!("Không đọc được config: {err}")))?;
            DashboardConfig::from(cfg)
        }
        None => DashboardConfig::default(),
    };

    let snapshot = DashboardSnapshot::derive(&data, &Local::now(), &cfg);

    to_value(&snapshot)
        .map_err(|err| JsValue::from_str(&format!("Không serialize snapshot: {err}")))
}

/// Kho bộ nhớ hội thoại đặt trên `window.localStorage`.
///
/// Lỗi nền tảng (hết quota, chế độ riêng tư) bị nuốt: đọc coi như không có,
/// ghi/xóa coi như không làm gì.
pub struct LocalStorageStore {
    storage: Storage,
}

impl LocalStorageStore {
    pub fn new() -> Result<Self, JsValue> {
        let storage = web_sys::window()
            .ok_or_else(|| JsValue::from_str("Không có window"))?
            .local_storage()
            .map_err(|_| JsValue::from_str("Không truy cập được localStorage"))?
            .ok_or_else(|| JsValue::from_str("localStorage không khả dụng"))?;
        Ok(Self { storage })
    }
}

impl MemoryStore for LocalStorageStore {
    fn get(&self, key: &str) -> Option<String> {
        self.storage.get_item(key).ok().flatten()
    }

    fn set(&mut self, key: &str, value: &str) {
        let _ = self.storage.set_item(key, value);
    }

    fn remove(&mut self, key: &str) {
        let _ = self.storage.remove_item(key);
    }

    fn keys(&self) -> Vec<String> {
        let len = self.storage.length().unwrap_or(0);
        (0..len)
            .filter_map(|index| self.storage.key(index).ok().flatten())
            .collect()
    }
}

/// Bộ nhớ hội thoại cho phía JavaScript, lưu trong `localStorage`.
#[wasm_bindgen]
pub struct ChatMemoryHandle {
    inner: ChatMemory<LocalStorageStore>,
}

#[wasm_bindgen]
impl ChatMemoryHandle {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Result<ChatMemoryHandle, JsValue> {
        #[cfg(target_arch = "wasm32")]
        console_error_panic_hook::set_once();

        Ok(Self {
            inner: ChatMemory::new(LocalStorageStore::new()?),
        })
    }

    /// Báo trạng thái đăng nhập hiện tại; trả về `"none"`, `"logged_in"`
    /// hoặc `"logged_out"` tương ứng với cạnh chuyển vừa xảy ra.
    pub fn sync_auth(&mut self, token: Option<String>) -> String {
        let transition = self.inner.sync_auth(token.as_deref());
        match transition {
            AuthTransition::None => "none",
            AuthTransition::LoggedIn => "logged_in",
            AuthTransition::LoggedOut => "logged_out",
        }
        .to_string()
    }

    pub fn push_user(&mut self, content: String) {
        self.inner.push_user(content);
    }

    pub fn push_assistant(&mut self, content: String) {
        self.inner.push_assistant(content);
    }

    pub fn is_authenticated(&self) -> bool {
        self.inner.is_authenticated()
    }

    /// Bản ghi hội thoại hiện tại dưới dạng mảng `{role, content}`.
    pub fn transcript(&self) -> Result<JsValue, JsValue> {
        to_value(self.inner.transcript())
            .map_err(|err| JsValue::from_str(&format!("Không serialize bản ghi: {err}")))
    }
}
