#![cfg(target_arch = "wasm32")]

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Node};

const STYLE_TAG_SELECTOR: &str = "style[data-embrace-ui]";

/// CSS mặc định của bảng điều khiển cùng các design token dễ ghi đè.
pub const DEFAULT_STYLES: &str = r#"
:root {
  --embrace-font-family: 'Inter', system-ui, -apple-system, BlinkMacSystemFont, 'Segoe UI', sans-serif;
  --embrace-bg: #ffffff;
  --embrace-card-bg: #ffffff;
  --embrace-card-border: rgba(148, 163, 184, 0.28);
  --embrace-radius: 16px;
  --embrace-text: #1f2933;
  --embrace-muted: #52606d;
  --embrace-heading: #11181c;
  --embrace-surface: #f8fafc;
  --embrace-accent: #7c3aed;
  --embrace-progress-track: rgba(148, 163, 184, 0.25);
  --embrace-progress-fill: #7c3aed;
  --embrace-status-completed: #047857;
  --embrace-status-completed-bg: rgba(16, 185, 129, 0.14);
  --embrace-status-on-track: #1d4ed8;
  --embrace-status-on-track-bg: rgba(37, 99, 235, 0.12);
  --embrace-status-behind: #b54708;
  --embrace-status-behind-bg: rgba(220, 104, 3, 0.16);
  --embrace-trend-up: #047857;
  --embrace-trend-down: #b42318;
  --embrace-trend-neutral: #475467;
  --embrace-pill-excellent: #047857;
  --embrace-pill-excellent-bg: rgba(16, 185, 129, 0.14);
  --embrace-pill-good: #1d4ed8;
  --embrace-pill-good-bg: rgba(37, 99, 235, 0.12);
  --embrace-pill-fair: #b54708;
  --embrace-pill-fair-bg: rgba(220, 104, 3, 0.14);
  --embrace-pill-needs-attention: #b42318;
  --embrace-pill-needs-attention-bg: rgba(180, 35, 24, 0.12);
  --embrace-pill-getting-started: #1d4ed8;
  --embrace-pill-getting-started-bg: rgba(37, 99, 235, 0.1);
  --embrace-chat-user-bg: #7c3aed;
  --embrace-chat-user-text: #ffffff;
  --embrace-chat-assistant-bg: #eef2f7;
  --embrace-chat-assistant-text: #1f2933;
}

.embrace-root {
  font-family: var(--embrace-font-family);
  background: var(--embrace-bg);
  color: var(--embrace-text);
  border-radius: var(--embrace-radius);
  display: flex;
  flex-direction: column;
  gap: 24px;
  padding: 28px;
  box-shadow: 0 24px 48px rgba(15, 23, 42, 0.1);
}

.welcome-card {
  display: flex;
  justify-content: space-between;
  align-items: center;
  gap: 16px;
  padding: 20px 24px;
  background: var(--embrace-surface);
  border: 1px solid var(--embrace-card-border);
  border-radius: var(--embrace-radius);
}

.welcome-card h2 {
  margin: 0 0 6px;
  color: var(--embrace-heading);
  font-size: 1.4rem;
}

.welcome-motivation {
  margin: 0 0 10px;
  color: var(--embrace-muted);
}

.status-pill {
  display: inline-block;
  padding: 4px 12px;
  border-radius: 999px;
  font-size: 0.8rem;
  font-weight: 600;
}

.status-pill[data-status="excellent"] {
  color: var(--embrace-pill-excellent);
  background: var(--embrace-pill-excellent-bg);
}

.status-pill[data-status="good"] {
  color: var(--embrace-pill-good);
  background: var(--embrace-pill-good-bg);
}

.status-pill[data-status="fair"] {
  color: var(--embrace-pill-fair);
  background: var(--embrace-pill-fair-bg);
}

.status-pill[data-status="needs_attention"] {
  color: var(--embrace-pill-needs-attention);
  background: var(--embrace-pill-needs-attention-bg);
}

.status-pill[data-status="getting_started"] {
  color: var(--embrace-pill-getting-started);
  background: var(--embrace-pill-getting-started-bg);
}

.week-counts {
  display: flex;
  gap: 18px;
  text-align: center;
}

.week-counts .count-value {
  display: block;
  font-size: 1.2rem;
  font-weight: 700;
  color: var(--embrace-heading);
}

.week-counts .count-label {
  font-size: 0.78rem;
  color: var(--embrace-muted);
}

.stats-grid {
  display: grid;
  grid-template-columns: repeat(auto-fit, minmax(200px, 1fr));
  gap: 16px;
}

.stat-card {
  background: var(--embrace-card-bg);
  border: 1px solid var(--embrace-card-border);
  border-radius: var(--embrace-radius);
  padding: 18px 20px;
  display: flex;
  flex-direction: column;
  gap: 10px;
}

.stat-header {
  display: flex;
  justify-content: space-between;
  align-items: center;
}

.stat-label {
  font-size: 0.85rem;
  color: var(--embrace-muted);
  font-weight: 500;
}

.stat-trend {
  font-size: 0.95rem;
  font-weight: 700;
}

.stat-trend[data-trend="up"] {
  color: var(--embrace-trend-up);
}

.stat-trend[data-trend="down"] {
  color: var(--embrace-trend-down);
}

.stat-trend[data-trend="neutral"] {
  color: var(--embrace-trend-neutral);
}

.stat-value {
  font-size: 1.9rem;
  font-weight: 700;
  color: var(--embrace-heading);
}

.stat-context {
  font-size: 0.82rem;
  color: var(--embrace-muted);
  margin-left: 4px;
}

.progress {
  height: 8px;
  border-radius: 999px;
  background: var(--embrace-progress-track);
  overflow: hidden;
}

.progress-fill {
  height: 100%;
  border-radius: inherit;
  background: var(--embrace-progress-fill);
}

.progress-caption {
  display: flex;
  justify-content: space-between;
  font-size: 0.75rem;
  color: var(--embrace-muted);
}

.goals-grid {
  display: grid;
  grid-template-columns: repeat(auto-fit, minmax(240px, 1fr));
  gap: 16px;
}

.goal-card {
  background: var(--embrace-card-bg);
  border: 1px solid var(--embrace-card-border);
  border-radius: var(--embrace-radius);
  padding: 18px 20px;
  display: flex;
  flex-direction: column;
  gap: 10px;
}

.goal-header {
  display: flex;
  justify-content: space-between;
  align-items: center;
}

.goal-header h3 {
  margin: 0;
  font-size: 0.95rem;
  color: var(--embrace-heading);
}

.goal-description {
  margin: 0;
  font-size: 0.8rem;
  color: var(--embrace-muted);
}

.goal-badge {
  padding: 3px 10px;
  border-radius: 999px;
  font-size: 0.72rem;
  font-weight: 600;
  text-transform: capitalize;
}

.goal-badge[data-status="completed"] {
  color: var(--embrace-status-completed);
  background: var(--embrace-status-completed-bg);
}

.goal-badge[data-status="on-track"] {
  color: var(--embrace-status-on-track);
  background: var(--embrace-status-on-track-bg);
}

.goal-badge[data-status="behind"] {
  color: var(--embrace-status-behind);
  background: var(--embrace-status-behind-bg);
}

.goal-figures {
  display: flex;
  justify-content: space-between;
  font-size: 0.85rem;
}

.goal-target {
  color: var(--embrace-muted);
}

.report-card {
  background: var(--embrace-surface);
  border: 1px solid var(--embrace-card-border);
  border-radius: var(--embrace-radius);
  padding: 18px 20px;
}

.report-card h3 {
  margin: 0 0 12px;
  color: var(--embrace-heading);
  font-size: 1rem;
}

.report-figures {
  display: flex;
  gap: 24px;
  margin-bottom: 14px;
}

.report-figures .figure-value {
  display: block;
  font-size: 1.4rem;
  font-weight: 700;
  color: var(--embrace-heading);
}

.report-figures .figure-label {
  font-size: 0.78rem;
  color: var(--embrace-muted);
}

.daily-bars {
  display: flex;
  gap: 10px;
  align-items: flex-end;
  height: 90px;
}

.daily-bar {
  flex: 1;
  display: flex;
  flex-direction: column;
  align-items: center;
  gap: 4px;
  font-size: 0.72rem;
  color: var(--embrace-muted);
}

.daily-bar .bar {
  width: 100%;
  border-radius: 6px 6px 0 0;
  background: var(--embrace-accent);
  opacity: 0.85;
}

.history {
  display: flex;
  flex-direction: column;
  gap: 14px;
}

.history-day {
  border: 1px solid var(--embrace-card-border);
  border-radius: var(--embrace-radius);
  padding: 14px 18px;
}

.history-day header {
  display: flex;
  justify-content: space-between;
  margin-bottom: 8px;
  font-size: 0.85rem;
  color: var(--embrace-muted);
}

.history-day ul {
  margin: 0;
  padding: 0;
  list-style: none;
  display: flex;
  flex-direction: column;
  gap: 6px;
}

.history-entry {
  display: flex;
  justify-content: space-between;
  gap: 10px;
  font-size: 0.88rem;
}

.history-entry .entry-meal {
  font-weight: 600;
  color: var(--embrace-heading);
}

.history-entry .entry-time {
  color: var(--embrace-muted);
  font-size: 0.78rem;
}

.chat-panel {
  border: 1px solid var(--embrace-card-border);
  border-radius: var(--embrace-radius);
  padding: 16px 18px;
  display: flex;
  flex-direction: column;
  gap: 10px;
  max-height: 320px;
  overflow-y: auto;
}

.chat-message {
  max-width: 80%;
  padding: 8px 14px;
  border-radius: 12px;
  font-size: 0.88rem;
}

.chat-message[data-role="user"] {
  align-self: flex-end;
  background: var(--embrace-chat-user-bg);
  color: var(--embrace-chat-user-text);
}

.chat-message[data-role="assistant"] {
  align-self: flex-start;
  background: var(--embrace-chat-assistant-bg);
  color: var(--embrace-chat-assistant-text);
}

.embrace-empty {
  color: var(--embrace-muted);
  font-size: 0.85rem;
}

@media (max-width: 720px) {
  .embrace-root {
    padding: 18px;
  }

  .welcome-card {
    flex-direction: column;
    align-items: flex-start;
  }

  .report-figures {
    flex-direction: column;
    gap: 10px;
  }
}
"#;

pub fn ensure_styles(document: &Document) -> Result<(), JsValue> {
    if document.query_selector(STYLE_TAG_SELECTOR)?.is_some() {
        return Ok(());
    }

    let head = document
        .head()
        .ok_or_else(|| JsValue::from_str("Document không có thẻ <head>"))?;

    let style_el = document.create_element("style")?;
    style_el.set_attribute("data-embrace-ui", "v1")?;
    style_el.set_text_content(Some(DEFAULT_STYLES));
    head.append_child(&style_el.clone().dyn_into::<Node>()?)?;

    Ok(())
}
