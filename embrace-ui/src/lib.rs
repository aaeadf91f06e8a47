//! Thành phần giao diện bảng điều khiển EMBRACE cho môi trường WebAssembly.

#[cfg(target_arch = "wasm32")]
mod styles;

#[cfg(target_arch = "wasm32")]
mod wasm_ui {
    use crate::styles;
    use chrono::{Local, NaiveDate, Timelike};
    use embrace_core::metrics::{average_score, best_day, weekly_change_percent};
    use embrace_core::motivation::{greeting_for_hour, motivational_message};
    use embrace_core::{
        metrics::group_by_day, ChatMessage, ChatRole, DashboardConfig, DashboardData,
        DashboardSnapshot, DietEntry, Goal, HealthStatus, Trend,
    };
    use serde_wasm_bindgen::from_value;
    use wasm_bindgen::prelude::*;
    use web_sys::{console, Document, Element, Window};
    use yew::prelude::*;

    #[derive(Properties, PartialEq)]
    pub struct DashboardViewProps {
        pub data: DashboardData,
        #[prop_or_default]
        pub transcript: Vec<ChatMessage>,
    }

    #[function_component(DashboardView)]
    fn dashboard_view(props: &DashboardViewProps) -> Html {
        use_effect_with((), |_| {
            if let Some(window) = web_sys::window() {
                if let Some(document) = window.document() {
                    if let Err(err) = styles::ensure_styles(&document) {
                        console::error_1(&err);
                    }
                }
            }
            || ()
        });

        // Lớp thuần ghi nhớ: chỉ suy lại khi ảnh chụp dữ liệu thay đổi.
        let snapshot = use_memo(props.data.clone(), |data| {
            DashboardSnapshot::derive(data, &Local::now(), &DashboardConfig::default())
        });

        html! {
            <div class="embrace-root">
                { render_welcome(&props.data, &snapshot) }
                { render_stats(&snapshot) }
                <div class="goals-grid">
                    { for snapshot.goals.iter().map(render_goal) }
                </div>
                { render_weekly_report(&snapshot) }
                { render_diet_history(&props.data) }
                { render_chat(&props.transcript) }
            </div>
        }
    }

    fn render_welcome(data: &DashboardData, snapshot: &DashboardSnapshot) -> Html {
        let greeting = greeting_for_hour(Local::now().hour());
        let counts = &data.summary.counts;

        html! {
            <section class="welcome-card">
                <div>
                    <h2>{ format!("{greeting}!") }</h2>
                    <p class="welcome-motivation">{ motivational_message() }</p>
                    <span class="status-pill" data-status={status_attr(snapshot.status)}>
                        { format!("Health Status: {}", snapshot.status.label()) }
                    </span>
                </div>
                <div class="week-counts">
                    { render_count(counts.diet, "Meals") }
                    { render_count(counts.lifestyle, "Activities") }
                    { render_count(counts.medications, "Meds") }
                </div>
            </section>
        }
    }

    fn render_count(value: u32, label: &str) -> Html {
        html! {
            <div>
                <span class="count-value">{ value }</span>
                <span class="count-label">{ label }</span>
            </div>
        }
    }

    fn render_stats(snapshot: &DashboardSnapshot) -> Html {
        let calorie_target = goal_target(snapshot, "Daily Calorie Goal");

        html! {
            <div class="stats-grid">
                { render_stat_card(
                    "Today's Calories",
                    snapshot.todays_calories.to_string(),
                    format!(" / {} kcal", fmt_number(calorie_target)),
                    Some(snapshot.calorie_progress),
                    Some(snapshot.calorie_trend),
                ) }
                { render_stat_card(
                    "Sleep Last Night",
                    format!("{:.1}", snapshot.last_night_sleep),
                    " hrs".to_string(),
                    Some(snapshot.sleep_progress),
                    Some(snapshot.sleep_trend),
                ) }
                { render_stat_card(
                    "Weekly Activity",
                    snapshot.weekly_activity.to_string(),
                    " entries".to_string(),
                    Some(snapshot.activity_progress),
                    None,
                ) }
                { render_stat_card(
                    "Health Score",
                    snapshot.health_score.to_string(),
                    "/100".to_string(),
                    Some(f64::from(snapshot.health_score)),
                    None,
                ) }
            </div>
        }
    }

    fn render_stat_card(
        label: &str,
        value: String,
        context: String,
        progress: Option<f64>,
        trend: Option<Trend>,
    ) -> Html {
        html! {
            <div class="stat-card">
                <div class="stat-header">
                    <span class="stat-label">{ label }</span>
                    {
                        trend
                            .map(|trend| html! {
                                <span class="stat-trend" data-trend={trend_attr(trend)}>
                                    { trend_symbol(trend) }
                                </span>
                            })
                            .unwrap_or_default()
                    }
                </div>
                <div>
                    <span class="stat-value">{ value }</span>
                    <span class="stat-context">{ context }</span>
                </div>
                { progress.map(render_progress).unwrap_or_default() }
            </div>
        }
    }

    fn render_progress(progress: f64) -> Html {
        html! {
            <>
                <div class="progress">
                    <div class="progress-fill" style={format!("width: {progress:.0}%;")}></div>
                </div>
                <div class="progress-caption">
                    <span>{"Progress"}</span>
                    <span>{ format!("{progress:.0}%") }</span>
                </div>
            </>
        }
    }

    fn render_goal(goal: &Goal) -> Html {
        html! {
            <div class="goal-card">
                <div class="goal-header">
                    <h3>{ goal.kind.title() }</h3>
                    <span class="goal-badge" data-status={goal.status.as_str()}>
                        { goal.status.as_str().replace('-', " ") }
                    </span>
                </div>
                <p class="goal-description">{ goal.kind.description() }</p>
                <div class="goal-figures">
                    <span>{ format!("{} {}", fmt_number(goal.current), goal.kind.unit()) }</span>
                    <span class="goal-target">
                        { format!("Target: {} {}", fmt_number(goal.target), goal.kind.unit()) }
                    </span>
                </div>
                { render_progress(goal.progress) }
            </div>
        }
    }

    fn render_weekly_report(snapshot: &DashboardSnapshot) -> Html {
        let scores = &snapshot.daily_scores;
        let best = best_day(scores)
            .map(|day| format_weekday(day.date))
            .unwrap_or_else(|| "N/A".to_string());

        html! {
            <section class="report-card">
                <h3>{"Weekly Health Report"}</h3>
                <div class="report-figures">
                    <div>
                        <span class="figure-value">{ format!("{:.1}", average_score(scores)) }</span>
                        <span class="figure-label">{"Average Score"}</span>
                    </div>
                    <div>
                        <span class="figure-value">{ best }</span>
                        <span class="figure-label">{"Best Day"}</span>
                    </div>
                    <div>
                        <span class="figure-value">
                            { format!("{:.0}%", weekly_change_percent(scores)) }
                        </span>
                        <span class="figure-label">{"Weekly Change"}</span>
                    </div>
                </div>
                <div class="daily-bars">
                    {
                        for scores.iter().map(|day| html! {
                            <div class="daily-bar">
                                <div
                                    class="bar"
                                    style={format!("height: {}%;", day.score.max(2))}
                                ></div>
                                <span>{ format_weekday(day.date) }</span>
                            </div>
                        })
                    }
                </div>
            </section>
        }
    }

    fn render_diet_history(data: &DashboardData) -> Html {
        let grouped = group_by_day(&data.diet, &Local);

        html! {
            <section class="history">
                {
                    if grouped.is_empty() {
                        html! { <p class="embrace-empty">{"No meals logged yet."}</p> }
                    } else {
                        // Ngày mới nhất lên trước.
                        html! { for grouped.iter().rev().map(|(date, entries)| render_history_day(*date, entries)) }
                    }
                }
            </section>
        }
    }

    fn render_history_day(date: NaiveDate, entries: &[&DietEntry]) -> Html {
        let total: u32 = entries.iter().map(|entry| entry.calories.unwrap_or(0)).sum();

        html! {
            <div class="history-day">
                <header>
                    <span>{ date.format("%A, %b %e").to_string() }</span>
                    <span>{ format!("Total: {total} calories") }</span>
                </header>
                <ul>
                    {
                        for entries.iter().map(|entry| html! {
                            <li class="history-entry">
                                <span class="entry-meal">{ entry.meal_type.clone() }</span>
                                <span>{ entry.food_items.clone() }</span>
                                <span class="entry-time">
                                    { entry.created_at.with_timezone(&Local).format("%H:%M").to_string() }
                                </span>
                            </li>
                        })
                    }
                </ul>
            </div>
        }
    }

    fn render_chat(transcript: &[ChatMessage]) -> Html {
        if transcript.is_empty() {
            return Html::default();
        }

        html! {
            <section class="chat-panel" aria-live="polite">
                {
                    for transcript.iter().map(|message| html! {
                        <div class="chat-message" data-role={role_attr(message.role)}>
                            { message.content.clone() }
                        </div>
                    })
                }
            </section>
        }
    }

    fn goal_target(snapshot: &DashboardSnapshot, title: &str) -> f64 {
        snapshot
            .goals
            .iter()
            .find(|goal| goal.kind.title() == title)
            .map(|goal| goal.target)
            .unwrap_or_default()
    }

    fn fmt_number(value: f64) -> String {
        if value.fract().abs() < f64::EPSILON {
            format!("{value:.0}")
        } else {
            format!("{value:.1}")
        }
    }

    fn format_weekday(date: NaiveDate) -> String {
        date.format("%a").to_string()
    }

    fn status_attr(status: HealthStatus) -> &'static str {
        match status {
            HealthStatus::GettingStarted => "getting_started",
            HealthStatus::Excellent => "excellent",
            HealthStatus::Good => "good",
            HealthStatus::Fair => "fair",
            HealthStatus::NeedsAttention => "needs_attention",
        }
    }

    fn trend_attr(trend: Trend) -> &'static str {
        match trend {
            Trend::Up => "up",
            Trend::Neutral => "neutral",
            Trend::Down => "down",
        }
    }

    fn trend_symbol(trend: Trend) -> &'static str {
        match trend {
            Trend::Up => "↑",
            Trend::Neutral => "–",
            Trend::Down => "↓",
        }
    }

    fn role_attr(role: ChatRole) -> &'static str {
        match role {
            ChatRole::User => "user",
            ChatRole::Assistant => "assistant",
        }
    }

    #[wasm_bindgen]
    pub fn mount_dashboard_view(selector: &str, data: JsValue) -> Result<(), JsValue> {
        let window: Window =
            web_sys::window().ok_or_else(|| JsValue::from_str("Không có window"))?;
        let document: Document = window
            .document()
            .ok_or_else(|| JsValue::from_str("Không truy cập được document"))?;

        let target: Element = document
            .query_selector(selector)
            .map_err(|err| JsValue::from_str(&format!("Selector lỗi: {err:?}")))?
            .ok_or_else(|| JsValue::from_str("Không tìm thấy element theo selector"))?;

        let data: DashboardData = from_value(data)?;

        yew::Renderer::<DashboardView>::with_root_and_props(
            target,
            DashboardViewProps {
                data,
                transcript: Vec::new(),
            },
        )
        .render();
        Ok(())
    }
}

#[cfg(target_arch = "wasm32")]
pub use wasm_ui::mount_dashboard_view;

#[cfg(not(target_arch = "wasm32"))]
pub fn mount_dashboard_view(
    _: &str,
    _: wasm_bindgen::JsValue,
) -> Result<(), wasm_bindgen::JsValue> {
    Err(wasm_bindgen::JsValue::from_str(
        "embrace-ui chỉ hỗ trợ biên dịch target wasm32",
    ))
}
