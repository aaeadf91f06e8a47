use std::fs;

use chrono::DateTime;
use embrace_core::{DashboardConfig, DashboardData, DashboardSnapshot};
use serde_json::Value;

fn fixture_path(name: &str) -> String {
    format!("{}/tests/data/{name}", env!("CARGO_MANIFEST_DIR"))
}

#[test]
fn dashboard_capture_matches_golden() {
    let raw = fs::read_to_string(fixture_path("dashboard_capture.json"))
        .expect("Không đọc được dữ liệu mẫu");
    let data = DashboardData::from_json(&raw).expect("Không đọc được dashboard capture");

    // Mốc thời gian cố định để các chỉ số theo ngày ổn định.
    let now = DateTime::parse_from_rfc3339("2025-06-15T12:00:00+07:00")
        .expect("Mốc thời gian không hợp lệ");

    let snapshot = DashboardSnapshot::derive(&data, &now, &DashboardConfig::default());

    let mut actual = serde_json::to_value(snapshot).expect("Không serialize snapshot");
    normalize_dynamic_fields(&mut actual);

    let expected = fs::read_to_string(fixture_path("dashboard_snapshot.json"))
        .expect("Không đọc được golden snapshot");

    let mut expected_value: Value = serde_json::from_str(&expected).expect("Golden không hợp lệ");
    normalize_dynamic_fields(&mut expected_value);

    assert_eq!(actual, expected_value);
}

fn normalize_dynamic_fields(value: &mut Value) {
    if let Some(obj) = value.as_object_mut() {
        if obj.contains_key("generated_at") {
            obj.insert(
                "generated_at".to_string(),
                Value::String("__DYNAMIC_TIMESTAMP__".to_string()),
            );
        }
    }
}
