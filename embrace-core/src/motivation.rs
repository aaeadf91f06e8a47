//! Lời chào theo giờ và câu động viên chọn ngẫu nhiên.

use rand::seq::SliceRandom;

/// Bộ câu động viên cố định trên đầu bảng điều khiển.
pub const MESSAGES: [&str; 5] = [
    "Keep up the great work on your health journey!",
    "Every healthy choice you make counts!",
    "You're taking charge of your wellness - amazing!",
    "Small steps lead to big health improvements!",
    "Your commitment to health is inspiring!",
];

/// Chọn đều một câu động viên; không lưu trạng thái giữa các lần chọn.
pub fn motivational_message() -> &'static str {
    MESSAGES
        .choose(&mut rand::thread_rng())
        .copied()
        .unwrap_or(MESSAGES[0])
}

/// Lời chào theo giờ trong ngày (0-23).
pub fn greeting_for_hour(hour: u32) -> &'static str {
    if hour < 12 {
        "Good morning"
    } else if hour < 16 {
        "Good afternoon"
    } else {
        "Good evening"
    }
}
