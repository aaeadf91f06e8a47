//! Bộ nhớ hội thoại theo phiên đăng nhập, lưu bền qua một kho key-value.

use crate::ChatMessage;

/// Lời chào mở đầu của trợ lý, cũng là trạng thái gốc của mọi hội thoại.
pub const GREETING: &str = "Hello! I'm Amigo, your health companion. I'm here to support your wellness journey with gentle guidance and helpful insights. How are you feeling today?";

const MEMORY_KEY_PREFIX: &str = "chat_memory_";

/// Kho key-value đứng sau bộ nhớ hội thoại (localStorage trên trình duyệt,
/// HashMap khi chạy test).
///
/// Việc lưu là nỗ lực tốt nhất: kho nào gặp lỗi nền tảng thì tự nuốt lỗi,
/// bản ghi trong RAM không bị ảnh hưởng.
pub trait MemoryStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str);
    fn remove(&mut self, key: &str);
    fn keys(&self) -> Vec<String>;
}

/// Kho trong RAM, dùng cho mock/testing.
#[derive(Debug, Default, Clone)]
pub struct InMemoryStore {
    entries: std::collections::HashMap<String, String>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl MemoryStore for InMemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.entries.insert(key.to_string(), value.to_string());
    }

    fn remove(&mut self, key: &str) {
        self.entries.remove(key);
    }

    fn keys(&self) -> Vec<String> {
        self.entries.keys().cloned().collect()
    }
}

/// Cạnh chuyển trạng thái đăng nhập mà [`ChatMemory::sync_auth`] phát hiện.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthTransition {
    /// Không đổi trạng thái; không có tác dụng phụ.
    None,
    /// Vừa đăng nhập: bộ nhớ cũ của token khác đã bị dọn, bản ghi đã nạp.
    LoggedIn,
    /// Vừa đăng xuất: bộ nhớ đã xóa, bản ghi quay về lời chào; nơi gọi nên
    /// đóng khung chat đang mở.
    LoggedOut,
}

/// Bản ghi hội thoại đang hoạt động, gắn với đúng một token tại một thời điểm.
pub struct ChatMemory<S: MemoryStore> {
    store: S,
    token: Option<String>,
    transcript: Vec<ChatMessage>,
}

impl<S: MemoryStore> ChatMemory<S> {
    /// Khởi tạo ở trạng thái chưa đăng nhập với đúng một lời chào.
    pub fn new(store: S) -> Self {
        Self {
            store,
            token: None,
            transcript: initial_transcript(),
        }
    }

    /// Bản ghi hội thoại hiện tại, theo thứ tự gửi.
    pub fn transcript(&self) -> &[ChatMessage] {
        &self.transcript
    }

    /// Kho đứng sau, chỉ để đọc (hữu ích khi kiểm tra).
    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// Đối chiếu token hiện tại với lần quan sát trước và chỉ phản ứng khi
    /// SỰ HIỆN DIỆN của token thay đổi. Đổi token mà không qua trạng thái
    /// đăng xuất thì không được coi là một cạnh.
    pub fn sync_auth(&mut self, token: Option<&str>) -> AuthTransition {
        match (self.token.is_some(), token) {
            (false, Some(token)) => {
                self.token = Some(token.to_string());
                self.cleanup_other_memories();
                self.transcript = self.load_saved().unwrap_or_else(initial_transcript);
                AuthTransition::LoggedIn
            }
            (true, None) => {
                self.clear_saved();
                self.token = None;
                self.transcript = initial_transcript();
                AuthTransition::LoggedOut
            }
            (true, Some(token)) => {
                // Không phải cạnh; các lần lưu tiếp theo dùng token mới.
                self.token = Some(token.to_string());
                AuthTransition::None
            }
            (false, None) => AuthTransition::None,
        }
    }

    /// Ghi thêm tin nhắn của người dùng và lưu lại bản ghi.
    pub fn push_user(&mut self, content: impl Into<String>) {
        self.transcript.push(ChatMessage::user(content));
        self.persist();
    }

    /// Ghi thêm câu trả lời của trợ lý và lưu lại bản ghi.
    pub fn push_assistant(&mut self, content: impl Into<String>) {
        self.transcript.push(ChatMessage::assistant(content));
        self.persist();
    }

    fn memory_key(token: &str) -> String {
        format!("{MEMORY_KEY_PREFIX}{token}")
    }

    fn load_saved(&self) -> Option<Vec<ChatMessage>> {
        let token = self.token.as_deref()?;
        let raw = self.store.get(&Self::memory_key(token))?;
        serde_json::from_str(&raw).ok()
    }

    /// Ghi đè toàn bộ bản ghi dưới key của token đang hoạt động. Bản ghi chỉ
    /// gồm lời chào thì không lưu.
    fn persist(&mut self) {
        let Some(token) = self.token.as_deref() else {
            return;
        };
        if self.transcript.len() <= 1 {
            return;
        }
        if let Ok(raw) = serde_json::to_string(&self.transcript) {
            let key = Self::memory_key(token);
            self.store.set(&key, &raw);
        }
    }

    fn clear_saved(&mut self) {
        if let Some(token) = self.token.clone() {
            self.store.remove(&Self::memory_key(&token));
        }
    }

    /// Xóa mọi bộ nhớ `chat_memory_*` không thuộc token đang hoạt động.
    fn cleanup_other_memories(&mut self) {
        let active = self.token.as_deref().map(Self::memory_key);
        for key in self.store.keys() {
            if key.starts_with(MEMORY_KEY_PREFIX) && Some(&key) != active.as_ref() {
                self.store.remove(&key);
            }
        }
    }
}

fn initial_transcript() -> Vec<ChatMessage> {
    vec![ChatMessage::assistant(GREETING)]
}
