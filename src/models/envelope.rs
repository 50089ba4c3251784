use serde::{Deserialize, Serialize};

/// 后端统一响应外壳：`{ message, data }`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiEnvelope<T> {
    #[serde(default)]
    pub message: Option<String>,
    pub data: T,
}

/// 只关心 message 的响应（删除、修改密码等）
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MessageOnly {
    #[serde(default)]
    pub message: Option<String>,
}

impl MessageOnly {
    pub fn message_or(&self, fallback: &str) -> String {
        self.message.clone().unwrap_or_else(|| fallback.to_string())
    }
}
