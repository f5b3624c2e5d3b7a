// src/models/envelope.rs

use serde::Serialize;

/// Standard success body: `{"code": 200, "message": "...", "data": ...}`.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub code: u16,
    pub message: String,
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self::with_message("success", data)
    }

    pub fn with_message(message: &str, data: T) -> Self {
        Self {
            code: 200,
            message: message.to_string(),
            data,
        }
    }
}
