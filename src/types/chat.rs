use serde::{Deserialize, Serialize};

/// Body of `POST /api/chat`.
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: String,
    /// Optional inline image as a base64 data URI.
    #[serde(default)]
    pub image: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub success: bool,
    pub response: String,
}

impl ChatResponse {
    pub fn ok(response: String) -> Self {
        Self {
            success: true,
            response,
        }
    }
}
