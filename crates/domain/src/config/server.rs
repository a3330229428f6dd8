use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    pub web_port: u16,

    pub bind_address: String,

    /// When set, non-GET API routes require a matching `X-Api-Key` header.
    #[serde(default)]
    pub api_key: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            web_port: 8080,
            bind_address: "127.0.0.1".to_string(),
            api_key: None,
        }
    }
}
