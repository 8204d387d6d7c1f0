use crate::models::Role;

#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the REST notifications API
    pub api_base_url: String,
    /// Base URL of the realtime event server (namespace is appended)
    pub ws_base_url: String,
    /// Session token; with none the panel stays offline
    pub session_token: Option<String>,
    pub role: Role,
}

impl Config {
    pub fn from_env() -> Self {
        Config {
            api_base_url: std::env::var("NOTIFY_API_URL")
                .unwrap_or_else(|_| "http://localhost:5000/api".to_string()),
            ws_base_url: std::env::var("NOTIFY_WS_URL")
                .unwrap_or_else(|_| "ws://localhost:5000".to_string()),
            session_token: std::env::var("SESSION_TOKEN")
                .ok()
                .filter(|t| !t.is_empty()),
            role: Role::parse(
                &std::env::var("NOTIFY_ROLE").unwrap_or_else(|_| "warden".to_string()),
            ),
        }
    }
}
