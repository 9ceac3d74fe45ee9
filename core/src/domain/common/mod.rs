use std::time::Duration;

use chrono::{DateTime, Utc};

pub mod entities;
pub mod services;

#[derive(Clone, Debug)]
pub struct SnapchefConfig {
    pub database: DatabaseConfig,
    pub llm: LLMConfig,
    pub telegram: TelegramConfig,
    pub session: SessionConfig,
}

#[derive(Clone, Debug)]
pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub name: String,
}

impl DatabaseConfig {
    pub fn url(&self) -> String {
        format!(
            "postgres://{}:{}@{}:{}/{}",
            self.username, self.password, self.host, self.port, self.name
        )
    }
}

#[derive(Clone, Debug)]
pub struct LLMConfig {
    pub gemini_api_key: String,
    pub gemini_model: String,
    /// Upper bound for a single vision or generation call.
    pub timeout: Duration,
    pub temperature: Option<f32>,
}

#[derive(Clone, Debug)]
pub struct TelegramConfig {
    pub bot_token: String,
    pub api_url: String,
}

#[derive(Clone, Debug, Default)]
pub struct SessionConfig {
    /// Idle sessions older than this read as absent. `None` keeps them forever.
    pub ttl: Option<Duration>,
}

/// Creation timestamp for durable records.
pub fn generate_timestamp() -> DateTime<Utc> {
    Utc::now()
}
