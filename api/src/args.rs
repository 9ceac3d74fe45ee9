use std::time::Duration;

use clap::{Args as ClapArgs, Parser};
use snapchef_core::domain::common::{
    DatabaseConfig, LLMConfig, SessionConfig, SnapchefConfig, TelegramConfig,
};

#[derive(Debug, Clone, Parser)]
#[command(name = "snapchef", version, about = "SnapChef recipe bot")]
pub struct Args {
    #[command(flatten)]
    pub db: DatabaseArgs,

    #[command(flatten)]
    pub llm: LlmArgs,

    #[command(flatten)]
    pub telegram: TelegramArgs,

    #[command(flatten)]
    pub server: ServerArgs,

    #[command(flatten)]
    pub session: SessionArgs,

    #[command(flatten)]
    pub log: LogArgs,
}

#[derive(Debug, Clone, ClapArgs)]
pub struct DatabaseArgs {
    #[arg(long = "database-host", env = "DATABASE_HOST", default_value = "localhost")]
    pub database_host: String,

    #[arg(long = "database-port", env = "DATABASE_PORT", default_value_t = 5432)]
    pub database_port: u16,

    #[arg(long = "database-user", env = "DATABASE_USER", default_value = "postgres")]
    pub user: String,

    #[arg(
        long = "database-password",
        env = "DATABASE_PASSWORD",
        default_value = "postgres"
    )]
    pub password: String,

    #[arg(long = "database-name", env = "DATABASE_NAME", default_value = "snapchef")]
    pub name: String,
}

#[derive(Debug, Clone, ClapArgs)]
pub struct LlmArgs {
    #[arg(long = "gemini-api-key", env = "GEMINI_API_KEY")]
    pub gemini_api_key: String,

    #[arg(long = "gemini-model", env = "GEMINI_MODEL", default_value = "gemini-2.0-flash")]
    pub gemini_model: String,

    /// Upper bound in seconds for one vision or generation call.
    #[arg(long = "llm-timeout", env = "LLM_TIMEOUT_SECS", default_value_t = 60)]
    pub timeout_secs: u64,

    #[arg(long = "llm-temperature", env = "LLM_TEMPERATURE")]
    pub temperature: Option<f32>,
}

#[derive(Debug, Clone, ClapArgs)]
pub struct TelegramArgs {
    #[arg(long = "telegram-bot-token", env = "TELEGRAM_BOT_TOKEN")]
    pub bot_token: String,

    #[arg(
        long = "telegram-api-url",
        env = "TELEGRAM_API_URL",
        default_value = "https://api.telegram.org"
    )]
    pub api_url: String,

    /// Expected value of the X-Telegram-Bot-Api-Secret-Token header.
    #[arg(long = "telegram-webhook-secret", env = "TELEGRAM_WEBHOOK_SECRET")]
    pub webhook_secret: Option<String>,
}

#[derive(Debug, Clone, ClapArgs)]
pub struct ServerArgs {
    #[arg(long = "server-host", env = "SERVER_HOST", default_value = "0.0.0.0")]
    pub server_host: String,

    #[arg(long = "server-port", env = "SERVER_PORT", default_value_t = 3333)]
    pub server_port: u16,

    #[arg(long = "server-root-path", env = "SERVER_ROOT_PATH", default_value = "")]
    pub root_path: String,
}

#[derive(Debug, Clone, ClapArgs)]
pub struct SessionArgs {
    /// Idle sessions older than this many seconds are forgotten. Unset keeps them.
    #[arg(long = "session-ttl", env = "SESSION_TTL_SECS")]
    pub ttl_secs: Option<u64>,

    #[arg(
        long = "session-purge-interval",
        env = "SESSION_PURGE_INTERVAL_SECS",
        default_value_t = 300,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub purge_interval_secs: u64,
}

#[derive(Debug, Clone, ClapArgs)]
pub struct LogArgs {
    #[arg(long = "log-filter", env = "LOG_FILTER", default_value = "info")]
    pub filter: String,

    #[arg(long = "log-json", env = "LOG_JSON", default_value_t = false)]
    pub json: bool,
}

impl From<Args> for SnapchefConfig {
    fn from(args: Args) -> Self {
        SnapchefConfig {
            database: DatabaseConfig {
                host: args.db.database_host,
                port: args.db.database_port,
                username: args.db.user,
                password: args.db.password,
                name: args.db.name,
            },
            llm: LLMConfig {
                gemini_api_key: args.llm.gemini_api_key,
                gemini_model: args.llm.gemini_model,
                timeout: Duration::from_secs(args.llm.timeout_secs),
                temperature: args.llm.temperature,
            },
            telegram: TelegramConfig {
                bot_token: args.telegram.bot_token,
                api_url: args.telegram.api_url,
            },
            session: SessionConfig {
                ttl: args.session.ttl_secs.map(Duration::from_secs),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_conversion() {
        let args = Args::parse_from([
            "snapchef",
            "--gemini-api-key",
            "key",
            "--telegram-bot-token",
            "123:abc",
            "--llm-timeout",
            "15",
            "--session-ttl",
            "3600",
        ]);

        let config = SnapchefConfig::from(args);

        assert_eq!(config.llm.gemini_api_key, "key");
        assert_eq!(config.llm.timeout, Duration::from_secs(15));
        assert_eq!(config.telegram.bot_token, "123:abc");
        assert_eq!(config.session.ttl, Some(Duration::from_secs(3600)));
        assert_eq!(
            config.database.url(),
            format!(
                "postgres://{}:{}@{}:{}/{}",
                config.database.username,
                config.database.password,
                config.database.host,
                config.database.port,
                config.database.name
            )
        );
    }

    #[test]
    fn test_database_and_server_addresses_are_distinct() {
        let args = Args::try_parse_from([
            "snapchef",
            "--gemini-api-key",
            "key",
            "--telegram-bot-token",
            "123:abc",
            "--database-host",
            "db.internal",
            "--database-port",
            "6543",
            "--server-host",
            "127.0.0.1",
            "--server-port",
            "8080",
        ])
        .unwrap();

        assert_eq!(args.server.server_host, "127.0.0.1");
        assert_eq!(args.server.server_port, 8080);

        let config = SnapchefConfig::from(args);
        assert_eq!(config.database.host, "db.internal");
        assert_eq!(config.database.port, 6543);
    }

    #[test]
    fn test_zero_purge_interval_is_rejected() {
        let result = Args::try_parse_from([
            "snapchef",
            "--gemini-api-key",
            "key",
            "--telegram-bot-token",
            "123:abc",
            "--session-purge-interval",
            "0",
        ]);

        assert!(result.is_err());
    }
}
