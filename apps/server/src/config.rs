use std::{net::SocketAddr, time::Duration};

use anyhow::Context;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

pub struct Config {
    pub listen_addr: SocketAddr,
    pub db_path: String,
    pub api_base_url: String,
    /// Timeout of each call to the admin backend.
    pub request_timeout: Duration,
    pub cors_allow: Vec<String>,
    pub log_format: LogFormat,
    /// Fill an empty cache with demo data at startup.
    pub seed_demo_data: bool,
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        let listen_addr: SocketAddr = env_or("SK_LISTEN_ADDR", "0.0.0.0:8080")
            .parse()
            .context("Invalid SK_LISTEN_ADDR")?;
        let db_path = env_or("SK_DB_PATH", "./db/cache.db");
        let api_base_url = env_or("SK_API_BASE_URL", synckaro_connect::DEFAULT_API_BASE_URL);
        let timeout_ms: u64 = env_or("SK_REQUEST_TIMEOUT_MS", "30000")
            .parse()
            .unwrap_or(30000);
        let cors_allow = env_or("SK_CORS_ALLOW_ORIGINS", "*")
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        let log_format = if env_or("SK_LOG_FORMAT", "text").eq_ignore_ascii_case("json") {
            LogFormat::Json
        } else {
            LogFormat::Text
        };
        let seed_demo_data = parse_flag(&env_or("SK_SEED_DEMO_DATA", "false"));

        Ok(Self {
            listen_addr,
            db_path,
            api_base_url,
            request_timeout: Duration::from_millis(timeout_ms),
            cors_allow,
            log_format,
            seed_demo_data,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_accept_common_spellings() {
        assert!(parse_flag("true"));
        assert!(parse_flag(" YES "));
        assert!(parse_flag("1"));
        assert!(!parse_flag("false"));
        assert!(!parse_flag(""));
    }
}
