use anyhow::Context;
use dotenvy::dotenv;
use std::env;
use std::str::FromStr;

#[derive(Clone, Debug)]
pub struct Config {
    pub server_addr: String,
    pub database_url: String,
    pub db_max_connections: u32,

    pub api_prefix: String,
    pub public_prefix: String,

    /// Offset of local attendance time from UTC
    pub utc_offset_minutes: i32,

    // Rate limiting
    pub rate_rfid_per_min: u32,
    pub rate_protected_per_min: u32,

    pub log_dir: String,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenv().ok();

        Ok(Self {
            server_addr: required("SERVER_ADDR")?,
            database_url: required("DATABASE_URL")?,
            db_max_connections: parsed("DB_MAX_CONNECTIONS", 10)?,

            api_prefix: env::var("API_PREFIX").unwrap_or_else(|_| "/api".to_string()),
            public_prefix: env::var("PUBLIC_PREFIX").unwrap_or_else(|_| "/public".to_string()),

            utc_offset_minutes: parsed("LOCAL_UTC_OFFSET_MINUTES", 7 * 60)?, // WIB

            rate_rfid_per_min: parsed("RATE_RFID_PER_MIN", 120)?,
            rate_protected_per_min: parsed("RATE_PROTECTED_PER_MIN", 1000)?,

            log_dir: env::var("LOG_DIR").unwrap_or_else(|_| "logs".to_string()),
        })
    }
}

fn required(name: &str) -> anyhow::Result<String> {
    env::var(name).with_context(|| format!("{name} must be set"))
}

fn parsed<T>(name: &str, default: T) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{name} is not valid: {raw:?}")),
        Err(_) => Ok(default),
    }
}
