use crate::utils::data_cache::DEFAULT_TTL;
use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;
use std::str::FromStr;

#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,
    pub server_addr: String,

    // Rate limiting
    pub rate_protected_per_min: u32,

    pub api_prefix: String,

    // Dashboard
    pub cache_ttl_secs: u64,
    pub cache_max_entries: u64,
    pub dashboard_timeout_secs: u64,
    pub warmup_dashboard: bool,
}

fn required(key: &str) -> Result<String> {
    env::var(key).with_context(|| format!("{} must be set", key))
}

fn parse_or<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{} has an invalid value: {:?}", key, raw)),
        Err(_) => Ok(default),
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv().ok();

        Ok(Self {
            server_addr: required("SERVER_ADDR")?,
            database_url: required("DATABASE_URL")?,
            jwt_secret: required("JWT_SECRET")?,

            rate_protected_per_min: parse_or("RATE_PROTECTED_PER_MIN", 1000)?,

            api_prefix: env::var("API_PREFIX").unwrap_or_else(|_| "/api".to_string()),

            cache_ttl_secs: parse_or("CACHE_TTL_SECS", DEFAULT_TTL.as_secs())?,
            cache_max_entries: parse_or("CACHE_MAX_ENTRIES", 1000)?,
            dashboard_timeout_secs: parse_or("DASHBOARD_TIMEOUT_SECS", 30)?,
            warmup_dashboard: parse_or("WARMUP_DASHBOARD", true)?,
        })
    }
}
