use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{Context, Result};

use crate::characters::stroke_source::DEFAULT_BASE_URL;

const DEFAULT_WORKSHEET_TITLE: &str = "姓名笔顺字帖";

/// Application configuration loaded from environment variables.
/// Every variable has a default; malformed values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub stroke_data_base_url: String,
    pub stroke_cache_ttl_secs: u64,
    pub stroke_fetch_timeout_secs: u64,
    pub character_dict_path: Option<PathBuf>,
    pub worksheet_title: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            port: 8080,
            rust_log: "info".to_string(),
            stroke_data_base_url: DEFAULT_BASE_URL.to_string(),
            stroke_cache_ttl_secs: 24 * 3600,
            stroke_fetch_timeout_secs: 10,
            character_dict_path: None,
            worksheet_title: DEFAULT_WORKSHEET_TITLE.to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Config::default();
        Ok(Config {
            port: parse_or(&lookup, "PORT", defaults.port)?,
            rust_log: lookup("RUST_LOG").unwrap_or(defaults.rust_log),
            stroke_data_base_url: lookup("STROKE_DATA_BASE_URL")
                .unwrap_or(defaults.stroke_data_base_url),
            stroke_cache_ttl_secs: parse_or(
                &lookup,
                "STROKE_CACHE_TTL_SECS",
                defaults.stroke_cache_ttl_secs,
            )?,
            stroke_fetch_timeout_secs: parse_or(
                &lookup,
                "STROKE_FETCH_TIMEOUT_SECS",
                defaults.stroke_fetch_timeout_secs,
            )?,
            character_dict_path: lookup("CHARACTER_DICT_PATH")
                .filter(|p| !p.trim().is_empty())
                .map(PathBuf::from),
            worksheet_title: lookup("WORKSHEET_TITLE").unwrap_or(defaults.worksheet_title),
        })
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} must be a valid number, got {raw:?}")),
        None => Ok(default),
    }
}
