use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Context, Result};

/// Application configuration loaded from environment variables.
/// Fails at startup if a supplied value cannot be parsed.
#[derive(Debug, Clone)]
pub struct Config {
    /// `None` disables AI enrichment and chat; the service runs fallback-only.
    pub openai_api_key: Option<String>,
    pub port: u16,
    pub rust_log: String,
    pub patterns_path: PathBuf,
    pub static_dir: PathBuf,
    pub llm_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary variable lookup.
    pub fn from_vars<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let llm_timeout_secs = lookup("LLM_TIMEOUT_SECS")
            .unwrap_or_else(|| "30".to_string())
            .parse::<u64>()
            .context("LLM_TIMEOUT_SECS must be a whole number of seconds")?;
        if llm_timeout_secs == 0 {
            bail!("LLM_TIMEOUT_SECS must be greater than zero");
        }

        Ok(Config {
            openai_api_key: lookup("OPENAI_API_KEY")
                .map(|k| k.trim().to_string())
                .filter(|k| !k.is_empty()),
            port: lookup("PORT")
                .unwrap_or_else(|| "3000".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: lookup("RUST_LOG").unwrap_or_else(|| "info".to_string()),
            patterns_path: lookup("PATTERNS_PATH")
                .unwrap_or_else(|| "data/patterns.json".to_string())
                .into(),
            static_dir: lookup("STATIC_DIR")
                .unwrap_or_else(|| "public".to_string())
                .into(),
            llm_timeout: Duration::from_secs(llm_timeout_secs),
        })
    }
}
