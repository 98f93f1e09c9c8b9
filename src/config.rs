use std::env;

use anyhow::Result;

/// Central configuration loaded from environment variables.
///
/// Everything has a default — the tool only reads public endpoints, so no
/// secret is required. A .env file is loaded at startup via dotenvy.
pub struct Config {
    /// Public AT Protocol API endpoint.
    pub public_api_url: String,
    /// Delay between consecutive feed page fetches, in milliseconds.
    pub page_delay_ms: u64,
    /// How many feed pages to fetch when --batches is not given.
    pub default_batches: usize,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self> {
        Ok(Self {
            public_api_url: env::var("PUBLIC_API_URL")
                .unwrap_or_else(|_| crate::bluesky::client::DEFAULT_PUBLIC_API_URL.to_string()),
            page_delay_ms: parse_env("CONTRAIL_PAGE_DELAY_MS", 200)?,
            default_batches: parse_env("CONTRAIL_BATCHES", 3)?,
        })
    }
}

fn parse_env<T: std::str::FromStr>(key: &str, default: T) -> Result<T> {
    match env::var(key) {
        Ok(raw) => raw
            .parse()
            .map_err(|_| anyhow::anyhow!("{key} is not a valid number: {raw}")),
        Err(_) => Ok(default),
    }
}
