use anyhow::{anyhow, Context, Result};
use std::env;
use std::time::Duration;
use stockgift::data::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT};

const API_KEY_VARIABLES: [&str; 2] = ["MASSIVE_API_KEY", "Massive_API_Key"];

const DEFAULT_SERVER_PORT: u16 = 8080;

/// Service settings read once at start-up.
#[derive(Clone)]
pub struct Config {
    pub api_key: String,
    pub base_url: String,
    pub timeout: Duration,
    pub server_port: u16,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = API_KEY_VARIABLES
            .iter()
            .filter_map(|name| lookup(name))
            .map(|value| value.trim().to_string())
            .find(|value| !value.is_empty())
            .ok_or_else(|| anyhow!("MASSIVE_API_KEY is not set"))?;

        let base_url = lookup("MASSIVE_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let timeout = match lookup("MARKET_DATA_TIMEOUT_SECONDS") {
            Some(seconds) => {
                let seconds = seconds
                    .trim()
                    .parse::<u64>()
                    .with_context(|| format!("Invalid MARKET_DATA_TIMEOUT_SECONDS: {seconds}"))?;

                if seconds == 0 {
                    return Err(anyhow!("MARKET_DATA_TIMEOUT_SECONDS must be positive"));
                }

                Duration::from_secs(seconds)
            }
            None => DEFAULT_TIMEOUT,
        };

        let server_port = match lookup("SERVER_PORT") {
            Some(port) => port
                .trim()
                .parse::<u16>()
                .with_context(|| format!("Invalid SERVER_PORT: {port}"))?,
            None => DEFAULT_SERVER_PORT,
        };

        Ok(Config {
            api_key,
            base_url,
            timeout,
            server_port,
        })
    }
}
