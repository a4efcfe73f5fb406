use anyhow::Result;
use serde::Deserialize;
use std::env;

pub const DEFAULT_SEARCH_ENDPOINT: &str = "https://www.googleapis.com/customsearch/v1";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub search: SearchConfig,
    pub filter: FilterConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub port: u16,
    pub host: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchConfig {
    pub api_key: String,
    pub engine_id: String,
    pub endpoint: String,
    pub result_count: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FilterConfig {
    pub positive_override: bool,
}

impl SearchConfig {
    /// Both the API key and the engine id must be present before any
    /// upstream call is attempted.
    pub fn is_configured(&self) -> bool {
        !self.api_key.is_empty() && !self.engine_id.is_empty()
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        Ok(Self {
            server: ServerConfig {
                port: env::var("PORT")
                    .unwrap_or_else(|_| "5000".to_string())
                    .parse()?,
                host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            },
            search: SearchConfig {
                api_key: env::var("GOOGLE_API_KEY").unwrap_or_default(),
                engine_id: env::var("GOOGLE_SEARCH_ENGINE_ID").unwrap_or_default(),
                endpoint: env::var("GOOGLE_SEARCH_ENDPOINT")
                    .unwrap_or_else(|_| DEFAULT_SEARCH_ENDPOINT.to_string()),
                result_count: env::var("SEARCH_RESULT_COUNT")
                    .unwrap_or_else(|_| "20".to_string())
                    .parse::<u32>()?
                    .clamp(1, 20),
            },
            filter: FilterConfig {
                positive_override: env::var("FILTER_POSITIVE_OVERRIDE")
                    .unwrap_or_else(|_| "false".to_string())
                    .parse()?,
            },
        })
    }
}
