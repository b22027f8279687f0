//! Configuration management for the course assistant.
//!
//! Configuration can be set via environment variables:
//! - `ANTHROPIC_API_KEY` - Required. API key for the reasoning engine.
//! - `ANTHROPIC_MODEL` - Optional. Model identifier. Defaults to `claude-sonnet-4-20250514`.
//! - `ANTHROPIC_BASE_URL` - Optional. Messages API endpoint override.
//! - `DOCS_PATH` - Optional. Folder of course documents to index on startup. Defaults to `./docs`.
//! - `HOST` - Optional. Server host. Defaults to `127.0.0.1`.
//! - `PORT` - Optional. Server port. Defaults to `8000`.
//! - `MAX_TOOL_ROUNDS` - Optional. Maximum rounds of tool use per query. Defaults to `2`.
//! - `MAX_RESULTS` - Optional. Maximum search results per tool call. Defaults to `5`.
//! - `MAX_HISTORY` - Optional. Conversation exchanges remembered per session. Defaults to `2`.
//! - `CHUNK_SIZE` - Optional. Target chunk size in characters. Defaults to `800`.
//! - `CHUNK_OVERLAP` - Optional. Overlap between adjacent chunks. Defaults to `100`.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(String, String),
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Anthropic API key
    pub api_key: String,

    /// Model identifier for the reasoning engine
    pub model: String,

    /// Messages API endpoint (overridable for tests/proxies)
    pub base_url: String,

    /// Folder of course documents indexed on startup
    pub docs_path: PathBuf,

    /// Server host
    pub host: String,

    /// Server port
    pub port: u16,

    /// Maximum rounds of tool use per query
    pub max_tool_rounds: usize,

    /// Maximum search results returned per tool call
    pub max_results: usize,

    /// Conversation exchanges remembered per session
    pub max_history: usize,

    /// Target chunk size in characters
    pub chunk_size: usize,

    /// Overlap between adjacent chunks in characters
    pub chunk_overlap: usize,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingEnvVar` if `ANTHROPIC_API_KEY` is not set.
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_key = std::env::var("ANTHROPIC_API_KEY")
            .map_err(|_| ConfigError::MissingEnvVar("ANTHROPIC_API_KEY".to_string()))?;

        let model = std::env::var("ANTHROPIC_MODEL")
            .unwrap_or_else(|_| "claude-sonnet-4-20250514".to_string());

        let base_url = std::env::var("ANTHROPIC_BASE_URL")
            .unwrap_or_else(|_| "https://api.anthropic.com/v1/messages".to_string());

        let docs_path = std::env::var("DOCS_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("./docs"));

        let host = std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());

        let port = parse_env("PORT", 8000)?;
        let max_tool_rounds = parse_env("MAX_TOOL_ROUNDS", 2)?;
        let max_results = parse_env("MAX_RESULTS", 5)?;
        let max_history = parse_env("MAX_HISTORY", 2)?;
        let chunk_size = parse_env("CHUNK_SIZE", 800)?;
        let chunk_overlap = parse_env("CHUNK_OVERLAP", 100)?;

        Ok(Self {
            api_key,
            model,
            base_url,
            docs_path,
            host,
            port,
            max_tool_rounds,
            max_results,
            max_history,
            chunk_size,
            chunk_overlap,
        })
    }

    /// Create a config with custom values (useful for testing).
    pub fn new(api_key: String, model: String) -> Self {
        Self {
            api_key,
            model,
            base_url: "https://api.anthropic.com/v1/messages".to_string(),
            docs_path: PathBuf::from("./docs"),
            host: "127.0.0.1".to_string(),
            port: 8000,
            max_tool_rounds: 2,
            max_results: 5,
            max_history: 2,
            chunk_size: 800,
            chunk_overlap: 100,
        }
    }
}

fn parse_env<T>(name: &str, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(name) {
        Ok(value) => value
            .parse()
            .map_err(|e| ConfigError::InvalidValue(name.to_string(), format!("{}", e))),
        Err(_) => Ok(default),
    }
}
