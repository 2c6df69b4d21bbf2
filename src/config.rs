// Process configuration loaded once at startup
//
// Secrets come from environment variables, optionally seeded from a
// .env.local or .env file via dotenvy. Both API keys are required: a missing
// or blank key is a startup failure, so no request can ever run without them.
//
// from_lookup takes the variable source as a closure so tests can supply values
// without touching the process environment.

use crate::error::{Result, ResearchError};
use std::path::Path;

pub const OPENAI_API_KEY_VAR: &str = "OPENAI_API_KEY";
pub const TAVILY_API_KEY_VAR: &str = "TAVILY_API_KEY";
pub const MODEL_VAR: &str = "RESEARCH_MODEL";
pub const OPENAI_API_BASE_VAR: &str = "OPENAI_API_BASE";
pub const TAVILY_API_BASE_VAR: &str = "TAVILY_API_BASE";

pub const DEFAULT_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_OPENAI_API_BASE: &str = "https://api.openai.com/v1";
pub const DEFAULT_TAVILY_API_BASE: &str = "https://api.tavily.com";

/// Immutable application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// API key for the chat-completion provider
    pub openai_api_key: String,

    /// API key for the web search provider
    pub tavily_api_key: String,

    /// Model identifier used by the research agent
    pub model: String,

    /// Base URL of the OpenAI-compatible API
    pub openai_api_base: String,

    /// Base URL of the Tavily API
    pub tavily_api_base: String,
}

impl AppConfig {
    /// Load configuration from dotenv files and the process environment
    ///
    /// Tries `.env.local` first, then `.env`. Missing files are not an error.
    ///
    /// # Errors
    /// - OPENAI_API_KEY or TAVILY_API_KEY not set (or blank)
    pub fn load() -> Result<Self> {
        let env_loaded = dotenvy::from_filename(".env.local").is_ok() || dotenvy::dotenv().is_ok();
        if !env_loaded {
            tracing::debug!("No .env.local or .env file found, using process environment only");
        }

        Self::from_env()
    }

    /// Load configuration from a specific dotenv file, then the environment
    ///
    /// Variables already present in the environment take precedence over the file.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        dotenvy::from_path(path).map_err(|e| {
            ResearchError::ConfigError(format!("Failed to load {}: {}", path.display(), e))
        })?;

        Self::from_env()
    }

    /// Read configuration from the process environment only
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build configuration from an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let openai_api_key = required(&lookup, OPENAI_API_KEY_VAR)?;
        let tavily_api_key = required(&lookup, TAVILY_API_KEY_VAR)?;

        let model = optional(&lookup, MODEL_VAR).unwrap_or_else(|| DEFAULT_MODEL.to_string());
        let openai_api_base = optional(&lookup, OPENAI_API_BASE_VAR)
            .unwrap_or_else(|| DEFAULT_OPENAI_API_BASE.to_string());
        let tavily_api_base = optional(&lookup, TAVILY_API_BASE_VAR)
            .unwrap_or_else(|| DEFAULT_TAVILY_API_BASE.to_string());

        Ok(Self {
            openai_api_key,
            tavily_api_key,
            model,
            openai_api_base: openai_api_base.trim_end_matches('/').to_string(),
            tavily_api_base: tavily_api_base.trim_end_matches('/').to_string(),
        })
    }
}

fn required<F>(lookup: &F, name: &str) -> Result<String>
where
    F: Fn(&str) -> Option<String>,
{
    optional(lookup, name).ok_or_else(|| {
        ResearchError::EnvError(format!("Please set {} environment variable.", name))
    })
}

fn optional<F>(lookup: &F, name: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(name)
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;
    use std::sync::Mutex;

    // Serialize tests that touch the process environment
    static ENV_TEST_LOCK: Mutex<()> = Mutex::new(());

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_missing_openai_key_is_fatal() {
        let result = AppConfig::from_lookup(lookup_from(&[(TAVILY_API_KEY_VAR, "tvly-123")]));

        match result {
            Err(ResearchError::EnvError(msg)) => assert!(msg.contains(OPENAI_API_KEY_VAR)),
            other => panic!("Expected EnvError, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_tavily_key_is_fatal() {
        let result = AppConfig::from_lookup(lookup_from(&[(OPENAI_API_KEY_VAR, "sk-123")]));

        match result {
            Err(ResearchError::EnvError(msg)) => assert!(msg.contains(TAVILY_API_KEY_VAR)),
            other => panic!("Expected EnvError, got {:?}", other),
        }
    }

    #[test]
    fn test_blank_key_counts_as_missing() {
        let result = AppConfig::from_lookup(lookup_from(&[
            (OPENAI_API_KEY_VAR, "   "),
            (TAVILY_API_KEY_VAR, "tvly-123"),
        ]));

        assert!(matches!(result, Err(ResearchError::EnvError(_))));
    }

    #[test]
    fn test_defaults_applied() {
        let config = AppConfig::from_lookup(lookup_from(&[
            (OPENAI_API_KEY_VAR, "sk-123"),
            (TAVILY_API_KEY_VAR, "tvly-123"),
        ]))
        .unwrap();

        assert_eq!(config.openai_api_key, "sk-123");
        assert_eq!(config.tavily_api_key, "tvly-123");
        assert_eq!(config.model, DEFAULT_MODEL);
        assert_eq!(config.openai_api_base, DEFAULT_OPENAI_API_BASE);
        assert_eq!(config.tavily_api_base, DEFAULT_TAVILY_API_BASE);
    }

    #[test]
    fn test_custom_values_and_trailing_slash() {
        let config = AppConfig::from_lookup(lookup_from(&[
            (OPENAI_API_KEY_VAR, "sk-123"),
            (TAVILY_API_KEY_VAR, "tvly-123"),
            (MODEL_VAR, "gpt-4o"),
            (OPENAI_API_BASE_VAR, "http://localhost:8080/v1/"),
        ]))
        .unwrap();

        assert_eq!(config.model, "gpt-4o");
        assert_eq!(config.openai_api_base, "http://localhost:8080/v1");
    }

    #[test]
    fn test_load_from_dotenv_file() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();

        std::env::remove_var(OPENAI_API_KEY_VAR);
        std::env::remove_var(TAVILY_API_KEY_VAR);

        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "{}=sk-from-file", OPENAI_API_KEY_VAR).unwrap();
        writeln!(file, "{}=tvly-from-file", TAVILY_API_KEY_VAR).unwrap();

        let config = AppConfig::load_from_file(file.path()).unwrap();
        assert_eq!(config.openai_api_key, "sk-from-file");
        assert_eq!(config.tavily_api_key, "tvly-from-file");

        // Cleanup
        std::env::remove_var(OPENAI_API_KEY_VAR);
        std::env::remove_var(TAVILY_API_KEY_VAR);
    }

    #[test]
    fn test_load_from_missing_file_fails() {
        let result = AppConfig::load_from_file(Path::new("/definitely/not/here/.env"));
        assert!(matches!(result, Err(ResearchError::ConfigError(_))));
    }
}
