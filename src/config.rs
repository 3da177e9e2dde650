use serde::Deserialize;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Reasoning backend selector ("openai" or "gemini"); unset means rules only
    #[serde(default)]
    pub ai_provider: Option<String>,

    /// OpenAI API key
    #[serde(default)]
    pub openai_api_key: Option<String>,

    /// OpenAI chat model
    #[serde(default = "default_openai_model")]
    pub openai_model: String,

    /// OpenAI API base URL
    #[serde(default = "default_openai_api_url")]
    pub openai_api_url: String,

    /// Gemini API key
    #[serde(default)]
    pub gemini_api_key: Option<String>,

    /// Gemini model
    #[serde(default = "default_gemini_model")]
    pub gemini_model: String,

    /// Gemini API base URL
    #[serde(default = "default_gemini_api_url")]
    pub gemini_api_url: String,

    /// Request timeout applied to every reasoning backend call
    #[serde(default = "default_backend_timeout_secs")]
    pub backend_timeout_secs: u64,

    /// RapidAPI key for the H&M product catalog; unset disables product enrichment
    #[serde(default)]
    pub rapidapi_key: Option<String>,

    /// RapidAPI host for the H&M product catalog
    #[serde(default = "default_rapidapi_host")]
    pub rapidapi_host: String,

    #[serde(default = "default_hm_country")]
    pub hm_country: String,

    #[serde(default = "default_hm_lang")]
    pub hm_lang: String,

    /// Redis connection URL
    #[serde(default = "default_redis_url")]
    pub redis_url: String,

    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Comma-separated CORS origins, "*" for any
    #[serde(default = "default_allowed_origins")]
    pub allowed_origins: String,
}

fn default_openai_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_openai_api_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_gemini_model() -> String {
    "gemini-pro".to_string()
}

fn default_gemini_api_url() -> String {
    "https://generativelanguage.googleapis.com/v1".to_string()
}

fn default_backend_timeout_secs() -> u64 {
    30
}

fn default_rapidapi_host() -> String {
    "apidojo-hm-hennes-mauritz-v1.p.rapidapi.com".to_string()
}

fn default_hm_country() -> String {
    "us".to_string()
}

fn default_hm_lang() -> String {
    "en".to_string()
}

fn default_redis_url() -> String {
    "redis://localhost:6379".to_string()
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_allowed_origins() -> String {
    "*".to_string()
}

impl Default for Config {
    /// Rules-only configuration with every optional integration disabled
    fn default() -> Self {
        Self {
            ai_provider: None,
            openai_api_key: None,
            openai_model: default_openai_model(),
            openai_api_url: default_openai_api_url(),
            gemini_api_key: None,
            gemini_model: default_gemini_model(),
            gemini_api_url: default_gemini_api_url(),
            backend_timeout_secs: default_backend_timeout_secs(),
            rapidapi_key: None,
            rapidapi_host: default_rapidapi_host(),
            hm_country: default_hm_country(),
            hm_lang: default_hm_lang(),
            redis_url: default_redis_url(),
            host: default_host(),
            port: default_port(),
            allowed_origins: default_allowed_origins(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_vars(std::env::vars())
    }

    /// Load configuration from an explicit set of key/value pairs
    pub fn from_vars<I>(vars: I) -> anyhow::Result<Self>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        envy::from_iter::<_, Config>(vars)
            .map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }

    /// Normalized provider selector, `None` when unset or blank
    pub fn provider(&self) -> Option<String> {
        self.ai_provider
            .as_deref()
            .map(|p| p.trim().to_lowercase())
            .filter(|p| !p.is_empty())
    }

    /// Parsed CORS origins; empty when any origin is allowed
    ///
    /// A `*` anywhere in the list allows any origin.
    pub fn cors_origins(&self) -> Vec<String> {
        let origins: Vec<String> = self
            .allowed_origins
            .split(',')
            .map(|o| o.trim().to_string())
            .filter(|o| !o.is_empty())
            .collect();

        if origins.iter().any(|o| o == "*") {
            return Vec::new();
        }
        origins
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_defaults_when_empty() {
        let config = Config::from_vars(Vec::new()).unwrap();
        assert_eq!(config.provider(), None);
        assert_eq!(config.openai_model, "gpt-4o-mini");
        assert_eq!(config.port, 8000);
        assert_eq!(config.hm_country, "us");
        assert!(config.rapidapi_key.is_none());
        assert!(config.cors_origins().is_empty());
    }

    #[test]
    fn test_provider_is_normalized() {
        let config = Config::from_vars(vars(&[("AI_PROVIDER", "  OpenAI ")])).unwrap();
        assert_eq!(config.provider(), Some("openai".to_string()));

        let blank = Config::from_vars(vars(&[("AI_PROVIDER", "   ")])).unwrap();
        assert_eq!(blank.provider(), None);
    }

    #[test]
    fn test_cors_origins_split() {
        let config = Config::from_vars(vars(&[(
            "ALLOWED_ORIGINS",
            "http://localhost:5173, https://dressly.app",
        )]))
        .unwrap();
        assert_eq!(
            config.cors_origins(),
            vec!["http://localhost:5173", "https://dressly.app"]
        );
    }

    #[test]
    fn test_cors_wildcard_in_list_allows_any() {
        let config =
            Config::from_vars(vars(&[("ALLOWED_ORIGINS", "*, https://dressly.app")])).unwrap();
        assert!(config.cors_origins().is_empty());
    }

    #[test]
    fn test_invalid_port_fails() {
        let result = Config::from_vars(vars(&[("PORT", "not-a-port")]));
        assert!(result.is_err());
    }
}
