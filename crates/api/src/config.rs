use std::env;

/// Runtime configuration for the ask service, read from the process
/// environment after the local `.env` (if any) is loaded.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind_addr: String,
    pub dataset_path: String,
    pub site_dir: String,
    pub llm: LlmConfig,
    pub cache: CacheConfig,
}

#[derive(Debug, Clone)]
pub struct LlmConfig {
    pub base_url: String,
    pub api_key: Option<String>,
    pub model: String,
}

#[derive(Debug, Clone)]
pub struct CacheConfig {
    pub max_entries: usize,
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self {
            bind_addr: env_or("CASEGRAPH_ADDR", "127.0.0.1:8000"),
            dataset_path: env_or("CASEGRAPH_DATASET", "dataset.json"),
            site_dir: env_or("CASEGRAPH_SITE", "site"),
            llm: LlmConfig {
                base_url: env_or("OPENAI_BASE_URL", "https://api.openai.com"),
                api_key: env::var("OPENAI_API_KEY").ok().filter(|key| !key.is_empty()),
                model: env_or("CASEGRAPH_MODEL", "gpt-3.5-turbo"),
            },
            cache: CacheConfig { max_entries: 10_000 },
        }
    }
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}
