// src/config.rs
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub crawler: CrawlerConfig,
    pub server: ServerConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CrawlerConfig {
    /// Size of the per-request worker pool for link analysis.
    pub workers: usize,
    /// Timeout for the seed page fetch, in seconds.
    pub seed_timeout_seconds: u64,
    /// Timeout for each analyzed link's fetch, in seconds.
    pub link_timeout_seconds: u64,
    /// Cap applied to the domain-scoped frontier when the caller does not
    /// supply one. Zero disables the cap.
    pub max_links_default: usize,
    /// Region hint for phone number parsing (ISO 3166-1 alpha-2).
    pub default_region: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            crawler: CrawlerConfig {
                workers: 4,
                seed_timeout_seconds: 60,
                link_timeout_seconds: 10,
                max_links_default: 100,
                default_region: "US".to_string(),
            },
            server: ServerConfig { port: 5000 },
            logging: LoggingConfig {
                level: "info".to_string(),
            },
        }
    }
}

pub async fn load_config(
    path: &str,
) -> std::result::Result<Config, Box<dyn std::error::Error + Send + Sync>> {
    let content = tokio::fs::read_to_string(path).await?;
    let config: Config = serde_yaml::from_str(&content)?;
    Ok(config)
}
