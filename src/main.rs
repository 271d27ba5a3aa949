// src/main.rs
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod classifier;
mod config;
mod error;
mod extractors;
mod fetcher;
mod page;
mod response;
mod scraper;
mod server;
mod url_util;

use config::{load_config, Config};

#[rocket::main]
async fn main() -> Result<(), rocket::Error> {
    dotenv::dotenv().ok();

    // Load configuration
    let config = match load_config("config.yml").await {
        Ok(config) => config,
        Err(e) => {
            warn!("Failed to load config.yml: {}. Using defaults.", e);
            Config::default()
        }
    };

    // Setup logging
    let directive = format!("contact_scraper={}", config.logging.level)
        .parse()
        .unwrap_or_else(|_| "contact_scraper=info".parse().unwrap());
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(directive))
        .init();

    info!(
        "Workers: {}, Timeout: {}s, Max Links: {}",
        config.crawler.workers,
        config.crawler.seed_timeout_seconds,
        config.crawler.max_links_default
    );

    let _rocket = server::build_rocket(config).launch().await?;

    Ok(())
}
