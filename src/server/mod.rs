// src/server/mod.rs
use crate::config::Config;
use crate::fetcher::HttpFetcher;
use crate::scraper::ContactScraper;
use rocket::{routes, Build, Rocket};
use std::sync::Arc;

pub mod routes;

pub struct ServerState {
    pub config: Config,
    pub scraper: ContactScraper,
}

pub fn build_rocket(config: Config) -> Rocket<Build> {
    let scraper = ContactScraper::new(Arc::new(HttpFetcher::new()), config.crawler.clone());
    let state = ServerState { config: config.clone(), scraper };

    let figment = rocket::Config::figment().merge(("port", config.server.port));

    rocket::custom(figment).manage(state).mount(
        "/api",
        routes![routes::health::health_check, routes::health::index, routes::scrape],
    )
}
