// src/server/routes.rs
use crate::response::{format_error_response, format_scrape_response};
use crate::scraper::{IncludeFlags, ScrapeRequest};
use crate::server::ServerState;
use rocket::http::Status;
use rocket::response::status::Custom;
use rocket::serde::json::Json;
use rocket::{get, State};
use serde_json::{json, Value};
use std::time::Instant;
use tracing::error;

pub mod health {
    use rocket::{get, serde::json::Json};
    use serde_json::{json, Value};

    #[get("/health")]
    pub async fn health_check() -> Json<Value> {
        Json(json!({
            "status": "healthy",
            "timestamp": chrono::Utc::now().to_rfc3339(),
            "service": "contact-scraper-api"
        }))
    }

    #[get("/")]
    pub async fn index() -> Json<Value> {
        Json(json!({
            "name": "Contact Scraper API",
            "version": env!("CARGO_PKG_VERSION"),
            "description": "Discovers a page's link set and extracts emails, phones and social profiles",
            "endpoints": {
                "health": "/api/health",
                "scrape": "/api/scrape?url=<seed>&max_link=<n>&include_emails=&include_phones=&include_social_links=&include_unique_links="
            }
        }))
    }
}

#[get("/scrape?<url>&<max_link>&<include_emails>&<include_phones>&<include_social_links>&<include_unique_links>")]
#[allow(clippy::too_many_arguments)]
pub async fn scrape(
    state: &State<ServerState>,
    url: Option<String>,
    max_link: Option<usize>,
    include_emails: Option<bool>,
    include_phones: Option<bool>,
    include_social_links: Option<bool>,
    include_unique_links: Option<bool>,
) -> Custom<Json<Value>> {
    let started = Instant::now();

    let url = match url {
        Some(url) if !url.is_empty() => url,
        _ => {
            return Custom(
                Status::BadRequest,
                Json(json!({"error": "URL parameter is required"})),
            )
        }
    };

    let flags = IncludeFlags {
        emails: include_emails.unwrap_or(true),
        phones: include_phones.unwrap_or(true),
        social_links: include_social_links.unwrap_or(true),
        unique_links: include_unique_links.unwrap_or(true),
    };

    let request = ScrapeRequest {
        url: url.clone(),
        max_links: max_link,
        flags,
    };

    match state.scraper.scrape(&request).await {
        Ok(outcome) => {
            let response = format_scrape_response(&url, &outcome, flags, started);
            match serde_json::to_value(&response) {
                Ok(body) => Custom(Status::Ok, Json(body)),
                Err(e) => {
                    error!("Failed to serialize response for {}: {}", url, e);
                    Custom(
                        Status::InternalServerError,
                        Json(json!(format_error_response(e))),
                    )
                }
            }
        }
        Err(e) => {
            error!("Error scraping {}: {}", url, e);
            Custom(
                Status::InternalServerError,
                Json(json!(format_error_response(e))),
            )
        }
    }
}
