// src/response.rs
use crate::classifier::LinkClassification;
use crate::extractors::SocialLinks;
use crate::scraper::{IncludeFlags, ScrapeOutcome};
use serde::Serialize;
use std::time::Instant;
use uuid::Uuid;

/// One extracted value and every link it was observed on.
#[derive(Debug, Clone, Serialize)]
pub struct ContactEntry {
    pub value: String,
    pub sources: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ScrapeData {
    pub emails: Vec<ContactEntry>,
    pub phone_numbers: Vec<ContactEntry>,
    pub social_links: SocialLinks,
    pub unique_links: Vec<String>,
    pub link_classification: LinkClassification,
}

#[derive(Debug, Clone, Serialize)]
pub struct ScrapeResponse {
    pub request_id: String,
    pub execution_time: String,
    pub links_analysed_count: String,
    pub root_domain: String,
    pub query: String,
    pub status: String,
    pub data: Vec<ScrapeData>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub status: String,
}

pub fn format_scrape_response(
    query: &str,
    outcome: &ScrapeOutcome,
    flags: IncludeFlags,
    started: Instant,
) -> ScrapeResponse {
    let contacts = &outcome.contacts;

    ScrapeResponse {
        request_id: Uuid::new_v4().to_string(),
        execution_time: format_execution_time(started),
        links_analysed_count: format!("{} links", contacts.visited_links.len()),
        root_domain: outcome.root_domain.clone(),
        query: query.to_string(),
        status: "OK".to_string(),
        data: vec![ScrapeData {
            emails: if flags.emails {
                contact_entries(&contacts.emails)
            } else {
                Vec::new()
            },
            phone_numbers: if flags.phones {
                contact_entries(&contacts.phones)
            } else {
                Vec::new()
            },
            social_links: if flags.social_links {
                contacts.social_links.clone()
            } else {
                SocialLinks::default()
            },
            unique_links: if flags.unique_links {
                contacts.visited_links.iter().cloned().collect()
            } else {
                Vec::new()
            },
            link_classification: outcome.classification.clone(),
        }],
    }
}

pub fn format_error_response(error: impl ToString) -> ErrorResponse {
    ErrorResponse {
        error: error.to_string(),
        status: "ERROR".to_string(),
    }
}

fn contact_entries(map: &std::collections::BTreeMap<String, Vec<String>>) -> Vec<ContactEntry> {
    map.iter()
        .map(|(value, sources)| ContactEntry {
            value: value.clone(),
            sources: sources.clone(),
        })
        .collect()
}

fn format_execution_time(started: Instant) -> String {
    let elapsed = started.elapsed().as_secs();
    format!("{:02} mn : {:02} s", elapsed / 60, elapsed % 60)
}
