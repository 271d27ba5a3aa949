// src/scraper/analyzer.rs
use crate::extractors::{EmailExtractor, PhoneExtractor};
use crate::fetcher::PageFetcher;
use crate::page::parse_page;
use crate::url_util::is_valid_url;
use futures::stream::{self, StreamExt};
use std::collections::HashSet;
use std::time::Duration;
use tracing::{debug, info, warn};

/// What one analyzed link contributed. A link whose fetch or parse failed
/// still counts as visited; it just contributes no contacts.
#[derive(Debug, Clone)]
pub struct LinkAnalysis {
    pub link: String,
    pub emails: HashSet<String>,
    pub phones: HashSet<String>,
}

impl LinkAnalysis {
    fn empty(link: String) -> Self {
        Self {
            link,
            emails: HashSet::new(),
            phones: HashSet::new(),
        }
    }
}

/// Fetches and extracts every valid link with at most `workers` requests in
/// flight. Tasks share no mutable state; results fan back in unordered and
/// per-link failures never abort the batch.
pub async fn analyze_links_parallel(
    links: &[String],
    fetcher: &dyn PageFetcher,
    email_extractor: &EmailExtractor,
    phone_extractor: &PhoneExtractor,
    workers: usize,
    timeout: Duration,
    region_hint: Option<&str>,
) -> Vec<LinkAnalysis> {
    let valid_links: Vec<&String> = links
        .iter()
        .filter(|link| is_valid_url(link.as_str()))
        .collect();
    if valid_links.is_empty() {
        warn!("No valid links found to analyze");
        return Vec::new();
    }

    info!("Starting parallel analysis of {} links", valid_links.len());

    // Futures are built up front; a lazily mapped iterator of borrowing
    // futures trips rustc's closure lifetime inference inside generic
    // async callers.
    let tasks: Vec<_> = valid_links
        .into_iter()
        .map(|link| {
            analyze_single_link(
                link,
                fetcher,
                email_extractor,
                phone_extractor,
                timeout,
                region_hint,
            )
        })
        .collect();

    let results: Vec<LinkAnalysis> = stream::iter(tasks)
        .buffer_unordered(workers.max(1))
        .collect()
        .await;

    info!("Analyzed {} links", results.len());
    results
}

async fn analyze_single_link(
    link: &str,
    fetcher: &dyn PageFetcher,
    email_extractor: &EmailExtractor,
    phone_extractor: &PhoneExtractor,
    timeout: Duration,
    region_hint: Option<&str>,
) -> LinkAnalysis {
    debug!("Analyzing link: {}", link);

    let fetched = match fetcher.fetch(link, timeout).await {
        Ok(fetched) => fetched,
        Err(e) => {
            warn!("Failed to process link {}: {}", link, e);
            return LinkAnalysis::empty(link.to_string());
        }
    };

    let page = parse_page(&fetched.body);

    let mut emails = email_extractor.extract_from_text(&page.text);
    emails.extend(email_extractor.extract_from_json_ld(&page.json_ld));

    let mut phones = phone_extractor.extract_from_text(&page.text, region_hint);
    phones.extend(phone_extractor.extract_from_json_ld(&page.json_ld, region_hint));
    // Canonical numbers re-validate cleanly; the gate only matters for
    // candidates fed in from outside the extractors
    let phones = phone_extractor.validate_candidates(phones.iter().map(String::as_str), region_hint);

    LinkAnalysis {
        link: link.to_string(),
        emails,
        phones,
    }
}
