// src/scraper/frontier.rs
use crate::error::{Result, ScrapeError};
use crate::fetcher::PageFetcher;
use crate::page::parse_page;
use crate::url_util::{host_of, is_same_host, is_valid_url, normalize_url};
use serde_json::Value;
use std::collections::HashSet;
use std::time::Duration;
use tracing::{debug, info};

/// Link sets produced from the single seed fetch, prior to per-link
/// analysis.
#[derive(Debug, Clone)]
pub struct Frontier {
    /// Seed first, then every discovered link on the seed's host or a
    /// subdomain of it, capped.
    pub domain_links: Vec<String>,
    /// Every valid link discovered, any host.
    pub all_links: Vec<String>,
    /// Host of the URL the seed fetch finally landed on.
    pub root_domain: String,
}

/// Fetches the seed once and partitions its discovered links. An invalid
/// seed or a failed seed fetch is fatal; there is no frontier without the
/// seed page.
pub async fn build_frontier(
    seed_url: &str,
    fetcher: &dyn PageFetcher,
    timeout: Duration,
    max_links: usize,
) -> Result<Frontier> {
    if !is_valid_url(seed_url) {
        return Err(ScrapeError::InvalidUrl(seed_url.to_string()));
    }

    info!("Requesting seed URL: {}", seed_url);
    let fetched = fetcher.fetch(seed_url, timeout).await?;
    // Links are normalized against the seed URL, so the domain partition
    // keys off the seed's host; the landing host after redirects is only
    // reported as root_domain.
    let seed_host = host_of(seed_url);
    let root_domain = host_of(&fetched.final_url);

    let page = parse_page(&fetched.body);

    // Anchors plus structured-data sameAs references, normalized against
    // the seed and deduplicated in discovery order
    let mut seen = HashSet::new();
    let mut all_links = Vec::new();
    let candidates = page
        .anchors
        .iter()
        .map(String::as_str)
        .chain(same_as_references(&page.json_ld));

    for candidate in candidates {
        if let Some(link) = normalize_url(candidate, seed_url) {
            if is_valid_url(&link) && seen.insert(link.clone()) {
                all_links.push(link);
            }
        }
    }

    // Seed is always first in the domain partition, even when discovered
    // again as a self-link
    let mut domain_links = vec![seed_url.to_string()];
    domain_links.extend(
        all_links
            .iter()
            .filter(|link| link.as_str() != seed_url && is_same_host(link.as_str(), &seed_host))
            .cloned(),
    );

    if max_links > 0 {
        domain_links.truncate(max_links);
    }

    debug!("Domain links: {:?}", domain_links);
    info!(
        "Found {} domain links and {} total links",
        domain_links.len(),
        all_links.len()
    );

    Ok(Frontier {
        domain_links,
        all_links,
        root_domain,
    })
}

fn same_as_references(blocks: &[Value]) -> Vec<&str> {
    let mut refs = Vec::new();
    for block in blocks {
        let entries: &[Value] = match block {
            Value::Array(items) => items,
            _ => std::slice::from_ref(block),
        };
        for entry in entries {
            match entry.get("sameAs") {
                Some(Value::String(s)) => refs.push(s.as_str()),
                Some(Value::Array(items)) => {
                    refs.extend(items.iter().filter_map(Value::as_str));
                }
                _ => {}
            }
        }
    }
    refs
}
