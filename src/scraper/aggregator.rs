// src/scraper/aggregator.rs
use crate::extractors::{SocialLinkMatcher, SocialLinks};
use crate::scraper::analyzer::LinkAnalysis;
use std::collections::{BTreeMap, BTreeSet};
use tracing::info;

/// Which contact kinds the caller asked for. Disabled kinds are skipped
/// during aggregation, not during extraction.
#[derive(Debug, Clone, Copy)]
pub struct IncludeFlags {
    pub emails: bool,
    pub phones: bool,
    pub social_links: bool,
    pub unique_links: bool,
}

impl Default for IncludeFlags {
    fn default() -> Self {
        Self {
            emails: true,
            phones: true,
            social_links: true,
            unique_links: true,
        }
    }
}

/// Merged output of one crawl: provenance maps for emails and phones, the
/// social profile table, and the set of links that were in scope.
#[derive(Debug, Clone, Default)]
pub struct AggregatedContacts {
    pub emails: BTreeMap<String, Vec<String>>,
    pub phones: BTreeMap<String, Vec<String>>,
    pub social_links: SocialLinks,
    pub visited_links: BTreeSet<String>,
}

/// Merges unordered per-link results. The merge is order-independent: each
/// value's source list grows by at most one link per result, and the visited
/// set is the full domain frontier regardless of which fetches succeeded.
///
/// Social profiles are matched against `all_links`, not the domain subset -
/// profile links usually sit on the seed page and point off-domain.
pub fn aggregate_results(
    results: &[LinkAnalysis],
    domain_links: &[String],
    all_links: &[String],
    flags: IncludeFlags,
    matcher: &SocialLinkMatcher,
) -> AggregatedContacts {
    let mut aggregated = AggregatedContacts {
        visited_links: domain_links.iter().cloned().collect(),
        ..Default::default()
    };

    info!(
        "Processing {} scraping results ({} domain links, {} total links)",
        results.len(),
        domain_links.len(),
        all_links.len()
    );

    for result in results {
        if flags.emails {
            for email in &result.emails {
                aggregated
                    .emails
                    .entry(email.clone())
                    .or_default()
                    .push(result.link.clone());
            }
        }
        if flags.phones {
            for phone in &result.phones {
                aggregated
                    .phones
                    .entry(phone.clone())
                    .or_default()
                    .push(result.link.clone());
            }
        }
    }

    if flags.social_links && !all_links.is_empty() {
        aggregated.social_links = matcher.match_links(all_links.iter().map(String::as_str));
    }

    info!(
        "Aggregated {} unique emails, {} unique phones, {} visited links",
        aggregated.emails.len(),
        aggregated.phones.len(),
        aggregated.visited_links.len()
    );

    aggregated
}
