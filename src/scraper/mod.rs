// src/scraper/mod.rs
pub mod aggregator;
pub mod analyzer;
pub mod frontier;

pub use aggregator::{AggregatedContacts, IncludeFlags};

use crate::classifier::{classify_links, LinkClassification};
use crate::config::CrawlerConfig;
use crate::error::Result;
use crate::extractors::{EmailExtractor, PhoneExtractor, SocialLinkMatcher};
use crate::fetcher::PageFetcher;
use crate::url_util::is_valid_url;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

/// One scrape invocation's inputs, immutable for its duration.
#[derive(Debug, Clone)]
pub struct ScrapeRequest {
    pub url: String,
    /// Overrides the configured domain-frontier cap when set.
    pub max_links: Option<usize>,
    pub flags: IncludeFlags,
}

/// Everything the response layer needs to assemble a reply.
#[derive(Debug, Clone)]
pub struct ScrapeOutcome {
    pub root_domain: String,
    pub contacts: AggregatedContacts,
    pub classification: LinkClassification,
}

/// Seed fetch, frontier construction, bounded-parallel per-link analysis
/// and aggregation, behind one entry point. Request-scoped state lives in
/// the call; the scraper itself only holds the fetcher and the compiled
/// extraction machinery, so one instance serves concurrent requests.
pub struct ContactScraper {
    fetcher: Arc<dyn PageFetcher>,
    email_extractor: EmailExtractor,
    phone_extractor: PhoneExtractor,
    social_matcher: SocialLinkMatcher,
    config: CrawlerConfig,
}

impl ContactScraper {
    pub fn new(fetcher: Arc<dyn PageFetcher>, config: CrawlerConfig) -> Self {
        Self {
            fetcher,
            email_extractor: EmailExtractor::new(),
            phone_extractor: PhoneExtractor::new(&config.default_region),
            social_matcher: SocialLinkMatcher::new(),
            config,
        }
    }

    pub async fn scrape(&self, request: &ScrapeRequest) -> Result<ScrapeOutcome> {
        let max_links = request.max_links.unwrap_or(self.config.max_links_default);
        info!("Starting scrape for URL: {} (max links {})", request.url, max_links);

        let frontier = frontier::build_frontier(
            &request.url,
            self.fetcher.as_ref(),
            Duration::from_secs(self.config.seed_timeout_seconds),
            max_links,
        )
        .await?;

        let flags = request.flags;
        let contacts = if flags.unique_links
            && !(flags.emails || flags.phones || flags.social_links)
        {
            // Link listing only: no per-link fetches needed
            AggregatedContacts {
                visited_links: frontier
                    .domain_links
                    .iter()
                    .filter(|link| is_valid_url(link.as_str()))
                    .cloned()
                    .collect(),
                ..Default::default()
            }
        } else {
            let results = analyzer::analyze_links_parallel(
                &frontier.domain_links,
                self.fetcher.as_ref(),
                &self.email_extractor,
                &self.phone_extractor,
                self.config.workers,
                Duration::from_secs(self.config.link_timeout_seconds),
                Some(&self.config.default_region),
            )
            .await;

            aggregator::aggregate_results(
                &results,
                &frontier.domain_links,
                &frontier.all_links,
                flags,
                &self.social_matcher,
            )
        };

        let classification = classify_links(
            contacts.visited_links.iter().map(String::as_str),
            &frontier.root_domain,
        );

        info!(
            "Completed scraping for URL: {} ({} links classified)",
            request.url,
            classification.total()
        );

        Ok(ScrapeOutcome {
            root_domain: frontier.root_domain,
            contacts,
            classification,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ScrapeError;
    use crate::fetcher::FetchedPage;
    use async_trait::async_trait;
    use std::collections::HashMap;

    struct CannedFetcher {
        pages: HashMap<String, String>,
    }

    #[async_trait]
    impl PageFetcher for CannedFetcher {
        async fn fetch(&self, url: &str, _timeout: Duration) -> Result<FetchedPage> {
            match self.pages.get(url) {
                Some(body) => Ok(FetchedPage {
                    body: body.clone(),
                    final_url: url.to_string(),
                }),
                None => Err(ScrapeError::InvalidUrl(url.to_string())),
            }
        }
    }

    fn site() -> CannedFetcher {
        CannedFetcher {
            pages: HashMap::from([
                (
                    "https://example.com/".to_string(),
                    r#"<html><head>
                    <script type="application/ld+json">
                    {"@type": "Organization", "sameAs": ["https://www.facebook.com/acme"]}
                    </script>
                    </head><body>
                    <a href="/pages/contact">Contact</a>
                    <a href="/blog/news">Blog</a>
                    <a href="https://other.org/x">Elsewhere</a>
                    Reach us at hello@example.com
                    </body></html>"#
                        .to_string(),
                ),
                (
                    "https://example.com/pages/contact".to_string(),
                    "<body>Email hello@example.com or call +1 415 555 2671</body>".to_string(),
                ),
                // /blog/news intentionally missing so its fetch fails
            ]),
        }
    }

    fn scraper(fetcher: CannedFetcher) -> ContactScraper {
        ContactScraper::new(Arc::new(fetcher), CrawlerConfig {
            workers: 4,
            seed_timeout_seconds: 5,
            link_timeout_seconds: 5,
            max_links_default: 100,
            default_region: "US".to_string(),
        })
    }

    fn full_request(url: &str) -> ScrapeRequest {
        ScrapeRequest {
            url: url.to_string(),
            max_links: None,
            flags: IncludeFlags::default(),
        }
    }

    #[tokio::test]
    async fn test_end_to_end_scrape() {
        let outcome = scraper(site())
            .scrape(&full_request("https://example.com/"))
            .await
            .unwrap();

        assert_eq!(outcome.root_domain, "example.com");

        // Provenance: the seed page and the contact page both carry the email
        let sources = &outcome.contacts.emails["hello@example.com"];
        assert_eq!(sources.len(), 2);
        assert_eq!(
            outcome.contacts.phones["+14155552671"],
            vec!["https://example.com/pages/contact"]
        );

        // The dead blog link stayed visited and classified
        assert!(outcome
            .contacts
            .visited_links
            .contains("https://example.com/blog/news"));
        assert_eq!(outcome.classification.blogs, vec!["https://example.com/blog/news"]);
        assert_eq!(outcome.classification.pages, vec!["https://example.com/pages/contact"]);

        // Social profile found via sameAs, which is off-domain
        assert_eq!(
            outcome.contacts.social_links.facebook.as_deref(),
            Some("https://www.facebook.com/acme")
        );
    }

    #[tokio::test]
    async fn test_unique_links_fast_path_skips_analysis() {
        let request = ScrapeRequest {
            url: "https://example.com/".to_string(),
            max_links: None,
            flags: IncludeFlags {
                emails: false,
                phones: false,
                social_links: false,
                unique_links: true,
            },
        };

        let outcome = scraper(site()).scrape(&request).await.unwrap();

        assert!(outcome.contacts.emails.is_empty());
        assert_eq!(outcome.contacts.visited_links.len(), 3);
    }

    #[tokio::test]
    async fn test_max_links_cap_applies() {
        let request = ScrapeRequest {
            url: "https://example.com/".to_string(),
            max_links: Some(1),
            flags: IncludeFlags::default(),
        };

        let outcome = scraper(site()).scrape(&request).await.unwrap();

        assert_eq!(outcome.contacts.visited_links.len(), 1);
        assert!(outcome
            .contacts
            .visited_links
            .contains("https://example.com/"));
    }

    #[tokio::test]
    async fn test_invalid_seed_surfaces_immediately() {
        let err = scraper(site())
            .scrape(&full_request("nonsense"))
            .await
            .unwrap_err();
        assert!(matches!(err, ScrapeError::InvalidUrl(_)));
    }
}
