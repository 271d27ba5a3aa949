// src/page.rs
use scraper::{Html, Selector};
use serde_json::Value;
use tracing::debug;

/// Everything the pipeline needs from one fetched document, extracted in a
/// single pass: visible text for pattern scanning, anchor targets for link
/// discovery, and decoded JSON-LD blocks for structured-data extraction.
///
/// `scraper::Html` is not Send, so parsing happens entirely inside this
/// synchronous step and only owned data crosses await points.
#[derive(Debug, Clone, Default)]
pub struct ParsedPage {
    pub text: String,
    pub anchors: Vec<String>,
    pub json_ld: Vec<Value>,
}

pub fn parse_page(html: &str) -> ParsedPage {
    let document = Html::parse_document(html);

    let text = extract_visible_text(&document);
    let anchors = extract_anchor_targets(&document);
    let json_ld = extract_json_ld(&document);

    debug!(
        "Parsed page: {} chars of text, {} anchors, {} JSON-LD blocks",
        text.len(),
        anchors.len(),
        json_ld.len()
    );

    ParsedPage {
        text,
        anchors,
        json_ld,
    }
}

fn extract_visible_text(document: &Html) -> String {
    let body_selector = Selector::parse("body").unwrap();

    let root = document
        .select(&body_selector)
        .next()
        .map(|body| body.text().collect::<Vec<_>>().join(" "))
        .unwrap_or_else(|| document.root_element().text().collect::<Vec<_>>().join(" "));

    // Collapse runs of whitespace so patterns never straddle layout noise
    root.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn extract_anchor_targets(document: &Html) -> Vec<String> {
    let link_selector = Selector::parse("a[href]").unwrap();
    let mut targets = Vec::new();

    for element in document.select(&link_selector) {
        if let Some(href) = element.value().attr("href") {
            let href = href.trim();
            if href.is_empty() {
                continue;
            }
            let lower = href.to_lowercase();
            if lower.starts_with("javascript:")
                || lower.starts_with("mailto:")
                || lower.starts_with("tel:")
            {
                continue;
            }
            targets.push(href.to_string());
        }
    }

    targets
}

fn extract_json_ld(document: &Html) -> Vec<Value> {
    let script_selector = Selector::parse(r#"script[type="application/ld+json"]"#).unwrap();
    let mut blocks = Vec::new();

    for script in document.select(&script_selector) {
        let raw = script.text().collect::<String>();
        match serde_json::from_str::<Value>(&raw) {
            Ok(value) => blocks.push(value),
            // Malformed blocks contribute nothing
            Err(e) => debug!("Skipping malformed JSON-LD block: {}", e),
        }
    }

    blocks
}
