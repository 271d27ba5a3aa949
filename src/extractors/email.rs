// src/extractors/email.rs
use regex::Regex;
use serde_json::Value;
use std::collections::HashSet;
use tracing::debug;

/// Recognized top-level domains. Candidates ending in anything else are
/// treated as scan artifacts (a local part swallowing the next sentence's
/// leading characters produces syntactically-plausible garbage domains).
/// Closed, hand-maintained set - extending it is a product decision.
const VALID_TLDS: &[&str] = &[
    // Generic
    "com", "org", "net", "edu", "gov", "mil", "int",
    // Business and professional
    "biz", "info", "name", "pro",
    // Country codes
    "uk", "us", "ca", "au", "de", "fr", "it", "es", "nl", "be", "ch", "at",
    "dk", "no", "se", "fi", "ie", "nz", "jp", "cn", "kr", "ru", "br", "mx",
    // Newer gTLDs
    "io", "co", "ai", "app", "dev", "cloud", "online", "store", "shop",
    "tech", "digital", "agency", "business", "company", "network", "systems",
    "solutions", "services", "media", "marketing", "consulting", "design",
    "software", "technology",
];

pub struct EmailExtractor {
    candidate_regex: Regex,
}

impl EmailExtractor {
    pub fn new() -> Self {
        Self {
            // Permissive on purpose: candidates go through full syntax and
            // TLD validation before they count
            candidate_regex: Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b")
                .unwrap(),
        }
    }

    /// Scans visible page text for addresses. Every candidate passes the
    /// syntax and TLD gates or is silently dropped.
    pub fn extract_from_text(&self, text: &str) -> HashSet<String> {
        let mut emails = HashSet::new();

        for candidate in self.candidate_regex.find_iter(text) {
            if let Some(email) = validate_and_normalize_email(candidate.as_str()) {
                debug!("Extracted email: {}", email);
                emails.insert(email);
            }
        }

        emails
    }

    /// Walks every JSON-LD block depth-first, collecting string values whose
    /// key is "email" in any casing.
    pub fn extract_from_json_ld(&self, blocks: &[Value]) -> HashSet<String> {
        let mut emails = HashSet::new();
        for block in blocks {
            collect_email_values(block, &mut emails);
        }
        emails
    }
}

impl Default for EmailExtractor {
    fn default() -> Self {
        Self::new()
    }
}

fn collect_email_values(value: &Value, emails: &mut HashSet<String>) {
    match value {
        Value::Object(map) => {
            for (key, val) in map {
                if key.eq_ignore_ascii_case("email") {
                    if let Value::String(raw) = val {
                        if let Some(email) = validate_and_normalize_email(raw) {
                            emails.insert(email);
                        }
                    }
                } else if matches!(val, Value::Object(_) | Value::Array(_)) {
                    collect_email_values(val, emails);
                }
            }
        }
        Value::Array(items) => {
            for item in items {
                collect_email_values(item, emails);
            }
        }
        _ => {}
    }
}

/// Trims, drops trailing dots, lowercases, then applies the syntax and TLD
/// gates. Returns None instead of erroring - a bad candidate is just noise.
pub fn validate_and_normalize_email(raw: &str) -> Option<String> {
    let email = raw.trim().trim_end_matches('.').to_lowercase();

    if !has_valid_tld(&email) {
        return None;
    }
    if !is_valid_email_syntax(&email) {
        return None;
    }

    Some(email)
}

fn has_valid_tld(email: &str) -> bool {
    let domain = match email.split('@').nth(1) {
        Some(d) => d,
        None => return false,
    };
    match domain.rsplit('.').next() {
        Some(tld) => VALID_TLDS.contains(&tld),
        None => false,
    }
}

/// Full address grammar: one '@', a dot-atom local part, and a dotted
/// sequence of LDH labels on the domain side.
fn is_valid_email_syntax(email: &str) -> bool {
    let mut parts = email.splitn(2, '@');
    let local = parts.next().unwrap_or("");
    let domain = match parts.next() {
        Some(d) => d,
        None => return false,
    };
    if domain.contains('@') {
        return false;
    }

    is_valid_local_part(local) && is_valid_domain(domain)
}

fn is_valid_local_part(local: &str) -> bool {
    if local.is_empty() || local.len() > 64 {
        return false;
    }
    if local.starts_with('.') || local.ends_with('.') || local.contains("..") {
        return false;
    }
    local.chars().all(|c| {
        c.is_ascii_alphanumeric() || "!#$%&'*+/=?^_`{|}~.-".contains(c)
    })
}

fn is_valid_domain(domain: &str) -> bool {
    if domain.is_empty() || domain.len() > 253 {
        return false;
    }
    let labels: Vec<&str> = domain.split('.').collect();
    if labels.len() < 2 {
        return false;
    }
    labels.iter().all(|label| {
        !label.is_empty()
            && label.len() <= 63
            && !label.starts_with('-')
            && !label.ends_with('-')
            && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_extracts_and_lowercases_from_text() {
        let extractor = EmailExtractor::new();
        let found = extractor.extract_from_text("Contact Support@Example.COM or sales@acme.io.");
        assert!(found.contains("support@example.com"));
        assert!(found.contains("sales@acme.io"));
        assert_eq!(found.len(), 2);
    }

    #[test]
    fn test_rejects_unknown_tld() {
        let extractor = EmailExtractor::new();
        // "example.comContact" style concatenations must not survive
        assert!(extractor.extract_from_text("mail me at bob@example.comnow").is_empty());
        assert!(extractor.extract_from_text("bob@example.xyz").is_empty());
    }

    #[test]
    fn test_rejects_bad_syntax() {
        assert_eq!(validate_and_normalize_email("no-at-sign.com"), None);
        assert_eq!(validate_and_normalize_email(".leading@example.com"), None);
        assert_eq!(validate_and_normalize_email("a..b@example.com"), None);
        assert_eq!(validate_and_normalize_email("a@-bad-.com"), None);
        assert_eq!(validate_and_normalize_email("a@nodot"), None);
    }

    #[test]
    fn test_normalizes_json_ld_value() {
        let extractor = EmailExtractor::new();
        let blocks = vec![json!({"email": "TEST@Example.COM"})];
        let found = extractor.extract_from_json_ld(&blocks);
        assert_eq!(found, HashSet::from(["test@example.com".to_string()]));
    }

    #[test]
    fn test_json_ld_walk_recurses_any_depth() {
        let extractor = EmailExtractor::new();
        let blocks = vec![json!({
            "@type": "Organization",
            "contactPoint": [
                {"EMAIL": "deep@example.org"},
                {"department": {"email": "deeper@example.net"}}
            ],
            "email": 42
        })];
        let found = extractor.extract_from_json_ld(&blocks);
        assert!(found.contains("deep@example.org"));
        assert!(found.contains("deeper@example.net"));
        assert_eq!(found.len(), 2);
    }

    #[test]
    fn test_trailing_dot_stripped() {
        assert_eq!(
            validate_and_normalize_email(" contact@example.com. "),
            Some("contact@example.com".to_string())
        );
    }
}
