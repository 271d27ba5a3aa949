// src/extractors/phone.rs
use phonenumber::{country, Mode};
use regex::Regex;
use serde_json::Value;
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use tracing::debug;

// The cache resets once it holds this many entries, so a long-lived
// extractor never accumulates every candidate it has ever seen.
const PARSE_CACHE_CAP: usize = 100;

/// Locale-aware phone extraction. Candidates are spotted with a permissive
/// shape pattern, then parsed and validated against a region hint; accepted
/// numbers are rendered in E.164, which doubles as the deduplication key.
pub struct PhoneExtractor {
    candidate_regex: Regex,
    default_region: country::Id,
    // Same raw candidates repeat across a site's pages; reparsing them is
    // pure overhead
    parse_cache: Mutex<HashMap<(String, country::Id), Option<String>>>,
}

impl PhoneExtractor {
    pub fn new(default_region: &str) -> Self {
        Self {
            candidate_regex: Regex::new(r"\+?\(?\d[\d\s().\-]{6,18}\d").unwrap(),
            default_region: parse_region(default_region).unwrap_or(country::US),
            parse_cache: Mutex::new(HashMap::new()),
        }
    }

    fn region(&self, hint: Option<&str>) -> country::Id {
        hint.and_then(parse_region).unwrap_or(self.default_region)
    }

    /// Scans visible page text for phone-shaped substrings and keeps the
    /// ones that parse and validate for the hinted region.
    pub fn extract_from_text(&self, text: &str, region_hint: Option<&str>) -> HashSet<String> {
        let region = self.region(region_hint);
        let mut phones = HashSet::new();

        for candidate in self.candidate_regex.find_iter(text) {
            if let Some(e164) = self.canonicalize(candidate.as_str(), region) {
                debug!("Extracted phone: {}", e164);
                phones.insert(e164);
            }
        }

        phones
    }

    /// Reads the "telephone" field of each JSON-LD block. A block may be a
    /// single object or a list of objects.
    pub fn extract_from_json_ld(&self, blocks: &[Value], region_hint: Option<&str>) -> HashSet<String> {
        let region = self.region(region_hint);
        let mut phones = HashSet::new();

        for block in blocks {
            match block {
                Value::Object(_) => self.collect_telephone(block, region, &mut phones),
                Value::Array(items) => {
                    for item in items {
                        self.collect_telephone(item, region, &mut phones);
                    }
                }
                _ => {}
            }
        }

        phones
    }

    fn collect_telephone(&self, block: &Value, region: country::Id, phones: &mut HashSet<String>) {
        if let Some(Value::String(raw)) = block.get("telephone") {
            if let Some(e164) = self.canonicalize(raw, region) {
                phones.insert(e164);
            }
        }
    }

    /// Standalone gate over externally supplied raw candidates: returns the
    /// subset that parses and validates, unchanged.
    pub fn validate_candidates<'a, I>(&self, candidates: I, region_hint: Option<&str>) -> HashSet<String>
    where
        I: IntoIterator<Item = &'a str>,
    {
        candidates
            .into_iter()
            .filter(|c| self.validate(c, region_hint))
            .map(|c| c.to_string())
            .collect()
    }

    pub fn validate(&self, candidate: &str, region_hint: Option<&str>) -> bool {
        let region = self.region(region_hint);
        self.canonicalize(candidate, region).is_some()
    }

    /// Parse + validity gate + E.164 rendering, memoized per (raw, region).
    fn canonicalize(&self, raw: &str, region: country::Id) -> Option<String> {
        let key = (raw.to_string(), region);
        if let Some(cached) = self.parse_cache.lock().unwrap().get(&key) {
            return cached.clone();
        }

        let canonical = phonenumber::parse(Some(region), raw)
            .ok()
            .filter(phonenumber::is_valid)
            .map(|number| number.format().mode(Mode::E164).to_string());

        let mut cache = self.parse_cache.lock().unwrap();
        if cache.len() >= PARSE_CACHE_CAP {
            cache.clear();
        }
        cache.insert(key, canonical.clone());
        canonical
    }

    #[cfg(test)]
    fn cached_entries(&self) -> usize {
        self.parse_cache.lock().unwrap().len()
    }
}

fn parse_region(code: &str) -> Option<country::Id> {
    code.trim().to_uppercase().parse().ok()
}
