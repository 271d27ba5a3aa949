// src/extractors/social.rs
use regex::Regex;
use serde::Serialize;
use tracing::debug;

/// Fixed platform enumeration, in match-priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Facebook,
    Instagram,
    Twitter,
    Tiktok,
    Linkedin,
    Youtube,
    Pinterest,
    Github,
    Snapchat,
}

impl Platform {
    pub const ALL: [Platform; 9] = [
        Platform::Facebook,
        Platform::Instagram,
        Platform::Twitter,
        Platform::Tiktok,
        Platform::Linkedin,
        Platform::Youtube,
        Platform::Pinterest,
        Platform::Github,
        Platform::Snapchat,
    ];
}

/// Per-platform profile URLs; a platform nobody linked stays None.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct SocialLinks {
    pub facebook: Option<String>,
    pub instagram: Option<String>,
    pub twitter: Option<String>,
    pub tiktok: Option<String>,
    pub linkedin: Option<String>,
    pub youtube: Option<String>,
    pub pinterest: Option<String>,
    pub github: Option<String>,
    pub snapchat: Option<String>,
}

impl SocialLinks {
    fn slot_mut(&mut self, platform: Platform) -> &mut Option<String> {
        match platform {
            Platform::Facebook => &mut self.facebook,
            Platform::Instagram => &mut self.instagram,
            Platform::Twitter => &mut self.twitter,
            Platform::Tiktok => &mut self.tiktok,
            Platform::Linkedin => &mut self.linkedin,
            Platform::Youtube => &mut self.youtube,
            Platform::Pinterest => &mut self.pinterest,
            Platform::Github => &mut self.github,
            Platform::Snapchat => &mut self.snapchat,
        }
    }
}

pub struct SocialLinkMatcher {
    patterns: Vec<(Platform, Regex)>,
}

impl SocialLinkMatcher {
    pub fn new() -> Self {
        Self {
            patterns: Platform::ALL
                .iter()
                .map(|&platform| (platform, Regex::new(pattern_source(platform)).unwrap()))
                .collect(),
        }
    }

    /// Scans links in order; the first link matching a platform claims it
    /// and later candidates for that platform are ignored.
    pub fn match_links<'a, I>(&self, links: I) -> SocialLinks
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut social = SocialLinks::default();

        for link in links {
            let link = link.trim().to_lowercase();
            if link.is_empty() {
                continue;
            }

            for (platform, pattern) in &self.patterns {
                let slot = social.slot_mut(*platform);
                if slot.is_some() {
                    continue;
                }
                if pattern.is_match(&link) {
                    debug!("Found {:?} profile: {}", platform, link);
                    *slot = Some(link.clone());
                }
            }
        }

        social
    }
}

// Patterns tolerate host aliases (fb.com, x.com) and the optional path
// prefixes each platform uses for profiles.
fn pattern_source(platform: Platform) -> &'static str {
    match platform {
        Platform::Facebook => r"https?://(www\.)?(facebook|fb)\.com/[^/\s]+/?",
        Platform::Instagram => r"https?://(www\.)?instagram\.[^/]+/[^/\s]+/?",
        Platform::Twitter => r"https?://(www\.)?(twitter|x)\.[^/]+/[^/\s]+/?",
        Platform::Tiktok => r"https?://(www\.)?tiktok\.com/(@[^/\s]+|[^/\s]+)/?",
        Platform::Linkedin => r"https?://(www\.)?linkedin\.[^/]+/(company/[^/\s]+|in/[^/\s]+)/?",
        Platform::Youtube => {
            r"https?://(www\.)?(youtube\.com|youtu\.be)/(channel/|user/|c/|@)?[^/\s]+/?"
        }
        Platform::Pinterest => r"https?://(www\.)?pinterest\.[^/]+/[^/\s]+/?",
        Platform::Github => r"https?://(www\.)?github\.com/[^/\s]+/?",
        Platform::Snapchat => r"https?://(www\.)?snapchat\.com/(add/|@)?[^/\s]+/?",
    }
}

impl Default for SocialLinkMatcher {
    fn default() -> Self {
        Self::new()
    }
}
