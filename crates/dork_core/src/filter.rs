use crate::AccumulatedUrls;

/// Provider domains and large social platforms; matched as case-insensitive
/// substrings anywhere in the candidate.
pub const DEFAULT_EXCLUDED_DOMAINS: &[&str] = &[
    "google.com",
    "bing.com",
    "yahoo.com",
    "duckduckgo.com",
    "aol.com",
    "yandex.com",
    "naver.com",
    "youtube.com",
    "facebook.com",
    "twitter.com",
    "instagram.com",
    "linkedin.com",
    "pinterest.com",
];

pub const ACCEPTED_SCHEMES: &[&str] = &["http://", "https://"];

/// Validates, strips excluded domains and deduplicates candidate URLs.
///
/// Equality is byte-exact: no case folding, trailing-slash or query
/// canonicalization.
#[derive(Debug, Clone)]
pub struct UrlFilter {
    excluded_domains: Vec<String>,
}

impl Default for UrlFilter {
    fn default() -> Self {
        Self::new(DEFAULT_EXCLUDED_DOMAINS.iter().copied())
    }
}

impl UrlFilter {
    pub fn new<I, S>(excluded_domains: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            excluded_domains: excluded_domains
                .into_iter()
                .map(|d| d.as_ref().to_ascii_lowercase())
                .collect(),
        }
    }

    pub fn is_excluded(&self, url: &str) -> bool {
        let lower = url.to_ascii_lowercase();
        self.excluded_domains
            .iter()
            .any(|domain| lower.contains(domain.as_str()))
    }

    pub fn has_accepted_scheme(url: &str) -> bool {
        ACCEPTED_SCHEMES.iter().any(|scheme| url.starts_with(scheme))
    }

    /// Returns the survivors of `candidates` in input order. A candidate
    /// survives when it is not excluded, has an accepted scheme, and is
    /// neither in `accumulated` nor an earlier survivor of this batch.
    pub fn filter<S>(&self, candidates: &[S], accumulated: &AccumulatedUrls) -> Vec<String>
    where
        S: AsRef<str>,
    {
        let mut survivors: Vec<String> = Vec::new();
        for candidate in candidates {
            let url = candidate.as_ref();
            if self.is_excluded(url) || !Self::has_accepted_scheme(url) {
                continue;
            }
            if accumulated.contains(url) || survivors.iter().any(|s| s == url) {
                continue;
            }
            survivors.push(url.to_string());
        }
        survivors
    }
}
