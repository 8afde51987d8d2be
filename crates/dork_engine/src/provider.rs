use url::form_urlencoded;

use crate::extract::LinkExtractor;
use crate::EngineError;

pub const BING: &str = "bing";
pub const DUCKDUCKGO: &str = "duckduckgo";
pub const YAHOO: &str = "yahoo";
pub const AOL: &str = "aol";
pub const GOOGLE_API: &str = "google-api";
pub const BING_NEWS: &str = "bing-news";
pub const NAVER: &str = "naver";
pub const YANDEX: &str = "yandex";

/// One search source: how to build a page URL and how to read links back.
///
/// `template` holds `{query}` (percent-encoded, `+` for spaces) and `{offset}`
/// (`page * page_size + page_offset`) placeholders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Provider {
    pub id: String,
    pub template: String,
    pub page_size: usize,
    pub page_offset: usize,
    pub max_pages: usize,
    pub extractor: LinkExtractor,
}

impl Provider {
    pub fn new(
        id: impl Into<String>,
        template: impl Into<String>,
        page_size: usize,
        page_offset: usize,
        max_pages: usize,
        extractor: LinkExtractor,
    ) -> Self {
        Self {
            id: id.into(),
            template: template.into(),
            page_size,
            page_offset,
            max_pages,
            extractor,
        }
    }

    pub fn offset(&self, page: usize) -> usize {
        page * self.page_size + self.page_offset
    }

    pub fn build_url(&self, query: &str, page: usize) -> String {
        let encoded: String = form_urlencoded::byte_serialize(query.as_bytes()).collect();
        self.template
            .replace("{query}", &encoded)
            .replace("{offset}", &self.offset(page).to_string())
    }

    pub fn extract(&self, body: &str) -> Vec<String> {
        self.extractor.extract(body)
    }
}

/// Read-only table of providers, in registry order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProviderRegistry {
    providers: Vec<Provider>,
}

impl ProviderRegistry {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn builtin() -> Self {
        let providers = vec![
            Provider::new(
                BING,
                "https://www.bing.com/search?q={query}&first={offset}&count=100",
                10,
                1,
                10,
                LinkExtractor::css("li.b_algo h2 a"),
            ),
            Provider::new(
                DUCKDUCKGO,
                "https://html.duckduckgo.com/html/?q={query}&s={offset}",
                30,
                0,
                5,
                LinkExtractor::css_absolute(".result__a"),
            ),
            Provider::new(
                YAHOO,
                "https://search.yahoo.com/search?p={query}&b={offset}",
                10,
                1,
                10,
                LinkExtractor::css(".algo-sr a"),
            ),
            Provider::new(
                AOL,
                "https://search.aol.com/aol/search?q={query}&b={offset}",
                10,
                1,
                10,
                LinkExtractor::css(".algo-sr a"),
            ),
            Provider::new(
                GOOGLE_API,
                "https://www.googleapis.com/customsearch/v1?q={query}&start={offset}&key=YOUR_API_KEY&cx=YOUR_CX_KEY",
                10,
                1,
                10,
                LinkExtractor::json_field("items", "link"),
            ),
            Provider::new(
                BING_NEWS,
                "https://www.bing.com/news/search?q={query}&first={offset}",
                10,
                1,
                5,
                LinkExtractor::css(".news-card a"),
            ),
            Provider::new(
                NAVER,
                "https://search.naver.com/search.naver?query={query}&start={offset}",
                10,
                1,
                5,
                LinkExtractor::css(".total_wrap a.link_tit"),
            ),
            Provider::new(
                YANDEX,
                "https://yandex.com/search/?text={query}&p={offset}",
                1,
                0,
                10,
                LinkExtractor::css(".organic__url"),
            ),
        ];
        Self { providers }
    }

    /// Adds a provider, replacing any existing one with the same id in place.
    pub fn insert(&mut self, provider: Provider) {
        match self.providers.iter_mut().find(|p| p.id == provider.id) {
            Some(existing) => *existing = provider,
            None => self.providers.push(provider),
        }
    }

    pub fn with_provider(mut self, provider: Provider) -> Self {
        self.insert(provider);
        self
    }

    /// Replaces the URL template of `id`; returns false for unknown ids.
    pub fn override_template(&mut self, id: &str, template: impl Into<String>) -> bool {
        match self.providers.iter_mut().find(|p| p.id == id) {
            Some(provider) => {
                provider.template = template.into();
                true
            }
            None => false,
        }
    }

    pub fn get(&self, id: &str) -> Option<&Provider> {
        self.providers.iter().find(|p| p.id == id)
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.providers.iter().map(|p| p.id.as_str())
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    /// Resolves a selection in the order given. Repeated ids are kept once.
    pub fn select<S: AsRef<str>>(&self, ids: &[S]) -> Result<Vec<Provider>, EngineError> {
        if ids.is_empty() {
            return Err(EngineError::InvalidInput(
                "no search providers selected".to_string(),
            ));
        }

        let mut selected: Vec<Provider> = Vec::with_capacity(ids.len());
        for id in ids {
            let id = id.as_ref();
            let provider = self
                .get(id)
                .ok_or_else(|| EngineError::InvalidInput(format!("unknown provider '{id}'")))?;
            if !selected.iter().any(|p| p.id == provider.id) {
                selected.push(provider.clone());
            }
        }
        Ok(selected)
    }
}
