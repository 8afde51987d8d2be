use std::time::Duration;

use dork_logging::{dork_debug, dork_trace};
use futures_util::StreamExt;
use reqwest::header::{HeaderMap, CONTENT_TYPE, LOCATION};
use reqwest::{redirect, Client, Response, Url};

use crate::headers::random_header_set;
use crate::PageRequest;

/// Transport limits applied to every provider request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchSettings {
    pub connect_timeout: Duration,
    /// Whole-request budget per hop, body included.
    pub request_timeout: Duration,
    pub redirect_limit: usize,
    pub max_bytes: u64,
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(15),
            redirect_limit: 5,
            max_bytes: 5 * 1024 * 1024,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchOutput {
    pub bytes: Vec<u8>,
    pub metadata: FetchMetadata,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchMetadata {
    pub original_url: String,
    /// URL of the response after redirects.
    pub final_url: String,
    pub redirect_count: usize,
    pub content_type: Option<String>,
    pub byte_len: u64,
}

/// Why a page request produced no body.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FailureKind {
    #[error("invalid url")]
    InvalidUrl,
    #[error("http status {0}")]
    HttpStatus(u16),
    #[error("timeout")]
    Timeout,
    #[error("too many redirects")]
    RedirectLimitExceeded,
    #[error("body exceeds {max_bytes} bytes")]
    TooLarge { max_bytes: u64, actual: Option<u64> },
    #[error("network error")]
    Network,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct FetchError {
    pub kind: FailureKind,
    pub message: String,
}

impl FetchError {
    pub fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Transport seam between workers and the network.
#[async_trait::async_trait]
pub trait Fetcher: Send + Sync {
    /// Issues one GET for `request.url` and returns the raw body.
    async fn fetch(&self, request: &PageRequest) -> Result<FetchOutput, FetchError>;
}

/// [`Fetcher`] over one shared reqwest client.
///
/// Redirects are followed by hand so every hop carries the same randomized
/// header set and the hop count ends up in [`FetchMetadata`].
#[derive(Debug, Clone)]
pub struct ReqwestFetcher {
    client: Client,
    settings: FetchSettings,
}

impl ReqwestFetcher {
    pub fn new(settings: FetchSettings) -> Result<Self, FetchError> {
        let client = Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .redirect(redirect::Policy::none())
            .build()
            .map_err(|err| FetchError::new(FailureKind::Network, err.to_string()))?;
        Ok(Self { client, settings })
    }

    async fn follow_redirects(
        &self,
        start: Url,
        headers: &HeaderMap,
    ) -> Result<(Response, usize), FetchError> {
        let mut url = start;
        let mut hops = 0;
        loop {
            let response = self
                .client
                .get(url.clone())
                .headers(headers.clone())
                .send()
                .await
                .map_err(classify)?;

            let status = response.status();
            if !status.is_redirection() {
                return Ok((response, hops));
            }
            if hops >= self.settings.redirect_limit {
                return Err(FetchError::new(
                    FailureKind::RedirectLimitExceeded,
                    format!("gave up after {hops} redirects at {url}"),
                ));
            }

            let location = response
                .headers()
                .get(LOCATION)
                .and_then(|value| value.to_str().ok())
                .ok_or_else(|| {
                    FetchError::new(
                        FailureKind::HttpStatus(status.as_u16()),
                        "redirect without a location",
                    )
                })?;
            url = url
                .join(location)
                .map_err(|err| FetchError::new(FailureKind::InvalidUrl, err.to_string()))?;
            hops += 1;
            dork_debug!("Redirect #{} to {}", hops, url);
        }
    }

    /// Streams the body, failing as soon as it grows past `max_bytes`.
    async fn read_capped(&self, response: Response) -> Result<Vec<u8>, FetchError> {
        let max_bytes = self.settings.max_bytes;
        if let Some(declared) = response.content_length().filter(|len| *len > max_bytes) {
            return Err(too_large(max_bytes, declared));
        }

        let mut body = Vec::new();
        let mut chunks = response.bytes_stream();
        while let Some(chunk) = chunks.next().await {
            let chunk = chunk.map_err(classify)?;
            let seen = (body.len() + chunk.len()) as u64;
            if seen > max_bytes {
                return Err(too_large(max_bytes, seen));
            }
            body.extend_from_slice(&chunk);
        }
        Ok(body)
    }
}

#[async_trait::async_trait]
impl Fetcher for ReqwestFetcher {
    async fn fetch(&self, request: &PageRequest) -> Result<FetchOutput, FetchError> {
        let url = Url::parse(&request.url)
            .map_err(|err| FetchError::new(FailureKind::InvalidUrl, err.to_string()))?;
        dork_trace!("{} page {}: GET {}", request.provider, request.page, url);

        let headers = random_header_set();
        let (response, redirect_count) = self.follow_redirects(url, &headers).await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::new(
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }

        let final_url = response.url().to_string();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);
        let bytes = self.read_capped(response).await?;

        let metadata = FetchMetadata {
            original_url: request.url.clone(),
            final_url,
            redirect_count,
            content_type,
            byte_len: bytes.len() as u64,
        };
        Ok(FetchOutput { bytes, metadata })
    }
}

fn too_large(max_bytes: u64, actual: u64) -> FetchError {
    FetchError::new(
        FailureKind::TooLarge {
            max_bytes,
            actual: Some(actual),
        },
        format!("{actual} bytes"),
    )
}

fn classify(err: reqwest::Error) -> FetchError {
    let kind = if err.is_timeout() {
        FailureKind::Timeout
    } else if err.is_builder() {
        FailureKind::InvalidUrl
    } else {
        FailureKind::Network
    };
    FetchError::new(kind, err.to_string())
}
