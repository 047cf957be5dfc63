//! HTTP-based `PlaceSearchProvider` using Nominatim's search API.

use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use mapdemo_core::{PlaceItem, PlaceSearchProvider, SearchError, SearchRequest};
use reqwest::Client;
use thiserror::Error;
use url::Url;

use super::nominatim::decode_search_body;

/// Error type for [`HttpPlaceSearchProvider`] construction failures.
#[derive(Debug, Error)]
pub enum ProviderBuildError {
    /// Failed to build the HTTP client.
    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),
    /// The configured base URL cannot be parsed.
    #[error("invalid search service URL: {0}")]
    InvalidBaseUrl(#[source] url::ParseError),
}

/// Default user agent for search requests.
///
/// The public Nominatim instance rejects requests without an identifying
/// agent.
pub const DEFAULT_USER_AGENT: &str = "mapdemo/0.1";

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default cap on the number of places returned.
const DEFAULT_LIMIT: u32 = 10;

/// Public Nominatim instance.
const DEFAULT_BASE_URL: &str = "https://nominatim.openstreetmap.org";

/// Configuration for [`HttpPlaceSearchProvider`].
#[derive(Debug, Clone)]
pub struct HttpPlaceSearchProviderConfig {
    /// Base URL for the Nominatim service.
    pub base_url: String,
    /// Request timeout duration.
    pub timeout: Duration,
    /// User agent string for requests.
    pub user_agent: String,
    /// Maximum number of places per search.
    pub limit: u32,
}

impl Default for HttpPlaceSearchProviderConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_owned(),
            limit: DEFAULT_LIMIT,
        }
    }
}

impl HttpPlaceSearchProviderConfig {
    /// Create a new configuration with the given base URL.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    /// Set the request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the user agent string.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Set the maximum number of places per search.
    #[must_use]
    pub const fn with_limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }
}

/// Place search backed by a Nominatim HTTP endpoint.
///
/// Searches are bounded to the request viewport. A blank query is answered
/// locally with no places.
#[derive(Debug)]
pub struct HttpPlaceSearchProvider {
    client: Client,
    config: HttpPlaceSearchProviderConfig,
    search_endpoint: Url,
}

impl HttpPlaceSearchProvider {
    /// Create a new provider with default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build or `base_url` is
    /// not a valid URL.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ProviderBuildError> {
        Self::with_config(HttpPlaceSearchProviderConfig::new(base_url))
    }

    /// Create a new provider with explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build or the configured
    /// base URL is not a valid URL.
    pub fn with_config(config: HttpPlaceSearchProviderConfig) -> Result<Self, ProviderBuildError> {
        let search_endpoint = Url::parse(&format!(
            "{}/search",
            config.base_url.trim_end_matches('/')
        ))
        .map_err(ProviderBuildError::InvalidBaseUrl)?;
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .connect_timeout(config.timeout)
            .timeout(config.timeout)
            .build()
            .map_err(ProviderBuildError::HttpClient)?;
        Ok(Self {
            client,
            config,
            search_endpoint,
        })
    }

    /// The active configuration.
    #[must_use]
    pub const fn config(&self) -> &HttpPlaceSearchProviderConfig {
        &self.config
    }

    /// Build the search URL for `request`.
    ///
    /// The viewbox is `left,top,right,bottom` in degrees, and `bounded=1`
    /// keeps results inside it.
    fn build_search_url(&self, request: &SearchRequest) -> Url {
        let rect = request.viewport.bounding_rect();
        let (min, max) = (rect.min(), rect.max());
        let viewbox = format!("{},{},{},{}", min.x, max.y, max.x, min.y);
        let mut url = self.search_endpoint.clone();
        url.query_pairs_mut()
            .append_pair("q", request.query.trim())
            .append_pair("format", "jsonv2")
            .append_pair("extratags", "1")
            .append_pair("bounded", "1")
            .append_pair("limit", &self.config.limit.to_string())
            .append_pair("viewbox", &viewbox);
        url
    }

    async fn fetch_places(&self, url: &Url) -> Result<Vec<PlaceItem>, SearchError> {
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|err| self.convert_reqwest_error(&err, url))?
            .error_for_status()
            .map_err(|err| self.convert_reqwest_error(&err, url))?;

        let body = response
            .bytes()
            .await
            .map_err(|err| self.convert_reqwest_error(&err, url))?;

        decode_search_body(&body)
    }

    /// Convert a reqwest error to a `SearchError`.
    fn convert_reqwest_error(&self, error: &reqwest::Error, url: &Url) -> SearchError {
        if error.is_timeout() {
            return SearchError::Timeout {
                url: url.to_string(),
                timeout_secs: self.config.timeout.as_secs(),
            };
        }

        if let Some(status) = error.status() {
            return SearchError::Http {
                url: url.to_string(),
                status: status.as_u16(),
                message: error.to_string(),
            };
        }

        SearchError::Network {
            url: url.to_string(),
            message: error.to_string(),
        }
    }
}

#[async_trait(?Send)]
impl PlaceSearchProvider for HttpPlaceSearchProvider {
    async fn search(&self, request: &SearchRequest) -> Result<Vec<PlaceItem>, SearchError> {
        if request.query.trim().is_empty() {
            return Ok(Vec::new());
        }

        let url = self.build_search_url(request);
        debug!("searching places: {url}");
        self.fetch_places(&url).await
    }
}
