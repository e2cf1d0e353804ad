//! TMDB search client.
//!
//! The plugin cannot open sockets itself; the Zellij host performs web
//! requests on its behalf and reports the result as a later event. The client
//! therefore splits a fetch into two halves: [`MovieClient::fetch`] builds and
//! dispatches exactly one request through a [`Transport`], and
//! [`MovieClient::decode`] turns the host's `(status, body)` pair into a
//! [`ResultPage`].

use super::key::FetchKey;
use crate::domain::error::{FetchError, Result, ZinemaError};
use crate::domain::ResultPage;
use std::collections::BTreeMap;
use url::Url;

/// TMDB "search movies" endpoint.
pub const DEFAULT_SEARCH_URL: &str = "https://api.themoviedb.org/3/search/movie";

/// A fully prepared outbound GET request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    /// Endpoint URL including the `query` and `page` parameters.
    pub url: String,
    /// Request headers, including the bearer credential.
    pub headers: BTreeMap<String, String>,
    /// Opaque tag echoed back by the host with the response.
    pub context: BTreeMap<String, String>,
}

/// Something that can carry a [`FetchRequest`] to the network.
///
/// The plugin binary implements this over the host's web request call.
/// `Vec<FetchRequest>` records requests instead, which is what tests use.
pub trait Transport {
    /// Dispatches one request. Completion arrives later as a host event.
    fn send(&mut self, request: FetchRequest);
}

impl Transport for Vec<FetchRequest> {
    fn send(&mut self, request: FetchRequest) {
        self.push(request);
    }
}

/// Client for the movie search endpoint.
pub struct MovieClient {
    endpoint: Url,
    token: String,
}

impl MovieClient {
    /// Creates a client for `endpoint` authenticated with a bearer `token`.
    ///
    /// # Errors
    ///
    /// Returns [`ZinemaError::Config`] if the token is blank or the endpoint
    /// is not an absolute URL. Both are startup conditions, never per-request.
    pub fn new(endpoint: &str, token: impl Into<String>) -> Result<Self> {
        let token = token.into();
        if token.trim().is_empty() {
            return Err(ZinemaError::Config("api_token is empty".to_string()));
        }

        let endpoint = Url::parse(endpoint)
            .map_err(|e| ZinemaError::Config(format!("invalid api_url {endpoint:?}: {e}")))?;

        Ok(Self {
            endpoint,
            token: token.trim().to_string(),
        })
    }

    /// Builds the request for `key` without sending it.
    #[must_use]
    pub fn request(&self, key: &FetchKey) -> FetchRequest {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut()
            .append_pair("query", &key.query)
            .append_pair("page", &key.page.to_string());

        let mut headers = BTreeMap::new();
        headers.insert("Authorization".to_string(), format!("Bearer {}", self.token));
        headers.insert("accept".to_string(), "application/json".to_string());

        FetchRequest {
            url: url.into(),
            headers,
            context: key.to_context(),
        }
    }

    /// Issues exactly one search request for `(query, page)`.
    ///
    /// Returns the key the request was tagged with.
    pub fn fetch<T>(&self, transport: &mut T, query: &str, page: u32) -> FetchKey
    where
        T: Transport + ?Sized,
    {
        let key = FetchKey::new(query, page);
        let _span = tracing::debug_span!("fetch", key = %key).entered();

        transport.send(self.request(&key));
        tracing::debug!("search request dispatched");
        key
    }

    /// Decodes a host response into a result page.
    ///
    /// # Errors
    ///
    /// - [`FetchError::Service`] for any status outside `200..300`
    /// - [`FetchError::Decode`] if the body is not a search page
    pub fn decode(status: u16, body: &[u8]) -> std::result::Result<ResultPage, FetchError> {
        if !(200..300).contains(&status) {
            tracing::debug!(status, body_len = body.len(), "search request failed");
            return Err(FetchError::Service { status });
        }

        let page: ResultPage = serde_json::from_slice(body)?;
        tracing::debug!(
            page = page.page,
            results = page.results.len(),
            total_pages = page.total_pages,
            "search page decoded"
        );
        Ok(page)
    }
}

impl std::fmt::Debug for MovieClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MovieClient")
            .field("endpoint", &self.endpoint.as_str())
            .finish_non_exhaustive()
    }
}
