use super::Page;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE};
use reqwest::{redirect, Client, Method};
use std::collections::BTreeMap;
use std::time::{Duration, Instant};
use tracing::debug;
use url::Url;

/// Shared HTTP clients. Every call carries its own timeout.
///
/// `direct` never follows redirects, so existence checks see the 3xx itself.
#[derive(Clone)]
pub struct PageFetcher {
    client: Client,
    direct: Client,
}

impl PageFetcher {
    pub fn new(user_agent: &str) -> Result<Self, FetchError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8"),
        );
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.5"));
        headers.insert("dnt", HeaderValue::from_static("1"));
        headers.insert("upgrade-insecure-requests", HeaderValue::from_static("1"));

        let build = |policy: redirect::Policy| {
            Client::builder()
                .redirect(policy)
                .user_agent(user_agent)
                .default_headers(headers.clone())
                .build()
                .map_err(|err| FetchError::Client(err.to_string()))
        };

        Ok(Self {
            client: build(redirect::Policy::limited(10))?,
            direct: build(redirect::Policy::none())?,
        })
    }

    pub async fn get(&self, url: &Url, timeout: Duration) -> Result<Page, FetchError> {
        self.send(&self.client, Method::GET, url, timeout).await
    }

    pub async fn head(&self, url: &Url, timeout: Duration) -> Result<Page, FetchError> {
        self.send(&self.client, Method::HEAD, url, timeout).await
    }

    /// HEAD without following redirects.
    pub async fn head_direct(&self, url: &Url, timeout: Duration) -> Result<Page, FetchError> {
        self.send(&self.direct, Method::HEAD, url, timeout).await
    }

    /// GET a JSON document, returning `None` for non-JSON bodies.
    pub async fn get_json(
        &self,
        url: &Url,
        timeout: Duration,
    ) -> Result<Option<serde_json::Value>, FetchError> {
        let page = self.get(url, timeout).await?;
        Ok(serde_json::from_str(&page.body).ok())
    }

    async fn send(
        &self,
        client: &Client,
        method: Method,
        url: &Url,
        timeout: Duration,
    ) -> Result<Page, FetchError> {
        let started = Instant::now();
        let response = client
            .request(method.clone(), url.clone())
            .timeout(timeout)
            .send()
            .await
            .map_err(|err| FetchError::from_reqwest(url, err))?;

        let status = response.status().as_u16();
        let final_url = response.url().clone();
        let headers: BTreeMap<String, String> = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|value| (name.as_str().to_string(), value.to_string()))
            })
            .collect();

        let body = if method == Method::HEAD {
            String::new()
        } else {
            response
                .text()
                .await
                .map_err(|err| FetchError::from_reqwest(url, err))?
        };
        let elapsed = started.elapsed();

        debug!(%method, %url, status, elapsed_ms = elapsed.as_millis() as u64, "fetched");

        Ok(Page {
            requested_url: url.clone(),
            final_url,
            status,
            headers,
            body,
            elapsed,
        })
    }
}

/// Transport failure for a single fetch.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("request to {url} timed out")]
    Timeout { url: String },
    #[error("could not connect to {url}: {message}")]
    Connect { url: String, message: String },
    #[error("request to {url} failed: {message}")]
    Request { url: String, message: String },
    #[error("http client unavailable: {0}")]
    Client(String),
}

impl FetchError {
    fn from_reqwest(url: &Url, err: reqwest::Error) -> Self {
        let url = url.to_string();
        if err.is_timeout() {
            FetchError::Timeout { url }
        } else if err.is_connect() {
            FetchError::Connect {
                url,
                message: err.to_string(),
            }
        } else {
            FetchError::Request {
                url,
                message: err.to_string(),
            }
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, FetchError::Timeout { .. })
    }
}
