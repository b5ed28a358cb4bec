use super::{OmdbError, Result, query::QueryParams};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, warn};

/// Outbound call to the OMDb HTTP API
#[async_trait]
pub trait OmdbTransport: Send + Sync {
    /// GET with `params`, returning the raw body of a 2xx response
    async fn fetch(&self, params: &QueryParams) -> Result<Vec<u8>>;
}

/// reqwest-backed transport
#[derive(Clone)]
pub struct HttpTransport {
    client: Client,
    base_url: String,
}

impl HttpTransport {
    /// Create a transport for `base_url` whose requests give up after `timeout`
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("omdb-proxy/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()
            .map_err(transport_error)?;

        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    /// Build full URL from query parameters
    #[must_use]
    pub fn url(&self, params: &QueryParams) -> String {
        format!("{}?{}", self.base_url, params.encode())
    }
}

#[async_trait]
impl OmdbTransport for HttpTransport {
    async fn fetch(&self, params: &QueryParams) -> Result<Vec<u8>> {
        debug!("GET {}?{}", self.base_url, params.redacted());

        let response = self
            .client
            .get(self.url(params))
            .send()
            .await
            .map_err(transport_error)?;
        let status = response.status();

        if !status.is_success() {
            match response.text().await {
                Ok(body) => warn!("OMDb answered HTTP {status}: {body}"),
                Err(e) => warn!(
                    "OMDb answered HTTP {status}, body unreadable: {}",
                    e.without_url()
                ),
            }
            return Err(OmdbError::UpstreamStatus {
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await.map_err(transport_error)?;
        Ok(body.to_vec())
    }
}

/// reqwest errors print their URL, and ours carries the API key
fn transport_error(err: reqwest::Error) -> OmdbError {
    OmdbError::Transport(err.without_url())
}
