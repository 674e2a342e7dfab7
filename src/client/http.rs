//! HTTP telemetry source backed by `reqwest`'s blocking client.

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::AUTHORIZATION;
use tracing::{debug, warn};

use crate::config::Auth;

use super::{Endpoint, FetchError, Payload, SnapshotSource};

/// Per-request timeout for cluster endpoints.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Elasticsearch client for the read-only telemetry endpoints.
pub struct EsClient {
    client: Client,
    base_url: String,
    auth: Auth,
}

impl EsClient {
    /// Creates a client for `base_url` (scheme, host and port, no trailing slash).
    ///
    /// Self-signed certificates are accepted.
    pub fn new(base_url: impl Into<String>, auth: Auth) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .danger_accept_invalid_certs(true)
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.into(),
            auth,
        })
    }

    fn get(&self, path: &str) -> Result<String, FetchError> {
        let url = format!("{}{}", self.base_url, path);
        let request = self.client.get(&url);
        let request = match &self.auth {
            Auth::None => request,
            Auth::ApiKey(key) => request.header(AUTHORIZATION, format!("ApiKey {}", key)),
            Auth::Basic { user, password } => request.basic_auth(user, Some(password)),
        };

        let response = request.send()?;
        let status = response.status();
        let body = response.text()?;
        if !status.is_success() {
            return Err(FetchError::Status {
                code: status.as_u16(),
                body,
            });
        }
        debug!(path, bytes = body.len(), "endpoint fetched");
        Ok(body)
    }
}

impl SnapshotSource for EsClient {
    fn fetch(&self, endpoint: Endpoint) -> Result<Payload, FetchError> {
        self.get(endpoint.path())
            .and_then(|body| Payload::decode(endpoint, &body))
            .inspect_err(|e| warn!(endpoint = endpoint.path(), error = %e, "fetch failed"))
    }
}
