//! JSON GET client shared by both report units.

use std::time::Duration;

use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::config::Credentials;
use crate::error::{ReqlensError, ReqlensResult};

/// Thin wrapper over `reqwest::Client` that issues GETs and decodes JSON.
#[derive(Clone)]
pub struct JsonClient {
    client: reqwest::Client,
    authorization: Option<String>,
}

impl JsonClient {
    /// Create a client. `None` leaves requests without a timeout.
    pub fn new(timeout: Option<Duration>) -> Self {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Self {
            client: builder.build().unwrap_or_default(),
            authorization: None,
        }
    }

    /// Attach HTTP Basic credentials to every request.
    pub fn with_basic_auth(mut self, credentials: &Credentials) -> Self {
        self.authorization = Some(credentials.basic_auth_header());
        self
    }

    /// GET `url` with `query` parameters and decode the body as `T`.
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, &str)],
    ) -> ReqlensResult<T> {
        let mut request = self
            .client
            .get(url)
            .header(reqwest::header::ACCEPT, "application/json");
        if !query.is_empty() {
            request = request.query(query);
        }
        if let Some(auth) = &self.authorization {
            request = request.header(reqwest::header::AUTHORIZATION, auth);
        }

        debug!(url = %url, "GET");

        let response = request.send().await.map_err(|e| ReqlensError::Network {
            url: url.to_string(),
            source: e,
        })?;

        let status = response.status();
        if !status.is_success() {
            warn!(url = %url, status_code = %status, "Request failed with status");
            return Err(ReqlensError::from_status(url, status));
        }

        let body = response.text().await.map_err(|e| ReqlensError::Network {
            url: url.to_string(),
            source: e,
        })?;
        debug!(url = %url, bytes = body.len(), "Response received");

        serde_json::from_str(&body).map_err(|e| ReqlensError::malformed(url, e.to_string()))
    }
}

impl Default for JsonClient {
    fn default() -> Self {
        Self::new(None)
    }
}
