//! Utility context handed to every task action and hook
//!
//! [`Utils`] is the default context. Tasks that need other capabilities can
//! run against any context type; see [`crate::Chore::with_context`].

use std::time::Duration;

use reqwest::blocking::{Client, Request, RequestBuilder};
use serde::de::DeserializeOwned;

use crate::configs::chore::HttpConfig;
use crate::types::{ChoreError, ChoreResult};

/// Helpers shared by all tasks in one invocation
#[derive(Debug, Clone)]
pub struct Utils {
    pub http: Http,
}

impl Utils {
    /// Helpers with default settings
    pub fn new() -> ChoreResult<Self> {
        Self::from_config(&HttpConfig::default())
    }

    /// Build the helpers from configuration
    pub fn from_config(config: &HttpConfig) -> ChoreResult<Self> {
        Ok(Self {
            http: Http::from_config(config)?,
        })
    }
}

/// Blocking HTTP helper.
///
/// Requests run on the calling thread; the task waits until the response body
/// has been read and parsed or the transport fails.
#[derive(Debug, Clone)]
pub struct Http {
    client: Client,
}

impl Http {
    /// Client with no request timeout
    pub fn new() -> ChoreResult<Self> {
        Self::from_config(&HttpConfig::default())
    }

    pub fn from_config(config: &HttpConfig) -> ChoreResult<Self> {
        let mut builder = Client::builder().timeout(request_timeout(config));
        if let Some(user_agent) = &config.user_agent {
            builder = builder.user_agent(user_agent.clone());
        }
        let client = builder
            .build()
            .map_err(|e| ChoreError::Config(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self { client })
    }

    /// Start a GET request for use with [`Http::execute`]
    pub fn get(&self, url: &str) -> RequestBuilder {
        self.client.get(url)
    }

    /// Start a request with any method
    pub fn request(&self, method: reqwest::Method, url: &str) -> RequestBuilder {
        self.client.request(method, url)
    }

    /// Perform `request` and hand the raw body to `parse`.
    ///
    /// The status code is not checked; `parse` sees whatever body the server sent.
    pub fn execute<T, F>(&self, request: Request, parse: F) -> ChoreResult<T>
    where
        F: FnOnce(&[u8]) -> anyhow::Result<T>,
    {
        let url = request.url().to_string();
        tracing::debug!(method = %request.method(), url = %url, "sending request");

        let response = self.client.execute(request)?;
        let status = response.status();
        let body = response.bytes()?;
        tracing::debug!(url = %url, status = status.as_u16(), bytes = body.len(), "received response");

        parse(&body).map_err(ChoreError::Parse)
    }

    /// Perform `request` and parse the body as arbitrary JSON
    pub fn execute_json(&self, request: Request) -> ChoreResult<serde_json::Value> {
        self.execute_json_as(request)
    }

    /// Perform `request` and deserialize the JSON body into `T`
    pub fn execute_json_as<T: DeserializeOwned>(&self, request: Request) -> ChoreResult<T> {
        self.execute(request, |body| Ok(serde_json::from_slice(body)?))
    }
}

/// Timeout handed to the client builder. `None` disables the client's own
/// default, so an unanswered request blocks until the server responds.
fn request_timeout(config: &HttpConfig) -> Option<Duration> {
    config.timeout_secs.map(Duration::from_secs)
}
