//! Trailscribe HTTP Client
//!
//! A type-safe client for the Trailscribe travel-content platform API, plus
//! the [`JobPoller`] that tracks asynchronous AI generation jobs to completion.
//!
//! Generation is asynchronous on the server: the client submits a set of
//! uploaded photos, receives an opaque job id, and polls the status endpoint
//! until the job completes, fails, or a timeout elapses.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use trailscribe_client::{ApiClient, JobPoller, PollHandler, PollOptions};
//! use trailscribe_core::dto::generation::SubmitGeneration;
//!
//! struct Printer;
//!
//! impl PollHandler for Printer {
//!     fn on_completed(&self, result_id: &str) {
//!         println!("generated blog: {result_id}");
//!     }
//!     fn on_failed(&self, message: &str) {
//!         println!("generation failed: {message}");
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = Arc::new(ApiClient::new("https://api.trailscribe.example"));
//!
//!     let job = client
//!         .submit_generation(SubmitGeneration {
//!             image_ids: vec!["img-1".to_string()],
//!         })
//!         .await?;
//!
//!     let poller = JobPoller::new(Arc::clone(&client));
//!     poller.start(job.job_id, PollOptions::default(), Printer)?;
//!     Ok(())
//! }
//! ```

pub mod error;
mod generation;
pub mod poller;

// Re-export commonly used types
pub use error::{ClientError, Result};
pub use poller::{JobPoller, PollError, PollHandler, PollOptions, PollSession, StatusSource};

use reqwest::Client;
use serde::de::DeserializeOwned;

/// HTTP client for the Trailscribe platform API
///
/// Covers the generation endpoints (submit a job, fetch its status) and
/// implements [`StatusSource`] so it can be handed directly to a [`JobPoller`].
#[derive(Debug, Clone)]
pub struct ApiClient {
    /// Base URL of the platform API (e.g., "https://api.trailscribe.example")
    base_url: String,
    /// Bearer token attached to every request, if the caller is signed in
    token: Option<String>,
    /// HTTP client instance
    client: Client,
}

impl ApiClient {
    /// Create a new API client
    ///
    /// # Arguments
    /// * `base_url` - The base URL of the platform API
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            token: None,
            client: Client::new(),
        }
    }

    /// Create a new API client with a custom HTTP client
    ///
    /// This allows you to configure timeouts, proxies, TLS settings, etc.
    ///
    /// # Arguments
    /// * `base_url` - The base URL of the platform API
    /// * `client` - A configured reqwest Client
    pub fn with_client(base_url: impl Into<String>, client: Client) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            token: None,
            client,
        }
    }

    /// Attach a bearer token to every subsequent request
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Get the base URL of the platform API
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Apply the bearer token to a request, if one is configured
    fn authorized(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Handle an API response and deserialize JSON
    ///
    /// Checks the status code and returns an appropriate error if the request
    /// failed, or deserializes the response body if successful.
    async fn handle_response<T: DeserializeOwned>(&self, response: reqwest::Response) -> Result<T> {
        let status = response.status();

        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            return Err(ClientError::api(status.as_u16(), message));
        }

        response
            .json()
            .await
            .map_err(|e| ClientError::Parse(format!("invalid JSON response: {e}")))
    }
}
