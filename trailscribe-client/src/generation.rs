//! Generation API endpoints

use async_trait::async_trait;
use trailscribe_core::domain::generation::GenerationStatus;
use trailscribe_core::dto::generation::{GenerationJob, SubmitGeneration};

use crate::ApiClient;
use crate::error::Result;
use crate::poller::StatusSource;

impl ApiClient {
    /// Submit uploaded photos for AI blog generation
    ///
    /// The platform queues the job and returns immediately; the returned job
    /// id is then tracked with [`crate::JobPoller`] until a terminal state.
    ///
    /// # Arguments
    /// * `req` - Identifiers of the previously uploaded images
    ///
    /// # Returns
    /// The accepted job with its opaque id
    pub async fn submit_generation(&self, req: SubmitGeneration) -> Result<GenerationJob> {
        let url = format!("{}/api/generation/jobs", self.base_url);
        let response = self
            .authorized(self.client.post(&url).json(&req))
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// Fetch the current status of a generation job
    ///
    /// # Arguments
    /// * `job_id` - The opaque job id returned by [`ApiClient::submit_generation`]
    ///
    /// # Returns
    /// The job's current state plus result id or error message when terminal
    pub async fn generation_status(&self, job_id: &str) -> Result<GenerationStatus> {
        let url = format!("{}/api/generation/jobs/{}/status", self.base_url, job_id);
        let response = self.authorized(self.client.get(&url)).send().await?;

        self.handle_response(response).await
    }
}

#[async_trait]
impl StatusSource for ApiClient {
    async fn fetch_status(&self, job_id: &str) -> Result<GenerationStatus> {
        self.generation_status(job_id).await
    }
}
