//! Generation DTOs for the platform API

use serde::{Deserialize, Serialize};

/// Request to start an AI generation job from previously uploaded photos
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitGeneration {
    /// Identifiers of the uploaded images the job should draw from
    pub image_ids: Vec<String>,
}

/// A generation job accepted by the platform
///
/// The job id is opaque; clients only ever pass it back to the status endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationJob {
    pub job_id: String,
}
