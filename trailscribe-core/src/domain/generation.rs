//! Generation job domain types

use serde::{Deserialize, Serialize};

/// Lifecycle state of a server-side generation job
///
/// The platform reports states as upper-case strings on the wire. The set is
/// exhaustive on purpose: an unrecognized state fails deserialization, which
/// callers treat as a transient fetch problem rather than a job outcome.
/// `Completed` and `Failed` are terminal; the poller never fetches again
/// after observing either.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GenerationState {
    Pending,
    Processing,
    Completed,
    Failed,
}

/// Status payload returned by the platform for a single generation job
///
/// `result_id` is present exactly when the job completed; `error_message`
/// may accompany a failed job but is optional.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationStatus {
    pub state: GenerationState,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

impl GenerationStatus {
    /// Status for a job still waiting to be picked up
    pub fn pending() -> Self {
        Self {
            state: GenerationState::Pending,
            result_id: None,
            error_message: None,
        }
    }

    /// Status for a job currently being processed
    pub fn processing() -> Self {
        Self {
            state: GenerationState::Processing,
            result_id: None,
            error_message: None,
        }
    }

    /// Status for a completed job with the id of the produced content
    pub fn completed(result_id: impl Into<String>) -> Self {
        Self {
            state: GenerationState::Completed,
            result_id: Some(result_id.into()),
            error_message: None,
        }
    }

    /// Status for a failed job with a human-readable reason
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            state: GenerationState::Failed,
            result_id: None,
            error_message: Some(message.into()),
        }
    }
}
