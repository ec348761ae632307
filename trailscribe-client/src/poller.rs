//! Generation job poller
//!
//! Drives a bounded, fixed-interval polling loop against the platform's job
//! status endpoint until the job reaches a terminal state, the timeout
//! elapses, or the caller cancels. Each session reports its outcome to the
//! caller's [`PollHandler`] at most once.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::{debug, warn};

use trailscribe_core::domain::generation::{GenerationState, GenerationStatus};

use crate::error::ClientError;

/// Failure message reported when a session exceeds its timeout
pub const TIMEOUT_MESSAGE: &str = "TIMEOUT";

/// Failure message reported when the service marks a job failed without detail
pub const DEFAULT_FAILURE_MESSAGE: &str = "generation failed";

/// Capability to fetch the current status of a generation job
///
/// Errors from this trait are transient for the poller: they are logged and
/// retried on the next tick, never surfaced as a session outcome. Fetching a
/// status is a stateless, idempotent read and may be repeated freely.
#[async_trait]
pub trait StatusSource: Send + Sync {
    async fn fetch_status(&self, job_id: &str) -> Result<GenerationStatus, ClientError>;
}

/// Receives the single outcome of a poll session
///
/// For any session, `on_completed` and `on_failed` together fire at most
/// once, and never after the session was cancelled.
pub trait PollHandler: Send + Sync {
    /// The job completed; `result_id` identifies the generated content
    fn on_completed(&self, result_id: &str);

    /// The job failed, either explicitly (service error message or
    /// [`DEFAULT_FAILURE_MESSAGE`]) or by timeout ([`TIMEOUT_MESSAGE`])
    fn on_failed(&self, message: &str);
}

impl<H: PollHandler + ?Sized> PollHandler for Arc<H> {
    fn on_completed(&self, result_id: &str) {
        (**self).on_completed(result_id);
    }

    fn on_failed(&self, message: &str) {
        (**self).on_failed(message);
    }
}

/// Polling cadence and wall-clock bound for one session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollOptions {
    /// Delay between status fetches; the first fetch happens immediately
    pub interval: Duration,
    /// Wall-clock bound on the whole session, independent of tick count
    pub timeout: Duration,
}

impl Default for PollOptions {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(3),
            timeout: Duration::from_secs(120),
        }
    }
}

/// Errors returned synchronously by [`JobPoller::start`]
///
/// These are programmer errors in the arguments; runtime problems while
/// polling never surface here.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PollError {
    #[error("job id must not be empty")]
    EmptyJobId,

    #[error("poll interval must be greater than zero")]
    ZeroInterval,

    #[error("poll timeout must be greater than zero")]
    ZeroTimeout,
}

/// Handle to one polling session
///
/// A session is active from [`JobPoller::start`] until it reports an outcome
/// or is cancelled. The active flag is owned by the session alone, so
/// sessions for different jobs never interfere.
#[derive(Debug)]
pub struct PollSession {
    job_id: String,
    active: Arc<AtomicBool>,
    task: JoinHandle<()>,
}

impl PollSession {
    /// Job id this session polls for
    pub fn job_id(&self) -> &str {
        &self.job_id
    }

    /// Whether the session has neither reported an outcome nor been cancelled
    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::SeqCst)
    }

    /// Stop polling without reporting an outcome
    ///
    /// Idempotent: cancelling an inactive session is a no-op. An in-flight
    /// status fetch that resolves after this call cannot fire a callback,
    /// because the outcome gate is claimed here first.
    pub fn cancel(&self) {
        if self.active.swap(false, Ordering::SeqCst) {
            self.task.abort();
            debug!(job_id = %self.job_id, "poll session cancelled");
        }
    }
}

/// Polls generation jobs against a caller-supplied status source
///
/// At most one session is active per poller: starting a new session first
/// cancels the previous one, so a single subscriber never has two timers
/// racing against it. Independent pollers track independent jobs.
pub struct JobPoller<S> {
    source: Arc<S>,
    current: Mutex<Option<Arc<PollSession>>>,
}

impl<S: StatusSource + 'static> JobPoller<S> {
    /// Creates a new poller over the given status source
    pub fn new(source: Arc<S>) -> Self {
        Self {
            source,
            current: Mutex::new(None),
        }
    }

    /// Starts polling a job, replacing any session this poller already runs
    ///
    /// The first status fetch is issued immediately, then one fetch every
    /// `options.interval` until the job turns terminal, `options.timeout`
    /// elapses, or the session is cancelled.
    ///
    /// # Arguments
    /// * `job_id` - Opaque, non-empty job id to poll for
    /// * `options` - Polling cadence and timeout
    /// * `handler` - Receives the single outcome of the session
    ///
    /// # Returns
    /// The session handle, also retained by the poller for replacement
    pub fn start<H>(
        &self,
        job_id: impl Into<String>,
        options: PollOptions,
        handler: H,
    ) -> Result<Arc<PollSession>, PollError>
    where
        H: PollHandler + 'static,
    {
        let job_id = job_id.into();
        if job_id.trim().is_empty() {
            return Err(PollError::EmptyJobId);
        }
        if options.interval.is_zero() {
            return Err(PollError::ZeroInterval);
        }
        if options.timeout.is_zero() {
            return Err(PollError::ZeroTimeout);
        }

        let mut current = self.current.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(previous) = current.take() {
            previous.cancel();
        }

        debug!(job_id = %job_id, ?options, "starting poll session");

        let active = Arc::new(AtomicBool::new(true));
        let task = tokio::spawn(run_session(
            Arc::clone(&self.source),
            job_id.clone(),
            options,
            handler,
            Arc::clone(&active),
        ));

        let session = Arc::new(PollSession {
            job_id,
            active,
            task,
        });
        *current = Some(Arc::clone(&session));

        Ok(session)
    }

    /// Cancels the poller's active session, if any
    pub fn cancel(&self) {
        let mut current = self.current.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(session) = current.take() {
            session.cancel();
        }
    }
}

/// One poll session: ticks, fetches, and emits at most one outcome
///
/// Each tick runs to completion (fetch awaited, state inspected, outcome
/// possibly emitted) before the next tick is waited on, so outcome
/// evaluations for a session never race. The terminal check runs before the
/// timeout check, so a terminal fetch result wins a tie against the timeout.
async fn run_session<S, H>(
    source: Arc<S>,
    job_id: String,
    options: PollOptions,
    handler: H,
    active: Arc<AtomicBool>,
) where
    S: StatusSource,
    H: PollHandler,
{
    let started = Instant::now();
    let mut ticker = time::interval(options.interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        // the first tick resolves immediately, so the first fetch has no delay
        ticker.tick().await;

        match source.fetch_status(&job_id).await {
            Ok(status) => match status.state {
                GenerationState::Completed => {
                    let result_id = status.result_id.unwrap_or_default();
                    if active.swap(false, Ordering::SeqCst) {
                        debug!(job_id = %job_id, result_id = %result_id, "generation completed");
                        handler.on_completed(&result_id);
                    }
                    return;
                }
                GenerationState::Failed => {
                    let message = status
                        .error_message
                        .as_deref()
                        .unwrap_or(DEFAULT_FAILURE_MESSAGE);
                    if active.swap(false, Ordering::SeqCst) {
                        debug!(job_id = %job_id, message, "generation failed");
                        handler.on_failed(message);
                    }
                    return;
                }
                GenerationState::Pending | GenerationState::Processing => {
                    debug!(job_id = %job_id, state = ?status.state, "generation in progress");
                }
            },
            // transient: retried on the next tick until the timeout elapses
            Err(e) => {
                warn!(job_id = %job_id, error = %e, "status fetch failed, will retry");
            }
        }

        if started.elapsed() >= options.timeout {
            if active.swap(false, Ordering::SeqCst) {
                warn!(job_id = %job_id, timeout = ?options.timeout, "poll session timed out");
                handler.on_failed(TIMEOUT_MESSAGE);
            }
            return;
        }
    }
}
