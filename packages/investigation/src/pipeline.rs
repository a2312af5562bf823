//! Per-search lifecycle: the pipeline state machine and orchestration.
//!
//! One investigation at a time, observed through a watch channel. The
//! concurrency policy is last-call-wins: a new `investigate` call
//! supersedes any in-flight one, and a superseded call's outcome is
//! discarded instead of published.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use chrono::Local;
use gemini_client::{GeminiClient, GeminiError, GroundedProvider, Result};
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::normalize::{normalize, SearchResult};
use crate::prompt::build_request;

/// Fallback message when a failure carries no detail.
pub const GENERIC_ERROR: &str = "An error occurred during the investigation.";

/// Longest accepted subject name, after trimming. Anything longer is
/// ignored rather than forwarded to the provider.
pub const MAX_SUBJECT_LEN: usize = 512;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// User-displayable failure description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorInfo {
    /// Message rendered verbatim by the presentation layer
    pub message: String,
}

impl From<GeminiError> for ErrorInfo {
    fn from(err: GeminiError) -> Self {
        let message = if err.detail().trim().is_empty() {
            GENERIC_ERROR.to_string()
        } else {
            err.to_string()
        };
        Self { message }
    }
}

/// Observable lifecycle of one investigation.
#[derive(Debug, Clone, PartialEq)]
pub enum PipelineState {
    /// No investigation has run yet
    Idle,
    /// A provider call is in flight
    Running,
    /// The last investigation completed
    Succeeded(SearchResult),
    /// The last investigation failed
    Failed(ErrorInfo),
}

/// Orchestrates investigations and owns the pipeline state.
pub struct Investigator<P> {
    provider: P,
    timeout: Duration,
    generation: AtomicU64,
    state_tx: watch::Sender<PipelineState>,
}

impl Investigator<GeminiClient> {
    /// Investigator backed by a [`GeminiClient`] configured from the
    /// environment. Fails when `GEMINI_API_KEY` is absent.
    pub fn from_env() -> Result<Self> {
        Ok(Self::new(GeminiClient::from_env()?))
    }
}

impl<P: GroundedProvider> Investigator<P> {
    /// Create an investigator over the given provider.
    pub fn new(provider: P) -> Self {
        let (state_tx, _) = watch::channel(PipelineState::Idle);
        Self {
            provider,
            timeout: DEFAULT_TIMEOUT,
            generation: AtomicU64::new(0),
            state_tx,
        }
    }

    /// Set the provider-call timeout (default: 60s).
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> PipelineState {
        self.state_tx.borrow().clone()
    }

    /// Watch receiver over state transitions, for consumers that want to
    /// observe rather than poll.
    pub fn subscribe(&self) -> watch::Receiver<PipelineState> {
        self.state_tx.subscribe()
    }

    /// Run one investigation for `raw_input`.
    ///
    /// Empty or over-long input (after trimming) is a no-op: the state is
    /// left untouched and no provider call is made. Otherwise the state
    /// moves to [`PipelineState::Running`] (clearing any prior result or
    /// error) and settles in `Succeeded` or `Failed`, unless a newer call
    /// started in the meantime and this one's outcome is discarded.
    pub async fn investigate(&self, raw_input: &str) {
        let subject = raw_input.trim();
        if subject.is_empty() || subject.len() > MAX_SUBJECT_LEN {
            debug!(len = subject.len(), "Ignoring invalid subject input");
            return;
        }

        let ticket = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        self.state_tx.send_replace(PipelineState::Running);
        info!(subject = %subject, "Investigation started");

        let request = build_request(subject);
        let outcome = tokio::time::timeout(self.timeout, self.provider.generate(request)).await;

        // A newer call has started; its state owns the channel now.
        if self.generation.load(Ordering::SeqCst) != ticket {
            debug!(ticket, "Discarding superseded investigation outcome");
            return;
        }

        let next = match outcome {
            Ok(Ok(raw)) => {
                let completed_at = Local::now().format(TIMESTAMP_FORMAT).to_string();
                let result = normalize(&raw, completed_at);
                info!(sources = result.sources.len(), "Investigation succeeded");
                PipelineState::Succeeded(result)
            }
            Ok(Err(err)) => {
                warn!(error = %err, "Investigation failed");
                PipelineState::Failed(ErrorInfo::from(err))
            }
            Err(_) => {
                warn!(timeout_secs = self.timeout.as_secs(), "Investigation timed out");
                PipelineState::Failed(ErrorInfo {
                    message: "The investigation timed out.".to_string(),
                })
            }
        };

        self.state_tx.send_replace(next);
    }
}
