//! Poll loop: check a remote job until it reaches a terminal status.
//!
//! Each round calls the caller-supplied status check, classifies the response
//! with [`StatusDispatcher`], and on `InProgress` sleeps for
//! [`RetryPolicy::next_interval`] before trying again. The abort token is
//! checked before every status check and before every sleep.

use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::time::Instant;

use crate::retry::RetryPolicy;
use crate::status::{PollOutcome, ProcessContext, StatusDispatcher, StatusResponse};

/// Caller-side limits for one polling session.
#[derive(Debug, Clone, Default)]
pub struct PollOptions {
    /// Maximum status checks. `None` (or `Some(0)`) falls back to the policy's
    /// `max_retry_attempts`; if that is 0 too, polling is unbounded.
    pub max_attempts: Option<u32>,
    /// Give up rather than sleep past this much total elapsed time.
    pub deadline: Option<Duration>,
    /// Set to `true` from elsewhere to stop polling.
    pub abort: Option<Arc<AtomicBool>>,
}

impl PollOptions {
    fn attempt_limit(&self, policy: &RetryPolicy) -> Option<u32> {
        self.max_attempts
            .filter(|n| *n > 0)
            .or_else(|| Some(policy.max_retry_attempts()).filter(|n| *n > 0))
    }

    fn aborted(&self) -> bool {
        self.abort
            .as_ref()
            .map(|a| a.load(Ordering::Relaxed))
            .unwrap_or(false)
    }
}

/// Summary of a session that ended in success.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollReport {
    /// Number of status checks performed.
    pub attempts: u32,
    /// Total time spent sleeping between checks.
    pub waited: Duration,
}

#[derive(Debug, Error)]
pub enum PollError {
    /// The remote job reported a parse failure; message comes from the dispatcher.
    #[error("{message}")]
    Failed { message: String },
    #[error("job still in progress after {attempts} attempt(s)")]
    Exhausted { attempts: u32 },
    #[error("deadline of {deadline:?} reached after {attempts} attempt(s)")]
    DeadlineExceeded { attempts: u32, deadline: Duration },
    #[error("polling aborted after {attempts} attempt(s)")]
    Aborted { attempts: u32 },
    /// The status check itself failed (transport, decoding). Not retried here.
    #[error("status check failed on attempt {attempt}")]
    Check {
        attempt: u32,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync + 'static>,
    },
}

/// Poll until the job in `ctx` succeeds, fails, or a limit is hit.
pub async fn poll_until_terminal<F, Fut>(
    policy: &RetryPolicy,
    ctx: &ProcessContext,
    opts: &PollOptions,
    mut check: F,
) -> Result<PollReport, PollError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = anyhow::Result<StatusResponse>>,
{
    let dispatcher = StatusDispatcher::new();
    let limit = opts.attempt_limit(policy);
    let started = Instant::now();
    let mut attempts = 0u32;
    let mut waited = Duration::ZERO;

    loop {
        if opts.aborted() {
            return Err(aborted(ctx, attempts));
        }

        attempts += 1;
        let response = check().await.map_err(|e| PollError::Check {
            attempt: attempts,
            source: e.into(),
        })?;

        match dispatcher.resolve_response(ctx, &response) {
            PollOutcome::Success => {
                tracing::info!(
                    "file_id {} parsed after {} attempt(s), waited {:?}",
                    ctx.file_id,
                    attempts,
                    waited
                );
                return Ok(PollReport { attempts, waited });
            }
            PollOutcome::Failure { message } => return Err(PollError::Failed { message }),
            PollOutcome::InProgress => {}
        }

        if limit.is_some_and(|max| attempts >= max) {
            tracing::warn!(
                "file_id {} still in progress after {} attempt(s)",
                ctx.file_id,
                attempts
            );
            return Err(PollError::Exhausted { attempts });
        }

        let delay = policy.next_interval(attempts - 1);
        if let Some(deadline) = opts.deadline {
            if started.elapsed().saturating_add(delay) > deadline {
                tracing::warn!(
                    "file_id {} would exceed deadline {:?}",
                    ctx.file_id,
                    deadline
                );
                return Err(PollError::DeadlineExceeded { attempts, deadline });
            }
        }

        if opts.aborted() {
            return Err(aborted(ctx, attempts));
        }

        tracing::debug!("file_id {} in progress, next check in {:?}", ctx.file_id, delay);
        tokio::time::sleep(delay).await;
        waited = waited.saturating_add(delay);
    }
}

fn aborted(ctx: &ProcessContext, attempts: u32) -> PollError {
    tracing::info!(
        "polling aborted for file_id {} after {} attempt(s)",
        ctx.file_id,
        attempts
    );
    PollError::Aborted { attempts }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    fn fast_policy() -> RetryPolicy {
        RetryPolicy::builder()
            .retry_interval_millis(1)
            .max_retry_interval_millis(4)
            .build()
    }

    fn scripted(
        statuses: Vec<StatusResponse>,
    ) -> impl FnMut() -> std::future::Ready<anyhow::Result<StatusResponse>> {
        let queue = Mutex::new(VecDeque::from(statuses));
        move || {
            let next = queue
                .lock()
                .unwrap()
                .pop_front()
                .ok_or_else(|| anyhow::anyhow!("script exhausted"));
            std::future::ready(next)
        }
    }

    #[tokio::test]
    async fn succeeds_after_in_progress_rounds() {
        let check = scripted(vec![
            StatusResponse::with_status("UPLOADED"),
            StatusResponse::with_status("PARSING"),
            StatusResponse::with_status("PARSE_SUCCESS"),
        ]);
        let report = poll_until_terminal(
            &fast_policy(),
            &ProcessContext::new("f1"),
            &PollOptions::default(),
            check,
        )
        .await
        .unwrap();
        assert_eq!(report.attempts, 3);
        // 1ms then 2ms (1 * 1.5 rounded)
        assert_eq!(report.waited, Duration::from_millis(3));
    }

    #[tokio::test]
    async fn failure_message_is_surfaced() {
        let check = scripted(vec![StatusResponse::failed("BadDoc", "corrupt pdf")]);
        let err = poll_until_terminal(
            &fast_policy(),
            &ProcessContext::new("f2"),
            &PollOptions::default(),
            check,
        )
        .await
        .unwrap_err();
        assert_eq!(
            err.to_string(),
            "File parsing failed - FileId: f2, ErrorCode: BadDoc, ErrorMessage: corrupt pdf"
        );
    }

    #[tokio::test]
    async fn attempt_limit_from_options() {
        let check = scripted(vec![StatusResponse::with_status("PARSING"); 10]);
        let opts = PollOptions {
            max_attempts: Some(3),
            ..PollOptions::default()
        };
        let err = poll_until_terminal(&fast_policy(), &ProcessContext::new("f3"), &opts, check)
            .await
            .unwrap_err();
        assert!(matches!(err, PollError::Exhausted { attempts: 3 }));
    }

    #[tokio::test]
    async fn attempt_limit_falls_back_to_policy() {
        let policy = fast_policy().to_builder().max_retry_attempts(2).build();
        let check = scripted(vec![StatusResponse::with_status("QUEUED"); 10]);
        let err = poll_until_terminal(
            &policy,
            &ProcessContext::new("f4"),
            &PollOptions::default(),
            check,
        )
        .await
        .unwrap_err();
        assert!(matches!(err, PollError::Exhausted { attempts: 2 }));
    }

    #[tokio::test]
    async fn preset_abort_stops_before_first_check() {
        let opts = PollOptions {
            abort: Some(Arc::new(AtomicBool::new(true))),
            ..PollOptions::default()
        };
        let check = scripted(vec![]);
        let err = poll_until_terminal(&fast_policy(), &ProcessContext::new("f5"), &opts, check)
            .await
            .unwrap_err();
        assert!(matches!(err, PollError::Aborted { attempts: 0 }));
    }

    #[tokio::test]
    async fn abort_during_polling_is_seen_before_sleep() {
        let abort = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&abort);
        let check = move || {
            flag.store(true, Ordering::Relaxed);
            std::future::ready(Ok::<_, anyhow::Error>(StatusResponse::with_status("PARSING")))
        };
        let opts = PollOptions {
            abort: Some(abort),
            ..PollOptions::default()
        };
        let err = poll_until_terminal(&fast_policy(), &ProcessContext::new("f6"), &opts, check)
            .await
            .unwrap_err();
        assert!(matches!(err, PollError::Aborted { attempts: 1 }));
    }

    #[tokio::test]
    async fn deadline_stops_before_oversleeping() {
        let policy = RetryPolicy::builder()
            .retry_interval_secs(30)
            .use_exponential_backoff(false)
            .build();
        let check = scripted(vec![StatusResponse::with_status("PARSING"); 4]);
        let opts = PollOptions {
            deadline: Some(Duration::from_secs(5)),
            ..PollOptions::default()
        };
        let err = poll_until_terminal(&policy, &ProcessContext::new("f7"), &opts, check)
            .await
            .unwrap_err();
        assert!(matches!(err, PollError::DeadlineExceeded { attempts: 1, .. }));
    }

    #[tokio::test]
    async fn transport_errors_are_not_retried() {
        let check = scripted(vec![]);
        let err = poll_until_terminal(
            &fast_policy(),
            &ProcessContext::new("f8"),
            &PollOptions::default(),
            check,
        )
        .await
        .unwrap_err();
        match err {
            PollError::Check { attempt, source } => {
                assert_eq!(attempt, 1);
                assert_eq!(source.to_string(), "script exhausted");
            }
            other => panic!("expected check error, got {:?}", other),
        }
    }
}
