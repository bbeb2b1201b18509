//! `docpoll replay` – drive the poll loop from recorded responses.

use anyhow::{Context, Result};
use docpoll_core::config::DocpollConfig;
use docpoll_core::poll::{poll_until_terminal, PollOptions};
use docpoll_core::retry::RetryPolicy;
use docpoll_core::status::{ProcessContext, StatusResponse};
use std::collections::VecDeque;
use std::fs;
use std::path::Path;
use std::sync::Mutex;

/// Policy used for replay: the configured one, or a constant interval override.
pub fn replay_policy(base: &RetryPolicy, interval_ms: Option<u64>) -> RetryPolicy {
    match interval_ms {
        Some(ms) => base
            .to_builder()
            .retry_interval_millis(ms)
            .max_retry_interval_millis(ms)
            .use_exponential_backoff(false)
            .build(),
        None => base.clone(),
    }
}

pub async fn run_replay(
    cfg: &DocpollConfig,
    path: &Path,
    file_id: &str,
    interval_ms: Option<u64>,
) -> Result<()> {
    let data = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let script: Vec<StatusResponse> = serde_json::from_str(&data)
        .with_context(|| format!("parse status responses {}", path.display()))?;
    tracing::debug!("replaying {} response(s) from {}", script.len(), path.display());

    let policy = replay_policy(&cfg.document_reader, interval_ms);
    let opts = PollOptions {
        deadline: cfg.poll_deadline(),
        ..PollOptions::default()
    };
    let queue = Mutex::new(VecDeque::from(script));
    let check = || {
        let next = queue
            .lock()
            .map_err(|_| anyhow::anyhow!("replay queue poisoned"))
            .and_then(|mut q| {
                q.pop_front()
                    .ok_or_else(|| anyhow::anyhow!("replay script exhausted"))
            });
        std::future::ready(next)
    };

    let report = poll_until_terminal(&policy, &ProcessContext::new(file_id), &opts, check).await?;
    println!(
        "success after {} attempt(s), waited {:.1}s",
        report.attempts,
        report.waited.as_secs_f64()
    );
    Ok(())
}
