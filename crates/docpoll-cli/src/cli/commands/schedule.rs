//! `docpoll schedule` – print the backoff schedule.

use docpoll_core::retry::RetryPolicy;
use std::time::Duration;

/// One row per retry index: wait before that retry and the running total.
pub fn schedule_rows(policy: &RetryPolicy, attempts: u32) -> Vec<(u32, Duration, Duration)> {
    let mut total = Duration::ZERO;
    (0..attempts)
        .map(|i| {
            let wait = policy.next_interval(i);
            total = total.saturating_add(wait);
            (i, wait, total)
        })
        .collect()
}

pub fn run_schedule(policy: &RetryPolicy, attempts: u32) {
    println!("{:<6} {:<12} {}", "RETRY", "WAIT", "TOTAL");
    for (i, wait, total) in schedule_rows(policy, attempts) {
        println!(
            "{:<6} {:<12} {}",
            i,
            format!("{:.1}s", wait.as_secs_f64()),
            format!("{:.1}s", total.as_secs_f64())
        );
    }
}
