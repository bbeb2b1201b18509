//! CLI command handlers. Each command is in its own file.

mod check_size;
mod classify;
mod completions;
mod config;
mod replay;
mod schedule;

pub use check_size::run_check_size;
pub use classify::run_classify;
pub use completions::run_completions;
pub use config::run_config;
pub use replay::run_replay;
pub use schedule::run_schedule;
