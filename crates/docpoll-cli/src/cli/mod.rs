//! CLI for inspecting docpoll policies and job statuses.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use clap_complete::Shell;
use docpoll_core::config::{self, DocpollConfig};
use std::path::{Path, PathBuf};

use commands::{
    run_check_size, run_classify, run_completions, run_config, run_replay, run_schedule,
};

/// Top-level CLI for docpoll.
#[derive(Debug, Parser)]
#[command(name = "docpoll")]
#[command(about = "docpoll: retry policy and status tools for remote document parsing", long_about = None)]
pub struct Cli {
    /// Read configuration from this file instead of ~/.config/docpoll/config.toml.
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Show the effective document-reader policy.
    Config,

    /// Print the wait before each retry and the cumulative wait.
    Schedule {
        /// Number of retries to show.
        #[arg(long, default_value = "10", value_name = "N")]
        attempts: u32,
    },

    /// Classify a job status the way the poller would.
    Classify {
        /// Status string (e.g. PARSING). Taken from --response when omitted.
        status: Option<String>,
        /// File identifier used in diagnostics.
        #[arg(long, default_value = "-")]
        file_id: String,
        /// JSON status response to read error code and message from.
        #[arg(long, value_name = "PATH")]
        response: Option<PathBuf>,
    },

    /// Check a file's size against the configured limits.
    CheckSize {
        /// Path to the file.
        path: PathBuf,
    },

    /// Run the poll loop against a JSON array of recorded status responses.
    Replay {
        /// Path to the JSON file.
        path: PathBuf,
        /// File identifier used in logs and diagnostics.
        #[arg(long, default_value = "replay")]
        file_id: String,
        /// Use this constant interval (ms) instead of the configured backoff.
        #[arg(long, value_name = "MS")]
        interval_ms: Option<u64>,
    },

    /// Generate shell completions.
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn load_config(path: Option<&Path>) -> Result<DocpollConfig> {
    match path {
        Some(p) => config::load_from_path(p),
        None => config::load_or_init(),
    }
}

impl CliCommand {
    pub async fn run_from_args() -> Result<()> {
        let cli = Cli::parse();

        if let CliCommand::Completions { shell } = cli.command {
            run_completions(shell);
            return Ok(());
        }

        let cfg = load_config(cli.config.as_deref())?;
        tracing::debug!("loaded config: {:?}", cfg);
        let policy = &cfg.document_reader;

        match cli.command {
            CliCommand::Config => run_config(&cfg),
            CliCommand::Schedule { attempts } => run_schedule(policy, attempts),
            CliCommand::Classify {
                status,
                file_id,
                response,
            } => run_classify(status.as_deref(), &file_id, response.as_deref())?,
            CliCommand::CheckSize { path } => run_check_size(policy, &path)?,
            CliCommand::Replay {
                path,
                file_id,
                interval_ms,
            } => run_replay(&cfg, &path, &file_id, interval_ms).await?,
            CliCommand::Completions { .. } => {}
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
