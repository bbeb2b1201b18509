//! Tests for config, schedule, check-size and completions.

use super::parse;
use crate::cli::{Cli, CliCommand};
use clap::Parser;

#[test]
fn cli_parse_config() {
    match parse(&["docpoll", "config"]) {
        CliCommand::Config => {}
        _ => panic!("expected Config"),
    }
}

#[test]
fn cli_parse_global_config_path() {
    let cli = Cli::try_parse_from(["docpoll", "config", "--config", "/tmp/docpoll.toml"]).unwrap();
    assert_eq!(
        cli.config.as_deref(),
        Some(std::path::Path::new("/tmp/docpoll.toml"))
    );
}

#[test]
fn cli_parse_schedule_default() {
    match parse(&["docpoll", "schedule"]) {
        CliCommand::Schedule { attempts } => assert_eq!(attempts, 10),
        _ => panic!("expected Schedule"),
    }
}

#[test]
fn cli_parse_schedule_attempts() {
    match parse(&["docpoll", "schedule", "--attempts", "4"]) {
        CliCommand::Schedule { attempts } => assert_eq!(attempts, 4),
        _ => panic!("expected Schedule with --attempts 4"),
    }
}

#[test]
fn cli_parse_check_size() {
    match parse(&["docpoll", "check-size", "report.pdf"]) {
        CliCommand::CheckSize { path } => {
            assert_eq!(path, std::path::PathBuf::from("report.pdf"))
        }
        _ => panic!("expected CheckSize"),
    }
}

#[test]
fn cli_parse_completions() {
    match parse(&["docpoll", "completions", "bash"]) {
        CliCommand::Completions { shell } => assert_eq!(shell, clap_complete::Shell::Bash),
        _ => panic!("expected Completions"),
    }
}

#[test]
fn cli_rejects_unknown_shell() {
    assert!(Cli::try_parse_from(["docpoll", "completions", "cmd.exe"]).is_err());
}
