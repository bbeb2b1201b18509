//! Tests for classify and replay.

use super::parse;
use crate::cli::CliCommand;

#[test]
fn cli_parse_classify_status() {
    match parse(&["docpoll", "classify", "PARSING"]) {
        CliCommand::Classify {
            status,
            file_id,
            response,
        } => {
            assert_eq!(status.as_deref(), Some("PARSING"));
            assert_eq!(file_id, "-");
            assert!(response.is_none());
        }
        _ => panic!("expected Classify"),
    }
}

#[test]
fn cli_parse_classify_response_only() {
    match parse(&[
        "docpoll",
        "classify",
        "--response",
        "resp.json",
        "--file-id",
        "file-9",
    ]) {
        CliCommand::Classify {
            status,
            file_id,
            response,
        } => {
            assert!(status.is_none());
            assert_eq!(file_id, "file-9");
            assert_eq!(response.as_deref(), Some(std::path::Path::new("resp.json")));
        }
        _ => panic!("expected Classify with --response"),
    }
}

#[test]
fn cli_parse_replay() {
    match parse(&["docpoll", "replay", "script.json", "--interval-ms", "5"]) {
        CliCommand::Replay {
            path,
            file_id,
            interval_ms,
        } => {
            assert_eq!(path, std::path::PathBuf::from("script.json"));
            assert_eq!(file_id, "replay");
            assert_eq!(interval_ms, Some(5));
        }
        _ => panic!("expected Replay"),
    }
}
