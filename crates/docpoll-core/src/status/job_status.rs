use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Status reported by the remote parser for a submitted file.
///
/// The set is closed on our side; anything the service sends that we do not
/// recognise (including an absent or empty field) lands in `Unknown` and is
/// treated like `Parsing`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobStatus {
    ParseSuccess,
    ParseFailed,
    Parsing,
    Uploaded,
    /// Raw value as received; empty when the field was missing.
    Unknown(String),
}

impl JobStatus {
    /// Parse an optional wire value. Never fails.
    pub fn parse(raw: Option<&str>) -> Self {
        match raw {
            Some("PARSE_SUCCESS") => JobStatus::ParseSuccess,
            Some("PARSE_FAILED") => JobStatus::ParseFailed,
            Some("PARSING") => JobStatus::Parsing,
            Some("UPLOADED") => JobStatus::Uploaded,
            Some(other) => JobStatus::Unknown(other.to_string()),
            None => JobStatus::Unknown(String::new()),
        }
    }

    /// Wire name (`PARSE_SUCCESS`, ...), or the raw value for `Unknown`.
    pub fn as_str(&self) -> &str {
        match self {
            JobStatus::ParseSuccess => "PARSE_SUCCESS",
            JobStatus::ParseFailed => "PARSE_FAILED",
            JobStatus::Parsing => "PARSING",
            JobStatus::Uploaded => "UPLOADED",
            JobStatus::Unknown(raw) => raw.as_str(),
        }
    }

    pub fn is_recognized(&self) -> bool {
        !matches!(self, JobStatus::Unknown(_))
    }
}

impl FromStr for JobStatus {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(JobStatus::parse(Some(s)))
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_wire_names() {
        assert_eq!(JobStatus::parse(Some("PARSE_SUCCESS")), JobStatus::ParseSuccess);
        assert_eq!(JobStatus::parse(Some("PARSE_FAILED")), JobStatus::ParseFailed);
        assert_eq!(JobStatus::parse(Some("PARSING")), JobStatus::Parsing);
        assert_eq!(JobStatus::parse(Some("UPLOADED")), JobStatus::Uploaded);
    }

    #[test]
    fn unknown_absent_and_empty_are_unrecognized() {
        assert_eq!(JobStatus::parse(None), JobStatus::Unknown(String::new()));
        assert_eq!(JobStatus::parse(Some("")), JobStatus::Unknown(String::new()));
        let s: JobStatus = "parse_success".parse().unwrap();
        assert_eq!(s, JobStatus::Unknown("parse_success".to_string()));
        assert!(!s.is_recognized());
    }

    #[test]
    fn display_roundtrips_wire_name() {
        for name in ["PARSE_SUCCESS", "PARSE_FAILED", "PARSING", "UPLOADED", "QUEUED"] {
            assert_eq!(JobStatus::parse(Some(name)).to_string(), name);
        }
    }
}
