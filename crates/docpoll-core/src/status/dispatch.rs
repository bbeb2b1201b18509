use super::job_status::JobStatus;
use super::response::{ProcessContext, StatusResponse};

const UNKNOWN: &str = "unknown";

/// Classification of a single poll.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollOutcome {
    /// Parsing finished; fetching the parsed content is up to the caller.
    Success,
    /// Parsing failed remotely. `message` is the diagnostic to surface.
    Failure { message: String },
    /// Still running (or unrecognised status); poll again later.
    InProgress,
}

impl PollOutcome {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, PollOutcome::InProgress)
    }
}

/// Maps a reported job status onto a [`PollOutcome`].
///
/// Stateless: one value can be copied into every polling task.
#[derive(Debug, Clone, Copy, Default)]
pub struct StatusDispatcher;

impl StatusDispatcher {
    pub fn new() -> Self {
        Self
    }

    /// Classify `status` for the job in `ctx`.
    ///
    /// `body` is the decoded response body, if any. It is only read on
    /// failure, to pull out the error code and message; a missing body still
    /// yields a `Failure`, with a generic diagnostic.
    pub fn resolve(
        &self,
        status: Option<&str>,
        ctx: &ProcessContext,
        body: Option<&StatusResponse>,
    ) -> PollOutcome {
        match JobStatus::parse(status) {
            JobStatus::ParseSuccess => {
                tracing::debug!("file parsing succeeded for file_id {}", ctx.file_id);
                PollOutcome::Success
            }
            JobStatus::ParseFailed => failure(ctx, body),
            JobStatus::Parsing | JobStatus::Uploaded => {
                tracing::debug!("file is still parsing, file_id {}", ctx.file_id);
                PollOutcome::InProgress
            }
            JobStatus::Unknown(raw) => {
                if status.is_none() {
                    tracing::warn!(
                        "received no status for file_id {}, treating as PARSING",
                        ctx.file_id
                    );
                } else {
                    tracing::warn!(
                        "unknown file status {:?} for file_id {}, treating as PARSING",
                        raw,
                        ctx.file_id
                    );
                }
                PollOutcome::InProgress
            }
        }
    }

    /// Classify a decoded response using the status it carries.
    pub fn resolve_response(&self, ctx: &ProcessContext, response: &StatusResponse) -> PollOutcome {
        self.resolve(response.status(), ctx, Some(response))
    }
}

fn failure(ctx: &ProcessContext, body: Option<&StatusResponse>) -> PollOutcome {
    let (code, message) = match body {
        Some(b) => (
            b.code.as_deref().unwrap_or(UNKNOWN),
            b.message.as_deref().unwrap_or(UNKNOWN),
        ),
        None => (UNKNOWN, "no response body"),
    };

    tracing::error!(
        "file parsing failed, file_id {}, error_code {}, error_message {}",
        ctx.file_id,
        code,
        message
    );

    PollOutcome::Failure {
        message: format!(
            "File parsing failed - FileId: {}, ErrorCode: {}, ErrorMessage: {}",
            ctx.file_id, code, message
        ),
    }
}
