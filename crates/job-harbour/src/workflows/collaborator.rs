use std::fmt;

use serde::{Deserialize, Serialize};

/// Collaborator calls made by the workflows, used to pick user-facing failure copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    FetchJobs,
    FetchJob,
    FetchMyJobs,
    PostJob,
    UpdateJob,
    ToggleExpiry,
    DeleteJob,
    SubmitApplication,
    FetchApplications,
    DeleteApplication,
}

impl Operation {
    pub const fn label(self) -> &'static str {
        match self {
            Operation::FetchJobs => "fetch_jobs",
            Operation::FetchJob => "fetch_job",
            Operation::FetchMyJobs => "fetch_my_jobs",
            Operation::PostJob => "post_job",
            Operation::UpdateJob => "update_job",
            Operation::ToggleExpiry => "toggle_expiry",
            Operation::DeleteJob => "delete_job",
            Operation::SubmitApplication => "submit_application",
            Operation::FetchApplications => "fetch_applications",
            Operation::DeleteApplication => "delete_application",
        }
    }

    /// Shown when the collaborator rejects the call without a usable message.
    pub const fn failure_message(self) -> &'static str {
        match self {
            Operation::FetchJobs | Operation::FetchMyJobs => "Failed to fetch jobs",
            Operation::FetchJob => "Failed to fetch job details",
            Operation::PostJob => "Error posting job",
            Operation::UpdateJob => "Failed to update job",
            Operation::ToggleExpiry => "Failed to update job status",
            Operation::DeleteJob => "Failed to delete job",
            Operation::SubmitApplication => "Failed to submit application",
            Operation::FetchApplications => "Failed to fetch applications",
            Operation::DeleteApplication => "Failed to delete application",
        }
    }

    pub const fn unreachable_message(self) -> &'static str {
        match self {
            Operation::PostJob => "No response from server. Please check your connection.",
            _ => "No response from server. Please try again later.",
        }
    }

    pub const fn connection_message(self) -> &'static str {
        match self {
            Operation::PostJob => {
                "Cannot connect to server. Please check if the backend server is running."
            }
            operation => operation.unreachable_message(),
        }
    }

    pub const fn setup_message(self) -> &'static str {
        match self {
            Operation::SubmitApplication => "Error submitting application. Please try again.",
            _ => "Error setting up the request",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// How a collaborator call failed. The core assumes nothing else about the transport.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CollaboratorError {
    /// The collaborator answered with an error, possibly carrying a message.
    #[error("request rejected: {}", .message.as_deref().unwrap_or("no message"))]
    Rejected { message: Option<String> },
    /// The request went out but nothing came back.
    #[error("no response received")]
    Unreachable,
    /// No connection to the collaborator could be opened.
    #[error("connection failed")]
    ConnectionFailed,
    /// The request could not be built or sent.
    #[error("request setup failed: {0}")]
    RequestSetup(String),
}

impl CollaboratorError {
    pub fn rejected(message: impl Into<String>) -> Self {
        Self::Rejected {
            message: Some(message.into()),
        }
    }

    /// Server message when present, otherwise the operation's generic copy.
    pub fn user_message(&self, operation: Operation) -> String {
        match self {
            CollaboratorError::Rejected {
                message: Some(message),
            } if !message.trim().is_empty() => message.clone(),
            CollaboratorError::Rejected { .. } => operation.failure_message().to_string(),
            CollaboratorError::Unreachable => operation.unreachable_message().to_string(),
            CollaboratorError::ConnectionFailed => operation.connection_message().to_string(),
            CollaboratorError::RequestSetup(_) => operation.setup_message().to_string(),
        }
    }
}

/// Plain `{ message }` reply returned by mutating collaborator calls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Acknowledgement {
    pub message: String,
}

impl Acknowledgement {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejected_message_is_shown_verbatim() {
        let error = CollaboratorError::rejected("Job not found!");
        assert_eq!(error.user_message(Operation::DeleteJob), "Job not found!");
    }

    #[test]
    fn blank_or_missing_rejection_uses_operation_fallback() {
        let blank = CollaboratorError::rejected("  ");
        let missing = CollaboratorError::Rejected { message: None };
        assert_eq!(
            blank.user_message(Operation::UpdateJob),
            "Failed to update job"
        );
        assert_eq!(
            missing.user_message(Operation::ToggleExpiry),
            "Failed to update job status"
        );
    }

    #[test]
    fn unreachable_and_setup_failures_use_generic_copy() {
        assert_eq!(
            CollaboratorError::Unreachable.user_message(Operation::SubmitApplication),
            "No response from server. Please try again later."
        );
        assert_eq!(
            CollaboratorError::RequestSetup("bad boundary".to_string())
                .user_message(Operation::SubmitApplication),
            "Error submitting application. Please try again."
        );
        assert_eq!(
            CollaboratorError::ConnectionFailed.user_message(Operation::DeleteJob),
            "No response from server. Please try again later."
        );
    }

    #[test]
    fn post_job_separates_refused_connections_from_silence() {
        assert_eq!(
            CollaboratorError::ConnectionFailed.user_message(Operation::PostJob),
            "Cannot connect to server. Please check if the backend server is running."
        );
        assert_eq!(
            CollaboratorError::Unreachable.user_message(Operation::PostJob),
            "No response from server. Please check your connection."
        );
        assert_eq!(
            CollaboratorError::Rejected { message: None }.user_message(Operation::PostJob),
            "Error posting job"
        );
        assert_eq!(
            CollaboratorError::RequestSetup("form data".to_string())
                .user_message(Operation::PostJob),
            "Error setting up the request"
        );
    }
}
