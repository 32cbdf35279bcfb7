use super::access::{AccessDecision, Action};
use super::applications::ApplicationId;
use super::collaborator::{CollaboratorError, Operation};
use super::jobs::JobId;
use super::navigation::Navigation;
use super::validation::ErrorMap;

/// Error raised by the job and application workflows.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum WorkflowError {
    /// Local field validation failed; nothing was sent.
    #[error("{message}")]
    Validation {
        message: &'static str,
        errors: ErrorMap,
    },
    #[error("{action} denied ({decision:?})")]
    AccessDenied {
        action: Action,
        decision: AccessDecision,
    },
    #[error("{operation} failed: {source}")]
    Collaborator {
        operation: Operation,
        #[source]
        source: CollaboratorError,
    },
    #[error("{0} already in progress")]
    InFlight(Operation),
    #[error("job {0} is not in the current list")]
    UnknownJob(JobId),
    #[error("job {0} is not in edit mode")]
    NotEditing(JobId),
    #[error("job {0} has edits in progress")]
    EditInProgress(JobId),
    #[error("application {0} is not in the current list")]
    UnknownApplication(ApplicationId),
}

impl WorkflowError {
    pub(crate) fn collaborator(operation: Operation, source: CollaboratorError) -> Self {
        Self::Collaborator { operation, source }
    }

    /// Text for the notification surface.
    pub fn user_message(&self) -> String {
        match self {
            WorkflowError::Validation { message, .. } => (*message).to_string(),
            WorkflowError::Collaborator { operation, source } => source.user_message(*operation),
            WorkflowError::InFlight(_) => "Please wait for the current request to finish".to_string(),
            WorkflowError::EditInProgress(_) => {
                "Save or cancel your edits before changing this job".to_string()
            }
            WorkflowError::AccessDenied { .. }
            | WorkflowError::UnknownJob(_)
            | WorkflowError::NotEditing(_)
            | WorkflowError::UnknownApplication(_) => self.to_string(),
        }
    }

    /// Field errors for validation failures.
    pub fn field_errors(&self) -> Option<&ErrorMap> {
        match self {
            WorkflowError::Validation { errors, .. } => Some(errors),
            _ => None,
        }
    }

    pub fn redirect(&self) -> Option<Navigation> {
        match self {
            WorkflowError::AccessDenied { decision, .. } => decision.redirect(),
            _ => None,
        }
    }
}
