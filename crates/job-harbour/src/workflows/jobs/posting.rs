use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::{debug, info, warn};

use super::domain::{Job, JobField, JobPostDraft, JOB_SCHEMA};
use super::gateway::JobGateway;
use crate::workflows::access::{Action, AuthorizationGate, SessionContext};
use crate::workflows::collaborator::{CollaboratorError, Operation};
use crate::workflows::error::WorkflowError;
use crate::workflows::inflight::InFlight;
use crate::workflows::navigation::Navigation;
use crate::workflows::validation::{self, ErrorMap, FieldErrorKind};

/// Shown when the collaborator declines a post without saying why.
const POST_DECLINED: &str = "Failed to post job";

/// Confirmation handed back after a job is posted.
#[derive(Debug, Clone, PartialEq)]
pub struct PostedJob {
    pub message: String,
    pub job: Option<Job>,
    pub navigate_to: Navigation,
}

/// Employer-side controller for the "post a new job" form.
pub struct JobPostingController<G> {
    gateway: Arc<G>,
    draft: Mutex<JobPostDraft>,
    submitting: InFlight<()>,
}

fn aggregate_message(errors: &ErrorMap) -> &'static str {
    let missing = errors
        .iter()
        .any(|(_, error)| error.kind == FieldErrorKind::Required);
    if missing {
        "Please fill in all required fields"
    } else if errors.contains(JobField::FixedSalary.name()) {
        "Please enter a valid salary amount"
    } else {
        "Please fix the highlighted fields"
    }
}

impl<G> JobPostingController<G>
where
    G: JobGateway + 'static,
{
    pub fn open(session: &SessionContext, gateway: Arc<G>) -> Result<Self, WorkflowError> {
        AuthorizationGate::require(session, Action::ManageJob)?;
        Ok(Self {
            gateway,
            draft: Mutex::new(JobPostDraft::default()),
            submitting: InFlight::default(),
        })
    }

    fn draft_mut(&self) -> MutexGuard<'_, JobPostDraft> {
        self.draft.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn set_field(&self, field: JobField, value: impl Into<String>) {
        self.draft_mut().set(field, value.into());
    }

    pub fn draft(&self) -> JobPostDraft {
        self.draft_mut().clone()
    }

    pub fn is_submitting(&self) -> bool {
        !self.submitting.is_idle()
    }

    pub async fn submit(&self) -> Result<PostedJob, WorkflowError> {
        let _guard = self
            .submitting
            .try_begin(())
            .ok_or(WorkflowError::InFlight(Operation::PostJob))?;

        let payload = {
            let draft = self.draft_mut();
            let errors = validation::validate(&*draft, &JOB_SCHEMA);
            match draft.to_new_job() {
                Some(payload) if errors.is_empty() => payload,
                _ => {
                    debug!(invalid = errors.len(), "job post failed validation");
                    return Err(WorkflowError::Validation {
                        message: aggregate_message(&errors),
                        errors,
                    });
                }
            }
        };

        let receipt = self.gateway.post_job(&payload).await.map_err(|source| {
            warn!(error = %source, "job post failed");
            WorkflowError::collaborator(Operation::PostJob, source)
        })?;

        if !receipt.success {
            warn!(message = %receipt.message, "job post rejected");
            let message = if receipt.message.trim().is_empty() {
                POST_DECLINED.to_string()
            } else {
                receipt.message
            };
            return Err(WorkflowError::collaborator(
                Operation::PostJob,
                CollaboratorError::rejected(message),
            ));
        }

        *self.draft_mut() = JobPostDraft::default();
        info!(title = %payload.title, "job posted");
        Ok(PostedJob {
            message: receipt.message,
            job: receipt.job,
            navigate_to: Navigation::MyJobs,
        })
    }
}
