use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::{debug, info, warn};

use super::domain::{
    ApplicationDraft, ApplicationField, ApplicationSubmission, ResumeFile, APPLICATION_SCHEMA,
    RESUME_FIELD,
};
use super::gateway::ApplicationGateway;
use crate::workflows::access::{Action, AuthorizationGate, SessionContext};
use crate::workflows::collaborator::Operation;
use crate::workflows::error::WorkflowError;
use crate::workflows::inflight::InFlight;
use crate::workflows::jobs::JobId;
use crate::workflows::navigation::Navigation;
use crate::workflows::validation::{self, AttachmentError, AttachmentPolicy, ErrorMap};

const INVALID_APPLICATION: &str = "Please fill all required fields correctly";

/// Confirmation handed back once the collaborator accepts an application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionReceipt {
    pub message: String,
    pub navigate_to: Navigation,
}

/// Job seeker's application form for one posting.
pub struct ApplicationSubmissionController<G> {
    job_id: JobId,
    gateway: Arc<G>,
    policy: AttachmentPolicy,
    draft: Mutex<ApplicationDraft>,
    submitting: InFlight<()>,
}

impl<G> ApplicationSubmissionController<G>
where
    G: ApplicationGateway + 'static,
{
    pub fn open(
        session: &SessionContext,
        job_id: JobId,
        gateway: Arc<G>,
        policy: AttachmentPolicy,
    ) -> Result<Self, WorkflowError> {
        AuthorizationGate::require(session, Action::ApplyToJob)?;
        Ok(Self {
            job_id,
            gateway,
            policy,
            draft: Mutex::new(ApplicationDraft::default()),
            submitting: InFlight::default(),
        })
    }

    fn draft_mut(&self) -> MutexGuard<'_, ApplicationDraft> {
        self.draft.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn job_id(&self) -> &JobId {
        &self.job_id
    }

    pub fn draft(&self) -> ApplicationDraft {
        self.draft_mut().clone()
    }

    pub fn errors(&self) -> ErrorMap {
        self.draft_mut().errors.clone()
    }

    pub fn is_submitting(&self) -> bool {
        !self.submitting.is_idle()
    }

    /// Store the new value and clear that field's error. Nothing is re-validated here.
    pub fn set_field(&self, field: ApplicationField, value: impl Into<String>) {
        let mut draft = self.draft_mut();
        draft.set(field, value.into());
        draft.errors.remove(field.name());
    }

    /// Accept `file` as the resume if the policy allows it. A refused file leaves the current
    /// attachment in place; the failure is recorded against the resume field only when there
    /// is no attachment to fall back on.
    pub fn attach_file(&self, file: ResumeFile) -> Result<(), AttachmentError> {
        let mut draft = self.draft_mut();
        match self.policy.check(&file.mime_type, file.size) {
            Ok(()) => {
                debug!(file = %file.file_name, size = file.size, "resume attached");
                draft.resume = Some(file);
                draft.errors.remove(RESUME_FIELD);
                Ok(())
            }
            Err(error) => {
                debug!(file = %file.file_name, %error, "resume refused");
                if draft.resume.is_none() {
                    draft.errors.insert(RESUME_FIELD, error.to_field_error());
                }
                Err(error)
            }
        }
    }

    pub async fn submit(&self) -> Result<SubmissionReceipt, WorkflowError> {
        let _guard = self
            .submitting
            .try_begin(())
            .ok_or(WorkflowError::InFlight(Operation::SubmitApplication))?;

        let submission = {
            let mut draft = self.draft_mut();
            let mut errors = validation::validate(&*draft, &APPLICATION_SCHEMA);
            if let Some(resume) = &draft.resume {
                if let Err(error) = self.policy.check(&resume.mime_type, resume.size) {
                    errors.insert(RESUME_FIELD, error.to_field_error());
                }
            }

            let resume = match draft.resume.clone() {
                Some(resume) if errors.is_empty() => resume,
                _ => {
                    let fields: Vec<&str> = errors.fields().collect();
                    debug!(job_id = %self.job_id, ?fields, "application failed validation");
                    draft.errors = errors.clone();
                    return Err(WorkflowError::Validation {
                        message: INVALID_APPLICATION,
                        errors,
                    });
                }
            };

            draft.errors.clear();
            ApplicationSubmission {
                name: draft.name.clone(),
                email: draft.email.clone(),
                phone: draft.phone.clone(),
                address: draft.address.clone(),
                cover_letter: draft.cover_letter.clone(),
                resume,
                job_id: self.job_id.clone(),
            }
        };

        match self.gateway.submit_application(&submission).await {
            Ok(ack) => {
                *self.draft_mut() = ApplicationDraft::default();
                info!(job_id = %self.job_id, "application submitted");
                Ok(SubmissionReceipt {
                    message: ack.message,
                    navigate_to: Navigation::Jobs,
                })
            }
            Err(source) => {
                warn!(job_id = %self.job_id, error = %source, "application submission failed");
                Err(WorkflowError::collaborator(
                    Operation::SubmitApplication,
                    source,
                ))
            }
        }
    }
}
