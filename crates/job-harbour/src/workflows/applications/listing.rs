use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde::Serialize;
use tracing::{debug, info, warn};

use super::domain::{Application, ApplicationId};
use super::gateway::ApplicationGateway;
use crate::workflows::access::{
    AccessDecision, Action, AuthorizationGate, Role, SessionContext,
};
use crate::workflows::collaborator::{Acknowledgement, Operation};
use crate::workflows::error::WorkflowError;
use crate::workflows::inflight::InFlight;
use crate::workflows::navigation::Navigation;
use crate::workflows::view::{ListView, LoadState};

pub const EMPTY_APPLICATIONS: &str = "No Applications Found";

/// One application as rendered in the list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApplicationCard {
    pub application: Application,
    pub job_title: String,
    pub can_delete: bool,
}

/// Resume currently shown in the preview overlay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResumePreview {
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApplicationListView {
    pub title: &'static str,
    pub body: ListView<ApplicationCard>,
    /// Set when the list loaded empty.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preview: Option<ResumePreview>,
}

#[derive(Debug, Default)]
struct ListState {
    applications: Vec<Application>,
    load: LoadState,
    preview: Option<ResumePreview>,
}

/// Role-scoped application list: employers see applicants, job seekers see their own.
pub struct ApplicationListController<G> {
    session: SessionContext,
    role: Role,
    gateway: Arc<G>,
    state: Mutex<ListState>,
    deleting: InFlight<ApplicationId>,
}

impl<G> ApplicationListController<G>
where
    G: ApplicationGateway + 'static,
{
    pub fn open(session: SessionContext, gateway: Arc<G>) -> Result<Self, WorkflowError> {
        let Some(role) = session.role() else {
            // Signed out, or signed in before the user record arrived.
            let action = Action::ViewOwnApplications;
            let decision = match AuthorizationGate::decide(&session, action) {
                AccessDecision::Allow => AccessDecision::RedirectToHome,
                decision => decision,
            };
            debug!(%action, ?decision, "access denied");
            return Err(WorkflowError::AccessDenied { action, decision });
        };

        AuthorizationGate::require(&session, Action::applications_for(role))?;
        Ok(Self {
            session,
            role,
            gateway,
            state: Mutex::new(ListState::default()),
            deleting: InFlight::default(),
        })
    }

    fn state(&self) -> MutexGuard<'_, ListState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub async fn load(&self) -> Result<Vec<Application>, WorkflowError> {
        self.state().load = LoadState::Loading;

        match self.gateway.fetch_applications(self.role).await {
            Ok(applications) => {
                let mut state = self.state();
                state.applications = applications.clone();
                state.load = LoadState::Loaded;
                info!(role = %self.role, count = applications.len(), "loaded applications");
                Ok(applications)
            }
            Err(source) => {
                warn!(role = %self.role, error = %source, "failed to fetch applications");
                let mut state = self.state();
                state.applications.clear();
                state.load = LoadState::Failed(source.user_message(Operation::FetchApplications));
                Err(WorkflowError::collaborator(Operation::FetchApplications, source))
            }
        }
    }

    pub fn applications(&self) -> Vec<Application> {
        self.state().applications.clone()
    }

    pub fn view(&self) -> ApplicationListView {
        let can_delete = AuthorizationGate::allow(&self.session, Action::DeleteApplication);
        let (title, browse_jobs) = match self.role {
            Role::Employer => ("Applications From Job Seekers", None),
            Role::JobSeeker => ("My Applications", Some(Navigation::Jobs)),
        };

        let state = self.state();
        let cards = state
            .applications
            .iter()
            .map(|application| ApplicationCard {
                job_title: application.job_title().to_string(),
                application: application.clone(),
                can_delete,
            })
            .collect();

        let body = ListView::from_rows(&state.load, cards, browse_jobs);
        ApplicationListView {
            title,
            notice: matches!(body, ListView::Empty { .. }).then_some(EMPTY_APPLICATIONS),
            body,
            preview: state.preview.clone(),
        }
    }

    /// Withdraw one of the seeker's applications. A failure leaves the list untouched.
    pub async fn delete(&self, id: &ApplicationId) -> Result<Acknowledgement, WorkflowError> {
        AuthorizationGate::require(&self.session, Action::DeleteApplication)?;
        let _guard = self
            .deleting
            .try_begin(id.clone())
            .ok_or(WorkflowError::InFlight(Operation::DeleteApplication))?;

        if !self.state().applications.iter().any(|app| &app.id == id) {
            return Err(WorkflowError::UnknownApplication(id.clone()));
        }

        match self.gateway.delete_application(id).await {
            Ok(ack) => {
                self.state().applications.retain(|app| &app.id != id);
                info!(application_id = %id, "application deleted");
                Ok(ack)
            }
            Err(source) => {
                warn!(application_id = %id, error = %source, "application delete failed");
                Err(WorkflowError::collaborator(
                    Operation::DeleteApplication,
                    source,
                ))
            }
        }
    }

    pub fn is_deleting(&self, id: &ApplicationId) -> bool {
        self.deleting.contains(id)
    }

    pub fn open_resume_preview(&self, url: impl Into<String>) {
        self.state().preview = Some(ResumePreview { url: url.into() });
    }

    pub fn close_preview(&self) {
        self.state().preview = None;
    }

    pub fn preview(&self) -> Option<ResumePreview> {
        self.state().preview.clone()
    }
}
