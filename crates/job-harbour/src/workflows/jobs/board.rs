use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde::Serialize;
use tracing::warn;

use super::domain::{Job, JobId};
use super::gateway::JobGateway;
use crate::workflows::access::{Action, AuthorizationGate, SessionContext};
use crate::workflows::collaborator::Operation;
use crate::workflows::error::WorkflowError;
use crate::workflows::navigation::Navigation;
use crate::workflows::view::{ListView, LoadState};

/// A single posting as shown on its detail page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JobDetailsView {
    pub job: Job,
    pub status: &'static str,
    pub can_apply: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub apply: Option<Navigation>,
}

#[derive(Debug, Default)]
struct BoardState {
    jobs: Vec<Job>,
    load: LoadState,
}

/// Read-only browsing of every posting, open to any signed-in user.
pub struct JobBoardController<G> {
    session: SessionContext,
    gateway: Arc<G>,
    state: Mutex<BoardState>,
}

impl<G> JobBoardController<G>
where
    G: JobGateway + 'static,
{
    pub fn open(session: SessionContext, gateway: Arc<G>) -> Result<Self, WorkflowError> {
        AuthorizationGate::require(&session, Action::ViewJobs)?;
        Ok(Self {
            session,
            gateway,
            state: Mutex::new(BoardState::default()),
        })
    }

    fn state(&self) -> MutexGuard<'_, BoardState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub async fn load_all(&self) -> Result<Vec<Job>, WorkflowError> {
        self.state().load = LoadState::Loading;

        match self.gateway.fetch_all_jobs().await {
            Ok(jobs) => {
                let mut state = self.state();
                state.jobs = jobs.clone();
                state.load = LoadState::Loaded;
                Ok(jobs)
            }
            Err(source) => {
                warn!(error = %source, "failed to fetch job board");
                let mut state = self.state();
                state.jobs.clear();
                state.load = LoadState::Failed(source.user_message(Operation::FetchJobs));
                Err(WorkflowError::collaborator(Operation::FetchJobs, source))
            }
        }
    }

    pub fn jobs(&self) -> Vec<Job> {
        self.state().jobs.clone()
    }

    pub fn view(&self) -> ListView<Job> {
        let state = self.state();
        ListView::from_rows(&state.load, state.jobs.clone(), None)
    }

    /// Fetch one posting; only job seekers are offered the apply action.
    pub async fn details(&self, id: &JobId) -> Result<JobDetailsView, WorkflowError> {
        let job = self.gateway.fetch_job(id).await.map_err(|source| {
            warn!(job_id = %id, error = %source, "failed to fetch job details");
            WorkflowError::collaborator(Operation::FetchJob, source)
        })?;

        let can_apply = AuthorizationGate::allow(&self.session, Action::ApplyToJob);
        Ok(JobDetailsView {
            status: job.status().label(),
            apply: can_apply.then(|| Navigation::Apply(job.id.clone())),
            can_apply,
            job,
        })
    }
}
