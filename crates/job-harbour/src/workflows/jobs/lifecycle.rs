use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde::Serialize;
use tracing::{debug, info, warn};

use super::domain::{Job, JobField, JobFieldValue, JobId, JOB_SCHEMA};
use super::gateway::JobGateway;
use crate::workflows::access::{Action, AuthorizationGate, SessionContext};
use crate::workflows::collaborator::{Acknowledgement, Operation};
use crate::workflows::error::WorkflowError;
use crate::workflows::inflight::InFlight;
use crate::workflows::navigation::Navigation;
use crate::workflows::validation::{self, ErrorMap};
use crate::workflows::view::{ListView, LoadState};

/// The single row currently open for in-place editing.
///
/// Holds the row as it was when edit mode was enabled so cancelling can restore it. The
/// target id is the snapshot's id, so there is never more than one.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EditDraft {
    snapshot: Option<Job>,
}

impl EditDraft {
    pub fn target(&self) -> Option<&JobId> {
        self.snapshot.as_ref().map(|job| &job.id)
    }

    pub fn is_editing(&self, id: &JobId) -> bool {
        self.target() == Some(id)
    }
}

/// One row of the employer's job list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JobRow {
    pub job: Job,
    pub status: &'static str,
    pub editable: bool,
    pub busy: bool,
}

#[derive(Debug, Default)]
struct MyJobsState {
    jobs: Vec<Job>,
    edit: EditDraft,
    load: LoadState,
}

impl MyJobsState {
    fn find(&self, id: &JobId) -> Option<&Job> {
        self.jobs.iter().find(|job| &job.id == id)
    }

    fn find_mut(&mut self, id: &JobId) -> Option<&mut Job> {
        self.jobs.iter_mut().find(|job| &job.id == id)
    }

    /// Put the snapshot back in place and leave edit mode.
    fn revert_edit(&mut self) -> Option<JobId> {
        let snapshot = self.edit.snapshot.take()?;
        let id = snapshot.id.clone();
        if let Some(slot) = self.find_mut(&id) {
            *slot = snapshot;
        }
        Some(id)
    }
}

/// Employer-side controller over the jobs they posted.
pub struct JobLifecycleController<G> {
    gateway: Arc<G>,
    state: Mutex<MyJobsState>,
    in_flight: InFlight<JobId>,
}

impl<G> JobLifecycleController<G>
where
    G: JobGateway + 'static,
{
    /// Open the "my jobs" view. Only authorized employers get a controller.
    pub fn open(session: &SessionContext, gateway: Arc<G>) -> Result<Self, WorkflowError> {
        AuthorizationGate::require(session, Action::ManageJob)?;
        Ok(Self {
            gateway,
            state: Mutex::new(MyJobsState::default()),
            in_flight: InFlight::default(),
        })
    }

    fn state(&self) -> MutexGuard<'_, MyJobsState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Replace the collection with the employer's jobs. A failure empties the list.
    pub async fn load(&self) -> Result<Vec<Job>, WorkflowError> {
        self.state().load = LoadState::Loading;

        match self.gateway.fetch_my_jobs().await {
            Ok(jobs) => {
                let mut state = self.state();
                state.jobs = jobs.clone();
                state.edit = EditDraft::default();
                state.load = LoadState::Loaded;
                info!(count = jobs.len(), "loaded employer jobs");
                Ok(jobs)
            }
            Err(source) => {
                let message = source.user_message(Operation::FetchMyJobs);
                warn!(error = %source, "failed to fetch employer jobs");
                let mut state = self.state();
                state.jobs.clear();
                state.edit = EditDraft::default();
                state.load = LoadState::Failed(message);
                Err(WorkflowError::collaborator(Operation::FetchMyJobs, source))
            }
        }
    }

    pub fn jobs(&self) -> Vec<Job> {
        self.state().jobs.clone()
    }

    pub fn job(&self, id: &JobId) -> Option<Job> {
        self.state().find(id).cloned()
    }

    pub fn edit_target(&self) -> Option<JobId> {
        self.state().edit.target().cloned()
    }

    pub fn load_state(&self) -> LoadState {
        self.state().load.clone()
    }

    pub fn view(&self) -> ListView<JobRow> {
        let state = self.state();
        let rows = state
            .jobs
            .iter()
            .map(|job| JobRow {
                job: job.clone(),
                status: job.status().label(),
                editable: state.edit.is_editing(&job.id),
                busy: self.in_flight.contains(&job.id),
            })
            .collect();
        ListView::from_rows(&state.load, rows, Some(Navigation::PostJob))
    }

    /// Make `id` the editable row. Unsaved edits on a previously open row are reverted.
    ///
    /// Refused while either row has a request outstanding, so a pending save is never
    /// overwritten by its own snapshot.
    pub fn enable_edit(&self, id: &JobId) -> Result<(), WorkflowError> {
        let mut state = self.state();
        let snapshot = state
            .find(id)
            .cloned()
            .ok_or_else(|| WorkflowError::UnknownJob(id.clone()))?;

        if state.edit.is_editing(id) {
            return Ok(());
        }
        let busy = self.in_flight.contains(id)
            || state.edit.target().is_some_and(|open| self.in_flight.contains(open));
        if busy {
            return Err(WorkflowError::InFlight(Operation::UpdateJob));
        }
        if let Some(previous) = state.revert_edit() {
            debug!(job_id = %previous, "discarded unsaved edits when switching rows");
        }
        state.edit.snapshot = Some(snapshot);
        debug!(job_id = %id, "edit mode enabled");
        Ok(())
    }

    /// Leave edit mode, restoring the row to its pre-edit values. Returns the reverted row.
    ///
    /// Refused while the open row is being saved; edit mode closes when that save succeeds.
    pub fn disable_edit(&self) -> Result<Option<JobId>, WorkflowError> {
        let mut state = self.state();
        if state.edit.target().is_some_and(|open| self.in_flight.contains(open)) {
            return Err(WorkflowError::InFlight(Operation::UpdateJob));
        }
        let reverted = state.revert_edit();
        if let Some(id) = &reverted {
            debug!(job_id = %id, "edit mode cancelled");
        }
        Ok(reverted)
    }

    pub fn update_field(&self, id: &JobId, value: JobFieldValue) -> Result<(), WorkflowError> {
        if self.in_flight.contains(id) {
            return Err(WorkflowError::InFlight(Operation::UpdateJob));
        }

        let mut state = self.state();
        if !state.edit.is_editing(id) {
            return Err(WorkflowError::NotEditing(id.clone()));
        }
        let job = state
            .find_mut(id)
            .ok_or_else(|| WorkflowError::UnknownJob(id.clone()))?;
        job.apply(value);
        Ok(())
    }

    /// [`Self::update_field`] for raw input; unparseable values leave the row untouched.
    pub fn update_field_raw(
        &self,
        id: &JobId,
        field: JobField,
        raw: &str,
    ) -> Result<(), WorkflowError> {
        let value = JobFieldValue::parse(field, raw).map_err(|error| {
            let mut errors = ErrorMap::new();
            errors.insert(field.name(), error);
            WorkflowError::Validation {
                message: "Please fix the highlighted fields",
                errors,
            }
        })?;
        self.update_field(id, value)
    }

    /// Validate the edited row and send it. Edit mode closes only once the collaborator accepts.
    pub async fn commit_update(&self, id: &JobId) -> Result<Acknowledgement, WorkflowError> {
        let _guard = self
            .in_flight
            .try_begin(id.clone())
            .ok_or(WorkflowError::InFlight(Operation::UpdateJob))?;

        let record = {
            let state = self.state();
            if !state.edit.is_editing(id) {
                return Err(WorkflowError::NotEditing(id.clone()));
            }
            state
                .find(id)
                .cloned()
                .ok_or_else(|| WorkflowError::UnknownJob(id.clone()))?
        };

        let errors = validation::validate(&record, &JOB_SCHEMA);
        if !errors.is_empty() {
            let fields: Vec<&str> = errors.fields().collect();
            debug!(job_id = %id, ?fields, "job edit failed validation");
            return Err(WorkflowError::Validation {
                message: "Please fix the highlighted fields",
                errors,
            });
        }

        match self.gateway.update_job(id, &record).await {
            Ok(ack) => {
                let mut state = self.state();
                if state.edit.is_editing(id) {
                    state.edit = EditDraft::default();
                }
                info!(job_id = %id, "job update committed");
                Ok(ack)
            }
            Err(source) => {
                warn!(job_id = %id, error = %source, "job update failed");
                Err(WorkflowError::collaborator(Operation::UpdateJob, source))
            }
        }
    }

    /// Send the record with `expired` flipped; the local flag follows only on success.
    pub async fn toggle_expiry(&self, id: &JobId) -> Result<Job, WorkflowError> {
        let _guard = self
            .in_flight
            .try_begin(id.clone())
            .ok_or(WorkflowError::InFlight(Operation::ToggleExpiry))?;

        let flipped = {
            let state = self.state();
            if state.edit.is_editing(id) {
                return Err(WorkflowError::EditInProgress(id.clone()));
            }
            let mut job = state
                .find(id)
                .cloned()
                .ok_or_else(|| WorkflowError::UnknownJob(id.clone()))?;
            job.expired = !job.expired;
            job
        };

        match self.gateway.update_job(id, &flipped).await {
            Ok(_) => {
                if let Some(job) = self.state().find_mut(id) {
                    job.expired = flipped.expired;
                }
                info!(job_id = %id, expired = flipped.expired, "job expiry toggled");
                Ok(flipped)
            }
            Err(source) => {
                warn!(job_id = %id, error = %source, "job expiry toggle failed");
                Err(WorkflowError::collaborator(Operation::ToggleExpiry, source))
            }
        }
    }

    /// Delete remotely, then drop the row locally. A failure leaves the collection as it was.
    pub async fn delete_job(&self, id: &JobId) -> Result<Acknowledgement, WorkflowError> {
        let _guard = self
            .in_flight
            .try_begin(id.clone())
            .ok_or(WorkflowError::InFlight(Operation::DeleteJob))?;

        {
            let state = self.state();
            if state.edit.is_editing(id) {
                return Err(WorkflowError::EditInProgress(id.clone()));
            }
            if state.find(id).is_none() {
                return Err(WorkflowError::UnknownJob(id.clone()));
            }
        }

        match self.gateway.delete_job(id).await {
            Ok(ack) => {
                self.state().jobs.retain(|job| &job.id != id);
                info!(job_id = %id, "job deleted");
                Ok(ack)
            }
            Err(source) => {
                warn!(job_id = %id, error = %source, "job delete failed");
                Err(WorkflowError::collaborator(Operation::DeleteJob, source))
            }
        }
    }
}
