use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use tokio::sync::Notify;

use crate::workflows::access::{Role, SessionContext, User, UserId};
use crate::workflows::applications::{
    Application, ApplicationGateway, ApplicationId, ApplicationSubmission, ResumeFile, ResumeRef,
};
use crate::workflows::collaborator::{Acknowledgement, CollaboratorError, Operation};
use crate::workflows::jobs::{
    Job, JobCategory, JobGateway, JobId, NewJob, PostJobReceipt, WorkLocation,
};

pub(super) fn employer() -> SessionContext {
    SessionContext::signed_in(User {
        id: UserId("u-employer".to_string()),
        name: "Dana Employer".to_string(),
        email: "dana@harbour.test".to_string(),
        role: Role::Employer,
    })
}

pub(super) fn seeker() -> SessionContext {
    SessionContext::signed_in(User {
        id: UserId("u-seeker".to_string()),
        name: "Sam Seeker".to_string(),
        email: "sam@harbour.test".to_string(),
        role: Role::JobSeeker,
    })
}

pub(super) fn job_id(raw: &str) -> JobId {
    JobId(raw.to_string())
}

pub(super) fn job(id: &str, title: &str) -> Job {
    Job {
        id: job_id(id),
        title: title.to_string(),
        description: "Build and maintain the harbour booking tools.".to_string(),
        category: JobCategory::Development,
        country: "Norway".to_string(),
        city: "Bergen".to_string(),
        location: WorkLocation::Hybrid,
        fixed_salary: 72000.0,
        expired: false,
        posted_on: Utc
            .with_ymd_and_hms(2025, 3, 14, 9, 30, 0)
            .single()
            .expect("valid timestamp"),
    }
}

pub(super) fn application(id: &str, job: &str, job_title: Option<&str>) -> Application {
    Application {
        id: ApplicationId(id.to_string()),
        name: "Sam Seeker".to_string(),
        email: "sam@harbour.test".to_string(),
        phone: "5551234567".to_string(),
        address: "12 Quay Street".to_string(),
        cover_letter: "I have shipped booking systems before.".to_string(),
        resume: ResumeRef {
            url: format!("https://files.harbour.test/{id}.pdf"),
            mime_type: "application/pdf".to_string(),
            size: 48_000,
        },
        job_id: job_id(job),
        job_title: job_title.map(str::to_string),
    }
}

pub(super) fn resume(mime_type: &str, size: usize) -> ResumeFile {
    ResumeFile::new("resume.pdf", mime_type, vec![0; size])
}

/// One-shot pause inside the next collaborator call.
#[derive(Clone, Default)]
pub(super) struct Hold {
    pub(super) entered: Arc<Notify>,
    pub(super) release: Arc<Notify>,
}

impl Hold {
    async fn wait(&self) {
        self.entered.notify_one();
        self.release.notified().await;
    }
}

/// Call log, failure injection, and pausing shared by both fakes.
#[derive(Clone, Default)]
pub(super) struct Script {
    calls: Arc<Mutex<Vec<Operation>>>,
    failures: Arc<Mutex<HashMap<Operation, CollaboratorError>>>,
    hold: Arc<Mutex<Option<Hold>>>,
}

impl Script {
    async fn enter(&self, operation: Operation) -> Result<(), CollaboratorError> {
        self.calls
            .lock()
            .expect("call log mutex poisoned")
            .push(operation);
        let hold = self.hold.lock().expect("hold mutex poisoned").take();
        if let Some(hold) = hold {
            hold.wait().await;
        }
        match self
            .failures
            .lock()
            .expect("failure mutex poisoned")
            .get(&operation)
        {
            Some(error) => Err(error.clone()),
            None => Ok(()),
        }
    }

    pub(super) fn fail(&self, operation: Operation, error: CollaboratorError) {
        self.failures
            .lock()
            .expect("failure mutex poisoned")
            .insert(operation, error);
    }

    pub(super) fn recover(&self, operation: Operation) {
        self.failures
            .lock()
            .expect("failure mutex poisoned")
            .remove(&operation);
    }

    pub(super) fn hold_next(&self) -> Hold {
        let hold = Hold::default();
        *self.hold.lock().expect("hold mutex poisoned") = Some(hold.clone());
        hold
    }

    pub(super) fn calls(&self) -> Vec<Operation> {
        self.calls.lock().expect("call log mutex poisoned").clone()
    }

    pub(super) fn count(&self, operation: Operation) -> usize {
        self.calls().into_iter().filter(|op| *op == operation).count()
    }
}

#[derive(Clone, Default)]
pub(super) struct MemoryJobs {
    pub(super) script: Script,
    jobs: Arc<Mutex<Vec<Job>>>,
    posted: Arc<Mutex<Vec<NewJob>>>,
    updates: Arc<Mutex<Vec<Job>>>,
    reject_posts: Arc<Mutex<Option<String>>>,
}

impl MemoryJobs {
    pub(super) fn with_jobs(jobs: Vec<Job>) -> Arc<Self> {
        let gateway = Self::default();
        *gateway.jobs.lock().expect("jobs mutex poisoned") = jobs;
        Arc::new(gateway)
    }

    pub(super) fn posted(&self) -> Vec<NewJob> {
        self.posted.lock().expect("posted mutex poisoned").clone()
    }

    pub(super) fn updates(&self) -> Vec<Job> {
        self.updates.lock().expect("updates mutex poisoned").clone()
    }

    /// Answer post-job calls with `success = false` and `message`.
    pub(super) fn reject_posts_with(&self, message: &str) {
        *self.reject_posts.lock().expect("reject mutex poisoned") = Some(message.to_string());
    }
}

#[async_trait]
impl JobGateway for MemoryJobs {
    async fn fetch_all_jobs(&self) -> Result<Vec<Job>, CollaboratorError> {
        self.script.enter(Operation::FetchJobs).await?;
        Ok(self.jobs.lock().expect("jobs mutex poisoned").clone())
    }

    async fn fetch_job(&self, id: &JobId) -> Result<Job, CollaboratorError> {
        self.script.enter(Operation::FetchJob).await?;
        self.jobs
            .lock()
            .expect("jobs mutex poisoned")
            .iter()
            .find(|job| &job.id == id)
            .cloned()
            .ok_or_else(|| CollaboratorError::rejected("Job not found."))
    }

    async fn fetch_my_jobs(&self) -> Result<Vec<Job>, CollaboratorError> {
        self.script.enter(Operation::FetchMyJobs).await?;
        Ok(self.jobs.lock().expect("jobs mutex poisoned").clone())
    }

    async fn post_job(&self, job: &NewJob) -> Result<PostJobReceipt, CollaboratorError> {
        self.script.enter(Operation::PostJob).await?;
        if let Some(message) = self.reject_posts.lock().expect("reject mutex poisoned").clone() {
            return Ok(PostJobReceipt {
                success: false,
                message,
                job: None,
            });
        }
        self.posted
            .lock()
            .expect("posted mutex poisoned")
            .push(job.clone());
        Ok(PostJobReceipt {
            success: true,
            message: "Job posted successfully!".to_string(),
            job: None,
        })
    }

    async fn update_job(&self, id: &JobId, job: &Job) -> Result<Acknowledgement, CollaboratorError> {
        self.script.enter(Operation::UpdateJob).await?;
        self.updates
            .lock()
            .expect("updates mutex poisoned")
            .push(job.clone());
        let mut jobs = self.jobs.lock().expect("jobs mutex poisoned");
        if let Some(stored) = jobs.iter_mut().find(|stored| &stored.id == id) {
            *stored = job.clone();
        }
        Ok(Acknowledgement::new("Job Updated!"))
    }

    async fn delete_job(&self, id: &JobId) -> Result<Acknowledgement, CollaboratorError> {
        self.script.enter(Operation::DeleteJob).await?;
        self.jobs
            .lock()
            .expect("jobs mutex poisoned")
            .retain(|job| &job.id != id);
        Ok(Acknowledgement::new("Job Deleted!"))
    }
}

#[derive(Clone, Default)]
pub(super) struct MemoryApplications {
    pub(super) script: Script,
    applications: Arc<Mutex<Vec<Application>>>,
    submissions: Arc<Mutex<Vec<ApplicationSubmission>>>,
    requested_roles: Arc<Mutex<Vec<Role>>>,
}

impl MemoryApplications {
    pub(super) fn with_applications(applications: Vec<Application>) -> Arc<Self> {
        let gateway = Self::default();
        *gateway
            .applications
            .lock()
            .expect("applications mutex poisoned") = applications;
        Arc::new(gateway)
    }

    pub(super) fn submissions(&self) -> Vec<ApplicationSubmission> {
        self.submissions
            .lock()
            .expect("submissions mutex poisoned")
            .clone()
    }

    pub(super) fn requested_roles(&self) -> Vec<Role> {
        self.requested_roles
            .lock()
            .expect("roles mutex poisoned")
            .clone()
    }
}

#[async_trait]
impl ApplicationGateway for MemoryApplications {
    async fn submit_application(
        &self,
        submission: &ApplicationSubmission,
    ) -> Result<Acknowledgement, CollaboratorError> {
        self.script.enter(Operation::SubmitApplication).await?;
        self.submissions
            .lock()
            .expect("submissions mutex poisoned")
            .push(submission.clone());
        Ok(Acknowledgement::new("Application Submitted!"))
    }

    async fn fetch_applications(&self, role: Role) -> Result<Vec<Application>, CollaboratorError> {
        self.script.enter(Operation::FetchApplications).await?;
        self.requested_roles
            .lock()
            .expect("roles mutex poisoned")
            .push(role);
        Ok(self
            .applications
            .lock()
            .expect("applications mutex poisoned")
            .clone())
    }

    async fn delete_application(
        &self,
        id: &ApplicationId,
    ) -> Result<Acknowledgement, CollaboratorError> {
        self.script.enter(Operation::DeleteApplication).await?;
        self.applications
            .lock()
            .expect("applications mutex poisoned")
            .retain(|application| &application.id != id);
        Ok(Acknowledgement::new("Application Deleted!"))
    }
}
