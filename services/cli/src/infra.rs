use async_trait::async_trait;
use chrono::Utc;
use job_harbour::error::AppError;
use job_harbour::workflows::applications::{
    Application, ApplicationGateway, ApplicationId, ApplicationSubmission, ResumeFile, ResumeRef,
};
use job_harbour::workflows::jobs::{Job, JobGateway, JobId, NewJob, PostJobReceipt};
use job_harbour::workflows::{Acknowledgement, CollaboratorError, Role};
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Read a resume from disk, typing it by extension.
pub(crate) fn load_resume(path: &Path) -> Result<ResumeFile, AppError> {
    let content = std::fs::read(path)?;
    let mime_type = mime_guess::from_path(path)
        .first_or_octet_stream()
        .essence_str()
        .to_string();
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    Ok(ResumeFile::new(file_name, mime_type, content))
}

#[derive(Default)]
struct BoardStore {
    jobs: Vec<Job>,
    applications: Vec<Application>,
    next_id: u32,
}

impl BoardStore {
    fn next_id(&mut self, prefix: &str) -> String {
        self.next_id += 1;
        format!("{prefix}-{:04}", self.next_id)
    }
}

/// Job and application collaborators backed by one shared in-memory store.
#[derive(Default, Clone)]
pub(crate) struct InMemoryBoard {
    store: Arc<Mutex<BoardStore>>,
}

impl InMemoryBoard {
    fn store(&self) -> MutexGuard<'_, BoardStore> {
        self.store.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl JobGateway for InMemoryBoard {
    async fn fetch_all_jobs(&self) -> Result<Vec<Job>, CollaboratorError> {
        Ok(self
            .store()
            .jobs
            .iter()
            .filter(|job| !job.expired)
            .cloned()
            .collect())
    }

    async fn fetch_job(&self, id: &JobId) -> Result<Job, CollaboratorError> {
        self.store()
            .jobs
            .iter()
            .find(|job| &job.id == id)
            .cloned()
            .ok_or_else(|| CollaboratorError::rejected("Job not found."))
    }

    async fn fetch_my_jobs(&self) -> Result<Vec<Job>, CollaboratorError> {
        Ok(self.store().jobs.clone())
    }

    async fn post_job(&self, job: &NewJob) -> Result<PostJobReceipt, CollaboratorError> {
        let mut store = self.store();
        let posted = Job {
            id: JobId(store.next_id("job")),
            title: job.title.clone(),
            description: job.description.clone(),
            category: job.category,
            country: job.country.clone(),
            city: job.city.clone(),
            location: job.location,
            fixed_salary: job.fixed_salary,
            expired: false,
            posted_on: Utc::now(),
        };
        store.jobs.push(posted.clone());
        Ok(PostJobReceipt {
            success: true,
            message: "Job posted successfully!".to_string(),
            job: Some(posted),
        })
    }

    async fn update_job(&self, id: &JobId, job: &Job) -> Result<Acknowledgement, CollaboratorError> {
        let mut store = self.store();
        let stored = store
            .jobs
            .iter_mut()
            .find(|stored| &stored.id == id)
            .ok_or_else(|| CollaboratorError::rejected("Job not found!"))?;
        *stored = job.clone();
        Ok(Acknowledgement::new("Job Updated!"))
    }

    async fn delete_job(&self, id: &JobId) -> Result<Acknowledgement, CollaboratorError> {
        let mut store = self.store();
        let before = store.jobs.len();
        store.jobs.retain(|job| &job.id != id);
        if store.jobs.len() == before {
            return Err(CollaboratorError::rejected("Job not found!"));
        }
        store.applications.retain(|application| &application.job_id != id);
        Ok(Acknowledgement::new("Job Deleted!"))
    }
}

#[async_trait]
impl ApplicationGateway for InMemoryBoard {
    async fn submit_application(
        &self,
        submission: &ApplicationSubmission,
    ) -> Result<Acknowledgement, CollaboratorError> {
        let mut store = self.store();
        let job_title = store
            .jobs
            .iter()
            .find(|job| job.id == submission.job_id && !job.expired)
            .map(|job| job.title.clone())
            .ok_or_else(|| CollaboratorError::rejected("Job not found!"))?;
        let id = ApplicationId(store.next_id("app"));
        let url = format!("memory://resumes/{id}/{}", submission.resume.file_name);
        store.applications.push(Application {
            id,
            name: submission.name.clone(),
            email: submission.email.clone(),
            phone: submission.phone.clone(),
            address: submission.address.clone(),
            cover_letter: submission.cover_letter.clone(),
            resume: ResumeRef {
                url,
                mime_type: submission.resume.mime_type.clone(),
                size: submission.resume.size,
            },
            job_id: submission.job_id.clone(),
            job_title: Some(job_title),
        });
        Ok(Acknowledgement::new("Application Submitted!"))
    }

    async fn fetch_applications(&self, _role: Role) -> Result<Vec<Application>, CollaboratorError> {
        Ok(self.store().applications.clone())
    }

    async fn delete_application(
        &self,
        id: &ApplicationId,
    ) -> Result<Acknowledgement, CollaboratorError> {
        let mut store = self.store();
        let before = store.applications.len();
        store.applications.retain(|application| &application.id != id);
        if store.applications.len() == before {
            return Err(CollaboratorError::rejected("Application not found!"));
        }
        Ok(Acknowledgement::new("Application Deleted!"))
    }
}
