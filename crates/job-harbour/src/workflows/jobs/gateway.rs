use async_trait::async_trait;

use super::domain::{Job, JobId, NewJob, PostJobReceipt};
use crate::workflows::collaborator::{Acknowledgement, CollaboratorError};

/// Network boundary for job postings, scoped to the signed-in session.
#[async_trait]
pub trait JobGateway: Send + Sync {
    async fn fetch_all_jobs(&self) -> Result<Vec<Job>, CollaboratorError>;

    async fn fetch_job(&self, id: &JobId) -> Result<Job, CollaboratorError>;

    /// Jobs owned by the current employer, in server order.
    async fn fetch_my_jobs(&self) -> Result<Vec<Job>, CollaboratorError>;

    async fn post_job(&self, payload: &NewJob) -> Result<PostJobReceipt, CollaboratorError>;

    /// Full-record replace; sending the same record twice is harmless.
    async fn update_job(&self, id: &JobId, job: &Job)
        -> Result<Acknowledgement, CollaboratorError>;

    async fn delete_job(&self, id: &JobId) -> Result<Acknowledgement, CollaboratorError>;
}
