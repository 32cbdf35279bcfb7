use async_trait::async_trait;

use super::domain::{Application, ApplicationId, ApplicationSubmission};
use crate::workflows::access::Role;
use crate::workflows::collaborator::{Acknowledgement, CollaboratorError};

/// Network boundary for applications, scoped to the signed-in session.
#[async_trait]
pub trait ApplicationGateway: Send + Sync {
    async fn submit_application(
        &self,
        submission: &ApplicationSubmission,
    ) -> Result<Acknowledgement, CollaboratorError>;

    /// Employers get applications to their jobs; job seekers get their own.
    async fn fetch_applications(&self, role: Role) -> Result<Vec<Application>, CollaboratorError>;

    async fn delete_application(
        &self,
        id: &ApplicationId,
    ) -> Result<Acknowledgement, CollaboratorError>;
}
