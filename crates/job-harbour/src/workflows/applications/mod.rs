//! Applications: the seeker's submission form and the role-scoped application list.

pub mod domain;
pub mod gateway;
pub mod listing;
pub mod submission;

pub use domain::{
    Application, ApplicationDraft, ApplicationField, ApplicationId, ApplicationSubmission,
    ResumeFile, ResumeRef, APPLICATION_SCHEMA, JOB_TITLE_FALLBACK, RESUME_FIELD,
};
pub use gateway::ApplicationGateway;
pub use listing::{
    ApplicationCard, ApplicationListController, ApplicationListView, ResumePreview,
    EMPTY_APPLICATIONS,
};
pub use submission::{ApplicationSubmissionController, SubmissionReceipt};
