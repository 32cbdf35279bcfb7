//! Job postings: browsing, posting, and the employer's edit/expire/delete lifecycle.

pub mod board;
pub mod domain;
pub mod gateway;
pub mod lifecycle;
pub mod posting;

pub use board::{JobBoardController, JobDetailsView};
pub use domain::{
    Job, JobCategory, JobField, JobFieldValue, JobId, JobPostDraft, JobStatus, NewJob,
    PostJobReceipt, WorkLocation, JOB_SCHEMA,
};
pub use gateway::JobGateway;
pub use lifecycle::{EditDraft, JobLifecycleController, JobRow};
pub use posting::{JobPostingController, PostedJob};
