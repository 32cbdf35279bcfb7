use serde::Serialize;

use super::jobs::JobId;

/// Destination the surrounding view should move to after an outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "to", content = "job_id", rename_all = "snake_case")]
pub enum Navigation {
    Home,
    Login,
    Jobs,
    JobDetails(JobId),
    Apply(JobId),
    MyJobs,
    PostJob,
    MyApplications,
}

impl Navigation {
    pub fn path(&self) -> String {
        match self {
            Navigation::Home => "/".to_string(),
            Navigation::Login => "/login".to_string(),
            Navigation::Jobs => "/job/getall".to_string(),
            Navigation::JobDetails(id) => format!("/job/{id}"),
            Navigation::Apply(id) => format!("/application/{id}"),
            Navigation::MyJobs => "/job/me".to_string(),
            Navigation::PostJob => "/job/post".to_string(),
            Navigation::MyApplications => "/applications/me".to_string(),
        }
    }
}
