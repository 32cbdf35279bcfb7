//! Session context and the role gate consulted before any workflow is opened.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::error::WorkflowError;
use super::navigation::Navigation;

/// Identifier wrapper for signed-in users.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub String);

/// The two kinds of account the board knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    #[serde(rename = "Job Seeker")]
    JobSeeker,
    Employer,
}

impl Role {
    pub const fn label(self) -> &'static str {
        match self {
            Role::JobSeeker => "Job Seeker",
            Role::Employer => "Employer",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// User record supplied by the session collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id")]
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub role: Role,
}

/// Authorization signal plus user record, handed to each controller when it is opened.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionContext {
    authorized: bool,
    user: Option<User>,
}

impl SessionContext {
    pub fn new(authorized: bool, user: Option<User>) -> Self {
        Self { authorized, user }
    }

    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn signed_in(user: User) -> Self {
        Self::new(true, Some(user))
    }

    pub fn is_authorized(&self) -> bool {
        self.authorized
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    /// Role of the signed-in user; `None` while signed out or before the user record arrives.
    pub fn role(&self) -> Option<Role> {
        if !self.authorized {
            return None;
        }
        self.user.as_ref().map(|user| user.role)
    }
}

/// Gated actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Action {
    ViewJobs,
    ApplyToJob,
    /// Post, edit, delete, and expire jobs.
    ManageJob,
    ViewOwnApplications,
    ViewApplicantsApplications,
    DeleteApplication,
}

impl Action {
    pub const ALL: [Action; 6] = [
        Action::ViewJobs,
        Action::ApplyToJob,
        Action::ManageJob,
        Action::ViewOwnApplications,
        Action::ViewApplicantsApplications,
        Action::DeleteApplication,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            Action::ViewJobs => "view-jobs",
            Action::ApplyToJob => "apply-to-job",
            Action::ManageJob => "manage-job",
            Action::ViewOwnApplications => "view-own-applications",
            Action::ViewApplicantsApplications => "view-applicants-applications",
            Action::DeleteApplication => "delete-application",
        }
    }

    const fn required_role(self) -> Option<Role> {
        match self {
            Action::ViewJobs => None,
            Action::ManageJob | Action::ViewApplicantsApplications => Some(Role::Employer),
            Action::ApplyToJob | Action::ViewOwnApplications | Action::DeleteApplication => {
                Some(Role::JobSeeker)
            }
        }
    }

    /// The application listing a role is entitled to.
    pub const fn applications_for(role: Role) -> Self {
        match role {
            Role::Employer => Action::ViewApplicantsApplications,
            Role::JobSeeker => Action::ViewOwnApplications,
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Gate outcome. Denials are always redirects, never a partially rendered view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessDecision {
    Allow,
    RedirectToLogin,
    RedirectToHome,
}

impl AccessDecision {
    pub const fn is_allowed(self) -> bool {
        matches!(self, AccessDecision::Allow)
    }

    pub fn redirect(self) -> Option<Navigation> {
        match self {
            AccessDecision::Allow => None,
            AccessDecision::RedirectToLogin => Some(Navigation::Login),
            AccessDecision::RedirectToHome => Some(Navigation::Home),
        }
    }
}

/// Pure role gate over `(session, action)`.
#[derive(Debug, Clone, Copy, Default)]
pub struct AuthorizationGate;

impl AuthorizationGate {
    pub fn decide(session: &SessionContext, action: Action) -> AccessDecision {
        if !session.is_authorized() {
            return match action {
                Action::ViewJobs => AccessDecision::RedirectToLogin,
                _ => AccessDecision::RedirectToHome,
            };
        }

        match action.required_role() {
            None => AccessDecision::Allow,
            Some(required) if session.role() == Some(required) => AccessDecision::Allow,
            Some(_) => AccessDecision::RedirectToHome,
        }
    }

    pub fn allow(session: &SessionContext, action: Action) -> bool {
        Self::decide(session, action).is_allowed()
    }

    /// `Ok` when allowed, otherwise the redirect wrapped as [`WorkflowError::AccessDenied`].
    pub fn require(session: &SessionContext, action: Action) -> Result<(), WorkflowError> {
        match Self::decide(session, action) {
            AccessDecision::Allow => Ok(()),
            decision => {
                tracing::debug!(%action, ?decision, "access denied");
                Err(WorkflowError::AccessDenied { action, decision })
            }
        }
    }
}
