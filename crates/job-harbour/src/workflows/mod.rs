pub mod access;
pub mod applications;
pub mod collaborator;
pub mod error;
mod inflight;
pub mod jobs;
pub mod navigation;
pub mod validation;
pub mod view;

#[cfg(test)]
mod tests;

pub use access::{AccessDecision, Action, AuthorizationGate, Role, SessionContext, User, UserId};
pub use collaborator::{Acknowledgement, CollaboratorError, Operation};
pub use error::WorkflowError;
pub use navigation::Navigation;
pub use view::{ListView, LoadState};
