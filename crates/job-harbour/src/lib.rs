//! Role-gated job and application lifecycle controllers for the Job Harbour board.

pub mod config;
pub mod error;
pub mod telemetry;
pub mod workflows;
