mod cli;
mod demo;
mod infra;

use job_harbour::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
