mod cli;
mod console;
mod infra;
mod routes;
mod server;

use interview_tracker::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
