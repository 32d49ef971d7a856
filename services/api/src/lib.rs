mod cli;
mod commands;
mod infra;
mod reports;
mod routes;
mod server;

use onboarding_ai::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
