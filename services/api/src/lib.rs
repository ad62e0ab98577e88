mod cli;
mod commands;
mod infra;
mod routes;
mod server;

use td_careers::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
