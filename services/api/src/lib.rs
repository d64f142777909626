mod cli;
mod infra;
mod report;
mod routes;
mod server;

use lead_dork::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
