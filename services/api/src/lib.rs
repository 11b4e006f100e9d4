mod cli;
mod infra;
mod routes;
mod server;

use scrape_crm::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
