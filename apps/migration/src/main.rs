//! Migration CLI tool: `migration up`, `migration down`, `migration status`.

use sea_orm_migration::prelude::*;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,sqlx=warn")),
        )
        .init();

    // Reads DATABASE_URL, same as the API server
    cli::run_cli(migration::Migrator).await;
}
