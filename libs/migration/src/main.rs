use migration::Migrator;
use sea_orm_migration::cli;

/// Operator CLI: `up`, `down`, `status`, `fresh`, `refresh`, `reset`.
/// Reads `DATABASE_URL` like the service does.
#[tokio::main]
async fn main() {
    cli::run_cli(Migrator).await;
}
