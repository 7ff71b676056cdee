//! PostgreSQL connection management, schema bootstrapping and per-request sessions.

mod config;
mod connector;
mod health;
mod session;

pub use config::PostgresConfig;
pub use connector::{connect_from_config, connect_from_config_with_retry, run_migrations};
pub use health::check_health;
pub use session::ScopedSession;

pub use sea_orm::{ConnectOptions, DatabaseConnection, DbErr};
pub use sea_orm_migration::MigratorTrait;
