//! Shared application state.

/// Cloned into every handler that needs it; both fields are cheap to clone.
#[derive(Clone)]
pub struct AppState {
    pub config: crate::config::Config,
    /// PostgreSQL connection pool; sessions are taken from it per request
    pub db: database::postgres::DatabaseConnection,
}
