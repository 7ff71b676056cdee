use axum::Router;

pub mod health;
pub mod items;

/// All service routes, mounted at the root. State is already applied.
pub fn routes(state: &crate::state::AppState) -> Router {
    Router::new()
        .merge(items::router(state))
        .merge(health::ready_router(state.clone()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Config, Environment};
    use crate::openapi::ApiDoc;
    use crate::state::AppState;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use axum_helpers::server::{create_router, health_router};
    use core_config::server::ServerConfig;
    use database::postgres::PostgresConfig;
    use http_body_util::BodyExt;
    use sea_orm::{DatabaseBackend, DatabaseConnection, DbErr, MockDatabase};
    use serde_json::{Value, json};
    use std::collections::BTreeMap;
    use tower::ServiceExt;

    fn state(db: DatabaseConnection) -> AppState {
        AppState {
            config: Config {
                app: core_config::app_info!(),
                database: PostgresConfig::new("postgresql://mock/items"),
                server: ServerConfig::default(),
                environment: Environment::Development,
            },
            db,
        }
    }

    fn app(db: DatabaseConnection) -> Router {
        let state = state(db);
        create_router::<ApiDoc>(routes(&state)).merge(health_router(state.config.app))
    }

    async fn get(app: Router, uri: &str) -> (StatusCode, Value) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_list_served_at_root() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![domain_items::entity::Model {
                id: 1,
                name: "widget".to_string(),
                value: 10,
            }]])
            .into_connection();

        let (status, body) = get(app(db), "/").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!([{"id": 1, "name": "widget", "value": 10}]));
    }

    #[tokio::test]
    async fn test_ready_when_database_answers() {
        let row: BTreeMap<String, sea_orm::Value> =
            BTreeMap::from([("?column?".to_string(), 1i32.into())]);
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![row]])
            .into_connection();

        let (status, body) = get(app(db), "/ready").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"status": "ready", "database": "connected"}));
    }

    #[tokio::test]
    async fn test_not_ready_when_database_fails() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_errors([DbErr::Custom("connection refused".to_string())])
            .into_connection();

        let (status, body) = get(app(db), "/ready").await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["database"], "disconnected");
    }

    #[tokio::test]
    async fn test_health_reports_binary() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();

        let (status, body) = get(app(db), "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["name"], "items_api");
    }

    #[tokio::test]
    async fn test_openapi_lists_item_routes() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();

        let (status, body) = get(app(db), "/api-docs/openapi.json").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["paths"]["/items/{item_id}"].is_object());
        assert!(body["paths"]["/ready"].is_object());
    }
}
