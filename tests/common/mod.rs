#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    body::{self, Body},
    http::{header, Method, Request},
    response::Response,
    Router,
};
use bol_api::{
    config::AppConfig,
    db,
    store::{self, CatalogStore, InMemoryStore, SqlStore},
    AppState,
};
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

/// Router plus the state behind it, driven in-process with `oneshot`.
pub struct TestApp {
    router: Router,
    pub state: AppState,
    _db_dir: Option<TempDir>,
}

fn test_config() -> AppConfig {
    AppConfig {
        environment: "test".to_string(),
        bol_history_limit: 5,
        ..AppConfig::default()
    }
}

impl TestApp {
    /// In-memory store holding the demonstration catalog.
    pub async fn new() -> Self {
        let store: Arc<dyn CatalogStore> = Arc::new(InMemoryStore::new(5));
        store::seed_if_empty(store.as_ref())
            .await
            .expect("seed memory store");
        Self::with_store(store, None)
    }

    /// In-memory store with no data.
    pub async fn empty() -> Self {
        Self::with_store(Arc::new(InMemoryStore::new(5)), None)
    }

    /// SQLite-backed store in a temporary directory, migrated and seeded.
    pub async fn with_sql_store() -> Self {
        let (store, dir) = sql_store().await;
        store::seed_if_empty(store.as_ref())
            .await
            .expect("seed sql store");
        Self::with_store(store, Some(dir))
    }

    fn with_store(store: Arc<dyn CatalogStore>, dir: Option<TempDir>) -> Self {
        let state = AppState::new(test_config(), store);
        Self {
            router: bol_api::app_router(state.clone()),
            state,
            _db_dir: dir,
        }
    }

    pub async fn request(&self, method: Method, path: &str, body: Option<Value>) -> Response {
        let builder = Request::builder().method(method).uri(path);
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("build request");

        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("router response")
    }

    /// Serves the router on an ephemeral local port and returns its base URL.
    pub async fn spawn(&self) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind test listener");
        self.serve(listener)
    }

    /// Serves the router on an already bound listener.
    pub fn serve(&self, listener: tokio::net::TcpListener) -> String {
        let addr = listener.local_addr().expect("listener address");
        let router = self.router.clone();
        tokio::spawn(async move {
            axum::serve(listener, router.into_make_service())
                .await
                .expect("serve test app");
        });
        format!("http://{addr}")
    }

    pub async fn request_raw(&self, method: Method, path: &str, body: &str) -> Response {
        let request = Request::builder()
            .method(method)
            .uri(path)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .expect("build request");

        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("router response")
    }
}

/// Migrated, empty SQLite store. Keep the directory alive as long as the store.
pub async fn sql_store() -> (Arc<dyn CatalogStore>, TempDir) {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("bol_test.db");
    let cfg = AppConfig {
        storage_backend: "database".to_string(),
        database_url: format!("sqlite://{}?mode=rwc", path.display()),
        db_max_connections: 1,
        db_min_connections: 1,
        ..test_config()
    };

    let pool = db::establish_connection_from_app_config(&cfg)
        .await
        .expect("connect sqlite");
    db::run_migrations(&pool).await.expect("run migrations");

    (Arc::new(SqlStore::new(Arc::new(pool))), dir)
}

pub async fn response_json(response: Response) -> Value {
    let bytes = body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("response body bytes");
    serde_json::from_slice(&bytes).expect("json response")
}

pub async fn response_text(response: Response) -> String {
    let bytes = body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("response body bytes");
    String::from_utf8(bytes.to_vec()).expect("utf-8 body")
}
