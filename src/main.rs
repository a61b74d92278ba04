use std::{net::SocketAddr, sync::Arc};

use anyhow::{bail, Context};
use http::HeaderValue;
use tokio::signal;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
};
use tracing::{error, info, warn};

use bol_api as api;
use api::config::{AppConfig, StorageBackend};
use api::store::{CatalogStore, InMemoryStore, SqlStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cfg = api::config::load_config()?;
    api::config::init_tracing(cfg.log_level(), cfg.log_json);

    let store = build_store(&cfg).await?;
    if cfg.seed_demo_data {
        api::store::seed_if_empty(store.as_ref())
            .await
            .context("failed to seed demonstration data")?;
    }

    let cors_layer = build_cors_layer(&cfg)?;
    let app = api::app_router(api::AppState::new(cfg.clone(), store))
        .layer(CompressionLayer::new())
        .layer(cors_layer);

    let addr: SocketAddr = format!("{}:{}", cfg.host, cfg.port)
        .parse()
        .with_context(|| format!("invalid listen address {}:{}", cfg.host, cfg.port))?;
    info!(
        storage = cfg.storage().as_str(),
        "bol-api listening on http://{}", addr
    );
    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("bol-api stopped");
    Ok(())
}

async fn build_store(cfg: &AppConfig) -> anyhow::Result<Arc<dyn CatalogStore>> {
    match cfg.storage() {
        StorageBackend::Memory => {
            info!("Using in-memory catalog store");
            Ok(Arc::new(InMemoryStore::new(cfg.bol_history_limit)))
        }
        StorageBackend::Database => {
            let db = api::db::establish_connection_from_app_config(cfg)
                .await
                .context("failed to connect to database")?;
            if cfg.auto_migrate {
                api::db::run_migrations(&db).await.map_err(|e| {
                    error!("Failed running migrations: {}", e);
                    e
                })?;
            }
            api::db::check_connection(&db).await?;
            Ok(Arc::new(SqlStore::new(Arc::new(db))))
        }
    }
}

fn build_cors_layer(cfg: &AppConfig) -> anyhow::Result<CorsLayer> {
    let configured_origins: Option<Vec<HeaderValue>> = cfg
        .cors_allowed_origins
        .as_ref()
        .map(|raw| {
            raw.split(',')
                .filter_map(|origin| {
                    let trimmed = origin.trim();
                    if trimmed.is_empty() {
                        None
                    } else {
                        HeaderValue::from_str(trimmed).ok()
                    }
                })
                .collect::<Vec<_>>()
        })
        .filter(|origins| !origins.is_empty());

    if let Some(origins) = configured_origins {
        Ok(CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(Any)
            .allow_headers(Any))
    } else if cfg.should_allow_permissive_cors() {
        info!("Using permissive CORS because explicit origins were not configured");
        Ok(CorsLayer::permissive())
    } else {
        error!("Missing CORS configuration detected; set APP__CORS_ALLOWED_ORIGINS or APP__CORS_ALLOW_ANY_ORIGIN=true");
        bail!("Missing CORS configuration: set APP__CORS_ALLOWED_ORIGINS or APP__CORS_ALLOW_ANY_ORIGIN=true")
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            warn!("failed to install Ctrl+C handler: {}", err);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};

        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(err) => {
                warn!("failed to install SIGTERM handler: {}", err);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    info!("Shutdown signal received");
}
