//! HTTP surface over [`ContentService`].
//!
//! Every endpoint is a read. Successful responses are cacheable for an
//! hour since content only changes on redeploy.

pub mod error;
pub mod routes;

pub use error::{ApiError, ErrorBody};

use std::sync::Arc;

use axum::{routing::get, Router};
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::config::Config;
use crate::content::ContentService;
use crate::error::Result;

pub const CACHE_CONTROL_PUBLIC: &str = "public, max-age=3600";
pub const CACHE_CONTROL_NO_STORE: &str = "no-store";

/// State shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<ContentService>,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(config: Config, service: ContentService) -> Self {
        Self {
            service: Arc::new(service),
            config: Arc::new(config),
        }
    }
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(routes::health))
        .route("/sitemap.xml", get(routes::sitemap))
        .route("/api/{kind}", get(routes::list_items))
        .route("/api/{kind}/item", get(routes::get_item))
        .route("/api/{kind}/navigation", get(routes::get_navigation))
        .route("/api/{kind}/related", get(routes::get_related))
        .with_state(state)
}

/// Bind `config.bind` and serve until `shutdown` is cancelled.
pub async fn serve(config: Config, shutdown: CancellationToken) -> Result<()> {
    let service = ContentService::from_config(&config);
    let listener = TcpListener::bind(&config.bind).await?;
    info!(
        addr = %listener.local_addr()?,
        content_dir = %config.content_dir.display(),
        "serving content API"
    );

    let app = create_router(AppState::new(config, service));
    axum::serve(listener, app)
        .with_graceful_shutdown(async move { shutdown.cancelled().await })
        .await?;

    info!("server stopped");
    Ok(())
}
