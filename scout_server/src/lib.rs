#![deny(
    clippy::all,
    clippy::nursery,
    clippy::pedantic,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    clippy::correctness,
    clippy::suspicious,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(
    clippy::similar_names,
    clippy::missing_safety_doc,
    clippy::missing_panics_doc,
    clippy::missing_errors_doc
)]

//! HTTP front end: accepts a chat transcript and returns the extracted
//! search parameters.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use scout_config::Config;
use scout_extract::{ExtractorCache, ParameterExtractor};
use tracing::info;

mod error;
mod factory;
pub mod handler;
pub mod payload;

pub use error::{Error, Result};
pub use factory::build_extractor;
pub use payload::{ChatSessionPayload, ProcessedResponse, PromptSelection, ResponseMeta};

/// Environment variable that overrides the configured bind address.
pub const BIND_ENV: &str = "SCOUT_HTTP_BIND";

/// Shared state for all requests.
#[derive(Debug, Clone)]
pub struct AppState {
    config: Arc<Config>,
    cache: ExtractorCache,
}

impl AppState {
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            config: Arc::new(config),
            cache: ExtractorCache::new(),
        }
    }

    #[must_use]
    pub const fn cache(&self) -> &ExtractorCache {
        &self.cache
    }

    /// The cached extractor for a request credential (or the configured one).
    #[must_use]
    pub fn extractor_for(&self, request_key: Option<&str>) -> Arc<dyn ParameterExtractor> {
        let delegate = &self.config.delegate;
        let api_key = delegate.resolve_api_key(request_key);
        self.cache
            .get_or_insert_with(api_key, |key| build_extractor(delegate, key))
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handler::health_check))
        .route("/scout/process", post(handler::process_chat_session))
        .with_state(state)
}

/// Resolve the listen address: explicit override, then `SCOUT_HTTP_BIND`,
/// then the config file.
pub fn bind_address(config: &Config, bind_override: Option<&str>) -> Result<SocketAddr> {
    let bind = bind_override
        .map(str::to_string)
        .or_else(|| std::env::var(BIND_ENV).ok())
        .unwrap_or_else(|| config.server.bind.clone());
    Ok(bind.trim().parse()?)
}

pub async fn serve(config: Config, bind_override: Option<&str>) -> Result<()> {
    let addr = bind_address(&config, bind_override)?;
    let app = router(AppState::new(config));

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Scout HTTP server listening on http://{addr}");
    axum::serve(listener, app).await?;
    Ok(())
}
