//! # HTTP Server
//!
//! Builds the router for both collections and serves it.

use std::sync::Arc;

use axum::{
    extract::{DefaultBodyLimit, Request},
    middleware, Router, ServiceExt,
};
use tokio::net::TcpListener;
use tower::Layer;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

use super::config::ServerConfig;
use super::observe::log_request;
use super::routes::{collection_routes, routes_handler};
use super::state::AppState;
use crate::observability::Logger;
use crate::storage::CollectionKind;

/// The router, wrapped so that `/users/` and `/users` dispatch alike
pub type App = NormalizePath<Router>;

/// HTTP server for the users and posts collections
pub struct HttpServer {
    config: ServerConfig,
    router: Router,
}

impl HttpServer {
    pub fn with_config(config: ServerConfig) -> Self {
        let state = Arc::new(AppState::new(&config));
        let router = Self::build_router(&config, state);
        Self { config, router }
    }

    fn build_router(config: &ServerConfig, state: Arc<AppState>) -> Router {
        let cors = if config.cors_origins.is_empty() {
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
        } else {
            let origins: Vec<_> = config
                .cors_origins
                .iter()
                .filter_map(|s| s.parse().ok())
                .collect();

            CorsLayer::new()
                .allow_origin(AllowOrigin::list(origins))
                .allow_methods(Any)
                .allow_headers(Any)
        };

        let mut router = Router::new();
        for kind in CollectionKind::ALL {
            router = router.route(&format!("/{}", kind.key()), collection_routes(kind));
        }

        router
            .fallback(routes_handler)
            .with_state(state)
            // Bodies are read in full; no size cap
            .layer(DefaultBodyLimit::disable())
            .layer(middleware::from_fn(log_request))
            .layer(cors)
    }

    pub fn socket_addr(&self) -> String {
        self.config.socket_addr()
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// The servable application (for testing and for `start`)
    pub fn app(self) -> App {
        NormalizePathLayer::trim_trailing_slash().layer(self.router)
    }

    /// Bind and serve until the process exits
    pub async fn start(self) -> Result<(), std::io::Error> {
        let addr = self.socket_addr();
        let listener = TcpListener::bind(&addr).await?;

        let users_path = self.config.users_path().display().to_string();
        let posts_path = self.config.posts_path().display().to_string();
        Logger::info(
            "SERVER_STARTED",
            &[
                ("addr", addr.as_str()),
                ("users_path", users_path.as_str()),
                ("posts_path", posts_path.as_str()),
            ],
        );

        let app = self.app();
        axum::serve(listener, ServiceExt::<Request>::into_make_service(app)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_with_custom_port() {
        let config = ServerConfig {
            port: 8080,
            ..Default::default()
        };
        let server = HttpServer::with_config(config);
        assert_eq!(server.socket_addr(), "0.0.0.0:8080");
    }

    #[test]
    fn test_default_port() {
        let server = HttpServer::with_config(ServerConfig::default());
        assert_eq!(server.socket_addr(), "0.0.0.0:5000");
        assert_eq!(server.config().port, 5000);
    }

    #[test]
    fn test_router_builds_with_cors_origins() {
        let config = ServerConfig {
            cors_origins: vec!["http://localhost:5173".to_string()],
            ..Default::default()
        };
        let _app = HttpServer::with_config(config).app();
    }
}
