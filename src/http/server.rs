//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Compile the pipeline from configuration
//! - Create the Axum Router with a single catch-all handler
//! - Wire up middleware (request ID, tracing)
//! - Serve until the shutdown signal fires
//! - Map upstream failures to 502

use axum::{
    body::Body,
    extract::State,
    http::Request,
    response::Response,
    Router,
};
use std::sync::Arc;
use std::time::Instant;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{request_id::SetRequestIdLayer, trace::TraceLayer};

use crate::config::{ConfigError, RouterConfig};
use crate::http::pipeline::Pipeline;
use crate::http::request::{request_id, MakeRequestUuid, X_REQUEST_ID};
use crate::http::response;
use crate::upstream::UpstreamClient;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<Pipeline>,
}

/// HTTP server for the edge router.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: RouterConfig) -> Result<Self, ConfigError> {
        Self::with_upstream(config, UpstreamClient::new()?)
    }

    /// Create a server that fetches upstream resources with `upstream`.
    pub fn with_upstream(config: RouterConfig, upstream: UpstreamClient) -> Result<Self, ConfigError> {
        let pipeline = Arc::new(Pipeline::from_config(&config, upstream)?);

        tracing::info!(
            routes = pipeline.table().len(),
            policy_headers = pipeline.policy().headers().len(),
            "Pipeline compiled"
        );
        for route in pipeline.table().routes() {
            tracing::debug!(
                url = %route.url,
                action = route.action.kind(),
                method = ?route.method,
                "Route registered"
            );
        }

        let router = Self::build_router(AppState { pipeline });
        Ok(Self { router })
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(state: AppState) -> Router {
        Router::new()
            .fallback(dispatch_handler)
            .with_state(state)
            .layer(TraceLayer::new_for_http().make_span_with(|req: &Request<Body>| {
                tracing::info_span!(
                    "request",
                    request_id = %request_id(req),
                    method = %req.method(),
                    uri = %req.uri(),
                )
            }))
            .layer(SetRequestIdLayer::new(X_REQUEST_ID, MakeRequestUuid))
    }

    /// The fully layered router, for serving or in-process testing.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server, accepting connections on the given listener until
    /// `shutdown` fires. In-flight requests are drained before returning.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Catch-all handler: every request goes through the pipeline.
async fn dispatch_handler(State(state): State<AppState>, request: Request<Body>) -> Response {
    let start_time = Instant::now();

    // Bodies are never inspected or forwarded.
    let (parts, _body) = request.into_parts();
    let request = Request::from_parts(parts, ());
    let request_id = request_id(&request).to_string();

    match state.pipeline.handle(&request).await {
        Ok(response) => {
            tracing::debug!(
                request_id = %request_id,
                status = response.status().as_u16(),
                elapsed_ms = start_time.elapsed().as_millis() as u64,
                "Request handled"
            );
            response
        }
        Err(e) => {
            tracing::error!(
                request_id = %request_id,
                error = %e,
                elapsed_ms = start_time.elapsed().as_millis() as u64,
                "Upstream error"
            );
            state.pipeline.policy().apply(response::bad_gateway())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::default_routes;
    use axum::body::to_bytes;
    use axum::http::StatusCode;
    use tower::ServiceExt;

    fn server() -> HttpServer {
        let config = RouterConfig {
            routes: default_routes("http://edge.test", "http://127.0.0.1:9/latest.json"),
            ..RouterConfig::default()
        };
        let upstream = UpstreamClient::with_builder(reqwest::Client::builder().no_proxy()).unwrap();
        HttpServer::with_upstream(config, upstream).unwrap()
    }

    fn get(path: &str) -> Request<Body> {
        Request::builder()
            .uri(path)
            .header("Host", "edge.test")
            .body(Body::empty())
            .unwrap()
    }

    #[tokio::test]
    async fn test_ping_through_router() {
        let res = server().router().oneshot(get("/ping")).await.unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(res.headers()["x-frame-options"], "DENY");
        assert!(res.headers().get("x-request-id").is_none());
        let body = to_bytes(res.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], b"pong");
    }

    #[tokio::test]
    async fn test_upstream_failure_maps_to_bad_gateway() {
        let res = server().router().oneshot(get("/v1/latest")).await.unwrap();
        assert_eq!(res.status(), StatusCode::BAD_GATEWAY);
        assert_eq!(res.headers()["content-security-policy"], "default-src 'none'; frame-ancestors 'none'");
        assert_eq!(res.headers()["referrer-policy"], "no-referrer");
        assert_eq!(res.headers()["content-type"], "application/json");
        let body = to_bytes(res.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], br#"{"message":"Upstream request failed"}"#);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut config = RouterConfig::default();
        config.routes.push(config.routes[0].clone());
        assert!(matches!(HttpServer::new(config), Err(ConfigError::Routes(_))));
    }
}
