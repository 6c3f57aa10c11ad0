//! Shared test support: in-process relay app plus a stub query service.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::body::{Body, Bytes};
use axum::http::{header, HeaderMap, Method, Request, StatusCode};
use axum::response::IntoResponse;
use axum::routing::post;
use axum::Router;
use serde_json::Value;
use tower::ServiceExt;

use medrec_relay::config::{Config, LoggingConfig, QueryServiceConfig, ServerConfig};
use medrec_relay::state::AppState;

/// The relay application wired against a caller-provided query service URL.
pub struct TestApp {
    router: Router,
}

impl TestApp {
    pub fn new(query_service_url: String) -> anyhow::Result<Self> {
        let config = Config {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 0,
                max_request_body_size: 1024 * 1024,
            },
            query_service: QueryServiceConfig {
                url: query_service_url,
                timeout_seconds: 5,
            },
            logging: LoggingConfig {
                level: "warn".to_string(),
                json: false,
            },
        };

        let state = AppState::new(config)?;
        Ok(Self {
            router: medrec_relay::api::create_router(state),
        })
    }

    /// Issue a request against the in-process router.
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<Vec<u8>>,
    ) -> anyhow::Result<(StatusCode, HeaderMap, Bytes)> {
        let builder = Request::builder().method(method).uri(path);
        let request = match body {
            Some(bytes) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(bytes))?,
            None => builder.body(Body::empty())?,
        };

        let response = self.router.clone().oneshot(request).await?;
        let status = response.status();
        let headers = response.headers().clone();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
        Ok((status, headers, body))
    }
}

/// A real query service listener on an ephemeral port.
///
/// Records every envelope it receives and answers each `POST /query` with a
/// canned status and body.
pub struct StubQueryService {
    addr: SocketAddr,
    requests: Arc<Mutex<Vec<Value>>>,
}

impl StubQueryService {
    pub async fn spawn(status: StatusCode, body: &'static str) -> anyhow::Result<Self> {
        let requests: Arc<Mutex<Vec<Value>>> = Arc::new(Mutex::new(Vec::new()));
        let seen = requests.clone();

        let app = Router::new().route(
            "/query",
            post(move |payload: Bytes| {
                let seen = seen.clone();
                async move {
                    if let Ok(envelope) = serde_json::from_slice::<Value>(&payload) {
                        seen.lock().unwrap().push(envelope);
                    }
                    (status, [(header::CONTENT_TYPE, "application/json")], body).into_response()
                }
            }),
        );

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Ok(Self { addr, requests })
    }

    pub fn url(&self) -> String {
        format!("http://{}/query", self.addr)
    }

    /// Envelopes received so far, in arrival order.
    pub fn received(&self) -> Vec<Value> {
        self.requests.lock().unwrap().clone()
    }
}

/// A URL on a port nothing listens on (connection refused).
pub async fn unreachable_query_service_url() -> anyhow::Result<String> {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    drop(listener);
    Ok(format!("http://{}/query", addr))
}

pub fn to_json_body(value: &Value) -> anyhow::Result<Vec<u8>> {
    Ok(serde_json::to_vec(value)?)
}

pub fn parse_json(body: &[u8]) -> anyhow::Result<Value> {
    Ok(serde_json::from_slice(body)?)
}

pub fn assert_status(actual: StatusCode, expected: StatusCode, context: &str) {
    assert_eq!(actual, expected, "unexpected status for {context}");
}
