//! Canned HTTP endpoints for exercising the client over real TCP.

use axum::{
    http::{HeaderMap, Method, StatusCode},
    routing::{any, get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;
use tracing::debug;

/// Body served at `/index.html`.
pub const INDEX_BODY: &str = "Hello, World!";

/// Request headers as seen by the server.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct SeenHeaders {
    pub host: Option<String>,
    pub connection: Option<String>,
    pub user_agent: Option<String>,
    pub content_type: Option<String>,
}

pub fn app() -> Router {
    Router::new()
        .route("/index.html", get(index))
        .route("/headers", get(headers))
        .route("/submit", post(submit))
        .route("/missing", any(missing))
        .route("/method", any(method))
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn index() -> &'static str {
    INDEX_BODY
}

async fn headers(headers: HeaderMap) -> Json<SeenHeaders> {
    let value = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };
    Json(SeenHeaders {
        host: value("host"),
        connection: value("connection"),
        user_agent: value("user-agent"),
        content_type: value("content-type"),
    })
}

async fn submit(body: String) -> String {
    debug!(%body, "form submitted");
    format!("received {body}")
}

async fn missing() -> (StatusCode, &'static str) {
    (StatusCode::NOT_FOUND, "no such page")
}

async fn method(method: Method) -> String {
    method.to_string()
}
