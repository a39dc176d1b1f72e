//! Scripted in-memory transport.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use brew_core::ports::{HttpRequest, HttpResponse, Method, Transport, TransportError};

type Route = (Method, String);

/// Answers requests from a fixed routing table and records every request.
///
/// Routes match on method plus path-and-query (scheme and host ignored).
/// Unrouted requests get a 404 with a JSON error body.
#[derive(Default)]
pub struct StubTransport {
    routes: Mutex<HashMap<Route, Result<HttpResponse, TransportError>>>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl StubTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `method path` with a status and JSON body.
    pub fn route(&self, method: Method, path: &str, status: u16, body: serde_json::Value) {
        self.insert(method, path, Ok(HttpResponse::new(status, body.to_string())));
    }

    /// Fail `method path` with a network error.
    pub fn fail(&self, method: Method, path: &str) {
        self.insert(
            method,
            path,
            Err(TransportError::Network("connection refused".to_string())),
        );
    }

    fn insert(&self, method: Method, path: &str, outcome: Result<HttpResponse, TransportError>) {
        let mut routes = self.routes.lock().unwrap_or_else(|e| e.into_inner());
        routes.insert((method, path.to_string()), outcome);
    }

    /// Every request sent so far, oldest first.
    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    /// Requests sent to `method path`.
    pub fn requests_to(&self, method: Method, path: &str) -> Vec<HttpRequest> {
        self.requests()
            .into_iter()
            .filter(|r| r.method == method && path_of(&r.url) == path)
            .collect()
    }
}

fn path_of(url: &str) -> String {
    match url::Url::parse(url) {
        Ok(parsed) => match parsed.query() {
            Some(query) => format!("{}?{}", parsed.path(), query),
            None => parsed.path().to_string(),
        },
        Err(_) => url.to_string(),
    }
}

#[async_trait]
impl Transport for StubTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let key = (request.method, path_of(&request.url));
        self.requests
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(request);

        let routes = self.routes.lock().unwrap_or_else(|e| e.into_inner());
        match routes.get(&key) {
            Some(outcome) => outcome.clone(),
            None => {
                tracing::debug!(method = %key.0, path = %key.1, "No stub route");
                Ok(HttpResponse::new(404, r#"{"error":"Not found"}"#))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_routed_request() {
        let stub = StubTransport::new();
        stub.route(Method::Get, "/api/v1/leaderboard", 200, json!({"leaderboard": []}));

        let resp = stub
            .send(HttpRequest::new(
                Method::Get,
                "https://api.example.com/api/v1/leaderboard",
            ))
            .await
            .unwrap();

        assert_eq!(resp.status, 200);
        assert_eq!(stub.requests_to(Method::Get, "/api/v1/leaderboard").len(), 1);
    }

    #[tokio::test]
    async fn test_query_is_part_of_route() {
        let stub = StubTransport::new();
        stub.route(Method::Get, "/api/v1/admin/catalog?category=region", 200, json!({}));

        let routed = stub
            .send(HttpRequest::new(
                Method::Get,
                "https://api.example.com/api/v1/admin/catalog?category=region",
            ))
            .await
            .unwrap();
        let unrouted = stub
            .send(HttpRequest::new(
                Method::Get,
                "https://api.example.com/api/v1/admin/catalog",
            ))
            .await
            .unwrap();

        assert_eq!(routed.status, 200);
        assert_eq!(unrouted.status, 404);
    }

    #[tokio::test]
    async fn test_failed_route() {
        let stub = StubTransport::new();
        stub.fail(Method::Post, "/auth/logout");

        let result = stub
            .send(HttpRequest::new(Method::Post, "https://api.example.com/auth/logout"))
            .await;
        assert!(matches!(result, Err(TransportError::Network(_))));
        assert_eq!(stub.requests().len(), 1);
    }
}
