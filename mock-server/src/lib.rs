//! Echo server used as the HTTP host in integration tests.
//!
//! Every request is reflected back as JSON so tests can check exactly what
//! reached the server: the raw (still encoded) path and query, the decoded
//! query pairs in order, the headers and the body. One extra route decodes
//! two path segments so tests can verify that an encoded `/` stays inside a
//! single segment.

use axum::{
    body::Bytes,
    extract::{Path, Query},
    http::{HeaderMap, Method, Uri},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;

/// The request as seen by the server.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Echo {
    pub method: String,
    pub path: String,
    pub query: Option<String>,
    pub params: Vec<(String, String)>,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl Echo {
    /// First value of header `name`, compared case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Decoded path segments of `/segments/{first}/{second}`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segments {
    pub first: String,
    pub second: String,
}

pub fn app() -> Router {
    Router::new()
        .route("/segments/{first}/{second}", get(segments))
        .fallback(echo)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    if let Ok(addr) = listener.local_addr() {
        log::info!("echo server listening on {addr}");
    }
    axum::serve(listener, app()).await
}

async fn segments(Path((first, second)): Path<(String, String)>) -> Json<Segments> {
    Json(Segments { first, second })
}

async fn echo(
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    Query(params): Query<Vec<(String, String)>>,
    body: Bytes,
) -> Json<Echo> {
    log::debug!("echo {method} {uri}");
    let headers = headers
        .iter()
        .map(|(name, value)| {
            (
                name.as_str().to_string(),
                value.to_str().unwrap_or_default().to_string(),
            )
        })
        .collect();
    Json(Echo {
        method: method.as_str().to_string(),
        path: uri.path().to_string(),
        query: uri.query().map(str::to_string),
        params,
        headers,
        body: String::from_utf8_lossy(&body).into_owned(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn echo_with_headers(headers: Vec<(&str, &str)>) -> Echo {
        Echo {
            method: "GET".to_string(),
            path: "/".to_string(),
            query: None,
            params: Vec::new(),
            headers: headers
                .into_iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            body: String::new(),
        }
    }

    #[test]
    fn header_lookup_is_case_insensitive() {
        let echo = echo_with_headers(vec![("x-trace", "abc")]);
        assert_eq!(echo.header("X-Trace"), Some("abc"));
        assert_eq!(echo.header("missing"), None);
    }

    #[test]
    fn header_lookup_returns_first_value() {
        let echo = echo_with_headers(vec![("accept", "a"), ("accept", "b")]);
        assert_eq!(echo.header("accept"), Some("a"));
    }

    #[test]
    fn echo_roundtrips_through_json() {
        let echo = Echo {
            method: "POST".to_string(),
            path: "/plop/1%2Fabc".to_string(),
            query: Some("page=0&size=10".to_string()),
            params: vec![
                ("page".to_string(), "0".to_string()),
                ("size".to_string(), "10".to_string()),
            ],
            headers: Vec::new(),
            body: "{}".to_string(),
        };
        let json = serde_json::to_string(&echo).unwrap();
        let back: Echo = serde_json::from_str(&json).unwrap();
        assert_eq!(back, echo);
    }
}
