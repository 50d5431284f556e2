//! HTTP request descriptor for the host-does-IO pattern.
//!
//! # Design
//! `HttpRequest` describes a request as plain data. The core crate builds it
//! but never sends it; the caller hands it to whatever HTTP client it uses.
//! The body stays generic so callers keep their own payload type until they
//! decide how to serialize it.

use std::fmt;

use ::http::Uri;
use serde::{Deserialize, Serialize};

use crate::error::EndpointError;

/// HTTP method of an endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
    Patch,
    Head,
    Options,
    Trace,
}

impl HttpMethod {
    /// Upper-case method token as sent on the wire.
    pub fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Head => "HEAD",
            HttpMethod::Options => "OPTIONS",
            HttpMethod::Trace => "TRACE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An HTTP request described as plain data.
///
/// Built by `RequestBuilder::build_request`. The caller is responsible for
/// executing it.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest<B = String> {
    pub method: HttpMethod,
    pub uri: Uri,
    pub headers: Vec<(String, String)>,
    pub body: Option<B>,
}

impl<B: Serialize> HttpRequest<B> {
    /// Serialize the body to JSON.
    ///
    /// Adds `content-type: application/json` when there is a body and no
    /// content type was set explicitly.
    pub fn into_json(self) -> Result<HttpRequest<String>, EndpointError> {
        let body = self.body.as_ref().map(serde_json::to_string).transpose()?;
        let mut headers = self.headers;
        let has_content_type = headers
            .iter()
            .any(|(k, _)| k.eq_ignore_ascii_case("content-type"));
        if body.is_some() && !has_content_type {
            headers.push(("content-type".to_string(), "application/json".to_string()));
        }
        Ok(HttpRequest {
            method: self.method,
            uri: self.uri,
            headers,
            body,
        })
    }
}
