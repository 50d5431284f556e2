//! Endpoint declarations and the request builder bound to them.
//!
//! # Design
//! `Endpoint` is an immutable value created once and shared freely. Binding
//! it to a base URL yields a `RequestBuilder` owned by the calling scope;
//! every setter consumes the builder and returns it, so a configured builder
//! is never shared between resolutions by accident. Resolution itself is
//! pure: expand the template, then merge query parameters into a `Uri`.
//! The expanded path is kept verbatim, dot segments included.

use ::http::Uri;
use serde::{Deserialize, Serialize};

use crate::error::EndpointError;
use crate::http::{HttpMethod, HttpRequest};
use crate::query::{self, QueryParams};
use crate::template;
use crate::types::{Arg, Pageable};

/// An HTTP method, a path template and an optional raw query template.
///
/// The query template is a `key=value&key=value` fragment whose
/// placeholders are expanded like the path's.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Endpoint {
    method: HttpMethod,
    path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    query: Option<String>,
}

impl Endpoint {
    pub fn new(method: HttpMethod, path: impl Into<String>) -> Self {
        Endpoint {
            method,
            path: path.into(),
            query: None,
        }
    }

    pub fn with_query(
        method: HttpMethod,
        path: impl Into<String>,
        query: impl Into<String>,
    ) -> Self {
        Endpoint {
            method,
            path: path.into(),
            query: Some(query.into()),
        }
    }

    pub fn method(&self) -> HttpMethod {
        self.method
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn query(&self) -> Option<&str> {
        self.query.as_deref()
    }

    /// The full template for `base`: `base + path`, followed by `?query`
    /// when a query template is declared.
    pub fn template(&self, base: &str) -> String {
        let mut out = String::with_capacity(base.len() + self.path.len() + 1);
        out.push_str(base);
        out.push_str(&self.path);
        if let Some(query) = &self.query {
            out.push('?');
            out.push_str(query);
        }
        out
    }

    /// Start a request against `base`.
    pub fn with_base(&self, base: impl Into<String>) -> RequestBuilder<'_, ()> {
        RequestBuilder {
            endpoint: self,
            base_url: base.into(),
            body: None,
            headers: Vec::new(),
            pageable: None,
            query_params: None,
        }
    }
}

/// Accumulates the optional parts of a request before resolution.
#[derive(Debug, Clone)]
pub struct RequestBuilder<'e, B> {
    endpoint: &'e Endpoint,
    base_url: String,
    body: Option<B>,
    headers: Vec<(String, String)>,
    pageable: Option<Pageable>,
    query_params: Option<QueryParams>,
}

impl<'e, B> RequestBuilder<'e, B> {
    /// Set the request body, replacing any previous one.
    pub fn body<T>(self, body: T) -> RequestBuilder<'e, T> {
        RequestBuilder {
            endpoint: self.endpoint,
            base_url: self.base_url,
            body: Some(body),
            headers: self.headers,
            pageable: self.pageable,
            query_params: self.query_params,
        }
    }

    /// Append one header; repeated names are kept.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Replace all headers.
    pub fn headers(mut self, headers: Vec<(String, String)>) -> Self {
        self.headers = headers;
        self
    }

    pub fn pageable(mut self, pageable: Pageable) -> Self {
        self.pageable = Some(pageable);
        self
    }

    /// Replace the extra query parameters.
    pub fn query_params(mut self, params: QueryParams) -> Self {
        self.query_params = Some(params);
        self
    }

    /// Append one extra query parameter value.
    pub fn query_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query_params.get_or_insert_with(QueryParams::new).add(key, value);
        self
    }

    pub fn endpoint(&self) -> &'e Endpoint {
        self.endpoint
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Expand the template with `args` and assemble the final URI.
    pub fn resolve_uri(&self, args: &[Arg]) -> Result<Uri, EndpointError> {
        let template = self.endpoint.template(&self.base_url);
        let expanded = template::expand(&template, args)?;
        let uri = query::assemble(&expanded, self.pageable.as_ref(), self.query_params.as_ref())?;
        log::trace!("resolved {} {}", self.endpoint.method, uri);
        Ok(uri)
    }

    /// Resolve the URI and pair it with the method, headers and body.
    pub fn build_request(self, args: &[Arg]) -> Result<HttpRequest<B>, EndpointError> {
        let uri = self.resolve_uri(args)?;
        Ok(HttpRequest {
            method: self.endpoint.method,
            uri,
            headers: self.headers,
            body: self.body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::num::NonZeroU32;

    use crate::args;
    use crate::types::Order;

    const HOST: &str = "not.barracks.io";
    const BASE_URL: &str = "https://not.barracks.io";

    fn page(page: u32, size: u32) -> Pageable {
        Pageable::new(page, NonZeroU32::new(size).unwrap())
    }

    #[test]
    fn no_placeholders_keeps_path_and_query() {
        let endpoint = Endpoint::with_query(HttpMethod::Get, "/test/action", "someKey=someValue");
        let uri = endpoint.with_base(BASE_URL).resolve_uri(&[]).unwrap();
        assert_eq!(uri.path(), "/test/action");
        assert_eq!(uri.query(), Some("someKey=someValue"));
    }

    #[test]
    fn keeps_end_of_url() {
        let endpoint = Endpoint::new(HttpMethod::Get, "/a/{path}/withEndingValue");
        let uri = endpoint.with_base(BASE_URL).resolve_uri(&args!["path"]).unwrap();
        assert_eq!(uri.path(), "/a/path/withEndingValue");
    }

    #[test]
    fn replaces_placeholders() {
        let endpoint = Endpoint::new(HttpMethod::Get, "/plop/{arg1}/{arg2}");
        let uri = endpoint.with_base(BASE_URL).resolve_uri(&args!["1/abc", 2]).unwrap();
        assert_eq!(uri.host(), Some(HOST));
        assert_eq!(uri.path(), "/plop/1%2Fabc/2");
    }

    #[test]
    fn pagination_without_query_template() {
        let endpoint = Endpoint::new(HttpMethod::Get, "/plop/{arg1}/{arg2}");
        let uri = endpoint
            .with_base(BASE_URL)
            .pageable(page(0, 10))
            .resolve_uri(&args!["1", 2])
            .unwrap();
        assert_eq!(uri.host(), Some(HOST));
        assert_eq!(uri.path(), "/plop/1/2");
        assert_eq!(uri.query(), Some("page=0&size=10"));
    }

    #[test]
    fn pagination_after_query_template() {
        let endpoint = Endpoint::with_query(HttpMethod::Get, "/plop", "arg1={arg1}");
        let uri = endpoint
            .with_base(BASE_URL)
            .pageable(page(0, 10))
            .resolve_uri(&args!["/%1"])
            .unwrap();
        assert_eq!(uri.host(), Some(HOST));
        assert_eq!(uri.path(), "/plop");
        assert_eq!(uri.query(), Some("arg1=%2F%251&page=0&size=10"));
    }

    #[test]
    fn missing_argument_fails() {
        let endpoint = Endpoint::with_query(HttpMethod::Get, "/plop", "arg1={arg1}");
        let err = endpoint.with_base(BASE_URL).resolve_uri(&[]).unwrap_err();
        match err {
            EndpointError::ArityMismatch {
                expected,
                actual,
                template,
            } => {
                assert_eq!((expected, actual), (1, 0));
                assert_eq!(template, "https://not.barracks.io/plop?arg1={arg1}");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn dot_arguments_keep_surrounding_segments() {
        let endpoint = Endpoint::new(HttpMethod::Get, "/api/{id}/details");
        let builder = endpoint.with_base(BASE_URL);

        let uri = builder.resolve_uri(&args![".."]).unwrap();
        assert_eq!(uri.path(), "/api/../details");
        assert_eq!(uri.to_string(), "https://not.barracks.io/api/../details");

        let uri = builder.resolve_uri(&args!["."]).unwrap();
        assert_eq!(uri.path(), "/api/./details");

        let endpoint = Endpoint::new(HttpMethod::Get, "/users/{id}");
        let uri = endpoint
            .with_base(BASE_URL)
            .pageable(page(0, 5))
            .resolve_uri(&args![".."])
            .unwrap();
        assert_eq!(uri.path(), "/users/..");
        assert_eq!(uri.query(), Some("page=0&size=5"));
    }

    #[test]
    fn placeholders_in_base_url_count() {
        let endpoint = Endpoint::new(HttpMethod::Get, "/items/{id}");
        let uri = endpoint
            .with_base("https://{tenant}.example.com")
            .resolve_uri(&args!["acme", 7])
            .unwrap();
        assert_eq!(uri.host(), Some("acme.example.com"));
        assert_eq!(uri.path(), "/items/7");
    }

    #[test]
    fn query_param_appends_after_pagination() {
        let endpoint = Endpoint::with_query(HttpMethod::Get, "/search", "q={q}");
        let uri = endpoint
            .with_base(BASE_URL)
            .query_param("filter", "a b")
            .pageable(page(1, 20).sorted(Order::desc("created")))
            .query_param("filter", "c")
            .resolve_uri(&args!["rust lang"])
            .unwrap();
        assert_eq!(
            uri.query(),
            Some("q=rust%20lang&page=1&size=20&sort=created,desc&filter=a%20b&filter=c")
        );
    }

    #[test]
    fn invalid_base_url_fails() {
        let endpoint = Endpoint::new(HttpMethod::Get, "/x");
        let err = endpoint.with_base("not a url").resolve_uri(&[]).unwrap_err();
        assert!(matches!(err, EndpointError::InvalidUri { .. }));
    }

    #[test]
    fn build_request_pairs_everything() {
        let endpoint = Endpoint::new(HttpMethod::Put, "/todos/{id}");
        let req = endpoint
            .with_base("http://localhost:3000")
            .header("x-trace", "1")
            .body("payload")
            .build_request(&args![42])
            .unwrap();
        assert_eq!(req.method, HttpMethod::Put);
        assert_eq!(req.uri.to_string(), "http://localhost:3000/todos/42");
        assert_eq!(req.headers, vec![("x-trace".to_string(), "1".to_string())]);
        assert_eq!(req.body, Some("payload"));
    }

    #[test]
    fn build_request_without_body() {
        let endpoint = Endpoint::new(HttpMethod::Delete, "/todos/{id}");
        let req = endpoint
            .with_base("http://localhost:3000")
            .build_request(&args![1])
            .unwrap();
        assert_eq!(req.method, HttpMethod::Delete);
        assert!(req.body.is_none());
        assert!(req.headers.is_empty());
    }

    #[test]
    fn headers_replaces_previous() {
        let endpoint = Endpoint::new(HttpMethod::Get, "/");
        let req = endpoint
            .with_base(BASE_URL)
            .header("a", "1")
            .headers(vec![("b".to_string(), "2".to_string())])
            .build_request(&[])
            .unwrap();
        assert_eq!(req.headers, vec![("b".to_string(), "2".to_string())]);
    }

    #[test]
    fn template_concatenation() {
        let endpoint = Endpoint::with_query(HttpMethod::Get, "/p", "k={v}");
        assert_eq!(endpoint.template("https://h"), "https://h/p?k={v}");
        assert_eq!(Endpoint::new(HttpMethod::Get, "/p").template("https://h"), "https://h/p");
    }

    #[test]
    fn endpoint_is_reusable_across_builders() {
        let endpoint = Endpoint::new(HttpMethod::Get, "/users/{id}");
        let a = endpoint.with_base(BASE_URL).resolve_uri(&args![1]).unwrap();
        let b = endpoint.with_base(BASE_URL).resolve_uri(&args![2]).unwrap();
        assert_eq!(a.path(), "/users/1");
        assert_eq!(b.path(), "/users/2");
    }

    #[test]
    fn endpoint_deserializes_from_json() {
        let endpoint: Endpoint =
            serde_json::from_str(r#"{"method":"GET","path":"/plop","query":"arg1={arg1}"}"#)
                .unwrap();
        assert_eq!(
            endpoint,
            Endpoint::with_query(HttpMethod::Get, "/plop", "arg1={arg1}")
        );
        let endpoint: Endpoint =
            serde_json::from_str(r#"{"method":"POST","path":"/todos"}"#).unwrap();
        assert_eq!(endpoint.query(), None);
    }

    #[test]
    fn endpoint_is_send_and_sync() {
        fn assert_shared<T: Send + Sync>() {}
        assert_shared::<Endpoint>();
    }
}
