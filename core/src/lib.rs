//! Endpoint URI builder.
//!
//! # Overview
//! Declares HTTP endpoints as `(method, path template, query template)`
//! values and resolves them into percent-encoded `Uri`s or full
//! `HttpRequest` descriptors. The crate never touches the network
//! (host-does-IO pattern): the caller executes the request with any client.
//!
//! # Design
//! - `Endpoint` is immutable and shared; `RequestBuilder` is a single-owner
//!   value produced per resolution.
//! - Placeholders (`{name}`) are positional and counted per occurrence.
//!   Argument values are encoded in isolation; literal template text is
//!   passed through untouched.
//! - Query parameters come from the template, then pagination, then extra
//!   caller parameters, with no de-duplication.
//!
//! ```
//! use endpoint_core::{args, Endpoint, HttpMethod};
//!
//! let endpoint = Endpoint::new(HttpMethod::Get, "/plop/{arg1}/{arg2}");
//! let uri = endpoint
//!     .with_base("https://example.com")
//!     .resolve_uri(&args!["1/abc", 2])
//!     .unwrap();
//! assert_eq!(uri.path(), "/plop/1%2Fabc/2");
//! ```

pub mod encode;
pub mod endpoint;
pub mod error;
pub mod http;
pub mod query;
pub mod template;
pub mod types;

pub use encode::encode_component;
pub use endpoint::{Endpoint, RequestBuilder};
pub use error::EndpointError;
pub use http::{HttpMethod, HttpRequest};
pub use query::QueryParams;
pub use types::{Arg, Direction, Order, Pageable};
pub use ::http::Uri;
