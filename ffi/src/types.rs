//! `#[repr(C)]` types for the FFI boundary.
//!
//! # Design
//! Each type mirrors a core type but uses C-compatible representations:
//! `*mut c_char` instead of `String`, raw pointers instead of `Vec`, and
//! enums with explicit discriminants. Enums arriving from C are taken as
//! `u32` and validated here, since an out-of-range discriminant in a Rust
//! enum is undefined behavior. Conversion functions live here to keep
//! `lib.rs` focused on the `extern "C"` surface.

use std::ffi::CString;
use std::os::raw::c_char;

use endpoint_core::{
    Arg, Direction, Endpoint, EndpointError, HttpMethod, HttpRequest, Pageable, QueryParams, Uri,
};

/// Opaque handle to an immutable `Endpoint`.
pub struct FfiEndpoint {
    pub(crate) inner: Endpoint,
}

/// Opaque, mutable request configuration bound to one endpoint and base URL.
///
/// Owns a copy of the endpoint so it stays valid after `endpoint_free`.
pub struct FfiRequestSpec {
    pub(crate) endpoint: Endpoint,
    pub(crate) base_url: String,
    pub(crate) body: Option<String>,
    pub(crate) headers: Vec<(String, String)>,
    pub(crate) pageable: Option<Pageable>,
    pub(crate) query_params: QueryParams,
}

impl FfiRequestSpec {
    pub(crate) fn new(endpoint: Endpoint, base_url: String) -> Self {
        FfiRequestSpec {
            endpoint,
            base_url,
            body: None,
            headers: Vec::new(),
            pageable: None,
            query_params: QueryParams::new(),
        }
    }

    pub(crate) fn resolve_uri(&self, args: &[Arg]) -> Result<Uri, EndpointError> {
        self.builder().resolve_uri(args)
    }

    pub(crate) fn build_request(&self, args: &[Arg]) -> Result<HttpRequest<String>, EndpointError> {
        let req = self.builder().build_request(args)?;
        Ok(HttpRequest {
            method: req.method,
            uri: req.uri,
            headers: req.headers,
            body: self.body.clone(),
        })
    }

    fn builder(&self) -> endpoint_core::RequestBuilder<'_, ()> {
        let mut builder = self
            .endpoint
            .with_base(self.base_url.as_str())
            .headers(self.headers.clone());
        if let Some(pageable) = &self.pageable {
            builder = builder.pageable(pageable.clone());
        }
        if !self.query_params.is_empty() {
            builder = builder.query_params(self.query_params.clone());
        }
        builder
    }
}

/// Move a Rust string into a C string owned by the caller.
///
/// Strings handled here come from C strings or encoded URIs, so an interior
/// NUL cannot occur; an empty string is returned if one ever does.
pub(crate) fn into_c_string(s: String) -> *mut c_char {
    CString::new(s).unwrap_or_default().into_raw()
}

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// HTTP method as a C enum.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FfiHttpMethod {
    Get = 0,
    Post = 1,
    Put = 2,
    Delete = 3,
    Patch = 4,
    Head = 5,
    Options = 6,
    Trace = 7,
}

impl FfiHttpMethod {
    /// Validate a raw discriminant received from C.
    pub fn from_raw(raw: u32) -> Option<HttpMethod> {
        let method = match raw {
            0 => HttpMethod::Get,
            1 => HttpMethod::Post,
            2 => HttpMethod::Put,
            3 => HttpMethod::Delete,
            4 => HttpMethod::Patch,
            5 => HttpMethod::Head,
            6 => HttpMethod::Options,
            7 => HttpMethod::Trace,
            _ => return None,
        };
        Some(method)
    }
}

impl From<HttpMethod> for FfiHttpMethod {
    fn from(m: HttpMethod) -> Self {
        match m {
            HttpMethod::Get => FfiHttpMethod::Get,
            HttpMethod::Post => FfiHttpMethod::Post,
            HttpMethod::Put => FfiHttpMethod::Put,
            HttpMethod::Delete => FfiHttpMethod::Delete,
            HttpMethod::Patch => FfiHttpMethod::Patch,
            HttpMethod::Head => FfiHttpMethod::Head,
            HttpMethod::Options => FfiHttpMethod::Options,
            HttpMethod::Trace => FfiHttpMethod::Trace,
        }
    }
}

/// Sort direction as a C enum.
#[repr(C)]
pub enum FfiDirection {
    Asc = 0,
    Desc = 1,
}

impl FfiDirection {
    /// Validate a raw discriminant received from C.
    pub fn from_raw(raw: u32) -> Option<Direction> {
        match raw {
            0 => Some(Direction::Asc),
            1 => Some(Direction::Desc),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// A single HTTP header as a key-value pair of C strings.
#[repr(C)]
pub struct FfiHeader {
    pub key: *mut c_char,
    pub value: *mut c_char,
}

/// An HTTP request described as C-compatible plain data.
///
/// Built by `endpoint_build_request`. The C caller executes the request.
#[repr(C)]
pub struct FfiHttpRequest {
    pub method: FfiHttpMethod,
    pub uri: *mut c_char,
    pub headers: *mut FfiHeader,
    pub headers_len: u32,
    pub body: *mut c_char,
}

impl FfiHttpRequest {
    /// Convert a core `HttpRequest` into a heap-allocated `FfiHttpRequest`.
    pub(crate) fn from_core(req: HttpRequest<String>) -> *mut Self {
        let uri = into_c_string(req.uri.to_string());
        let body = match req.body {
            Some(b) => into_c_string(b),
            None => std::ptr::null_mut(),
        };

        let headers_len = req.headers.len() as u32;
        let headers = if req.headers.is_empty() {
            std::ptr::null_mut()
        } else {
            let ffi_headers: Box<[FfiHeader]> = req
                .headers
                .into_iter()
                .map(|(k, v)| FfiHeader {
                    key: into_c_string(k),
                    value: into_c_string(v),
                })
                .collect();
            Box::into_raw(ffi_headers) as *mut FfiHeader
        };

        Box::into_raw(Box::new(FfiHttpRequest {
            method: req.method.into(),
            uri,
            headers,
            headers_len,
            body,
        }))
    }
}

// ---------------------------------------------------------------------------
// Result types
// ---------------------------------------------------------------------------

/// Error codes returned in `FfiResult`.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FfiErrorCode {
    Ok = 0,
    ArityMismatch = 1,
    InvalidUri = 2,
    Panic = 3,
    NullArg = 4,
    InvalidUtf8 = 5,
    /// Reserved for JSON body encoding failures. The C surface takes bodies
    /// as text, so no entry point currently returns it.
    Serialization = 6,
}

/// Tag that tells `endpoint_free_result` what `FfiResult::data` points to.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FfiDataTag {
    None = 0,
    /// `data` is a NUL-terminated URI string.
    Uri = 1,
    /// `data` is an `FfiHttpRequest`.
    Request = 2,
}

/// Result envelope for resolution calls.
///
/// On success `error_code` is `Ok`, `error_message` is null, and `data`
/// points to the payload tagged by `data_tag`. On failure `error_code`
/// describes the category, `error_message` is a human-readable C string and
/// `data` is null. `expected_args`/`provided_args` are filled for
/// `ArityMismatch` and zero otherwise.
#[repr(C)]
pub struct FfiResult {
    pub error_code: FfiErrorCode,
    pub error_message: *mut c_char,
    pub expected_args: u32,
    pub provided_args: u32,
    pub data_tag: FfiDataTag,
    pub data: *mut std::ffi::c_void,
}

impl FfiResult {
    fn boxed(
        error_code: FfiErrorCode,
        error_message: *mut c_char,
        data_tag: FfiDataTag,
        data: *mut std::ffi::c_void,
    ) -> *mut Self {
        Box::into_raw(Box::new(FfiResult {
            error_code,
            error_message,
            expected_args: 0,
            provided_args: 0,
            data_tag,
            data,
        }))
    }

    /// Build a success result carrying a URI string.
    pub(crate) fn ok_uri(uri: Uri) -> *mut Self {
        let data = into_c_string(uri.to_string()) as *mut std::ffi::c_void;
        Self::boxed(FfiErrorCode::Ok, std::ptr::null_mut(), FfiDataTag::Uri, data)
    }

    /// Build a success result carrying an `FfiHttpRequest`.
    pub(crate) fn ok_request(req: HttpRequest<String>) -> *mut Self {
        let data = FfiHttpRequest::from_core(req) as *mut std::ffi::c_void;
        Self::boxed(FfiErrorCode::Ok, std::ptr::null_mut(), FfiDataTag::Request, data)
    }

    /// Build an error result from an `EndpointError`.
    pub(crate) fn from_error(err: EndpointError) -> *mut Self {
        let msg = into_c_string(err.to_string());
        match err {
            EndpointError::ArityMismatch {
                expected, actual, ..
            } => Box::into_raw(Box::new(FfiResult {
                error_code: FfiErrorCode::ArityMismatch,
                error_message: msg,
                expected_args: u32::try_from(expected).unwrap_or(u32::MAX),
                provided_args: u32::try_from(actual).unwrap_or(u32::MAX),
                data_tag: FfiDataTag::None,
                data: std::ptr::null_mut(),
            })),
            EndpointError::InvalidUri { .. } => Self::boxed(
                FfiErrorCode::InvalidUri,
                msg,
                FfiDataTag::None,
                std::ptr::null_mut(),
            ),
            EndpointError::Serialization(_) => Self::boxed(
                FfiErrorCode::Serialization,
                msg,
                FfiDataTag::None,
                std::ptr::null_mut(),
            ),
        }
    }

    /// Build an error result for a null argument.
    pub(crate) fn null_arg(name: &str) -> *mut Self {
        let msg = into_c_string(format!("null argument: {name}"));
        Self::boxed(FfiErrorCode::NullArg, msg, FfiDataTag::None, std::ptr::null_mut())
    }

    /// Build an error result for a string that is not valid UTF-8.
    pub(crate) fn invalid_utf8(name: &str) -> *mut Self {
        let msg = into_c_string(format!("argument is not valid UTF-8: {name}"));
        Self::boxed(FfiErrorCode::InvalidUtf8, msg, FfiDataTag::None, std::ptr::null_mut())
    }

    /// Build an error result for a caught panic.
    pub(crate) fn panic(msg: &str) -> *mut Self {
        let msg = into_c_string(msg.to_string());
        Self::boxed(FfiErrorCode::Panic, msg, FfiDataTag::None, std::ptr::null_mut())
    }
}
