//! C-ABI wrapper around `endpoint-core`.
//!
//! # Overview
//! Exposes endpoint declaration and resolution through `extern "C"`
//! functions so any language with a C FFI can turn a method, path template
//! and query template into an encoded URI or request descriptor.
//!
//! # Design
//! - Every `extern "C"` function wraps its body in `catch_unwind` so panics
//!   never cross the FFI boundary.
//! - `FfiEndpoint` is immutable once created. `FfiRequestSpec` is the
//!   mutable, single-owner configuration that the setters modify; it must
//!   not be shared across threads without external locking.
//! - A single `FfiResult` envelope with `FfiDataTag` + `void* data`
//!   conveys success payloads and errors uniformly.
//! - The C caller owns all returned pointers and must call the matching
//!   `endpoint_*free*` function to release them.

pub mod types;

use std::ffi::{CStr, CString};
use std::os::raw::c_char;
use std::panic::catch_unwind;

use endpoint_core::{Arg, Endpoint, Order, Pageable};

use types::*;

/// Borrow a C string as UTF-8, or `None` if it is not valid UTF-8.
///
/// # Safety
/// `ptr` must be non-null and point to a NUL-terminated string that outlives
/// the returned reference.
unsafe fn read_str<'a>(ptr: *const c_char) -> Option<&'a str> {
    // SAFETY: upheld by the caller.
    unsafe { CStr::from_ptr(ptr) }.to_str().ok()
}

/// Read `len` positional arguments; null entries become null arguments.
///
/// # Safety
/// `args` must be null (only when `len` is 0) or point to `len` readable
/// pointers, each null or a valid C string.
unsafe fn read_args(args: *const *const c_char, len: u32) -> Result<Vec<Arg>, *mut FfiResult> {
    if len == 0 {
        return Ok(Vec::new());
    }
    if args.is_null() {
        return Err(FfiResult::null_arg("args"));
    }
    // SAFETY: upheld by the caller.
    let raw = unsafe { std::slice::from_raw_parts(args, len as usize) };
    raw.iter()
        .enumerate()
        .map(|(i, &ptr)| {
            if ptr.is_null() {
                return Ok(Arg::null());
            }
            // SAFETY: non-null entries are valid C strings per the contract.
            match unsafe { read_str(ptr) } {
                Some(s) => Ok(Arg::from(s)),
                None => Err(FfiResult::invalid_utf8(&format!("args[{i}]"))),
            }
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Endpoint lifecycle
// ---------------------------------------------------------------------------

/// Declare an endpoint from a method, a path template and an optional query
/// template.
///
/// `method` is an `FfiHttpMethod` discriminant. `query` may be null.
/// Returns null if `path` is null, a string is not valid UTF-8, `method` is
/// out of range, or an internal panic occurs.
/// The caller must free the returned pointer with `endpoint_free`.
#[unsafe(no_mangle)]
pub extern "C" fn endpoint_new(
    method: u32,
    path: *const c_char,
    query: *const c_char,
) -> *mut FfiEndpoint {
    catch_unwind(|| {
        let Some(method) = FfiHttpMethod::from_raw(method) else {
            return std::ptr::null_mut();
        };
        if path.is_null() {
            return std::ptr::null_mut();
        }
        let Some(path) = (unsafe { read_str(path) }) else {
            return std::ptr::null_mut();
        };
        let endpoint = if query.is_null() {
            Endpoint::new(method, path)
        } else {
            match unsafe { read_str(query) } {
                Some(query) => Endpoint::with_query(method, path, query),
                None => return std::ptr::null_mut(),
            }
        };
        Box::into_raw(Box::new(FfiEndpoint { inner: endpoint }))
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Free an endpoint created by `endpoint_new`. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn endpoint_free(endpoint: *mut FfiEndpoint) {
    if !endpoint.is_null() {
        let _ = catch_unwind(|| {
            drop(unsafe { Box::from_raw(endpoint) });
        });
    }
}

// ---------------------------------------------------------------------------
// Request spec lifecycle and setters
// ---------------------------------------------------------------------------

/// Bind `endpoint` to `base_url` and start a request configuration.
///
/// The spec keeps its own copy of the endpoint. Returns null if either
/// argument is null or `base_url` is not valid UTF-8.
/// The caller must free the returned pointer with `endpoint_request_free`.
#[unsafe(no_mangle)]
pub extern "C" fn endpoint_request_new(
    endpoint: *const FfiEndpoint,
    base_url: *const c_char,
) -> *mut FfiRequestSpec {
    catch_unwind(|| {
        if endpoint.is_null() || base_url.is_null() {
            return std::ptr::null_mut();
        }
        let endpoint = unsafe { &*endpoint };
        let Some(base_url) = (unsafe { read_str(base_url) }) else {
            return std::ptr::null_mut();
        };
        let spec = FfiRequestSpec::new(endpoint.inner.clone(), base_url.to_string());
        Box::into_raw(Box::new(spec))
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Free a spec created by `endpoint_request_new`. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn endpoint_request_free(spec: *mut FfiRequestSpec) {
    if !spec.is_null() {
        let _ = catch_unwind(|| {
            drop(unsafe { Box::from_raw(spec) });
        });
    }
}

/// Set the request body. A null `body` clears it.
///
/// Returns false if `spec` is null or `body` is not valid UTF-8.
#[unsafe(no_mangle)]
pub extern "C" fn endpoint_request_set_body(
    spec: *mut FfiRequestSpec,
    body: *const c_char,
) -> bool {
    catch_unwind(|| {
        if spec.is_null() {
            return false;
        }
        let spec = unsafe { &mut *spec };
        if body.is_null() {
            spec.body = None;
            return true;
        }
        match unsafe { read_str(body) } {
            Some(body) => {
                spec.body = Some(body.to_string());
                true
            }
            None => false,
        }
    })
    .unwrap_or(false)
}

/// Append a header; repeated names are kept in order.
///
/// Returns false if any argument is null or not valid UTF-8.
#[unsafe(no_mangle)]
pub extern "C" fn endpoint_request_add_header(
    spec: *mut FfiRequestSpec,
    name: *const c_char,
    value: *const c_char,
) -> bool {
    catch_unwind(|| {
        if spec.is_null() || name.is_null() || value.is_null() {
            return false;
        }
        let spec = unsafe { &mut *spec };
        match unsafe { (read_str(name), read_str(value)) } {
            (Some(name), Some(value)) => {
                spec.headers.push((name.to_string(), value.to_string()));
                true
            }
            _ => false,
        }
    })
    .unwrap_or(false)
}

/// Set pagination, discarding any previous pagination and sort orders.
///
/// Returns false if `spec` is null or `size` is zero.
#[unsafe(no_mangle)]
pub extern "C" fn endpoint_request_set_pageable(
    spec: *mut FfiRequestSpec,
    page: u32,
    size: u32,
) -> bool {
    catch_unwind(|| {
        if spec.is_null() {
            return false;
        }
        let Some(size) = std::num::NonZeroU32::new(size) else {
            return false;
        };
        let spec = unsafe { &mut *spec };
        spec.pageable = Some(Pageable::new(page, size));
        true
    })
    .unwrap_or(false)
}

/// Append a sort order to the current pagination.
///
/// `direction` is an `FfiDirection` discriminant. Returns false if `spec`
/// or `property` is null, `property` is not valid UTF-8, `direction` is out
/// of range, or no pagination was set.
#[unsafe(no_mangle)]
pub extern "C" fn endpoint_request_add_sort(
    spec: *mut FfiRequestSpec,
    property: *const c_char,
    direction: u32,
) -> bool {
    catch_unwind(|| {
        if spec.is_null() || property.is_null() {
            return false;
        }
        let Some(direction) = FfiDirection::from_raw(direction) else {
            return false;
        };
        let spec = unsafe { &mut *spec };
        let Some(property) = (unsafe { read_str(property) }) else {
            return false;
        };
        match spec.pageable.as_mut() {
            Some(pageable) => {
                pageable.sort.push(Order {
                    property: property.to_string(),
                    direction,
                });
                true
            }
            None => false,
        }
    })
    .unwrap_or(false)
}

/// Append one extra query parameter value.
///
/// Returns false if any argument is null or not valid UTF-8.
#[unsafe(no_mangle)]
pub extern "C" fn endpoint_request_add_query_param(
    spec: *mut FfiRequestSpec,
    key: *const c_char,
    value: *const c_char,
) -> bool {
    catch_unwind(|| {
        if spec.is_null() || key.is_null() || value.is_null() {
            return false;
        }
        let spec = unsafe { &mut *spec };
        match unsafe { (read_str(key), read_str(value)) } {
            (Some(key), Some(value)) => {
                spec.query_params.add(key, value);
                true
            }
            _ => false,
        }
    })
    .unwrap_or(false)
}

// ---------------------------------------------------------------------------
// Resolution
// ---------------------------------------------------------------------------

/// Resolve the URI of `spec` with `args_len` positional arguments.
///
/// `args` may be null only when `args_len` is 0; null entries are null
/// arguments. Returns a result with `data_tag = Uri` on success.
/// The caller must free the result with `endpoint_free_result`.
#[unsafe(no_mangle)]
pub extern "C" fn endpoint_resolve_uri(
    spec: *const FfiRequestSpec,
    args: *const *const c_char,
    args_len: u32,
) -> *mut FfiResult {
    catch_unwind(|| {
        if spec.is_null() {
            return FfiResult::null_arg("spec");
        }
        let spec = unsafe { &*spec };
        let args = match unsafe { read_args(args, args_len) } {
            Ok(args) => args,
            Err(result) => return result,
        };
        match spec.resolve_uri(&args) {
            Ok(uri) => FfiResult::ok_uri(uri),
            Err(e) => FfiResult::from_error(e),
        }
    })
    .unwrap_or_else(|_| FfiResult::panic("panic in endpoint_resolve_uri"))
}

/// Build the full request of `spec` with `args_len` positional arguments.
///
/// Same argument rules as `endpoint_resolve_uri`. Returns a result with
/// `data_tag = Request` on success.
#[unsafe(no_mangle)]
pub extern "C" fn endpoint_build_request(
    spec: *const FfiRequestSpec,
    args: *const *const c_char,
    args_len: u32,
) -> *mut FfiResult {
    catch_unwind(|| {
        if spec.is_null() {
            return FfiResult::null_arg("spec");
        }
        let spec = unsafe { &*spec };
        let args = match unsafe { read_args(args, args_len) } {
            Ok(args) => args,
            Err(result) => return result,
        };
        match spec.build_request(&args) {
            Ok(req) => FfiResult::ok_request(req),
            Err(e) => FfiResult::from_error(e),
        }
    })
    .unwrap_or_else(|_| FfiResult::panic("panic in endpoint_build_request"))
}

// ---------------------------------------------------------------------------
// Free functions
// ---------------------------------------------------------------------------

fn free_request(req: *mut FfiHttpRequest) {
    let req = unsafe { Box::from_raw(req) };
    if !req.uri.is_null() {
        drop(unsafe { CString::from_raw(req.uri) });
    }
    if !req.body.is_null() {
        drop(unsafe { CString::from_raw(req.body) });
    }
    if !req.headers.is_null() && req.headers_len > 0 {
        let headers = unsafe {
            Box::from_raw(std::ptr::slice_from_raw_parts_mut(
                req.headers,
                req.headers_len as usize,
            ))
        };
        for h in headers.iter() {
            if !h.key.is_null() {
                drop(unsafe { CString::from_raw(h.key) });
            }
            if !h.value.is_null() {
                drop(unsafe { CString::from_raw(h.value) });
            }
        }
    }
}

/// Free an `FfiResult` returned by `endpoint_resolve_uri` or
/// `endpoint_build_request`. Safe to call with null. Uses `data_tag` to
/// determine what `data` points to.
#[unsafe(no_mangle)]
pub extern "C" fn endpoint_free_result(result: *mut FfiResult) {
    if result.is_null() {
        return;
    }
    let _ = catch_unwind(|| {
        let result = unsafe { Box::from_raw(result) };
        if !result.error_message.is_null() {
            drop(unsafe { CString::from_raw(result.error_message) });
        }
        if !result.data.is_null() {
            match result.data_tag {
                FfiDataTag::Uri => drop(unsafe { CString::from_raw(result.data as *mut c_char) }),
                FfiDataTag::Request => free_request(result.data as *mut FfiHttpRequest),
                FfiDataTag::None => {}
            }
        }
    });
}

/// Free a C string allocated by this library. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn endpoint_free_string(s: *mut c_char) {
    if !s.is_null() {
        let _ = catch_unwind(|| {
            drop(unsafe { CString::from_raw(s) });
        });
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
