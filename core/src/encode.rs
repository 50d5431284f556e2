//! Percent-encoding of individual URI components.
//!
//! Only values that arrive as data (template arguments, sort properties,
//! extra query keys and values) go through here. Literal template text is
//! never encoded.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Everything except the RFC 3986 unreserved characters.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Percent-encode `value` as a single path segment or query component.
///
/// Spaces become `%20`, and `/`, `%`, `&`, `=`, `+` and `,` are all escaped,
/// so the result can be dropped into any position of a URI without changing
/// its structure.
pub fn encode_component(value: &str) -> String {
    utf8_percent_encode(value, COMPONENT).to_string()
}
