//! Extra query parameters and final URI assembly.
//!
//! # Design
//! Three query sources are merged in a fixed order: the expanded query
//! template, then pagination, then caller-supplied parameters. Nothing is
//! de-duplicated; a key present in several sources appears several times.
//! The expanded template is already encoded, so the assembler only encodes
//! the structured extra parameters and never touches the path. Dot segments
//! are kept as written; no normalization is applied.

use ::http::uri::{PathAndQuery, Uri};

use crate::encode::encode_component;
use crate::error::EndpointError;
use crate::types::Pageable;

/// Ordered multimap of query parameters.
///
/// Keys are unique and keep first-insertion order; each key holds an
/// ordered list of values which may repeat.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    entries: Vec<(String, Vec<String>)>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `value` under `key`, creating the key if needed.
    pub fn add(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, values)) => values.push(value),
            None => self.entries.push((key, vec![value])),
        }
    }

    /// Append every value in `values` under `key`.
    pub fn extend_key<I, V>(&mut self, key: impl Into<String>, values: I)
    where
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        let key = key.into();
        for value in values {
            self.add(key.clone(), value);
        }
    }

    pub fn get(&self, key: &str) -> Option<&[String]> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, values)| values.as_slice())
    }

    /// Iterate keys with their values, in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Flatten into encoded `key=value` pairs, one per value.
    fn encoded_pairs(&self) -> impl Iterator<Item = String> + '_ {
        self.entries.iter().flat_map(|(key, values)| {
            let key = encode_component(key);
            values
                .iter()
                .map(move |value| format!("{key}={}", encode_component(value)))
        })
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for QueryParams {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut params = QueryParams::new();
        for (key, value) in iter {
            params.add(key, value);
        }
        params
    }
}

fn invalid(uri: &str, reason: impl ToString) -> EndpointError {
    EndpointError::InvalidUri {
        uri: uri.to_string(),
        reason: reason.to_string(),
    }
}

/// Parse the expanded template and append pagination and extra parameters.
///
/// The expanded string must be an absolute URI with a scheme and an
/// authority. Its path and query are carried over byte for byte.
pub(crate) fn assemble(
    expanded: &str,
    pageable: Option<&Pageable>,
    extra: Option<&QueryParams>,
) -> Result<Uri, EndpointError> {
    let uri: Uri = expanded.parse().map_err(|e| invalid(expanded, e))?;
    if uri.scheme().is_none() || uri.authority().is_none() {
        return Err(invalid(expanded, "not an absolute hierarchical URI"));
    }

    let mut appended: Vec<String> = Vec::new();
    if let Some(pageable) = pageable {
        appended.extend(
            pageable
                .query_pairs()
                .into_iter()
                .map(|(key, value)| format!("{key}={value}")),
        );
    }
    if let Some(extra) = extra {
        appended.extend(extra.encoded_pairs());
    }
    if appended.is_empty() {
        return Ok(uri);
    }

    let mut query = uri.query().unwrap_or_default().to_string();
    for pair in appended {
        if !query.is_empty() {
            query.push('&');
        }
        query.push_str(&pair);
    }
    let path_and_query: PathAndQuery = format!("{}?{query}", uri.path())
        .parse()
        .map_err(|e| invalid(expanded, e))?;

    let mut parts = uri.into_parts();
    parts.path_and_query = Some(path_and_query);
    Uri::from_parts(parts).map_err(|e| invalid(expanded, e))
}
