//! Placeholder parsing and expansion.
//!
//! A template is literal text interleaved with `{name}` placeholders, where
//! `name` is one or more ASCII alphanumerics. There is no escaping and no
//! nesting: anything that does not match that exact shape is literal.
//! Placeholders are positional. Each occurrence consumes one argument, so a
//! name that appears twice needs two arguments.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::EndpointError;
use crate::types::Arg;

static PLACEHOLDER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{[[:alnum:]]+\}").expect("placeholder pattern is valid"));

/// One token of a tokenized template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    /// Text copied verbatim into the output.
    Literal(&'a str),
    /// A placeholder; holds the name between the braces.
    Placeholder(&'a str),
}

/// Split `template` into literal and placeholder tokens, left to right.
///
/// Empty literals are not emitted, so two adjacent placeholders produce two
/// consecutive `Placeholder` tokens and an empty template produces none.
pub fn tokenize(template: &str) -> Vec<Segment<'_>> {
    let mut segments = Vec::new();
    let mut cursor = 0;
    for m in PLACEHOLDER.find_iter(template) {
        if m.start() > cursor {
            segments.push(Segment::Literal(&template[cursor..m.start()]));
        }
        segments.push(Segment::Placeholder(&template[m.start() + 1..m.end() - 1]));
        cursor = m.end();
    }
    if cursor < template.len() {
        segments.push(Segment::Literal(&template[cursor..]));
    }
    segments
}

/// Number of placeholder occurrences in `template`.
pub fn placeholder_count(template: &str) -> usize {
    PLACEHOLDER.find_iter(template).count()
}

/// Substitute `args` into `template`, percent-encoding each argument.
///
/// Fails with [`EndpointError::ArityMismatch`] unless there is exactly one
/// argument per placeholder occurrence. Nothing is substituted on failure.
pub fn expand(template: &str, args: &[Arg]) -> Result<String, EndpointError> {
    let segments = tokenize(template);
    let expected = segments
        .iter()
        .filter(|s| matches!(s, Segment::Placeholder(_)))
        .count();
    if expected != args.len() {
        return Err(EndpointError::ArityMismatch {
            expected,
            actual: args.len(),
            template: template.to_string(),
        });
    }

    let mut out = String::with_capacity(template.len());
    let mut args = args.iter();
    for segment in segments {
        match segment {
            Segment::Literal(text) => out.push_str(text),
            Segment::Placeholder(_) => {
                if let Some(arg) = args.next() {
                    out.push_str(&arg.encoded());
                }
            }
        }
    }
    Ok(out)
}
