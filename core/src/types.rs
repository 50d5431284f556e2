//! Value types accepted by the request builder.
//!
//! # Design
//! `Arg` is the string form of one positional argument, or null. It exists so
//! a single argument list can mix strings, integers and optional values
//! without boxing trait objects. `Pageable` mirrors the usual "page number +
//! page size + sort list" shape; its size is non-zero by construction.

use std::fmt;
use std::num::NonZeroU32;

use serde::{Deserialize, Serialize};

use crate::encode::encode_component;

/// One positional argument for placeholder expansion.
///
/// A null argument expands to the empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Arg(Option<String>);

impl Arg {
    /// An absent argument.
    pub fn null() -> Self {
        Arg(None)
    }

    /// Capture the `Display` form of any value.
    pub fn display<T: fmt::Display + ?Sized>(value: &T) -> Self {
        Arg(Some(value.to_string()))
    }

    pub fn is_null(&self) -> bool {
        self.0.is_none()
    }

    pub fn as_str(&self) -> Option<&str> {
        self.0.as_deref()
    }

    /// The percent-encoded form substituted into a template.
    pub(crate) fn encoded(&self) -> String {
        self.0.as_deref().map(encode_component).unwrap_or_default()
    }
}

impl From<&str> for Arg {
    fn from(value: &str) -> Self {
        Arg(Some(value.to_string()))
    }
}

impl From<String> for Arg {
    fn from(value: String) -> Self {
        Arg(Some(value))
    }
}

impl From<&String> for Arg {
    fn from(value: &String) -> Self {
        Arg(Some(value.clone()))
    }
}

macro_rules! arg_from_display {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for Arg {
                fn from(value: $ty) -> Self {
                    Arg(Some(value.to_string()))
                }
            }
        )*
    };
}

arg_from_display!(
    char, bool, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64,
);

impl<T: Into<Arg>> From<Option<T>> for Arg {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or_default()
    }
}

/// Build a `Vec<Arg>` from heterogeneous values.
///
/// ```
/// use endpoint_core::{args, Arg};
///
/// let args = args!["1/abc", 2, Arg::null()];
/// assert_eq!(args.len(), 3);
/// ```
#[macro_export]
macro_rules! args {
    () => {
        ::std::vec::Vec::<$crate::Arg>::new()
    };
    ($($arg:expr),+ $(,)?) => {
        ::std::vec![$($crate::Arg::from($arg)),+]
    };
}

/// Sort direction of a single order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Direction {
    #[serde(alias = "asc")]
    Asc,
    #[serde(alias = "desc")]
    Desc,
}

impl Direction {
    /// Lower-case token used in the `sort` query parameter.
    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Asc => "asc",
            Direction::Desc => "desc",
        }
    }
}

/// Sort criterion: a property name and a direction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub property: String,
    pub direction: Direction,
}

impl Order {
    pub fn asc(property: impl Into<String>) -> Self {
        Order {
            property: property.into(),
            direction: Direction::Asc,
        }
    }

    pub fn desc(property: impl Into<String>) -> Self {
        Order {
            property: property.into(),
            direction: Direction::Desc,
        }
    }
}

/// Pagination request: zero-based page number, page size and sort orders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pageable {
    pub page: u32,
    pub size: NonZeroU32,
    #[serde(default)]
    pub sort: Vec<Order>,
}

impl Pageable {
    pub fn new(page: u32, size: NonZeroU32) -> Self {
        Pageable {
            page,
            size,
            sort: Vec::new(),
        }
    }

    /// Append a sort order; orders are emitted in the order they are added.
    pub fn sorted(mut self, order: Order) -> Self {
        self.sort.push(order);
        self
    }

    /// Serialize into `page`, `size` and one `sort` pair per order.
    ///
    /// Values are already percent-encoded.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::with_capacity(2 + self.sort.len());
        pairs.push(("page", self.page.to_string()));
        pairs.push(("size", self.size.to_string()));
        for order in &self.sort {
            let property = encode_component(&order.property);
            let value = format!("{property},{}", order.direction.as_str());
            pairs.push(("sort", value));
        }
        pairs
    }
}
