//! # Collect - Fluent Collection Toolkit
//!
//! Collect wraps an ordered sequence of dynamically typed values, usually
//! records, and exposes a chainable API to query and reshape them: filtering,
//! field-based selection, grouping, keying, chunking, slicing, reducing and
//! string joining.
//!
//! ## Key Features
//!
//! - **Dynamic values**: [common::Value] holds scalars, documents, arrays, maps and nested collections
//! - **Chainable**: every transformation returns a new [collection::Collection]
//! - **Rich Querying**: composable [filter::Filter]s next to the `where_*` shortcuts
//! - **Nested fields**: `"address.city"` style paths with a configurable separator
//! - **Serde**: collections and documents serialize as JSON arrays and objects
//!
//! ## Quick Start
//!
//! ```rust
//! use collect::{collect, doc};
//! use collect::common::Value;
//! use collect::filter::field;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let people = collect(vec![
//!     doc!{ name: "Ann", age: 41, address: { city: "Oslo" } },
//!     doc!{ name: "Bob", age: 17, address: { city: "Rome" } },
//!     doc!{ name: "Cid", age: 30, address: { city: "Oslo" } },
//! ])?;
//!
//! let adults = people.filter_by(&field("age").gte(18));
//! assert_eq!(adults.length(), 2);
//!
//! let names = people.where_eq("address.city", "Oslo").pluck("name");
//! assert_eq!(names.implode_with("", "/"), "Ann/Cid");
//!
//! let total = people.pluck("age").reduce(|acc, age| {
//!     Value::from(acc.to_i64().unwrap_or(0) + age.to_i64().unwrap_or(0))
//! })?;
//! assert_eq!(total, Value::from(88i64));
//! # Ok(())
//! # }
//! ```
//!
//! ## Module Organization
//!
//! - [`collection`] - The collection, its storage and documents
//! - [`common`] - The dynamic value type and shared-state helpers
//! - [`config`] - Process-wide separators
//! - [`errors`] - Error types and result definitions
//! - [`filter`] - Query filters and filter providers

use crate::collection::Collection;
use crate::common::*;
use crate::config::{DEFAULT_FIELD_SEPARATOR, DEFAULT_IMPLODE_SEPARATOR};
use crate::errors::CollectResult;
use std::sync::LazyLock;

pub mod collection;
pub mod common;
pub mod config;
pub mod errors;
pub mod filter;

pub(crate) static FIELD_SEPARATOR: LazyLock<Atomic<String>> =
    LazyLock::new(|| atomic(DEFAULT_FIELD_SEPARATOR.to_string()));

pub(crate) static IMPLODE_SEPARATOR: LazyLock<Atomic<String>> =
    LazyLock::new(|| atomic(DEFAULT_IMPLODE_SEPARATOR.to_string()));

/// Creates a [Collection] from an array value.
///
/// # Errors
///
/// Returns [errors::ErrorKind::TypeConstraint] when `data` is not an array.
///
/// # Examples
///
/// ```rust
/// use collect::collect;
/// use collect::errors::ErrorKind;
///
/// let items = collect(vec![1, 2, 3]).unwrap();
/// assert_eq!(items.length(), 3);
///
/// let err = collect("not an array").unwrap_err();
/// assert_eq!(err.kind(), &ErrorKind::TypeConstraint);
/// ```
pub fn collect(data: impl Into<Value>) -> CollectResult<Collection> {
    Collection::init(data)
}
