//! Collections and the record type they usually hold.
//!
//! A [Collection] wraps an ordered sequence of [crate::common::Value]s and
//! offers chainable query and transform operations. Every transformation
//! returns a new collection; `push`, `set` and `delete` are the only
//! mutations.
//!
//! ```rust
//! use collect::{collect, doc};
//! use collect::common::Value;
//!
//! let orders = collect(vec![
//!     doc!{ id: 1, customer: "ann", total: 30 },
//!     doc!{ id: 2, customer: "bob", total: 12 },
//!     doc!{ id: 3, customer: "ann", total: 7 },
//! ]).unwrap();
//!
//! let by_customer = orders.group_by("customer");
//! assert_eq!(by_customer.keys().to_array(), Value::from(vec!["ann", "bob"]));
//!
//! let big = orders.where_between("total", 10, 100).pluck("id");
//! assert_eq!(big.to_array(), Value::from(vec![1, 2]));
//! ```
//!
//! # Documents
//!
//! A [Document] is an ordered set of named fields. Nested fields are reached
//! with a configurable separator (default: ".").
//!
//! ```rust
//! use collect::collection::Document;
//! use collect::common::Value;
//!
//! let mut doc = Document::new();
//! doc.put("name", "Alice").unwrap();
//! doc.put("address.city", "New York").unwrap();
//! assert_eq!(doc.get("address.city"), Value::from("New York"));
//! ```
//!
//! # Storage
//!
//! A collection stores either a dense sequence, where `delete` leaves a hole,
//! or an insertion ordered keyed map produced by `key_by`, `group_by` and
//! keyed `pluck`. See [Elements].

#[allow(clippy::module_inception)]
mod collection;
mod document;
mod elements;
pub(crate) mod operation;

pub use collection::*;
pub use document::*;
pub use elements::*;
