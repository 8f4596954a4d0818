//! Field accessors and predicates for selecting collection elements.
//!
//! A [Field] picks a part of an element: a named (possibly nested) field, a
//! position, the element itself, or a computed value built with [by]. Filters
//! are built with the fluent API and combine with logical operators:
//!
//! - `field("age").gt(30)` - comparison operators
//! - `field("name").eq("Alice")` - equality checks
//! - `field("age").between(18, 30)` - integer range, inclusive
//! - `field("tags").contains("rust")` - substring or element membership
//! - `all()` - match every element
//! - `field("age").gt(30).and(field("active").truthy())` - logical AND
//!
//! # Examples
//!
//! ```rust
//! use collect::{collect, doc};
//! use collect::filter::{field, predicate};
//! use collect::common::Value;
//!
//! let people = collect(vec![
//!     doc!{ name: "Ann", age: 41 },
//!     doc!{ name: "Bob", age: 17 },
//! ]).unwrap();
//!
//! let adults = people.filter_by(&field("age").gte(18));
//! assert_eq!(adults.pluck("name").to_array(), Value::from(vec!["Ann"]));
//!
//! let short_names = people.filter_by(&predicate(|p: &Value| {
//!     p.get_field("name").to_join_string().len() < 4
//! }));
//! assert_eq!(short_names.length(), 2);
//! ```
//!
//! # Supported Operators
//!
//! - **Equality**: `eq`, `ne`
//! - **Comparison**: `gt`, `gte`, `lt`, `lte`, `between`
//! - **Pattern**: `contains`
//! - **Array**: `in_array`, `not_in_array`, `elem_match`
//! - **Logical**: `and`, `or`, `not`
//! - **Special**: `all`, `predicate`, `truthy`

mod field;
#[allow(clippy::module_inception)]
mod filter;
mod fluent;

mod basic_filters;
mod logical_filters;
mod pattern_filters;
mod range_filters;

pub use field::*;
pub use filter::*;
pub use fluent::*;

pub(crate) use basic_filters::*;
pub(crate) use logical_filters::*;
pub(crate) use pattern_filters::*;
pub(crate) use range_filters::*;
