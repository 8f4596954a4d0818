//! Query and transform operations of [crate::collection::Collection].

mod query_operations;
mod transform_operations;
