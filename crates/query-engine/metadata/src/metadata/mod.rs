//! Metadata describing which query facets a resource exposes, and the operator vocabulary
//! of the query DSL.

pub mod operators;
pub mod schema;

// re-export without modules
pub use operators::*;
pub use schema::*;
