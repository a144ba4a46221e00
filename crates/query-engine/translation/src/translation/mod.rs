//! Translate the query parameters of a request into validated filter, sort and page
//! operations, and apply them to a query builder.

pub mod adapter;
pub mod error;
pub mod orchestrators;
pub mod querier;
pub mod raw_query;
pub mod validator;
pub mod values;
