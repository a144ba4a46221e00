//! The contract between the query DSL and a query-builder backend.

pub mod sql;

pub use self::sql::SqlAdapter;

use query_engine_metadata::metadata::{Operator, OrderDirection};

use super::error::Error;
use super::validator::Validator;

/// A single filter predicate: `field <operator> value`.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterSpec {
    pub field: String,
    pub operator: Operator,
    pub value: serde_json::Value,
}

/// A single ordering key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortSpec {
    pub field: String,
    pub order: OrderDirection,
}

/// A page of rows. `offset` is always `(number - 1) * size`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageSpec {
    pub size: u64,
    pub number: u64,
    pub offset: u64,
}

impl PageSpec {
    pub fn new(size: u64, number: u64) -> Self {
        PageSpec {
            size,
            number,
            offset: number.saturating_sub(1).saturating_mul(size),
        }
    }
}

/// Lowers filter, sort and page operations into calls on a backend's query builder.
///
/// Each method mutates the builder in place and hands it back so calls can be chained.
pub trait Adapter {
    /// The backend's query-builder handle.
    type QueryBuilder;

    /// The rules for the operators this backend implements.
    fn validator(&self) -> &Validator;

    fn filter<'q>(
        &self,
        query: &'q mut Self::QueryBuilder,
        spec: &FilterSpec,
    ) -> Result<&'q mut Self::QueryBuilder, Error>;

    /// Add an ordering key. Keys apply in the order the calls are made.
    fn sort<'q>(
        &self,
        query: &'q mut Self::QueryBuilder,
        spec: &SortSpec,
    ) -> Result<&'q mut Self::QueryBuilder, Error>;

    /// Limit the rows to `spec.size`, skipping `spec.offset`.
    fn page<'q>(
        &self,
        query: &'q mut Self::QueryBuilder,
        spec: &PageSpec,
    ) -> Result<&'q mut Self::QueryBuilder, Error>;
}
