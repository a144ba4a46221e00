//! The per-request aggregate the orchestrators work on.

use query_engine_metadata::metadata::{Schema, SortField};

use super::adapter::Adapter;
use super::error::Error;
use super::orchestrators::{Filterer, Pager, Sorter};

/// The query parameters of a request, keyed by their top-level name.
pub type RawQuery = serde_json::Map<String, serde_json::Value>;

/// Everything needed to turn one request's query parameters into a query:
/// the raw parameters, the query builder being built, the resource's schema and the
/// backend adapter.
pub struct Querier<'a, A: Adapter> {
    raw_query: &'a RawQuery,
    query_builder: A::QueryBuilder,
    schema: &'a Schema,
    adapter: &'a A,
}

impl<'a, A: Adapter> Querier<'a, A> {
    pub fn new(
        raw_query: &'a RawQuery,
        query_builder: A::QueryBuilder,
        schema: &'a Schema,
        adapter: &'a A,
    ) -> Self {
        Querier {
            raw_query,
            query_builder,
            schema,
            adapter,
        }
    }

    pub fn raw_query(&self) -> &'a RawQuery {
        self.raw_query
    }

    /// The raw value under a top-level key, if the request has one.
    pub fn query(&self, key: &str) -> Option<&'a serde_json::Value> {
        self.raw_query.get(key)
    }

    pub fn schema(&self) -> &'a Schema {
        self.schema
    }

    pub fn adapter(&self) -> &'a A {
        self.adapter
    }

    pub fn query_builder(&self) -> &A::QueryBuilder {
        &self.query_builder
    }

    pub fn query_builder_mut(&mut self) -> &mut A::QueryBuilder {
        &mut self.query_builder
    }

    pub fn into_query_builder(self) -> A::QueryBuilder {
        self.query_builder
    }

    /// The page number used when the request has no `page`.
    pub fn default_page(&self) -> u64 {
        self.schema.page.default_number
    }

    /// The sort used when the request has no `sort`.
    pub fn default_sort(&self) -> &'a [SortField] {
        &self.schema.sort.default
    }

    /// The filter used when the request has no `filter`.
    pub fn default_filter(&self) -> &'a serde_json::Map<String, serde_json::Value> {
        &self.schema.filter.default
    }

    /// Filter, sort and paginate, in that order, and hand back the finished query builder.
    pub fn run(mut self) -> Result<A::QueryBuilder, Error> {
        Filterer::new(&mut self).run()?;
        Sorter::new(&mut self).run()?;
        Pager::new(&mut self).run()?;
        Ok(self.query_builder)
    }
}
