#![allow(dead_code)]

use std::cell::Cell;

use query_engine_metadata::metadata::Schema;
use query_engine_translation::translation::adapter::{
    Adapter, FilterSpec, PageSpec, SortSpec,
};
use query_engine_translation::translation::error::Error;
use query_engine_translation::translation::querier::{Querier, RawQuery};
use query_engine_translation::translation::validator::Validator;

/// Everything an adapter was asked to do, in order.
#[derive(Debug, Default, PartialEq)]
pub struct Calls {
    pub filters: Vec<FilterSpec>,
    pub sorts: Vec<SortSpec>,
    pub pages: Vec<PageSpec>,
}

/// An adapter that records its calls instead of building a query, and counts how often
/// its validator is consulted.
pub struct RecordingAdapter {
    validator: Validator,
    validator_lookups: Cell<usize>,
}

impl RecordingAdapter {
    pub fn new() -> Self {
        RecordingAdapter::with_validator(Validator::all_operations())
    }

    pub fn with_validator(validator: Validator) -> Self {
        RecordingAdapter {
            validator,
            validator_lookups: Cell::new(0),
        }
    }

    pub fn validator_lookups(&self) -> usize {
        self.validator_lookups.get()
    }
}

impl Adapter for RecordingAdapter {
    type QueryBuilder = Calls;

    fn validator(&self) -> &Validator {
        self.validator_lookups.set(self.validator_lookups.get() + 1);
        &self.validator
    }

    fn filter<'q>(&self, query: &'q mut Calls, spec: &FilterSpec) -> Result<&'q mut Calls, Error> {
        query.filters.push(spec.clone());
        Ok(query)
    }

    fn sort<'q>(&self, query: &'q mut Calls, spec: &SortSpec) -> Result<&'q mut Calls, Error> {
        query.sorts.push(spec.clone());
        Ok(query)
    }

    fn page<'q>(&self, query: &'q mut Calls, spec: &PageSpec) -> Result<&'q mut Calls, Error> {
        query.pages.push(*spec);
        Ok(query)
    }
}

/// The inputs of a querier, owned so tests can borrow them.
pub struct Fixture {
    pub raw_query: RawQuery,
    pub schema: Schema,
    pub adapter: RecordingAdapter,
}

impl Fixture {
    pub fn new(raw_query: serde_json::Value) -> Self {
        Fixture::with_schema(raw_query, Schema::default())
    }

    pub fn with_schema(raw_query: serde_json::Value, schema: Schema) -> Self {
        let serde_json::Value::Object(raw_query) = raw_query else {
            panic!("raw query must be an object");
        };
        Fixture {
            raw_query,
            schema,
            adapter: RecordingAdapter::new(),
        }
    }

    pub fn querier(&self) -> Querier<'_, RecordingAdapter> {
        Querier::new(&self.raw_query, Calls::default(), &self.schema, &self.adapter)
    }
}

pub fn invalid(message: &str) -> Error {
    Error::Validation(
        query_engine_translation::translation::error::ValidationError::new(message),
    )
}
