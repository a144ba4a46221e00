//! Parse, validate and apply one facet of the query DSL.
//!
//! Every facet follows the same protocol, implemented once by [`Orchestrator`]; a
//! [`Facet`] supplies the parts that differ: where its parameters live, how they flatten,
//! how they are checked and which adapter method applies them.

pub mod filterer;
pub mod pager;
pub mod sorter;

pub use filterer::{Filterer, Filtering};
pub use pager::{Pager, Pagination};
pub use sorter::{Sorter, Sorting};

use std::marker::PhantomData;

use indexmap::IndexMap;
use query_engine_metadata::metadata::Schema;

use super::adapter::Adapter;
use super::error::Error;
use super::querier::Querier;

/// Flattened parameters of a facet, in request order.
pub type FlatParameters = IndexMap<String, serde_json::Value>;

/// A parsed parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    pub key: String,
    pub value: serde_json::Value,
}

/// Where an orchestrator is in its validation.
///
/// A failed validation leaves the orchestrator `Unvalidated`, so asking again re-runs the
/// checks and fails the same way.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationState {
    Unvalidated,
    Validated,
}

/// The facet-specific half of an orchestrator.
pub trait Facet {
    /// The top-level key of this facet's parameters in the raw query.
    const QUERY_KEY: &'static str;

    /// This facet's slice of the resource schema.
    type Schema;

    fn schema(schema: &Schema) -> &Self::Schema;

    fn is_enabled(schema: &Self::Schema) -> bool;

    /// The facet's parameters, or its defaults when the request has none, keyed without the
    /// query-key prefix.
    fn parse_flat<A: Adapter>(querier: &Querier<'_, A>) -> FlatParameters;

    /// Check the raw request values.
    fn validate<A: Adapter>(querier: &Querier<'_, A>) -> Result<(), Error>;

    /// Hand the parameters to the adapter.
    fn apply<A: Adapter>(
        querier: &mut Querier<'_, A>,
        parameters: &FlatParameters,
    ) -> Result<(), Error>;
}

/// Drives one facet through parse, validate and apply against a querier.
pub struct Orchestrator<'q, 'a, A: Adapter, F: Facet> {
    querier: &'q mut Querier<'a, A>,
    state: ValidationState,
    facet: PhantomData<F>,
}

impl<'q, 'a, A: Adapter, F: Facet> Orchestrator<'q, 'a, A, F> {
    pub fn new(querier: &'q mut Querier<'a, A>) -> Self {
        Orchestrator {
            querier,
            state: ValidationState::Unvalidated,
            facet: PhantomData,
        }
    }

    pub fn query_key(&self) -> &'static str {
        F::QUERY_KEY
    }

    pub fn schema(&self) -> &F::Schema {
        F::schema(self.querier.schema())
    }

    pub fn is_enabled(&self) -> bool {
        F::is_enabled(self.schema())
    }

    /// The raw value of this facet in the request.
    pub fn query(&self) -> Option<&'a serde_json::Value> {
        self.querier.query(F::QUERY_KEY)
    }

    pub fn querier(&self) -> &Querier<'a, A> {
        &*self.querier
    }

    pub fn validation_state(&self) -> ValidationState {
        self.state
    }

    /// Flatten this facet's parameters into scalar sub-keys, prefixed `<query key>:` when
    /// `include_key_prefix` is set. Empty when the facet is disabled.
    pub fn parse_flat(&self, include_key_prefix: bool) -> FlatParameters {
        if !self.is_enabled() {
            return FlatParameters::new();
        }
        let parameters = F::parse_flat(&*self.querier);
        if include_key_prefix {
            parameters
                .into_iter()
                .map(|(key, value)| (format!("{}:{key}", F::QUERY_KEY), value))
                .collect()
        } else {
            parameters
        }
    }

    pub fn parse(&self) -> IndexMap<String, Parameter> {
        self.parse_flat(true)
            .into_iter()
            .map(|(key, value)| {
                let parameter = Parameter {
                    key: key.clone(),
                    value,
                };
                (key, parameter)
            })
            .collect()
    }

    /// Validate the request's values for this facet. Once validation has passed it is not
    /// repeated.
    pub fn validate(&mut self) -> Result<(), Error> {
        if self.state == ValidationState::Validated {
            return Ok(());
        }
        if self.is_enabled() {
            if let Err(err) = F::validate(&*self.querier) {
                tracing::debug!(query_key = F::QUERY_KEY, %err, "query parameters rejected");
                return Err(err);
            }
        }
        self.state = ValidationState::Validated;
        Ok(())
    }

    /// Validate, then apply this facet to the querier's query builder unless the facet is
    /// disabled. Returns the same querier for the next facet.
    pub fn run(mut self) -> Result<&'q mut Querier<'a, A>, Error> {
        self.validate()?;
        if self.is_enabled() {
            let parameters = self.parse_flat(false);
            tracing::debug!(query_key = F::QUERY_KEY, ?parameters, "applying query parameters");
            F::apply(self.querier, &parameters)?;
        } else {
            tracing::debug!(query_key = F::QUERY_KEY, "facet disabled");
        }
        Ok(self.querier)
    }
}
