//! Pagination: `?page=<number>`.

use indexmap::IndexMap;
use query_engine_metadata::metadata::{PageSchema, Schema};
use serde_json::Value;

use super::{Facet, FlatParameters, Orchestrator};
use crate::translation::adapter::{Adapter, PageSpec};
use crate::translation::error::{Error, ValidationError};
use crate::translation::querier::Querier;
use crate::translation::validator::OperationKey;

/// The pagination facet. The page size comes from the schema, the request only picks the
/// 1-based page number.
pub struct Pagination;

pub type Pager<'q, 'a, A> = Orchestrator<'q, 'a, A, Pagination>;

impl Facet for Pagination {
    const QUERY_KEY: &'static str = "page";

    type Schema = PageSchema;

    fn schema(schema: &Schema) -> &PageSchema {
        &schema.page
    }

    fn is_enabled(schema: &PageSchema) -> bool {
        schema.is_enabled
    }

    fn parse_flat<A: Adapter>(querier: &Querier<'_, A>) -> FlatParameters {
        let size = querier.schema().page.default_size;
        let number = match querier.query(Self::QUERY_KEY) {
            Some(number) => number.clone(),
            None => Value::from(querier.default_page()),
        };
        // an invalid number has no offset; validation rejects it before it is applied
        let offset = number
            .as_u64()
            .map_or(Value::Null, |number| Value::from(PageSpec::new(size, number).offset));

        IndexMap::from([
            ("size".to_string(), Value::from(size)),
            ("number".to_string(), number),
            ("offset".to_string(), offset),
        ])
    }

    fn validate<A: Adapter>(querier: &Querier<'_, A>) -> Result<(), Error> {
        let Some(number) = querier.query(Self::QUERY_KEY) else {
            return Ok(());
        };
        querier
            .adapter()
            .validator()
            .validate_value(OperationKey::Page, Self::QUERY_KEY, number)?;
        match number.as_u64() {
            Some(number) if number >= 1 => Ok(()),
            _ => Err(ValidationError::new(format!(
                "{} must be a positive integer",
                Self::QUERY_KEY
            ))
            .into()),
        }
    }

    fn apply<A: Adapter>(
        querier: &mut Querier<'_, A>,
        parameters: &FlatParameters,
    ) -> Result<(), Error> {
        let get = |key: &str| parameters.get(key).and_then(Value::as_u64);
        let (Some(size), Some(number)) = (get("size"), get("number")) else {
            return Err(
                ValidationError::new(format!("{} must be a number", Self::QUERY_KEY)).into(),
            );
        };
        let adapter = querier.adapter();
        adapter.page(querier.query_builder_mut(), &PageSpec::new(size, number))?;
        Ok(())
    }
}
