//! Filtering: `?filter[name][like]=%25a%25&filter[id]=3`.

use query_engine_metadata::metadata::{FilterSchema, Operator, Schema};
use serde_json::Value;

use super::{Facet, FlatParameters, Orchestrator};
use crate::translation::adapter::{Adapter, FilterSpec};
use crate::translation::error::{Error, ValidationError};
use crate::translation::querier::Querier;
use crate::translation::validator::OperationKey;

/// The filtering facet. Flattens to `<field>:<operator> => value`.
///
/// A field given a bare value instead of an `{operator: value}` object is compared with `=`.
pub struct Filtering;

pub type Filterer<'q, 'a, A> = Orchestrator<'q, 'a, A, Filtering>;

impl Facet for Filtering {
    const QUERY_KEY: &'static str = "filter";

    type Schema = FilterSchema;

    fn schema(schema: &Schema) -> &FilterSchema {
        &schema.filter
    }

    fn is_enabled(schema: &FilterSchema) -> bool {
        schema.is_enabled
    }

    fn parse_flat<A: Adapter>(querier: &Querier<'_, A>) -> FlatParameters {
        let specs = match querier.query(Self::QUERY_KEY) {
            Some(filter) => filter_entries(filter),
            None => filter_object_entries(querier.default_filter()),
        };
        specs
            .unwrap_or_default()
            .into_iter()
            .map(|spec| (format!("{}:{}", spec.field, spec.operator), spec.value))
            .collect()
    }

    /// The default filter is checked like a request's, except that the field list only binds
    /// requests.
    fn validate<A: Adapter>(querier: &Querier<'_, A>) -> Result<(), Error> {
        let fields = &querier.schema().filter.fields;
        let specs = match querier.query(Self::QUERY_KEY) {
            Some(filter) => {
                let specs = filter_entries(filter)?;
                if let Some(spec) = specs.iter().find(|spec| !fields.permits(&spec.field)) {
                    return Err(
                        ValidationError::new(format!("{} is not filterable", spec.field)).into(),
                    );
                }
                specs
            }
            None => filter_object_entries(querier.default_filter())?,
        };
        let validator = querier.adapter().validator();
        for spec in specs {
            validator.validate_value(OperationKey::Filter(spec.operator), &spec.field, &spec.value)?;
        }
        Ok(())
    }

    fn apply<A: Adapter>(
        querier: &mut Querier<'_, A>,
        parameters: &FlatParameters,
    ) -> Result<(), Error> {
        let adapter = querier.adapter();
        for (key, value) in parameters {
            let (field, operator) = key
                .rsplit_once(':')
                .and_then(|(field, name)| Some((field, Operator::from_name(name)?)))
                .ok_or_else(|| Error::NotSupported(format!("the filter parameter '{key}'")))?;
            let spec = FilterSpec {
                field: field.to_string(),
                operator,
                value: value.clone(),
            };
            adapter.filter(querier.query_builder_mut(), &spec)?;
        }
        Ok(())
    }
}

fn filter_entries(filter: &Value) -> Result<Vec<FilterSpec>, ValidationError> {
    match filter {
        Value::Object(fields) => filter_object_entries(fields),
        _ => Err(ValidationError::new(format!(
            "{} must be an object",
            Filtering::QUERY_KEY
        ))),
    }
}

/// Read `{field: {operator: value}}` and `{field: value}` into filter specs.
fn filter_object_entries(
    fields: &serde_json::Map<String, Value>,
) -> Result<Vec<FilterSpec>, ValidationError> {
    let mut specs = vec![];
    for (field, condition) in fields {
        match condition {
            Value::Object(operators) => {
                for (name, value) in operators {
                    let operator = Operator::from_name(name).ok_or_else(|| {
                        ValidationError::new(format!("{field} cannot be filtered with '{name}'"))
                    })?;
                    specs.push(FilterSpec {
                        field: field.clone(),
                        operator,
                        value: value.clone(),
                    });
                }
            }
            value => specs.push(FilterSpec {
                field: field.clone(),
                operator: Operator::Equals,
                value: value.clone(),
            }),
        }
    }
    Ok(specs)
}
