//! Sorting: `?sort=-created_at,name`, `?sort[]=name` or `?sort[name]=desc`.

use std::collections::BTreeSet;

use query_engine_metadata::metadata::{OrderDirection, Schema, SortSchema};
use serde_json::Value;

use super::{Facet, FlatParameters, Orchestrator};
use crate::translation::adapter::{Adapter, SortSpec};
use crate::translation::error::{Error, ValidationError};
use crate::translation::querier::Querier;
use crate::translation::validator::OperationKey;

/// The sorting facet. Flattens to `<field> => "asc" | "desc"` in request order.
pub struct Sorting;

pub type Sorter<'q, 'a, A> = Orchestrator<'q, 'a, A, Sorting>;

impl Facet for Sorting {
    const QUERY_KEY: &'static str = "sort";

    type Schema = SortSchema;

    fn schema(schema: &Schema) -> &SortSchema {
        &schema.sort
    }

    fn is_enabled(schema: &SortSchema) -> bool {
        schema.is_enabled
    }

    fn parse_flat<A: Adapter>(querier: &Querier<'_, A>) -> FlatParameters {
        match querier.query(Self::QUERY_KEY) {
            Some(sort) => sort_entries(sort).unwrap_or_default().into_iter().collect(),
            None => querier
                .default_sort()
                .iter()
                .map(|sort| (sort.field.clone(), Value::from(sort.order.name())))
                .collect(),
        }
    }

    fn validate<A: Adapter>(querier: &Querier<'_, A>) -> Result<(), Error> {
        let Some(sort) = querier.query(Self::QUERY_KEY) else {
            return Ok(());
        };
        let fields = &querier.schema().sort.fields;
        let validator = querier.adapter().validator();
        let mut seen = BTreeSet::new();
        for (field, order) in sort_entries(sort)? {
            if field.is_empty() {
                return Err(
                    ValidationError::new(format!("{} must name a field", Self::QUERY_KEY)).into(),
                );
            }
            if !fields.permits(&field) {
                return Err(ValidationError::new(format!("{field} is not sortable")).into());
            }
            if !seen.insert(field.clone()) {
                return Err(ValidationError::new(format!("{field} is sorted more than once")).into());
            }
            validator.validate_value(OperationKey::Sort, &field, &order)?;
        }
        Ok(())
    }

    fn apply<A: Adapter>(
        querier: &mut Querier<'_, A>,
        parameters: &FlatParameters,
    ) -> Result<(), Error> {
        let adapter = querier.adapter();
        for (field, order) in parameters {
            let order = order
                .as_str()
                .and_then(OrderDirection::from_name)
                .ok_or_else(|| {
                    ValidationError::new(format!("{field} must be one of [asc, desc]"))
                })?;
            let spec = SortSpec {
                field: field.clone(),
                order,
            };
            adapter.sort(querier.query_builder_mut(), &spec)?;
        }
        Ok(())
    }
}

/// Read the requested sort keys and their directions, in order.
fn sort_entries(sort: &Value) -> Result<Vec<(String, Value)>, ValidationError> {
    match sort {
        Value::String(fields) => Ok(fields
            .split(',')
            .map(str::trim)
            .filter(|field| !field.is_empty())
            .map(sort_field)
            .collect()),
        Value::Array(items) => items
            .iter()
            .map(|item| {
                item.as_str().map(|field| sort_field(field.trim())).ok_or_else(|| {
                    ValidationError::new(format!("{} must be an array of strings", Sorting::QUERY_KEY))
                })
            })
            .collect(),
        Value::Object(fields) => Ok(fields
            .iter()
            .map(|(field, order)| (field.clone(), order.clone()))
            .collect()),
        _ => Err(ValidationError::new(format!(
            "{} must be one of [string, array, object]",
            Sorting::QUERY_KEY
        ))),
    }
}

/// `-field` sorts descending, anything else ascending.
fn sort_field(field: &str) -> (String, Value) {
    match field.strip_prefix('-') {
        Some(field) => (field.to_string(), Value::from(OrderDirection::Desc.name())),
        None => (field.to_string(), Value::from(OrderDirection::Asc.name())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn reads_comma_separated_fields() {
        assert_eq!(
            sort_entries(&json!("-created_at, name,")).unwrap(),
            vec![
                ("created_at".to_string(), json!("desc")),
                ("name".to_string(), json!("asc")),
            ]
        );
    }

    #[test]
    fn reads_arrays_and_objects() {
        assert_eq!(
            sort_entries(&json!(["id", "-name"])).unwrap(),
            vec![("id".to_string(), json!("asc")), ("name".to_string(), json!("desc"))]
        );
        assert_eq!(
            sort_entries(&json!({"name": "desc"})).unwrap(),
            vec![("name".to_string(), json!("desc"))]
        );
    }

    #[test]
    fn rejects_other_shapes() {
        assert_eq!(
            sort_entries(&json!(12)),
            Err(ValidationError::new("sort must be one of [string, array, object]"))
        );
        assert_eq!(
            sort_entries(&json!(["id", 3])),
            Err(ValidationError::new("sort must be an array of strings"))
        );
    }
}
