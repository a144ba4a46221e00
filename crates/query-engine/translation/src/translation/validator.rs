//! Decide whether a request value is acceptable for an operation.

use std::collections::BTreeSet;
use std::fmt;

use enum_iterator::Sequence;
use query_engine_metadata::metadata::{Operator, OperatorClass};
use serde_json::Value;

use super::error::{Error, ValidationError};

/// Identifies the validation rule for a value: the facet, and for filters the operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Sequence)]
pub enum OperationKey {
    Filter(Operator),
    Sort,
    Page,
}

impl fmt::Display for OperationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OperationKey::Filter(operator) => write!(f, "filter:{operator}"),
            OperationKey::Sort => f.write_str("sort"),
            OperationKey::Page => f.write_str("page"),
        }
    }
}

/// The shapes of value an operation may accept.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueShape {
    /// A boolean, number or string.
    Scalar,
    Number,
    Null,
    /// Any array. Element types and lengths are not inspected.
    Array,
    String,
    /// `"asc"` or `"desc"`.
    SortDirection,
}

impl ValueShape {
    pub fn for_key(key: OperationKey) -> Self {
        match key {
            OperationKey::Filter(operator) => match operator.class() {
                OperatorClass::Equality => ValueShape::Scalar,
                OperatorClass::Comparison => ValueShape::Number,
                OperatorClass::NullCheck => ValueShape::Null,
                OperatorClass::SetMembership | OperatorClass::Range => ValueShape::Array,
                OperatorClass::Pattern => ValueShape::String,
            },
            OperationKey::Sort => ValueShape::SortDirection,
            OperationKey::Page => ValueShape::Number,
        }
    }

    pub fn admits(&self, value: &Value) -> bool {
        match self {
            ValueShape::Scalar => value.is_boolean() || value.is_number() || value.is_string(),
            ValueShape::Number => value.is_number(),
            ValueShape::Null => value.is_null(),
            ValueShape::Array => value.is_array(),
            ValueShape::String => value.is_string(),
            ValueShape::SortDirection => matches!(value.as_str(), Some("asc" | "desc")),
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            ValueShape::Scalar => "one of [boolean, number, string]",
            ValueShape::Number => "a number",
            ValueShape::Null => "[null]",
            ValueShape::Array => "an array",
            ValueShape::String => "a string",
            ValueShape::SortDirection => "one of [asc, desc]",
        }
    }
}

/// The validation rules of one backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Validator {
    operations: BTreeSet<OperationKey>,
}

impl Validator {
    /// A validator for a backend that only implements the given operations.
    pub fn new(operations: impl IntoIterator<Item = OperationKey>) -> Self {
        Validator {
            operations: operations.into_iter().collect(),
        }
    }

    /// A validator for a backend implementing every operator.
    pub fn all_operations() -> Self {
        Validator::new(enum_iterator::all::<OperationKey>())
    }

    pub fn supports(&self, key: OperationKey) -> bool {
        self.operations.contains(&key)
    }

    /// Check that `value` may be used for `key` on `field`.
    ///
    /// An operation the backend does not implement is reported as
    /// `Error::UnsupportedOperator` rather than as a validation failure.
    pub fn validate_value(&self, key: OperationKey, field: &str, value: &Value) -> Result<(), Error> {
        if !self.supports(key) {
            return Err(Error::UnsupportedOperator(key.to_string()));
        }
        let shape = ValueShape::for_key(key);
        if shape.admits(value) {
            Ok(())
        } else {
            Err(ValidationError::new(format!("{field} must be {}", shape.description())).into())
        }
    }
}

impl Default for Validator {
    fn default() -> Self {
        Validator::all_operations()
    }
}
