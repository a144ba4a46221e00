//! An adapter building `sql::ast::Select` queries.

use query_engine_metadata::metadata::{Operator, OrderDirection};
use query_engine_sql::sql;

use super::{Adapter, FilterSpec, PageSpec, SortSpec};
use crate::translation::error::Error;
use crate::translation::validator::{OperationKey, Validator};
use crate::translation::values::translate_json_expression;

/// Lowers operations onto a `select * from ...` built with `query_engine_sql`.
#[derive(Debug, Clone, Default)]
pub struct SqlAdapter {
    validator: Validator,
}

impl SqlAdapter {
    /// An adapter for every operator.
    pub fn new() -> Self {
        SqlAdapter {
            validator: Validator::all_operations(),
        }
    }

    /// An adapter restricted to some filter operators, for dialects that lack the others.
    pub fn with_operators(operators: impl IntoIterator<Item = Operator>) -> Self {
        let filters = operators.into_iter().map(OperationKey::Filter);
        SqlAdapter {
            validator: Validator::new(
                filters.chain([OperationKey::Sort, OperationKey::Page]),
            ),
        }
    }

    fn supports(&self, key: OperationKey) -> Result<(), Error> {
        if self.validator.supports(key) {
            Ok(())
        } else {
            Err(Error::UnsupportedOperator(key.to_string()))
        }
    }
}

impl Adapter for SqlAdapter {
    type QueryBuilder = sql::ast::Select;

    fn validator(&self) -> &Validator {
        &self.validator
    }

    fn filter<'q>(
        &self,
        query: &'q mut sql::ast::Select,
        spec: &FilterSpec,
    ) -> Result<&'q mut sql::ast::Select, Error> {
        self.supports(OperationKey::Filter(spec.operator))?;
        let predicate = translate_filter(spec)?;
        sql::helpers::and_where(query, predicate);
        Ok(query)
    }

    fn sort<'q>(
        &self,
        query: &'q mut sql::ast::Select,
        spec: &SortSpec,
    ) -> Result<&'q mut sql::ast::Select, Error> {
        self.supports(OperationKey::Sort)?;
        query.order_by.elements.push(sql::ast::OrderByElement {
            target: sql::helpers::column(spec.field.as_str()),
            direction: match spec.order {
                OrderDirection::Asc => sql::ast::OrderByDirection::Asc,
                OrderDirection::Desc => sql::ast::OrderByDirection::Desc,
            },
        });
        Ok(query)
    }

    fn page<'q>(
        &self,
        query: &'q mut sql::ast::Select,
        spec: &PageSpec,
    ) -> Result<&'q mut sql::ast::Select, Error> {
        self.supports(OperationKey::Page)?;
        query.limit = sql::ast::Limit {
            limit: Some(spec.size),
            offset: Some(spec.offset),
        };
        Ok(query)
    }
}

/// Build the predicate for a single filter.
fn translate_filter(spec: &FilterSpec) -> Result<sql::ast::Expression, Error> {
    let column = || Box::new(sql::helpers::column(spec.field.as_str()));
    let binary = |operator| -> Result<sql::ast::Expression, Error> {
        Ok(sql::ast::Expression::BinaryOperation {
            left: column(),
            operator,
            right: Box::new(translate_json_expression(&spec.value)?),
        })
    };

    match spec.operator {
        Operator::Equals => binary(sql::ast::BinaryOperator::Equals),
        Operator::NotEquals => binary(sql::ast::BinaryOperator::NotEquals),
        Operator::LessOrGreater => binary(sql::ast::BinaryOperator::LessOrGreater),
        Operator::GreaterThan => binary(sql::ast::BinaryOperator::GreaterThan),
        Operator::GreaterThanOrEqualTo => binary(sql::ast::BinaryOperator::GreaterThanOrEqualTo),
        Operator::LessThan => binary(sql::ast::BinaryOperator::LessThan),
        Operator::LessThanOrEqualTo => binary(sql::ast::BinaryOperator::LessThanOrEqualTo),
        Operator::Like => binary(sql::ast::BinaryOperator::Like),
        Operator::NotLike => binary(sql::ast::BinaryOperator::NotLike),
        Operator::CaseInsensitiveLike => binary(sql::ast::BinaryOperator::CaseInsensitiveLike),
        Operator::NotCaseInsensitiveLike => {
            binary(sql::ast::BinaryOperator::NotCaseInsensitiveLike)
        }
        Operator::Is | Operator::IsNot => Ok(sql::ast::Expression::UnaryOperation {
            expression: column(),
            operator: if spec.operator == Operator::Is {
                sql::ast::UnaryOperator::IsNull
            } else {
                sql::ast::UnaryOperator::IsNotNull
            },
        }),
        Operator::In | Operator::NotIn => {
            let items = array_items(spec)?;
            // `in ()` is not valid SQL: nothing is in an empty list, everything is outside it
            if items.is_empty() {
                return Ok(sql::helpers::constant_condition(
                    spec.operator == Operator::NotIn,
                ));
            }
            Ok(sql::ast::Expression::BinaryArrayOperation {
                left: column(),
                operator: if spec.operator == Operator::In {
                    sql::ast::BinaryArrayOperator::In
                } else {
                    sql::ast::BinaryArrayOperator::NotIn
                },
                right: items
                    .iter()
                    .map(translate_json_expression)
                    .collect::<Result<Vec<_>, _>>()?,
            })
        }
        Operator::Between | Operator::NotBetween => match array_items(spec)? {
            [low, high, ..] => Ok(sql::ast::Expression::Between {
                expression: column(),
                negated: spec.operator == Operator::NotBetween,
                low: Box::new(translate_json_expression(low)?),
                high: Box::new(translate_json_expression(high)?),
            }),
            _ => Err(Error::NotSupported(format!(
                "'{}' with fewer than two bounds",
                spec.operator
            ))),
        },
    }
}

fn array_items(spec: &FilterSpec) -> Result<&[serde_json::Value], Error> {
    spec.value.as_array().map(Vec::as_slice).ok_or_else(|| {
        Error::NotSupported(format!("'{}' with a non-array value", spec.operator))
    })
}
