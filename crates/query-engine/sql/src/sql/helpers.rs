//! Helpers for building sql::ast types in certain shapes and patterns.

use super::ast::*;

// Empty clauses //

/// An empty `WHERE` clause.
pub fn empty_where() -> Expression {
    Expression::Value(Value::Bool(true))
}

/// An empty `ORDER BY` clause.
pub fn empty_order_by() -> OrderBy {
    OrderBy { elements: vec![] }
}

/// Empty `LIMIT` and `OFFSET` clauses.
pub fn empty_limit() -> Limit {
    Limit {
        limit: None,
        offset: None,
    }
}

/// A `true` expression.
pub fn true_expr() -> Expression {
    Expression::Value(Value::Bool(true))
}

/// `1 = 1` when `holds`, `1 = 0` otherwise. Stands in for predicates over an empty list.
pub fn constant_condition(holds: bool) -> Expression {
    Expression::BinaryOperation {
        left: Box::new(Expression::Value(Value::Int8(1))),
        operator: BinaryOperator::Equals,
        right: Box::new(Expression::Value(Value::Int8(i64::from(holds)))),
    }
}

// Names //

/// Reference a table by name, without a schema qualifier.
pub fn table_reference(name: impl Into<String>) -> TableReference {
    TableReference::DBTable {
        schema: None,
        table: TableName(name.into()),
    }
}

/// Build a column expression.
pub fn column(name: impl Into<String>) -> Expression {
    Expression::ColumnName(ColumnName(name.into()))
}

// SELECTs //

/// Build a simple select *
pub fn star_select(from: From) -> Select {
    Select {
        select_list: SelectList::SelectStar,
        from: Some(from),
        where_: Where(empty_where()),
        order_by: empty_order_by(),
        limit: empty_limit(),
    }
}

/// `select * from "<table>"`, the starting point for the query-string adapters.
pub fn select_from_table(name: impl Into<String>) -> Select {
    star_select(From::Table {
        reference: table_reference(name),
    })
}

/// Conjoin an expression to the `WHERE` clause of a select.
///
/// The first predicate replaces the empty `true` clause, later ones are chained
/// with `AND` in the order they were added.
pub fn and_where(select: &mut Select, expression: Expression) {
    let Where(current) = std::mem::replace(&mut select.where_, Where(empty_where()));
    select.where_ = if current == true_expr() {
        Where(expression)
    } else {
        Where(Expression::And {
            left: Box::new(current),
            right: Box::new(expression),
        })
    };
}
