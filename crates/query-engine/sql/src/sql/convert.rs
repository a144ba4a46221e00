//! Convert a SQL AST to a low-level SQL string.

use super::ast::*;
use super::helpers;
use super::string::*;

use std::fmt;

// Convert to SQL strings

impl Select {
    pub fn to_sql(&self, sql: &mut SQL) {
        sql.append_syntax("select ");

        self.select_list.to_sql(sql);

        if let Some(from) = &self.from {
            sql.append_syntax(" ");
            from.to_sql(sql);
        }

        self.where_.to_sql(sql);

        self.order_by.to_sql(sql);

        self.limit.to_sql(sql);
    }

    /// Render with string literals as positional parameters.
    pub fn query_sql(&self) -> SQL {
        let mut sql = SQL::new();
        self.to_sql(&mut sql);
        sql
    }
}

/// Render with string literals written inline, as a driver would see them interpolated.
impl fmt::Display for Select {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut sql = SQL::inline();
        self.to_sql(&mut sql);
        f.write_str(&sql.sql)
    }
}

impl SelectList {
    pub fn to_sql(&self, sql: &mut SQL) {
        match self {
            SelectList::SelectStar => {
                sql.append_syntax("*");
            }
            SelectList::Columns(columns) => {
                for (index, column) in columns.iter().enumerate() {
                    column.to_sql(sql);
                    if index < (columns.len() - 1) {
                        sql.append_syntax(", ");
                    }
                }
            }
        }
    }
}

impl From {
    pub fn to_sql(&self, sql: &mut SQL) {
        sql.append_syntax("from ");
        match &self {
            From::Table { reference } => reference.to_sql(sql),
        }
    }
}

impl Where {
    pub fn to_sql(&self, sql: &mut SQL) {
        let Where(expression) = self;
        if *expression != helpers::true_expr() {
            sql.append_syntax(" where ");
            expression.to_sql(sql);
        }
    }
}

impl OrderBy {
    pub fn to_sql(&self, sql: &mut SQL) {
        if !self.elements.is_empty() {
            sql.append_syntax(" order by ");
            for (index, order_by_item) in self.elements.iter().enumerate() {
                order_by_item.to_sql(sql);
                if index < (self.elements.len() - 1) {
                    sql.append_syntax(", ");
                }
            }
        }
    }
}

impl OrderByElement {
    pub fn to_sql(&self, sql: &mut SQL) {
        self.target.to_sql(sql);
        self.direction.to_sql(sql);
    }
}

impl OrderByDirection {
    pub fn to_sql(&self, sql: &mut SQL) {
        match self {
            OrderByDirection::Asc => sql.append_syntax(" asc"),
            OrderByDirection::Desc => sql.append_syntax(" desc"),
        }
    }
}

impl Limit {
    pub fn to_sql(&self, sql: &mut SQL) {
        if let Some(limit) = self.limit {
            sql.append_syntax(" limit ");
            sql.append_syntax(format!("{limit}").as_str());
        }
        if let Some(offset) = self.offset {
            sql.append_syntax(" offset ");
            sql.append_syntax(format!("{offset}").as_str());
        }
    }
}

// scalars
impl Expression {
    pub fn to_sql(&self, sql: &mut SQL) {
        match &self {
            Expression::ColumnName(column_name) => column_name.to_sql(sql),
            Expression::Value(value) => value.to_sql(sql),
            Expression::And { left, right } => {
                left.to_sql(sql);
                sql.append_syntax(" and ");
                right.to_sql(sql);
            }
            Expression::BinaryOperation {
                left,
                operator,
                right,
            } => {
                left.to_sql(sql);
                operator.to_sql(sql);
                right.to_sql(sql);
            }
            Expression::BinaryArrayOperation {
                left,
                operator,
                right,
            } => {
                left.to_sql(sql);
                operator.to_sql(sql);
                sql.append_syntax("(");
                for (index, item) in right.iter().enumerate() {
                    if index > 0 {
                        sql.append_syntax(", ");
                    }
                    item.to_sql(sql);
                }
                sql.append_syntax(")");
            }
            Expression::UnaryOperation {
                expression,
                operator,
            } => {
                expression.to_sql(sql);
                operator.to_sql(sql);
            }
            Expression::Between {
                expression,
                negated,
                low,
                high,
            } => {
                expression.to_sql(sql);
                if *negated {
                    sql.append_syntax(" not");
                }
                sql.append_syntax(" between ");
                low.to_sql(sql);
                sql.append_syntax(" and ");
                high.to_sql(sql);
            }
        }
    }
}

impl BinaryOperator {
    pub fn to_sql(&self, sql: &mut SQL) {
        match self {
            BinaryOperator::Equals => sql.append_syntax(" = "),
            BinaryOperator::NotEquals => sql.append_syntax(" != "),
            BinaryOperator::LessOrGreater => sql.append_syntax(" <> "),
            BinaryOperator::GreaterThan => sql.append_syntax(" > "),
            BinaryOperator::GreaterThanOrEqualTo => sql.append_syntax(" >= "),
            BinaryOperator::LessThan => sql.append_syntax(" < "),
            BinaryOperator::LessThanOrEqualTo => sql.append_syntax(" <= "),
            BinaryOperator::Like => sql.append_syntax(" like "),
            BinaryOperator::NotLike => sql.append_syntax(" not like "),
            BinaryOperator::CaseInsensitiveLike => sql.append_syntax(" ilike "),
            BinaryOperator::NotCaseInsensitiveLike => sql.append_syntax(" not ilike "),
        }
    }
}

impl BinaryArrayOperator {
    pub fn to_sql(&self, sql: &mut SQL) {
        match self {
            BinaryArrayOperator::In => sql.append_syntax(" in "),
            BinaryArrayOperator::NotIn => sql.append_syntax(" not in "),
        }
    }
}

impl UnaryOperator {
    pub fn to_sql(&self, sql: &mut SQL) {
        match self {
            UnaryOperator::IsNull => sql.append_syntax(" is null"),
            UnaryOperator::IsNotNull => sql.append_syntax(" is not null"),
        }
    }
}

impl Value {
    pub fn to_sql(&self, sql: &mut SQL) {
        match &self {
            Value::Int8(i) => sql.append_syntax(format!("{i}").as_str()),
            Value::Float8(n) => sql.append_syntax(format!("{n}").as_str()),
            Value::String(s) => sql.append_param(Param::String(s.clone())),
            Value::Bool(true) => sql.append_syntax("true"),
            Value::Bool(false) => sql.append_syntax("false"),
            Value::Null => sql.append_syntax("null"),
        }
    }
}

// names
impl TableReference {
    pub fn to_sql(&self, sql: &mut SQL) {
        match self {
            TableReference::DBTable { schema, table } => {
                if let Some(SchemaName(schema)) = schema {
                    sql.append_identifier(schema);
                    sql.append_syntax(".");
                }
                let TableName(table) = table;
                sql.append_identifier(table);
            }
        }
    }
}

impl ColumnName {
    pub fn to_sql(&self, sql: &mut SQL) {
        let ColumnName(name) = self;
        sql.append_identifier(name);
    }
}
