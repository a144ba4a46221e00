//! Handle the translation of literal values.

use super::error::Error;
use query_engine_sql::sql;

/// Convert a JSON value into a SQL value.
pub fn translate_json_value(value: &serde_json::Value) -> Result<sql::ast::Value, Error> {
    match value {
        // numbers
        serde_json::Value::Number(num) => match num.as_i64() {
            Some(int) => Ok(sql::ast::Value::Int8(int)),
            None => num
                .as_f64()
                .map(sql::ast::Value::Float8)
                .ok_or_else(|| Error::NotSupported(format!("the number {num}"))),
        },

        // booleans
        serde_json::Value::Bool(b) => Ok(sql::ast::Value::Bool(*b)),

        // strings
        serde_json::Value::String(s) => Ok(sql::ast::Value::String(s.to_string())),

        // null
        serde_json::Value::Null => Ok(sql::ast::Value::Null),

        // not supported
        serde_json::Value::Array(_) => Err(Error::NotSupported("nested array values".to_string())),
        serde_json::Value::Object(_) => Err(Error::NotSupported("object values".to_string())),
    }
}

/// Convert a JSON value into a SQL value expression.
pub fn translate_json_expression(
    value: &serde_json::Value,
) -> Result<sql::ast::Expression, Error> {
    translate_json_value(value).map(sql::ast::Expression::Value)
}
