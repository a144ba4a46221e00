//! Build a [`RawQuery`] from a URL query string.
//!
//! Keys use bracket nesting: `filter[name][like]=%25a%25` becomes
//! `{"filter": {"name": {"like": "%a%"}}}`, and `a[]=1&a[]=2` (or a repeated `a=`)
//! collects an array. Values that read as `null`, a boolean or a number are typed as such;
//! everything else stays a string.

use percent_encoding::percent_decode_str;
use serde_json::map::Entry;
use serde_json::{Map, Value};

use super::querier::RawQuery;

pub fn parse_query_string(query: &str) -> RawQuery {
    let query = query.strip_prefix('?').unwrap_or(query);
    let mut raw_query = RawQuery::new();
    for pair in query.split('&').filter(|pair| !pair.is_empty()) {
        let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
        let key = decode(key);
        if key.is_empty() {
            continue;
        }
        let (root, path) = split_key(&key);
        assign(&mut raw_query, root, &path, coerce(&decode(value)));
    }
    raw_query
}

/// Percent-decode a key or value, reading `+` as a space.
fn decode(component: &str) -> String {
    let component = component.replace('+', " ");
    percent_decode_str(&component)
        .decode_utf8_lossy()
        .into_owned()
}

/// Split `root[a][b][]` into `root` and `["a", "b", ""]`. A key whose brackets do not
/// close is taken literally.
fn split_key(key: &str) -> (String, Vec<String>) {
    let Some(open) = key.find('[') else {
        return (key.to_string(), vec![]);
    };
    if open == 0 {
        return (key.to_string(), vec![]);
    }
    let mut path = vec![];
    let mut rest = &key[open..];
    while let Some(inner) = rest.strip_prefix('[') {
        let Some(close) = inner.find(']') else {
            return (key.to_string(), vec![]);
        };
        path.push(inner[..close].to_string());
        rest = &inner[close + 1..];
    }
    if !rest.is_empty() {
        return (key.to_string(), vec![]);
    }
    (key[..open].to_string(), path)
}

fn coerce(value: &str) -> Value {
    match value {
        "null" => Value::Null,
        "true" => Value::Bool(true),
        "false" => Value::Bool(false),
        _ => {
            if let Ok(int) = value.parse::<i64>() {
                Value::from(int)
            } else if let Some(number) = value
                .parse::<f64>()
                .ok()
                .and_then(serde_json::Number::from_f64)
                .filter(|_| looks_numeric(value))
            {
                Value::Number(number)
            } else {
                Value::String(value.to_string())
            }
        }
    }
}

/// Rust's float parser also accepts `inf`, `NaN` and the like; only plain decimals count.
fn looks_numeric(value: &str) -> bool {
    value
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '.' | '-' | '+' | 'e' | 'E'))
}

fn assign(target: &mut Map<String, Value>, key: String, path: &[String], value: Value) {
    match target.entry(key) {
        Entry::Vacant(entry) => {
            entry.insert(build(path, value));
        }
        Entry::Occupied(mut entry) => merge(entry.get_mut(), path, value),
    }
}

fn build(path: &[String], value: Value) -> Value {
    match path.split_first() {
        None => value,
        Some((segment, rest)) if segment.is_empty() => Value::Array(vec![build(rest, value)]),
        Some((segment, rest)) => {
            let mut object = Map::new();
            object.insert(segment.clone(), build(rest, value));
            Value::Object(object)
        }
    }
}

fn merge(existing: &mut Value, path: &[String], value: Value) {
    match (path.split_first(), existing) {
        (None, Value::Array(items)) => items.push(value),
        (None, existing) => {
            let previous = std::mem::take(existing);
            *existing = Value::Array(vec![previous, value]);
        }
        (Some((segment, rest)), Value::Array(items)) if segment.is_empty() => {
            items.push(build(rest, value));
        }
        (Some((segment, rest)), Value::Object(object)) if !segment.is_empty() => {
            assign(object, segment.clone(), rest, value);
        }
        (Some(_), existing) => *existing = build(path, value),
    }
}
