//! The per-resource declaration of which query facets are enabled, which fields they may
//! touch, and what to use when a request leaves a facet out.

use std::collections::BTreeSet;

use schemars::JsonSchema;
use serde::de::{self, Unexpected};
use serde::{Deserialize, Deserializer, Serialize};

use super::operators::OrderDirection;

pub const DEFAULT_PAGE_SIZE: u64 = 20;
pub const DEFAULT_PAGE_NUMBER: u64 = 1;

/// The query facets a resource exposes.
#[derive(Clone, PartialEq, Debug, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Schema {
    #[serde(default)]
    pub filter: FilterSchema,
    #[serde(default)]
    pub sort: SortSchema,
    #[serde(default)]
    pub page: PageSchema,
}

impl Schema {
    /// A schema with every facet switched off.
    pub fn disabled() -> Self {
        Schema {
            filter: FilterSchema {
                is_enabled: false,
                ..FilterSchema::default()
            },
            sort: SortSchema {
                is_enabled: false,
                ..SortSchema::default()
            },
            page: PageSchema {
                is_enabled: false,
                ..PageSchema::default()
            },
        }
    }
}

/// Which fields a facet may reference. `None` leaves the facet unrestricted.
#[derive(Clone, PartialEq, Eq, Debug, Default, Serialize, Deserialize, JsonSchema)]
pub struct Fields(pub Option<BTreeSet<String>>);

impl Fields {
    pub fn only<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Fields(Some(fields.into_iter().map(Into::into).collect()))
    }

    pub fn permits(&self, field: &str) -> bool {
        match &self.0 {
            None => true,
            Some(fields) => fields.contains(field),
        }
    }
}

/// Filtering.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct FilterSchema {
    #[serde(default = "enabled")]
    pub is_enabled: bool,
    #[serde(default)]
    pub fields: Fields,
    /// Used when the request has no `filter`, in the same `{field: {operator: value}}`
    /// shape as a request.
    #[serde(default)]
    pub default: serde_json::Map<String, serde_json::Value>,
}

impl Default for FilterSchema {
    fn default() -> Self {
        FilterSchema {
            is_enabled: true,
            fields: Fields::default(),
            default: serde_json::Map::new(),
        }
    }
}

/// A single field of a default sort.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize, JsonSchema)]
pub struct SortField {
    pub field: String,
    pub order: OrderDirection,
}

/// Sorting.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SortSchema {
    #[serde(default = "enabled")]
    pub is_enabled: bool,
    #[serde(default)]
    pub fields: Fields,
    /// Used when the request has no `sort`.
    #[serde(default)]
    pub default: Vec<SortField>,
}

impl Default for SortSchema {
    fn default() -> Self {
        SortSchema {
            is_enabled: true,
            fields: Fields::default(),
            default: vec![],
        }
    }
}

/// Pagination.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct PageSchema {
    #[serde(default = "enabled")]
    pub is_enabled: bool,
    /// Rows per page. At least 1.
    #[serde(default = "default_page_size", deserialize_with = "positive")]
    #[schemars(range(min = 1))]
    pub default_size: u64,
    /// The 1-based page used when the request has no `page`.
    #[serde(default = "default_page_number", deserialize_with = "positive")]
    #[schemars(range(min = 1))]
    pub default_number: u64,
}

impl Default for PageSchema {
    fn default() -> Self {
        PageSchema {
            is_enabled: true,
            default_size: DEFAULT_PAGE_SIZE,
            default_number: DEFAULT_PAGE_NUMBER,
        }
    }
}

fn enabled() -> bool {
    true
}

fn default_page_size() -> u64 {
    DEFAULT_PAGE_SIZE
}

fn default_page_number() -> u64 {
    DEFAULT_PAGE_NUMBER
}

fn positive<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
    match u64::deserialize(deserializer)? {
        0 => Err(de::Error::invalid_value(
            Unexpected::Unsigned(0),
            &"a positive integer",
        )),
        value => Ok(value),
    }
}
