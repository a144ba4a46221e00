//! The operators a client may use in a `filter` query, and the sort directions.

use std::fmt;

use enum_iterator::Sequence;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// The comparison operators of the filter DSL.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Sequence,
    Serialize,
    Deserialize,
    JsonSchema,
)]
pub enum Operator {
    #[serde(rename = "=")]
    Equals,
    #[serde(rename = "!=")]
    NotEquals,
    #[serde(rename = "<>")]
    LessOrGreater,
    #[serde(rename = ">")]
    GreaterThan,
    #[serde(rename = ">=")]
    GreaterThanOrEqualTo,
    #[serde(rename = "<")]
    LessThan,
    #[serde(rename = "<=")]
    LessThanOrEqualTo,
    #[serde(rename = "is")]
    Is,
    #[serde(rename = "is not")]
    IsNot,
    #[serde(rename = "in")]
    In,
    #[serde(rename = "not in")]
    NotIn,
    #[serde(rename = "like")]
    Like,
    #[serde(rename = "not like")]
    NotLike,
    #[serde(rename = "ilike")]
    CaseInsensitiveLike,
    #[serde(rename = "not ilike")]
    NotCaseInsensitiveLike,
    #[serde(rename = "between")]
    Between,
    #[serde(rename = "not between")]
    NotBetween,
}

/// Operators grouped by the shape of value they accept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Sequence)]
pub enum OperatorClass {
    /// `=`, `!=`, `<>`
    Equality,
    /// `>`, `>=`, `<`, `<=`
    Comparison,
    /// `is`, `is not`
    NullCheck,
    /// `in`, `not in`
    SetMembership,
    /// `like`, `not like`, `ilike`, `not ilike`
    Pattern,
    /// `between`, `not between`
    Range,
}

impl Operator {
    /// The name of the operator as written in a query.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Equals => "=",
            Self::NotEquals => "!=",
            Self::LessOrGreater => "<>",
            Self::GreaterThan => ">",
            Self::GreaterThanOrEqualTo => ">=",
            Self::LessThan => "<",
            Self::LessThanOrEqualTo => "<=",
            Self::Is => "is",
            Self::IsNot => "is not",
            Self::In => "in",
            Self::NotIn => "not in",
            Self::Like => "like",
            Self::NotLike => "not like",
            Self::CaseInsensitiveLike => "ilike",
            Self::NotCaseInsensitiveLike => "not ilike",
            Self::Between => "between",
            Self::NotBetween => "not between",
        }
    }

    /// Look an operator up by the name used in queries.
    pub fn from_name(name: &str) -> Option<Self> {
        enum_iterator::all::<Self>().find(|operator| operator.name() == name)
    }

    pub fn class(&self) -> OperatorClass {
        match self {
            Self::Equals | Self::NotEquals | Self::LessOrGreater => OperatorClass::Equality,
            Self::GreaterThan
            | Self::GreaterThanOrEqualTo
            | Self::LessThan
            | Self::LessThanOrEqualTo => OperatorClass::Comparison,
            Self::Is | Self::IsNot => OperatorClass::NullCheck,
            Self::In | Self::NotIn => OperatorClass::SetMembership,
            Self::Like
            | Self::NotLike
            | Self::CaseInsensitiveLike
            | Self::NotCaseInsensitiveLike => OperatorClass::Pattern,
            Self::Between | Self::NotBetween => OperatorClass::Range,
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The direction of a sort.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Sequence, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum OrderDirection {
    Asc,
    Desc,
}

impl OrderDirection {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        enum_iterator::all::<Self>().find(|direction| direction.name() == name)
    }
}

impl fmt::Display for OrderDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
