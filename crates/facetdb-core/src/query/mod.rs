//! Backend-agnostic query representation.
//!
//! `TransformState` is the intermediate form both executors consume:
//! canonical filters (post ANY/ALL grouping), ordered sort rules, and an
//! optional pagination window. It is pure data, recomputed on every query,
//! and reproducible by construction from the same filter list.

pub mod expr;
mod predicate;
mod transform;

pub use predicate::{filter_matches, FieldPresence};
pub use transform::{build_transform, FilterEntry, Pagination};

use crate::value::Value;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

///
/// Operator
///
/// Closed operator set with an explicit `Unknown` case: the filter
/// language is user-typed, so an unrecognized operator must stay
/// representable and evaluate as a no-op rather than fall into a generic
/// default branch.
///

#[remain::sorted]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Operator {
    Between,
    Eq,
    Gt,
    Gte,
    ILike,
    In,
    InAll,
    IsNotNull,
    IsNull,
    Like,
    Lt,
    Lte,
    Ne,
    Unknown(String),
}

impl Operator {
    /// Parse one operator token; anything unrecognized becomes `Unknown`
    /// and round-trips verbatim.
    #[must_use]
    pub fn from_token(token: &str) -> Self {
        match token {
            "=" => Self::Eq,
            "!=" => Self::Ne,
            "<" => Self::Lt,
            "<=" => Self::Lte,
            ">" => Self::Gt,
            ">=" => Self::Gte,
            "~" | "LIKE" => Self::Like,
            "ILIKE" => Self::ILike,
            "in" | "IN" => Self::In,
            "in_all" => Self::InAll,
            "BETWEEN" => Self::Between,
            "IS NULL" => Self::IsNull,
            "IS NOT NULL" => Self::IsNotNull,
            other => Self::Unknown(other.to_string()),
        }
    }

    /// Canonical token form.
    #[must_use]
    pub fn as_token(&self) -> &str {
        match self {
            Self::Between => "BETWEEN",
            Self::Eq => "=",
            Self::Gt => ">",
            Self::Gte => ">=",
            Self::ILike => "ILIKE",
            Self::In => "in",
            Self::InAll => "in_all",
            Self::IsNotNull => "IS NOT NULL",
            Self::IsNull => "IS NULL",
            Self::Like => "LIKE",
            Self::Lt => "<",
            Self::Lte => "<=",
            Self::Ne => "!=",
            Self::Unknown(raw) => raw,
        }
    }
}

impl std::fmt::Display for Operator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_token())
    }
}

impl Serialize for Operator {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_token())
    }
}

impl<'de> Deserialize<'de> for Operator {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let token = String::deserialize(deserializer)?;

        Ok(Self::from_token(&token))
    }
}

///
/// FilterMode
///
/// Disjunctive vs conjunctive grouping when several filter entries target
/// the same column.
///

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum FilterMode {
    #[default]
    Any,
    All,
}

///
/// CanonicalFilter
///
/// Post-grouping representation of one column's condition; multi-entry
/// columns arrive here already collapsed to `in` / `in_all` with a list
/// value.
///

#[derive(Clone, Debug, Eq, PartialEq, Deserialize, Serialize)]
pub struct CanonicalFilter {
    pub column: String,
    pub operator: Operator,
    pub value: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<FilterMode>,
}

///
/// SortDirection
///

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

///
/// SortRule
///
/// One sort level; earlier rules take precedence, ties fall through to
/// later rules and finally to original record order.
///

#[derive(Clone, Debug, Eq, PartialEq, Deserialize, Serialize)]
pub struct SortRule {
    pub column: String,
    pub direction: SortDirection,
}

impl SortRule {
    #[must_use]
    pub fn asc(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            direction: SortDirection::Asc,
        }
    }

    #[must_use]
    pub fn desc(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            direction: SortDirection::Desc,
        }
    }
}

///
/// PageWindow
///
/// Executor-facing pagination window. Absence means "return all rows".
///

#[derive(Clone, Copy, Debug, Eq, PartialEq, Deserialize, Serialize)]
pub struct PageWindow {
    pub limit: u32,
    pub offset: u32,
}

///
/// TransformState
///

#[derive(Clone, Debug, Default, Eq, PartialEq, Deserialize, Serialize)]
pub struct TransformState {
    pub filters: Vec<CanonicalFilter>,
    pub sort: Vec<SortRule>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pagination: Option<PageWindow>,
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn operator_tokens_round_trip() {
        for token in [
            "=", "!=", "<", "<=", ">", ">=", "LIKE", "ILIKE", "in", "in_all", "BETWEEN",
            "IS NULL", "IS NOT NULL",
        ] {
            let op = Operator::from_token(token);
            assert_eq!(op.as_token(), token, "token {token} must round-trip");
            assert!(!matches!(op, Operator::Unknown(_)));
        }
    }

    #[test]
    fn unknown_operators_round_trip_verbatim() {
        let op = Operator::from_token("INVALID_OP");
        assert_eq!(op, Operator::Unknown("INVALID_OP".to_string()));
        assert_eq!(op.as_token(), "INVALID_OP");
    }

    #[test]
    fn transform_state_matches_the_wire_shape() {
        let state = TransformState {
            filters: vec![CanonicalFilter {
                column: "status".into(),
                operator: Operator::In,
                value: Value::from_list(vec!["open", "closed"]),
                mode: Some(FilterMode::Any),
            }],
            sort: vec![SortRule::desc("salary")],
            pagination: Some(PageWindow {
                limit: 50,
                offset: 100,
            }),
        };

        let json = serde_json::to_value(&state).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "filters": [{
                    "column": "status",
                    "operator": "in",
                    "value": ["open", "closed"],
                    "mode": "ANY",
                }],
                "sort": [{"column": "salary", "direction": "desc"}],
                "pagination": {"limit": 50, "offset": 100},
            })
        );

        let back: TransformState = serde_json::from_value(json).unwrap();
        assert_eq!(back, state);
    }
}
