mod compare;
mod float;

#[cfg(test)]
mod tests;

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

// re-exports
pub use compare::TextMode;
pub use float::Float64;
pub(crate) use compare::{compare_eq, compare_order, text_contains};

///
/// Value
///
/// Closed cell-value representation shared by filter literals, sort keys,
/// and ingested rows.
///
/// Null → the cell is empty (i.e., SQL NULL).
/// List → multi-valued cell; order is preserved.
///
/// Date-typed columns keep their ISO-8601 text form: date-ness is schema
/// metadata, and ISO-8601 lexicographic order coincides with chronological
/// order.
///

#[derive(Clone, Debug, Eq, PartialEq, Deserialize, Serialize)]
#[serde(from = "serde_json::Value", into = "serde_json::Value")]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(Float64),
    Text(String),
    List(Vec<Self>),
}

impl Value {
    ///
    /// CONSTRUCTION
    ///

    /// Build a `Value::List` from owned items.
    ///
    /// This is the canonical constructor for query / DTO boundaries.
    #[must_use]
    pub fn from_list<T>(items: Vec<T>) -> Self
    where
        T: Into<Self>,
    {
        Self::List(items.into_iter().map(Into::into).collect())
    }

    /// Interpret a user-typed literal the way the filter language does:
    /// booleans and numbers by shape, everything else as text.
    #[must_use]
    pub fn from_literal(raw: &str) -> Self {
        match raw {
            "true" => return Self::Bool(true),
            "false" => return Self::Bool(false),
            "null" => return Self::Null,
            _ => {}
        }

        if let Ok(i) = raw.parse::<i64>() {
            return Self::Int(i);
        }
        if let Ok(f) = raw.parse::<f64>()
            && let Some(f) = Float64::try_new(f)
        {
            return Self::Float(f);
        }

        Self::Text(raw.to_string())
    }

    ///
    /// TYPES
    ///

    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    #[must_use]
    pub const fn is_numeric(&self) -> bool {
        matches!(self, Self::Int(_) | Self::Float(_))
    }

    #[must_use]
    pub const fn as_text(&self) -> Option<&str> {
        if let Self::Text(s) = self {
            Some(s.as_str())
        } else {
            None
        }
    }

    #[must_use]
    pub const fn as_list(&self) -> Option<&[Self]> {
        if let Self::List(xs) = self {
            Some(xs.as_slice())
        } else {
            None
        }
    }

    #[allow(clippy::cast_sign_loss)]
    #[must_use]
    pub const fn as_u64(&self) -> Option<u64> {
        match self {
            Self::Int(i) if *i >= 0 => Some(*i as u64),
            _ => None,
        }
    }

    /// Stable cross-variant rank used by the canonical comparator.
    #[must_use]
    pub(crate) const fn canonical_rank(&self) -> u8 {
        match self {
            Self::Null => 0,
            Self::Bool(_) => 1,
            Self::Int(_) | Self::Float(_) => 2,
            Self::Text(_) => 3,
            Self::List(_) => 4,
        }
    }

    ///
    /// TEXT
    ///

    /// Render this value the way text operators (`LIKE`, full-text) see it.
    #[must_use]
    pub fn render_text(&self) -> String {
        match self {
            Self::Null => String::new(),
            Self::Bool(b) => b.to_string(),
            Self::Int(i) => i.to_string(),
            Self::Float(f) => f.to_string(),
            Self::Text(s) => s.clone(),
            Self::List(items) => items
                .iter()
                .map(Self::render_text)
                .collect::<Vec<_>>()
                .join(","),
        }
    }

    /// Total canonical comparator used by sorting and unique-value surfaces.
    #[must_use]
    pub fn cmp_canonical(left: &Self, right: &Self) -> Ordering {
        compare::canonical_cmp(left, right)
    }
}

impl From<serde_json::Value> for Value {
    fn from(v: serde_json::Value) -> Self {
        match v {
            serde_json::Value::Null => Self::Null,
            serde_json::Value::Bool(b) => Self::Bool(b),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Self::Int(i)
                } else if let Some(f) = n.as_f64().and_then(Float64::try_new) {
                    Self::Float(f)
                } else {
                    // u64 beyond i64::MAX, or a non-finite float
                    Self::Text(n.to_string())
                }
            }
            serde_json::Value::String(s) => Self::Text(s),
            serde_json::Value::Array(items) => {
                Self::List(items.into_iter().map(Self::from).collect())
            }
            // cells are tabular scalars; nested objects keep their JSON form
            other @ serde_json::Value::Object(_) => Self::Text(other.to_string()),
        }
    }
}

impl From<Value> for serde_json::Value {
    fn from(v: Value) -> Self {
        match v {
            Value::Null => Self::Null,
            Value::Bool(b) => Self::Bool(b),
            Value::Int(i) => Self::from(i),
            Value::Float(f) => {
                serde_json::Number::from_f64(f.get()).map_or(Self::Null, Self::Number)
            }
            Value::Text(s) => Self::String(s),
            Value::List(items) => Self::Array(items.into_iter().map(Self::from).collect()),
        }
    }
}

macro_rules! impl_from_for {
    ( $( $type:ty => $variant:ident ),* $(,)? ) => {
        $(
            impl From<$type> for Value {
                fn from(v: $type) -> Self {
                    Self::$variant(v.into())
                }
            }
        )*
    };
}

impl_from_for! {
    bool   => Bool,
    i8     => Int,
    i16    => Int,
    i32    => Int,
    i64    => Int,
    u8     => Int,
    u16    => Int,
    u32    => Int,
    &str   => Text,
    String => Text,
}

impl From<u64> for Value {
    fn from(v: u64) -> Self {
        i64::try_from(v).map_or_else(|_| Self::Text(v.to_string()), Self::Int)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Float64::try_new(v).map_or(Self::Null, Self::Float)
    }
}

impl From<Vec<Self>> for Value {
    fn from(vec: Vec<Self>) -> Self {
        Self::List(vec)
    }
}
