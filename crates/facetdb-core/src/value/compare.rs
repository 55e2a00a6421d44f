//! Canonical comparison policy shared by predicate evaluation and sorting.
//!
//! One policy table governs every operator in both executors: numeric
//! values compare numerically (Int and Float interchangeably), text
//! compares lexicographically, booleans as `false < true`. Every other
//! pairing is undefined and degrades to a non-match, never an error.

use crate::value::Value;
use std::cmp::Ordering;

///
/// TextMode
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TextMode {
    Cs, // case-sensitive
    Ci, // case-insensitive
}

/// Typed equality under the canonical policy.
///
/// Returns `None` when the pairing is undefined (cross-family, Null, List).
#[must_use]
pub(crate) fn compare_eq(left: &Value, right: &Value) -> Option<bool> {
    match (left, right) {
        (Value::Bool(a), Value::Bool(b)) => Some(a == b),
        (Value::Text(a), Value::Text(b)) => Some(a == b),
        _ => {
            if left.is_numeric() && right.is_numeric() {
                return Some(numeric_cmp(left, right) == Ordering::Equal);
            }

            None
        }
    }
}

/// Typed ordering under the canonical policy.
///
/// Returns `None` when the pairing is undefined (cross-family, Null, List).
#[must_use]
pub(crate) fn compare_order(left: &Value, right: &Value) -> Option<Ordering> {
    match (left, right) {
        (Value::Bool(a), Value::Bool(b)) => Some(a.cmp(b)),
        (Value::Text(a), Value::Text(b)) => Some(a.cmp(b)),
        _ => {
            if left.is_numeric() && right.is_numeric() {
                return Some(numeric_cmp(left, right));
            }

            None
        }
    }
}

/// Total comparator over all variants: rank order across families
/// (Null < Bool < numeric < Text < List), policy order within one.
///
/// Sorting and unique-value listings need a total order; filter predicates
/// never use this (cross-family filters are non-matches, not orderings).
#[must_use]
pub(crate) fn canonical_cmp(left: &Value, right: &Value) -> Ordering {
    let rank = left.canonical_rank().cmp(&right.canonical_rank());
    if rank != Ordering::Equal {
        return rank;
    }

    match (left, right) {
        (Value::Null, Value::Null) => Ordering::Equal,
        (Value::Bool(a), Value::Bool(b)) => a.cmp(b),
        (Value::Text(a), Value::Text(b)) => a.cmp(b),
        (Value::List(a), Value::List(b)) => {
            for (x, y) in a.iter().zip(b.iter()) {
                let ord = canonical_cmp(x, y);
                if ord != Ordering::Equal {
                    return ord;
                }
            }
            a.len().cmp(&b.len())
        }
        _ => numeric_cmp(left, right),
    }
}

/// Substring containment after stringifying both sides.
///
/// Always defined: any value renders to text, so `LIKE`/`ILIKE` never
/// degrade the way typed comparisons do.
#[must_use]
pub(crate) fn text_contains(haystack: &Value, needle: &Value, mode: TextMode) -> bool {
    let hay = fold(haystack.render_text(), mode);
    let needle = fold(needle.render_text(), mode);

    hay.contains(needle.as_str())
}

fn fold(s: String, mode: TextMode) -> String {
    match mode {
        TextMode::Cs => s,
        TextMode::Ci => s.to_lowercase(),
    }
}

// Same-variant pairs compare exactly; mixed Int/Float pairs go through
// f64, where i64 magnitudes beyond 2^53 lose precision. Acceptable for
// grid cell data.
#[allow(clippy::cast_precision_loss)]
fn numeric_cmp(left: &Value, right: &Value) -> Ordering {
    match (left, right) {
        (Value::Int(a), Value::Int(b)) => a.cmp(b),
        (Value::Float(a), Value::Float(b)) => a.cmp(b),
        (Value::Int(a), Value::Float(b)) => (*a as f64).total_cmp(&b.get()),
        (Value::Float(a), Value::Int(b)) => a.get().total_cmp(&(*b as f64)),
        _ => unreachable!("numeric_cmp callers must pass numeric values"),
    }
}
