use crate::{
    dataset::Row,
    query::{CanonicalFilter, Operator},
    value::{compare_eq, compare_order, text_contains, TextMode, Value},
};
use std::cmp::Ordering;

///
/// FieldPresence
///
/// Result of reading one cell during predicate evaluation, distinguishing
/// a missing column from a present-but-null cell.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum FieldPresence {
    Present(Value),
    Missing,
}

fn field(row: &Row, column: &str) -> FieldPresence {
    match row.get(column) {
        Some(value) => FieldPresence::Present(value.clone()),
        None => FieldPresence::Missing,
    }
}

///
/// Evaluate one canonical filter against one row.
///
/// Pure runtime evaluation: no schema access, no validation. The filter
/// language is user-typed, so every undefined comparison is a non-match
/// and an unrecognized operator passes every row (the filter has no
/// effect rather than erroring).
///
#[must_use]
pub fn filter_matches(row: &Row, filter: &CanonicalFilter) -> bool {
    // Nullity operators see the cell before the missing-field bailout:
    // an absent column counts as null.
    match filter.operator {
        Operator::IsNull => return is_null_cell(row, &filter.column),
        Operator::IsNotNull => return !is_null_cell(row, &filter.column),
        Operator::Unknown(_) => return true,
        _ => {}
    }

    let FieldPresence::Present(actual) = field(row, &filter.column) else {
        return false;
    };

    // Comparison helpers return None when a pairing is undefined;
    // evaluation treats that as a non-match.
    match &filter.operator {
        Operator::Eq => eq_with_membership(&actual, &filter.value).unwrap_or(false),
        Operator::Ne => eq_with_membership(&actual, &filter.value).is_some_and(|v| !v),

        Operator::Lt => order_scalar(&actual, &filter.value).is_some_and(Ordering::is_lt),
        Operator::Lte => order_scalar(&actual, &filter.value).is_some_and(Ordering::is_le),
        Operator::Gt => order_scalar(&actual, &filter.value).is_some_and(Ordering::is_gt),
        Operator::Gte => order_scalar(&actual, &filter.value).is_some_and(Ordering::is_ge),

        Operator::Like => contains_text(&actual, &filter.value, TextMode::Cs),
        Operator::ILike => contains_text(&actual, &filter.value, TextMode::Ci),

        Operator::In => matches_any(&actual, &filter.value),
        Operator::InAll => matches_all(&actual, &filter.value),

        Operator::Between => between(&actual, &filter.value),

        Operator::IsNull | Operator::IsNotNull | Operator::Unknown(_) => {
            unreachable!("handled before field lookup")
        }
    }
}

fn is_null_cell(row: &Row, column: &str) -> bool {
    match field(row, column) {
        FieldPresence::Present(value) => value.is_null(),
        FieldPresence::Missing => true,
    }
}

/// Equality over a possibly list-valued cell: lists check membership,
/// scalars check typed equality.
fn eq_with_membership(actual: &Value, expected: &Value) -> Option<bool> {
    let Some(items) = actual.as_list() else {
        return compare_eq(actual, expected);
    };

    let mut saw_valid = false;
    for item in items {
        match compare_eq(item, expected) {
            Some(true) => return Some(true),
            Some(false) => saw_valid = true,
            None => {}
        }
    }

    saw_valid.then_some(false)
}

// Range operators are scalar-only; list cells are not orderable.
fn order_scalar(actual: &Value, expected: &Value) -> Option<Ordering> {
    if actual.as_list().is_some() {
        return None;
    }

    compare_order(actual, expected)
}

// Substring containment; a list cell matches when any element does.
fn contains_text(actual: &Value, needle: &Value, mode: TextMode) -> bool {
    match actual.as_list() {
        Some(items) => items.iter().any(|item| text_contains(item, needle, mode)),
        None => text_contains(actual, needle, mode),
    }
}

/// ANY membership: the cell (or any element of a list cell) equals any
/// element of the filter list. A scalar filter value acts as a
/// single-element list.
fn matches_any(actual: &Value, expected: &Value) -> bool {
    let needles = as_list_ref(expected);

    needles
        .iter()
        .any(|needle| eq_with_membership(actual, needle).unwrap_or(false))
}

/// ALL membership: every filter element is present in the list cell.
/// Against a scalar cell the condition is satisfiable only with exactly
/// one required value; two or more are unsatisfiable (both executors
/// agree on this).
fn matches_all(actual: &Value, expected: &Value) -> bool {
    let needles = as_list_ref(expected);
    if needles.is_empty() {
        return true;
    }

    match actual.as_list() {
        Some(items) => needles.iter().all(|needle| {
            items
                .iter()
                .any(|item| compare_eq(item, needle).unwrap_or(false))
        }),
        None => needles.len() == 1 && compare_eq(actual, needles[0]).unwrap_or(false),
    }
}

// Inclusive range against a two-element value list; any other shape is a
// non-match.
fn between(actual: &Value, bounds: &Value) -> bool {
    let Some([low, high]) = bounds.as_list().and_then(|items| match items {
        [low, high] => Some([low, high]),
        _ => None,
    }) else {
        return false;
    };

    order_scalar(actual, low).is_some_and(Ordering::is_ge)
        && order_scalar(actual, high).is_some_and(Ordering::is_le)
}

fn as_list_ref(value: &Value) -> Vec<&Value> {
    match value.as_list() {
        Some(items) => items.iter().collect(),
        None => vec![value],
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    fn row(pairs: &[(&str, Value)]) -> Row {
        Row::from_pairs(pairs.iter().map(|(k, v)| ((*k).to_string(), v.clone())))
    }

    fn filter(column: &str, operator: Operator, value: Value) -> CanonicalFilter {
        CanonicalFilter {
            column: column.to_string(),
            operator,
            value,
            mode: None,
        }
    }

    #[test]
    fn equality_uses_membership_on_list_cells() {
        let r = row(&[("tags", Value::from_list(vec!["rust", "db"]))]);

        assert!(filter_matches(
            &r,
            &filter("tags", Operator::Eq, Value::from("db"))
        ));
        assert!(!filter_matches(
            &r,
            &filter("tags", Operator::Eq, Value::from("go"))
        ));
    }

    #[test]
    fn type_mismatched_comparison_degrades_to_non_match() {
        let r = row(&[("salary", Value::Int(100_000))]);

        let mismatched = filter("salary", Operator::Gt, Value::from("high"));
        assert!(!filter_matches(&r, &mismatched));

        // Ne is a non-match too when the pairing is undefined
        let mismatched = filter("salary", Operator::Ne, Value::from("high"));
        assert!(!filter_matches(&r, &mismatched));
    }

    #[test]
    fn like_is_case_sensitive_and_ilike_is_not() {
        let r = row(&[("name", Value::from("Grace Hopper"))]);

        assert!(filter_matches(
            &r,
            &filter("name", Operator::Like, Value::from("Hopp"))
        ));
        assert!(!filter_matches(
            &r,
            &filter("name", Operator::Like, Value::from("hopp"))
        ));
        assert!(filter_matches(
            &r,
            &filter("name", Operator::ILike, Value::from("hopp"))
        ));
    }

    #[test]
    fn in_all_against_scalar_requires_exactly_one_value() {
        let r = row(&[("team", Value::from("Backend"))]);

        assert!(filter_matches(
            &r,
            &filter("team", Operator::InAll, Value::from_list(vec!["Backend"]))
        ));
        assert!(!filter_matches(
            &r,
            &filter(
                "team",
                Operator::InAll,
                Value::from_list(vec!["Backend", "Frontend"])
            )
        ));
    }

    #[test]
    fn in_all_requires_every_element_on_list_cells() {
        let r = row(&[("tags", Value::from_list(vec!["rust", "db", "cli"]))]);

        assert!(filter_matches(
            &r,
            &filter("tags", Operator::InAll, Value::from_list(vec!["db", "cli"]))
        ));
        assert!(!filter_matches(
            &r,
            &filter("tags", Operator::InAll, Value::from_list(vec!["db", "go"]))
        ));
    }

    #[test]
    fn between_is_inclusive_and_shape_checked() {
        let r = row(&[("age", Value::Int(30))]);

        assert!(filter_matches(
            &r,
            &filter("age", Operator::Between, Value::from_list(vec![30, 40]))
        ));
        assert!(!filter_matches(
            &r,
            &filter("age", Operator::Between, Value::from_list(vec![31, 40]))
        ));
        assert!(!filter_matches(
            &r,
            &filter("age", Operator::Between, Value::from_list(vec![1]))
        ));
    }

    #[test]
    fn nullity_treats_missing_columns_as_null() {
        let r = row(&[("a", Value::Null), ("b", Value::Int(1))]);

        assert!(filter_matches(&r, &filter("a", Operator::IsNull, Value::Null)));
        assert!(filter_matches(
            &r,
            &filter("missing", Operator::IsNull, Value::Null)
        ));
        assert!(filter_matches(
            &r,
            &filter("b", Operator::IsNotNull, Value::Null)
        ));
    }

    #[test]
    fn unknown_operators_pass_every_row() {
        let r = row(&[("a", Value::Int(1))]);
        let f = filter("a", Operator::Unknown("INVALID_OP".into()), Value::Int(9));

        assert!(filter_matches(&r, &f));
    }
}
