use crate::{
    dataset::Row,
    query::{SortDirection, SortRule},
    value::Value,
};
use std::cmp::Ordering;

// Null sorts before any value under ascending order; a missing column
// behaves like a null cell.
static NULL: Value = Value::Null;

/// Stable multi-key sort.
///
/// Earlier rules take precedence; equal-key rows keep their original
/// relative order across all sort levels (`sort_by` is stable), which is
/// the tie-break contract callers rely on.
pub(crate) fn apply_sort(rows: &mut [&Row], sort: &[SortRule]) {
    if sort.is_empty() {
        return;
    }

    rows.sort_by(|left, right| compare_rows(left, right, sort));
}

fn compare_rows(left: &Row, right: &Row, sort: &[SortRule]) -> Ordering {
    for rule in sort {
        let a = left.get(&rule.column).unwrap_or(&NULL);
        let b = right.get(&rule.column).unwrap_or(&NULL);

        let ord = match rule.direction {
            SortDirection::Asc => Value::cmp_canonical(a, b),
            SortDirection::Desc => Value::cmp_canonical(b, a),
        };
        if ord != Ordering::Equal {
            return ord;
        }
    }

    Ordering::Equal
}
