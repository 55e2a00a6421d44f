//! Transform-to-SQL rendering.
//!
//! Every clause validates its column references against the loaded schema
//! before generating text, and mirrors the native executor's operator
//! semantics: undefined shapes render as constant predicates (`FALSE` for
//! unsatisfiable, `TRUE` for unknown operators) instead of erroring.

use crate::{
    ident::{ensure_column, quote_ident},
    literal::{quote_text, render_literal, render_literal_list},
};
use facetdb_core::{
    error::ConfigError,
    query::{CanonicalFilter, Operator, PageWindow, SortDirection, SortRule, TransformState},
    schema::Schema,
    value::Value,
};
use std::collections::BTreeSet;

///
/// SqlParts
///
/// Rendered clause fragments of one transform. Kept separate so the data
/// and COUNT(*) statements can share the WHERE clause verbatim.
///

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct SqlParts {
    pub where_clause: Option<String>,
    pub order_by: Option<String>,
    pub limit: Option<String>,
}

/// Render a transform into clause fragments against a loaded schema.
///
/// `list_columns` names the columns the engine reports as list-typed;
/// ALL-mode membership renders differently for them.
pub fn render_parts(
    transform: &TransformState,
    schema: &Schema,
    list_columns: &BTreeSet<String>,
) -> Result<SqlParts, ConfigError> {
    Ok(SqlParts {
        where_clause: render_where(&transform.filters, schema, list_columns)?,
        order_by: render_order_by(&transform.sort, schema)?,
        limit: transform.pagination.as_ref().map(render_limit),
    })
}

/// Assemble the data statement.
#[must_use]
pub fn select_statement(table: &str, parts: &SqlParts) -> String {
    let mut sql = format!("SELECT * FROM {}", quote_ident(table));

    if let Some(where_clause) = &parts.where_clause {
        sql.push_str(" WHERE ");
        sql.push_str(where_clause);
    }
    if let Some(order_by) = &parts.order_by {
        sql.push_str(" ORDER BY ");
        sql.push_str(order_by);
    }
    if let Some(limit) = &parts.limit {
        sql.push(' ');
        sql.push_str(limit);
    }

    sql
}

/// Assemble the parallel cardinality statement sharing the WHERE clause.
///
/// `total_count` must come from here, never from counting a paginated
/// result set.
#[must_use]
pub fn count_statement(table: &str, parts: &SqlParts) -> String {
    let mut sql = format!("SELECT COUNT(*) AS count FROM {}", quote_ident(table));

    if let Some(where_clause) = &parts.where_clause {
        sql.push_str(" WHERE ");
        sql.push_str(where_clause);
    }

    sql
}

fn render_where(
    filters: &[CanonicalFilter],
    schema: &Schema,
    list_columns: &BTreeSet<String>,
) -> Result<Option<String>, ConfigError> {
    if filters.is_empty() {
        return Ok(None);
    }

    let conditions = filters
        .iter()
        .map(|filter| render_condition(filter, schema, list_columns))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Some(conditions.join(" AND ")))
}

fn render_order_by(sort: &[SortRule], schema: &Schema) -> Result<Option<String>, ConfigError> {
    if sort.is_empty() {
        return Ok(None);
    }

    let keys = sort
        .iter()
        .map(|rule| {
            ensure_column(schema, &rule.column)?;
            let direction = match rule.direction {
                SortDirection::Asc => "ASC",
                SortDirection::Desc => "DESC",
            };

            Ok(format!("{} {direction}", quote_ident(&rule.column)))
        })
        .collect::<Result<Vec<_>, ConfigError>>()?;

    Ok(Some(keys.join(", ")))
}

fn render_limit(window: &PageWindow) -> String {
    format!("LIMIT {} OFFSET {}", window.limit, window.offset)
}

fn render_condition(
    filter: &CanonicalFilter,
    schema: &Schema,
    list_columns: &BTreeSet<String>,
) -> Result<String, ConfigError> {
    ensure_column(schema, &filter.column)?;
    let column = quote_ident(&filter.column);
    let value = &filter.value;

    let sql = match &filter.operator {
        Operator::Eq => format!("{column} = {}", render_literal(value)),
        Operator::Ne => format!("{column} != {}", render_literal(value)),
        Operator::Lt => format!("{column} < {}", render_literal(value)),
        Operator::Lte => format!("{column} <= {}", render_literal(value)),
        Operator::Gt => format!("{column} > {}", render_literal(value)),
        Operator::Gte => format!("{column} >= {}", render_literal(value)),

        Operator::Like => render_like(&column, value, "LIKE"),
        Operator::ILike => render_like(&column, value, "ILIKE"),

        Operator::In => render_in(&column, value),
        Operator::InAll => render_in_all(&column, value, list_columns.contains(&filter.column)),

        Operator::Between => render_between(&column, value),

        Operator::IsNull => format!("{column} IS NULL"),
        Operator::IsNotNull => format!("{column} IS NOT NULL"),

        // same permissive pass-through as the native path
        Operator::Unknown(_) => "TRUE".to_string(),
    };

    Ok(sql)
}

// Substring semantics: the native path stringifies both sides, so the
// column is cast and the literal wrapped in wildcards.
fn render_like(column: &str, value: &Value, keyword: &str) -> String {
    let pattern = quote_text(&format!("%{}%", value.render_text()));

    format!("CAST({column} AS VARCHAR) {keyword} {pattern}")
}

fn render_in(column: &str, value: &Value) -> String {
    match value {
        Value::List(items) if items.is_empty() => "FALSE".to_string(),
        Value::List(items) => format!("{column} IN ({})", render_literal_list(items)),
        scalar => format!("{column} IN ({})", render_literal(scalar)),
    }
}

// ALL-mode membership: conjunction of per-value containment for a
// list-typed column; a scalar column is satisfiable only with exactly one
// required value.
fn render_in_all(column: &str, value: &Value, is_list_column: bool) -> String {
    let required: Vec<&Value> = match value {
        Value::List(items) => items.iter().collect(),
        scalar => vec![scalar],
    };

    if required.is_empty() {
        return "TRUE".to_string();
    }

    if is_list_column {
        return required
            .iter()
            .map(|item| format!("list_contains({column}, {})", render_literal(item)))
            .collect::<Vec<_>>()
            .join(" AND ");
    }

    match required.as_slice() {
        [single] => format!("{column} = {}", render_literal(single)),
        _ => "FALSE".to_string(),
    }
}

fn render_between(column: &str, value: &Value) -> String {
    match value.as_list() {
        Some([low, high]) => format!(
            "{column} BETWEEN {} AND {}",
            render_literal(low),
            render_literal(high)
        ),
        _ => "FALSE".to_string(),
    }
}

///
/// TESTS
///
