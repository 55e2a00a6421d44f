use facetdb_core::value::Value;

/// Render one value as a SQL literal.
///
/// Strings are single-quoted with internal quotes doubled; numbers and
/// booleans pass through; null renders as the `NULL` keyword; lists
/// render as a parenthesized literal list.
#[must_use]
pub(crate) fn render_literal(value: &Value) -> String {
    match value {
        Value::Null => "NULL".to_string(),
        Value::Bool(b) => if *b { "TRUE" } else { "FALSE" }.to_string(),
        Value::Int(i) => i.to_string(),
        Value::Float(f) => f.to_string(),
        Value::Text(s) => quote_text(s),
        Value::List(items) => format!("({})", render_literal_list(items)),
    }
}

/// Render list elements as a comma-separated literal sequence.
#[must_use]
pub(crate) fn render_literal_list(items: &[Value]) -> String {
    items
        .iter()
        .map(render_literal)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Single-quote a string, doubling internal quotes.
#[must_use]
pub(crate) fn quote_text(s: &str) -> String {
    format!("'{}'", s.replace('\'', "''"))
}

///
/// TESTS
///
