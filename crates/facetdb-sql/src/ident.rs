use facetdb_core::{error::ConfigError, schema::Schema};

/// Double-quote an identifier, doubling internal quotes.
#[must_use]
pub fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

/// Validate a table name: word characters only, not digit-leading.
///
/// This runs before any statement is generated; an invalid name is a
/// configuration error, never rewritten into something quotable.
pub fn validate_table_ident(table: &str) -> Result<(), ConfigError> {
    let mut chars = table.chars();
    let valid_head = chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_');
    let valid_tail = chars.all(|c| c.is_ascii_alphanumeric() || c == '_');

    if valid_head && valid_tail {
        Ok(())
    } else {
        Err(ConfigError::InvalidTableIdent {
            table: table.to_string(),
        })
    }
}

/// Require a column to exist in the loaded schema.
///
/// The primary injection boundary for user-controlled column references:
/// anything outside the schema is rejected before SQL generation.
pub(crate) fn ensure_column(schema: &Schema, column: &str) -> Result<(), ConfigError> {
    if schema.contains(column) {
        Ok(())
    } else {
        Err(ConfigError::UnknownColumn {
            column: column.to_string(),
        })
    }
}

///
/// TESTS
///
