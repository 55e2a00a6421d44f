//! SQL backend for FacetDB: statement rendering with identifier/value
//! escaping, the engine port, and the SQL-backed provider.
//!
//! The renderer is the injection boundary: identifiers are validated
//! against the loaded schema and rejected (never sanitized) before any
//! clause is generated.

mod engine;
mod ident;
mod literal;
mod provider;
mod render;

pub use engine::{schema_from_describe, SqlEngine};
pub use ident::{quote_ident, validate_table_ident};
pub use provider::{SqlConfig, SqlProvider};
pub use render::{count_statement, render_parts, select_statement, SqlParts};
