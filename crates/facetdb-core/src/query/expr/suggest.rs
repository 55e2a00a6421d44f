use crate::{error::Error, schema::Schema, value::Value};

/// Suggestions returned per completion request.
const SUGGESTION_CAP: usize = 20;

///
/// UniqueValueSource
///
/// Minimal surface the suggester needs from a backend: the distinct value
/// set of one column. Failures degrade to an empty suggestion list; the
/// suggester never propagates them.
///

pub trait UniqueValueSource {
    fn unique_values(&mut self, column: &str) -> Result<Vec<Value>, Error>;
}

/// Complete the token under the cursor.
///
/// Mid-word: column names matching the fragment (substring,
/// case-insensitive). After a colon: distinct values of the named column,
/// filtered by the typed fragment and capped. Never errors.
#[must_use]
pub fn suggest<S: UniqueValueSource>(
    text: &str,
    cursor: usize,
    schema: &Schema,
    source: &mut S,
) -> Vec<String> {
    let cursor = floor_char_boundary(text, cursor.min(text.len()));
    let token = token_before_cursor(&text[..cursor]);
    if token.is_empty() {
        return Vec::new();
    }

    match token.split_once(':') {
        Some((column, fragment)) => value_suggestions(column, fragment, source),
        None => column_suggestions(token, schema),
    }
}

fn column_suggestions(fragment: &str, schema: &Schema) -> Vec<String> {
    let fragment = fragment.to_lowercase();

    schema
        .column_names()
        .filter(|name| name.to_lowercase().contains(&fragment))
        .map(ToString::to_string)
        .take(SUGGESTION_CAP)
        .collect()
}

fn value_suggestions<S: UniqueValueSource>(
    column: &str,
    fragment: &str,
    source: &mut S,
) -> Vec<String> {
    let Ok(values) = source.unique_values(column) else {
        return Vec::new();
    };

    let fragment = fragment.to_lowercase();
    values
        .iter()
        .map(Value::render_text)
        .filter(|rendered| rendered.to_lowercase().contains(&fragment))
        .take(SUGGESTION_CAP)
        .collect()
}

// The maximal non-whitespace run ending at the cursor.
fn token_before_cursor(prefix: &str) -> &str {
    match prefix.char_indices().rfind(|(_, c)| c.is_whitespace()) {
        Some((pos, c)) => &prefix[pos + c.len_utf8()..],
        None => prefix,
    }
}

fn floor_char_boundary(text: &str, mut index: usize) -> usize {
    while index > 0 && !text.is_char_boundary(index) {
        index -= 1;
    }

    index
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        dataset::Row,
        error::EngineError,
        schema::infer_schema,
    };

    struct FixedSource(Result<Vec<Value>, ()>);

    impl UniqueValueSource for FixedSource {
        fn unique_values(&mut self, _column: &str) -> Result<Vec<Value>, Error> {
            match &self.0 {
                Ok(values) => Ok(values.clone()),
                Err(()) => Err(EngineError::new("backend unavailable").into()),
            }
        }
    }

    fn schema() -> crate::schema::Schema {
        let rows = vec![Row::from_pairs(vec![
            ("status".to_string(), Value::from("open")),
            ("salary".to_string(), Value::Int(1)),
            ("name".to_string(), Value::from("Ada")),
        ])];

        infer_schema(&rows)
    }

    #[test]
    fn mid_word_suggests_matching_columns() {
        let mut source = FixedSource(Ok(Vec::new()));
        let got = suggest("sa", 2, &schema(), &mut source);

        assert_eq!(got, vec!["salary".to_string()]);
    }

    #[test]
    fn column_match_is_substring_and_case_insensitive() {
        let mut source = FixedSource(Ok(Vec::new()));
        let got = suggest("TAT", 3, &schema(), &mut source);

        assert_eq!(got, vec!["status".to_string()]);
    }

    #[test]
    fn open_colon_suggests_column_values() {
        let mut source = FixedSource(Ok(vec![
            Value::from("open"),
            Value::from("closed"),
            Value::from("review"),
        ]));
        let got = suggest("status:ed", 9, &schema(), &mut source);

        assert_eq!(got, vec!["closed".to_string()]);
    }

    #[test]
    fn backend_failure_degrades_to_empty() {
        let mut source = FixedSource(Err(()));
        let got = suggest("status:", 7, &schema(), &mut source);

        assert!(got.is_empty());
    }

    #[test]
    fn value_suggestions_are_capped() {
        let values = (0..50).map(|i| Value::from(format!("v{i}"))).collect();
        let mut source = FixedSource(Ok(values));
        let got = suggest("status:", 7, &schema(), &mut source);

        assert_eq!(got.len(), 20);
    }
}
