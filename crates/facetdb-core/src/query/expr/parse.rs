use crate::query::{expr::FilterBlock, Operator};

// Operator sigils in longest-match order. `=` is the implied default and
// always elided on output; `~` is the canonical spelling of LIKE.
const SIGILS: &[(&str, &str)] = &[
    ("LIKE", "LIKE"),
    (">=", ">="),
    ("<=", "<="),
    ("!=", "!="),
    ("IN", "IN"),
    ("~", "LIKE"),
    ("=", "="),
    (">", ">"),
    ("<", "<"),
];

/// Parse a search string into filter and full-text blocks.
///
/// Tokens are maximal non-whitespace runs. A token with an unescaped
/// colon is a filter (`key:value`, optional operator sigil on the value);
/// anything else is a full-text word. Column existence is not validated
/// here.
#[must_use]
pub fn parse(text: &str) -> Vec<FilterBlock> {
    text.split_whitespace()
        .filter_map(parse_token)
        .collect()
}

/// Serialize blocks back to the textual form.
///
/// Left inverse of [`parse`] for well-formed input without operator
/// ambiguity: `=` is elided, LIKE prints as `~`, everything else keeps
/// its token form.
#[must_use]
pub fn serialize(blocks: &[FilterBlock]) -> String {
    blocks
        .iter()
        .map(serialize_block)
        .collect::<Vec<_>>()
        .join(" ")
}

fn parse_token(token: &str) -> Option<FilterBlock> {
    let Some(colon) = unescaped_colon(token) else {
        return Some(FilterBlock::FullText {
            value: unescape(token),
            raw: token.to_string(),
        });
    };

    let column = &token[..colon];
    if column.is_empty() {
        // a token of only colons (or a leading colon) yields no block
        return None;
    }

    let rest = &token[colon + 1..];
    let (operator, value) = split_operator(rest);

    Some(FilterBlock::Filter {
        column: unescape(column),
        operator,
        value: value.to_string(),
        raw: token.to_string(),
    })
}

fn split_operator(rest: &str) -> (Operator, &str) {
    for (sigil, token) in SIGILS {
        if let Some(value) = rest.strip_prefix(sigil) {
            return (Operator::from_token(token), value);
        }
    }

    (Operator::Eq, rest)
}

fn serialize_block(block: &FilterBlock) -> String {
    match block {
        FilterBlock::Filter {
            column,
            operator,
            value,
            ..
        } => {
            let sigil = match operator {
                Operator::Eq => "",
                Operator::Like => "~",
                Operator::In => "IN",
                other => other.as_token(),
            };

            format!("{}:{sigil}{value}", escape(column))
        }
        FilterBlock::FullText { value, .. } => escape(value),
    }
}

// A colon escaped as `\:` stays part of the word.
fn unescaped_colon(token: &str) -> Option<usize> {
    let bytes = token.as_bytes();

    bytes
        .iter()
        .enumerate()
        .find(|&(i, &b)| b == b':' && (i == 0 || bytes[i - 1] != b'\\'))
        .map(|(i, _)| i)
}

fn unescape(s: &str) -> String {
    s.replace("\\:", ":")
}

fn escape(s: &str) -> String {
    s.replace(':', "\\:")
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn one(text: &str) -> FilterBlock {
        let mut blocks = parse(text);
        assert_eq!(blocks.len(), 1, "expected one block from {text:?}");

        blocks.remove(0)
    }

    #[test]
    fn bare_words_become_fulltext_blocks() {
        let block = one("backend");
        assert_eq!(
            block,
            FilterBlock::FullText {
                value: "backend".to_string(),
                raw: "backend".to_string(),
            }
        );
    }

    #[test]
    fn plain_key_value_implies_equality() {
        let FilterBlock::Filter {
            column,
            operator,
            value,
            ..
        } = one("status:open")
        else {
            panic!("expected filter block");
        };

        assert_eq!(column, "status");
        assert_eq!(operator, Operator::Eq);
        assert_eq!(value, "open");
    }

    #[test]
    fn sigils_resolve_by_longest_match() {
        let FilterBlock::Filter {
            operator, value, ..
        } = one("salary:>=100000")
        else {
            panic!("expected filter block");
        };
        assert_eq!(operator, Operator::Gte);
        assert_eq!(value, "100000");

        let FilterBlock::Filter {
            operator, value, ..
        } = one("salary:>100000")
        else {
            panic!("expected filter block");
        };
        assert_eq!(operator, Operator::Gt);
        assert_eq!(value, "100000");
    }

    #[test]
    fn tilde_normalizes_to_like() {
        let FilterBlock::Filter { operator, .. } = one("name:~hop") else {
            panic!("expected filter block");
        };
        assert_eq!(operator, Operator::Like);

        let FilterBlock::Filter {
            operator, value, ..
        } = one("name:LIKEhop")
        else {
            panic!("expected filter block");
        };
        assert_eq!(operator, Operator::Like);
        assert_eq!(value, "hop");
    }

    #[test]
    fn malformed_input_yields_partial_blocks_without_error() {
        assert!(parse(":::").is_empty());
        assert!(parse("").is_empty());
        assert_eq!(parse(":orphan status:open").len(), 1);
    }

    #[test]
    fn escaped_colons_stay_in_fulltext_words() {
        let block = one("a\\:b");
        assert_eq!(
            block,
            FilterBlock::FullText {
                value: "a:b".to_string(),
                raw: "a\\:b".to_string(),
            }
        );
    }

    #[test]
    fn equality_is_elided_on_output() {
        let blocks = parse("status:=open");
        assert_eq!(serialize(&blocks), "status:open");
    }

    #[test]
    fn mixed_expression_round_trips() {
        let text = "status:open salary:>=100000 name:~hop backend";
        assert_eq!(serialize(&parse(text)), text);
    }

    proptest! {
        // Canonical tokens only: lowercase fragments can never collide
        // with an operator sigil, so parse/serialize must round-trip.
        #[test]
        fn serialize_is_a_left_inverse_of_parse(
            tokens in proptest::collection::vec(
                (
                    "[a-z]{1,8}",
                    prop_oneof![
                        Just(""), Just("~"), Just("!="), Just("<"),
                        Just("<="), Just(">"), Just(">="),
                    ],
                    "[a-z]{1,8}",
                ),
                1..5,
            )
        ) {
            let text = tokens
                .iter()
                .map(|(column, sigil, value)| format!("{column}:{sigil}{value}"))
                .collect::<Vec<_>>()
                .join(" ");

            prop_assert_eq!(serialize(&parse(&text)), text);
        }
    }
}
