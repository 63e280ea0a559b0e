//! Line-oriented parser for `.env`-style configuration streams.
//!
//! Responsibilities:
//! - Consume an entire byte stream in a single pass and produce an
//!   [`EnvMap`] of normalized keys to string values.
//! - Apply key normalization (trim, then `__` to `:`) and outer-quote
//!   stripping on values.
//! - Fail fast on malformed lines and duplicate keys; no partial mapping
//!   ever escapes.
//!
//! Does NOT handle:
//! - File resolution, optional-file semantics, or reload (see `source`).
//! - Sections, nesting, multi-line values, escapes, or type coercion.
//!
//! Invariants:
//! - A line whose first non-whitespace character is `;`, `#`, or `/` is a
//!   comment, even when the rest of the line looks like an entry. The `/`
//!   rule swallows entries whose leading content is path-like; existing
//!   files rely on this, so it stays.
//! - Only the first `=` on a line separates key from value.

use std::io::{BufRead, BufReader, Read};

use tracing::debug;

use crate::constants::{COMMENT_CHARS, KEY_DELIMITER, KEY_SEPARATOR};
use crate::error::ParseError;
use crate::map::EnvMap;

/// Read a `.env`-style stream into a flat key/value mapping.
///
/// Keys are compared case-insensitively and must be unique after
/// normalization. Blank lines and comments produce no entries; an empty
/// stream yields an empty mapping. The reader is consumed and dropped on
/// every exit path.
///
/// # Errors
///
/// Returns [`ParseError::UnrecognizedLine`] for a non-comment line with no
/// `=`, [`ParseError::DuplicateKey`] when a normalized key repeats, and
/// [`ParseError::Io`] if the stream fails mid-read.
pub fn read<R: Read>(reader: R) -> Result<EnvMap, ParseError> {
    let mut map = EnvMap::new();
    let reader = BufReader::new(reader);

    for line in reader.lines() {
        let raw = line?;
        let trimmed = raw.trim();

        if trimmed.is_empty() {
            continue;
        }
        if trimmed.starts_with(COMMENT_CHARS) {
            continue;
        }

        let Some((key_part, value_part)) = trimmed.split_once('=') else {
            return Err(ParseError::UnrecognizedLine { line: raw });
        };

        let key = key_part.trim().replace(KEY_SEPARATOR, KEY_DELIMITER);
        if map.contains_key(&key) {
            return Err(ParseError::DuplicateKey { key });
        }

        let value = unquote(value_part.trim());
        map.insert(key, value);
    }

    debug!(entries = map.len(), "parsed env stream");
    Ok(map)
}

/// Strip exactly one leading and one trailing `"` when the value is at
/// least two characters long and quote-wrapped. Interior quotes are left
/// untouched; a lone `"` is kept literally.
fn unquote(value: &str) -> &str {
    if value.len() >= 2 && value.starts_with('"') && value.ends_with('"') {
        &value[1..value.len() - 1]
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::KeyPolicy;

    fn parse(input: &str) -> Result<EnvMap, ParseError> {
        read(input.as_bytes())
    }

    fn parse_ok(input: &str) -> EnvMap {
        parse(input).expect("input should parse")
    }

    #[test]
    fn empty_stream_yields_empty_mapping() {
        let map = parse_ok("");
        assert!(map.is_empty());
    }

    #[test]
    fn blank_and_whitespace_lines_are_skipped() {
        let map = parse_ok("\n   \n\t\n");
        assert!(map.is_empty());
    }

    #[test]
    fn comment_lines_are_skipped() {
        let map = parse_ok("; semicolon\n# hash\n/ slash\nkey=value\n");
        assert_eq!(map.len(), 1);
        assert_eq!(map.get("key"), Some("value"));
    }

    #[test]
    fn comment_detection_applies_after_trimming() {
        let map = parse_ok("   # indented comment\n");
        assert!(map.is_empty());
    }

    #[test]
    fn basic_entries_with_comments_and_blanks() {
        let map = parse_ok("A=1\nB__C=2\n# comment\n\nD = \"hello world\"");

        assert_eq!(map.len(), 3);
        assert_eq!(map.get("A"), Some("1"));
        assert_eq!(map.get("B:C"), Some("2"));
        assert_eq!(map.get("D"), Some("hello world"));
    }

    #[test]
    fn keys_and_values_are_trimmed() {
        let map = parse_ok("  key  =  value  \n");
        assert_eq!(map.get("key"), Some("value"));
    }

    #[test]
    fn double_underscore_becomes_path_delimiter() {
        let map = parse_ok("Parent__Child__Leaf=x\n");
        assert_eq!(map.get("Parent:Child:Leaf"), Some("x"));
    }

    #[test]
    fn only_first_equals_separates_key_from_value() {
        let map = parse_ok("url=http://a=b\n");
        assert_eq!(map.get("url"), Some("http://a=b"));
    }

    #[test]
    fn lone_equals_is_an_empty_key_and_value() {
        let map = parse_ok("=\n");
        assert_eq!(map.len(), 1);
        assert_eq!(map.get(""), Some(""));
    }

    #[test]
    fn duplicate_empty_keys_are_rejected() {
        let err = parse("=\n=1\n").unwrap_err();
        assert!(matches!(err, ParseError::DuplicateKey { key } if key.is_empty()));
    }

    #[test]
    fn line_without_equals_fails_with_raw_line() {
        let err = parse("justtext").unwrap_err();
        match err {
            ParseError::UnrecognizedLine { line } => assert_eq!(line, "justtext"),
            other => panic!("expected UnrecognizedLine, got {other}"),
        }
    }

    #[test]
    fn unrecognized_line_carries_line_before_trimming() {
        let err = parse("  padded junk  \n").unwrap_err();
        match err {
            ParseError::UnrecognizedLine { line } => assert_eq!(line, "  padded junk  "),
            other => panic!("expected UnrecognizedLine, got {other}"),
        }
    }

    #[test]
    fn duplicate_key_fails_and_names_the_key() {
        let err = parse("A=1\nA=2\n").unwrap_err();
        match err {
            ParseError::DuplicateKey { key } => assert_eq!(key, "A"),
            other => panic!("expected DuplicateKey, got {other}"),
        }
    }

    #[test]
    fn duplicate_detection_is_case_insensitive() {
        let err = parse("a=1\nA=2\n").unwrap_err();
        assert!(matches!(err, ParseError::DuplicateKey { key } if key == "A"));
    }

    #[test]
    fn duplicate_detection_applies_after_normalization() {
        // `A__B` and `a:b` collide once both are normalized.
        let err = parse("A__B=1\na:b=2\n").unwrap_err();
        assert!(matches!(err, ParseError::DuplicateKey { key } if key == "a:b"));
    }

    #[test]
    fn quoted_value_loses_exactly_one_quote_pair() {
        let map = parse_ok("k=\"quoted\"\n");
        assert_eq!(map.get("k"), Some("quoted"));
    }

    #[test]
    fn interior_quotes_are_preserved() {
        let map = parse_ok("k=\"a\"b\"\n");
        assert_eq!(map.get("k"), Some("a\"b"));
    }

    #[test]
    fn quoted_empty_value_becomes_empty_string() {
        let map = parse_ok("k=\"\"\n");
        assert_eq!(map.get("k"), Some(""));
    }

    #[test]
    fn lone_quote_value_is_kept_literally() {
        let map = parse_ok("k=\"\nj=x\n");
        assert_eq!(map.get("k"), Some("\""));
    }

    #[test]
    fn half_quoted_values_are_kept_as_is() {
        let map = parse_ok("a=\"open\nb=close\"\n");
        assert_eq!(map.get("a"), Some("\"open"));
        assert_eq!(map.get("b"), Some("close\""));
    }

    #[test]
    fn quotes_protect_inner_whitespace() {
        let map = parse_ok("k= \"  spaced  \" \n");
        assert_eq!(map.get("k"), Some("  spaced  "));
    }

    #[test]
    fn crlf_line_endings_are_accepted() {
        let map = parse_ok("a=1\r\nb=2\r\n");
        assert_eq!(map.get("a"), Some("1"));
        assert_eq!(map.get("b"), Some("2"));
    }

    #[test]
    fn final_line_without_newline_is_parsed() {
        let map = parse_ok("a=1\nb=2");
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn result_map_is_case_insensitive() {
        let map = parse_ok("Section__Value=x\n");
        assert_eq!(map.policy(), KeyPolicy::CaseInsensitive);
        assert_eq!(map.get("section:value"), Some("x"));
    }

    // Lines whose leading content is a path still read as comments; a
    // `key=value` entry starting with `/` is silently discarded. Kept for
    // compatibility with existing files.
    #[test]
    fn slash_lines_with_entries_are_still_comments() {
        let map = parse_ok("/ not a real comment=value\n");
        assert!(map.is_empty());

        let map = parse_ok("/etc/path=value\nreal=1\n");
        assert_eq!(map.len(), 1);
        assert_eq!(map.get("real"), Some("1"));
    }

    #[test]
    fn error_aborts_without_partial_mapping() {
        // The error comes back from the call itself; nothing before the bad
        // line is exposed anywhere.
        let err = parse("good=1\nbad line\nnever=2\n").unwrap_err();
        assert!(matches!(err, ParseError::UnrecognizedLine { .. }));
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        fn key_strategy() -> impl Strategy<Value = String> {
            "[A-Za-z][A-Za-z0-9_]{0,8}"
        }

        fn value_strategy() -> impl Strategy<Value = String> {
            "[A-Za-z0-9 ._:/-]{0,16}"
        }

        proptest! {
            #[test]
            fn comment_and_blank_only_input_is_empty(
                lines in prop::collection::vec(
                    prop_oneof![
                        Just(String::new()),
                        Just("   ".to_string()),
                        "[;#/][ A-Za-z0-9=]{0,16}",
                    ],
                    0..16,
                )
            ) {
                let input = lines.join("\n");
                let map = read(input.as_bytes()).unwrap();
                prop_assert!(map.is_empty());
            }

            #[test]
            fn parsing_twice_yields_equal_mappings(
                entries in prop::collection::vec((key_strategy(), value_strategy()), 0..12)
            ) {
                // Dedup keys under the fold so the input is well-formed.
                let mut seen = std::collections::HashSet::new();
                let input: String = entries
                    .iter()
                    .filter(|(key, _)| seen.insert(key.to_lowercase()))
                    .map(|(key, value)| format!("{key}={value}\n"))
                    .collect();

                let first = read(input.as_bytes()).unwrap();
                let second = read(input.as_bytes()).unwrap();
                prop_assert_eq!(first, second);
            }

            #[test]
            fn successful_parses_never_hold_fold_equal_keys(input in "[A-Za-z0-9_=# ;/\n\"]{0,128}") {
                if let Ok(map) = read(input.as_bytes()) {
                    let mut folded: Vec<String> =
                        map.iter().map(|(key, _)| key.to_lowercase()).collect();
                    folded.sort();
                    let before = folded.len();
                    folded.dedup();
                    prop_assert_eq!(before, folded.len());
                }
            }

            #[test]
            fn quoted_values_round_trip(value in "[ -~]{0,16}") {
                let input = format!("key=\"{value}\"\n");
                let map = read(input.as_bytes()).unwrap();
                prop_assert_eq!(map.get("key"), Some(value.as_str()));
            }

            #[test]
            fn unquoted_values_round_trip_trimmed(value in "[A-Za-z0-9 ._:/-]{0,16}") {
                let input = format!("key={value}\n");
                let map = read(input.as_bytes()).unwrap();
                prop_assert_eq!(map.get("key"), Some(value.trim()));
            }
        }
    }
}
