//! Integration tests for the line parser and its error taxonomy.

use iniparser::{Document, ParseError, parse};
use pretty_assertions::assert_eq;
use rstest::rstest;

fn document(sections: &[(&str, &[(&str, &str)])]) -> Document {
    let mut document = Document::new();
    for (section, entries) in sections {
        for (key, value) in *entries {
            document.set(section, key, value).unwrap();
        }
    }
    document
}

#[test]
fn test_end_to_end_scenario() {
    let text = "\
[owner]
name=John Doe
organization=Acme Widgets Inc.

[database]
server=192.0.2.62
port=143
";

    let parsed = parse(text).expect("valid document");

    assert_eq!(
        parsed,
        document(&[
            (
                "owner",
                &[("name", "John Doe"), ("organization", "Acme Widgets Inc.")]
            ),
            ("database", &[("server", "192.0.2.62"), ("port", "143")]),
        ])
    );
    assert_eq!(parsed.get("owner", "name").unwrap(), "John Doe");
}

#[test]
fn test_last_write_wins() {
    let parsed = parse("[a]\nk=1\nk=2").unwrap();

    assert_eq!(parsed.get("a", "k").unwrap(), "2");
    assert_eq!(parsed.section("a").unwrap().len(), 1);
}

#[rstest]
#[case("[s]\nkey = value")]
#[case("[s]\nkey=value")]
#[case("[s]\n  key  =  value  ")]
#[case("  [s]  \n\tkey\t=\tvalue")]
fn test_trim_invariance(#[case] text: &str) {
    let parsed = parse(text).unwrap();

    assert_eq!(parsed, document(&[("s", &[("key", "value")])]));
}

#[rstest]
#[case::empty_input("", ParseError::EmptyInput)]
#[case::empty_section_name(
    "[owner]\nname=John Doe\n\n[]\nserver=192.0.2.62",
    ParseError::EmptySectionName { line: 3, content: "[]".to_owned() }
)]
#[case::blank_section_name(
    "[ ]\nk=v",
    ParseError::EmptySectionName { line: 0, content: "[ ]".to_owned() }
)]
#[case::empty_key(
    "[owner]\nname=John Doe\n=Acme Widgets Inc.",
    ParseError::EmptyKey {
        line: 2,
        section: "owner".to_owned(),
        content: "=Acme Widgets Inc.".to_owned(),
    }
)]
#[case::empty_value(
    "[database]\nserver=\nport=143",
    ParseError::EmptyValue {
        line: 1,
        section: "database".to_owned(),
        key: "server".to_owned(),
    }
)]
#[case::key_outside_section(
    "name=John Doe\n[owner]",
    ParseError::KeyOutsideSection { line: 0, content: "name=John Doe".to_owned() }
)]
#[case::comment_after_section_header(
    "[owner]\nname=John Doe\n\n[database]\n#server=192.0.2.62\nport=143",
    ParseError::CommentAfterSectionHeader {
        line: 4,
        section: "database".to_owned(),
        content: "#server=192.0.2.62".to_owned(),
    }
)]
#[case::malformed_line(
    "[owner]\nname John Doe",
    ParseError::MalformedLine { line: 1, content: "name John Doe".to_owned() }
)]
fn test_error_taxonomy(#[case] text: &str, #[case] expected: ParseError) {
    assert_eq!(parse(text), Err(expected));
}

#[test]
fn test_empty_section_name_rejected_regardless_of_context() {
    for text in ["[]", "[a]\nk=v\n\n[]", "; comment\n[]\n\n[b]\nk=v"] {
        assert!(
            matches!(parse(text), Err(ParseError::EmptySectionName { .. })),
            "{text:?}"
        );
    }
}

#[test]
fn test_fail_fast_reports_first_offending_line() {
    // Every line after the orphan key is invalid too, but only line 1 is reported.
    let text = "; header comment\norphan=1\n[]\n=\n[a]\n# comment";

    let err = parse(text).unwrap_err();

    assert_eq!(err.line(), Some(1));
    assert_eq!(
        err,
        ParseError::KeyOutsideSection {
            line: 1,
            content: "orphan=1".to_owned(),
        }
    );
}

#[test]
fn test_leading_and_trailing_blank_lines() {
    let parsed = parse("\n\n[a]\nk=v\n\n\n").unwrap();

    assert_eq!(parsed, document(&[("a", &[("k", "v")])]));
}

#[test]
fn test_from_str() {
    let parsed: Document = "[a]\nk=v".parse().unwrap();

    assert_eq!(parsed.get("a", "k").unwrap(), "v");
}
