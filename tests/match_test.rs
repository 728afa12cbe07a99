/// This file contains a hopefully increasing number of match tests to verify the correctness of the
/// matcher.
///
/// Each test registers a single pattern in JSON notation under the entity `E` and scans a document
/// made of the whitespace separated words of the input.
use tokmatch::{Doc, Matcher};

/// Test data for the match tests.
/// The test data consists of a pattern, an input string, the expected matches, and an optional error
/// message.
#[derive(Debug)]
struct TestData {
    pattern: &'static str,
    input: &'static str,
    expected: &'static [(&'static str, usize, usize)],
    error_msg: Option<&'static str>,
}

// A macros to easily create a TestData struct.

// Valid pattern, input, and expected matches.
macro_rules! td {
    ($pattern:expr, $input:expr, $expected:expr) => {
        TestData {
            pattern: $pattern,
            input: $input,
            expected: $expected,
            error_msg: None,
        }
    };
}

// Invalid pattern and expected error message.
macro_rules! tu {
    ($pattern:expr, $result:expr) => {
        TestData {
            pattern: $pattern,
            input: "",
            expected: &[],
            error_msg: Some($result),
        }
    };
}

const TEST_DATA: &[TestData] = &[
    // ---------------------------------------------------------------------------------------------
    // Literal sequences
    // ---------------------------------------------------------------------------------------------
    td!(r#"[{"ORTH": "a"}]"#, "a", &[("a", 0, 1)]),
    td!(r#"[{"ORTH": "a"}]"#, "b", &[]),
    td!(r#"[{"ORTH": "a"}]"#, "A", &[]),
    td!(r#"[{"LOWER": "a"}]"#, "A a", &[("A", 0, 1), ("a", 1, 2)]),
    td!(
        r#"[{"ORTH": "a"}, {"ORTH": "b"}]"#,
        "a b a b b a",
        &[("a b", 0, 2), ("a b", 2, 4)]
    ),
    td!(r#"[{"TEXT": "New"}, {"TEXT": "York"}]"#, "New New York", &[("New York", 1, 3)]),
    td!(r#"[{"ORTH": "a"}, {"ORTH": "a"}]"#, "a a a", &[("a a", 0, 2), ("a a", 1, 3)]),
    td!(r#"[{"UPPER": "NASA"}]"#, "Nasa nasa", &[("Nasa", 0, 1), ("nasa", 1, 2)]),
    // ---------------------------------------------------------------------------------------------
    // Wildcards and lexical attributes
    // ---------------------------------------------------------------------------------------------
    td!(r#"[{"ORTH": "a"}, {}, {"ORTH": "c"}]"#, "a b c a c", &[("a b c", 0, 3)]),
    td!(r#"[{"IS_PUNCT": true}]"#, "a , . b", &[(",", 1, 2), (".", 2, 3)]),
    td!(r#"[{"IS_PUNCT": false}]"#, "a ,", &[("a", 0, 1)]),
    td!(r#"[{"IS_DIGIT": true}]"#, "12 a3 7", &[("12", 0, 1), ("7", 2, 3)]),
    td!(r#"[{"IS_TITLE": true}]"#, "Hello WORLD there", &[("Hello", 0, 1)]),
    td!(r#"[{"IS_UPPER": true}]"#, "Hello WORLD there", &[("WORLD", 1, 2)]),
    td!(r#"[{"IS_LOWER": true}]"#, "Hello WORLD there", &[("there", 2, 3)]),
    td!(r#"[{"LIKE_NUM": true}]"#, "ten 1,000 x 3/4", &[("ten", 0, 1), ("1,000", 1, 2), ("3/4", 3, 4)]),
    td!(r#"[{"LIKE_EMAIL": true}]"#, "mail me@example.com", &[("me@example.com", 1, 2)]),
    td!(r#"[{"SHAPE": "dd"}]"#, "12 123 ab", &[("12", 0, 1)]),
    td!(r#"[{"SHAPE": "Xxxxx"}]"#, "Apple Rustaceans Cat", &[("Apple", 0, 1), ("Rustaceans", 1, 2)]),
    td!(r#"[{"PREFIX": "R"}]"#, "Rust rust", &[("Rust", 0, 1)]),
    td!(r#"[{"SUFFIX": "ing"}]"#, "being ring in", &[("being", 0, 1), ("ring", 1, 2)]),
    td!(r#"[{"LENGTH": 2}]"#, "a bb ccc", &[("bb", 1, 2)]),
    td!(r#"[{"LENGTH": {">=": 3}}]"#, "a bb ccc", &[("ccc", 2, 3)]),
    td!(r#"[{"LENGTH": {"<": 2}}]"#, "a bb ccc", &[("a", 0, 1)]),
    td!(r#"[{"LENGTH": {"!=": 2}}]"#, "a bb ccc", &[("a", 0, 1), ("ccc", 2, 3)]),
    td!(r#"[{"LOWER": {"IN": ["a", "c"]}}]"#, "A b c", &[("A", 0, 1), ("c", 2, 3)]),
    td!(r#"[{"LOWER": {"NOT_IN": ["a", "c"]}}]"#, "A b c", &[("b", 1, 2)]),
    td!(r#"[{"TEXT": {"REGEX": "^[Uu](\\.?|nited)$"}}]"#, "U.S. United Un", &[("United", 1, 2)]),
    td!(r#"[{"TEXT": {"REGEX": "^[Uu]\\.?"}}]"#, "U.S. United x", &[("U.S.", 0, 1), ("United", 1, 2)]),
    td!(r#"[{"LOWER": "a", "IS_UPPER": true}]"#, "a A", &[("A", 1, 2)]),
    // ---------------------------------------------------------------------------------------------
    // Quantifiers
    // ---------------------------------------------------------------------------------------------
    td!(r#"[{"ORTH": "a", "OP": "1"}]"#, "a", &[("a", 0, 1)]),
    td!(r#"[{"ORTH": "a", "OP": "?"}, {"ORTH": "b"}]"#, "a b b", &[("a b", 0, 2), ("b", 1, 2), ("b", 2, 3)]),
    td!(r#"[{"ORTH": "a", "OP": "+"}]"#, "a a a b a", &[("a a a", 0, 3), ("a a", 1, 3), ("a", 2, 3), ("a", 4, 5)]),
    td!(r#"[{"ORTH": "a"}, {"ORTH": "b", "OP": "*"}]"#, "a b b a", &[("a b b", 0, 3), ("a", 3, 4)]),
    td!(r#"[{"ORTH": "a"}, {"ORTH": "b", "OP": "*"}, {"ORTH": "c"}]"#, "a c a b b c a b", &[("a c", 0, 2), ("a b b c", 2, 6)]),
    td!(r#"[{"ORTH": "a"}, {"ORTH": "b", "OP": "+"}, {"ORTH": "b"}]"#, "a b b b", &[("a b b b", 0, 4)]),
    td!(r#"[{"ORTH": "a"}, {"ORTH": "b", "OP": "+"}, {"ORTH": "b"}]"#, "a b", &[]),
    td!(r#"[{"ORTH": "a", "OP": "*"}]"#, "b", &[]),
    td!(r#"[{"ORTH": "a", "OP": "?"}, {"ORTH": "b", "OP": "?"}]"#, "a b c b", &[("a b", 0, 2), ("b", 1, 2), ("b", 3, 4)]),
    td!(r#"[{"ORTH": "a", "OP": "!"}, {"ORTH": "b"}]"#, "a b c b b", &[("c b", 2, 4), ("b b", 3, 5)]),
    td!(r#"[{"ORTH": "a"}, {"ORTH": "b", "OP": "!"}]"#, "a b a c a", &[("a c", 2, 4)]),
    td!(r#"[{"LOWER": "very", "OP": "+"}, {"LOWER": "good"}]"#, "very Very good", &[("very Very good", 0, 3), ("Very good", 1, 3)]),
    td!(r#"[{"IS_ALPHA": true, "OP": "+"}]"#, "ab cd , ef", &[("ab cd", 0, 2), ("cd", 1, 2), ("ef", 3, 4)]),
    // ---------------------------------------------------------------------------------------------
    // Invalid patterns
    // ---------------------------------------------------------------------------------------------
    tu!(r#"[]"#, "Invalid pattern"),
    tu!(r#"{"ORTH": "a"}"#, "Invalid pattern"),
    tu!(r#"["ORTH"]"#, "Invalid pattern"),
    tu!(r#"[{"COLOR": "red"}]"#, "Unknown attribute 'COLOR'"),
    tu!(r#"[{"FLAG3": true}]"#, "Unknown attribute 'FLAG3'"),
    tu!(r#"[{"ORTH": "a", "OP": "{2,3}"}]"#, "Invalid pattern"),
    tu!(r#"[{"ORTH": "a", "OP": 1}]"#, "Invalid pattern"),
    tu!(r#"[{"LENGTH": "two"}]"#, "Invalid pattern"),
    tu!(r#"[{"IS_PUNCT": 1}]"#, "Invalid pattern"),
    tu!(r#"[{"LOWER": {">=": 3}}]"#, "Invalid pattern"),
    tu!(r#"[{"LOWER": {"LIKE": "a"}}]"#, "Invalid pattern"),
    tu!(r#"[{"TEXT": {"REGEX": "a("}}]"#, "regex parse error"),
];

#[test]
fn test_matches() {
    let _ = env_logger::builder().is_test(true).try_init();
    for (index, test) in TEST_DATA.iter().enumerate() {
        let pattern: serde_json::Value = serde_json::from_str(test.pattern).unwrap();
        let mut matcher = Matcher::new();
        let result = matcher.add_json_pattern("E", &pattern, None);
        if let Some(error_msg) = test.error_msg {
            let err = result.expect_err(&format!(
                "Test {} (pattern: {}) should have failed",
                index, test.pattern
            ));
            assert!(
                err.to_string().contains(error_msg),
                "Test {} (pattern: {}): Expected error message '{}', but got '{}'",
                index,
                test.pattern,
                error_msg,
                err
            );
            continue;
        }
        result.unwrap_or_else(|e| panic!("Test {} (pattern: {}): {}", index, test.pattern, e));

        let words: Vec<&str> = test.input.split_whitespace().collect();
        let doc = Doc::from_words(&words);
        let matches = matcher.find_matches(&doc).unwrap();
        let actual: Vec<(String, usize, usize)> = matches
            .iter()
            .map(|m| (doc.span_text(m.span()).unwrap(), m.start(), m.end()))
            .collect();
        let expected: Vec<(String, usize, usize)> = test
            .expected
            .iter()
            .map(|(text, start, end)| (text.to_string(), *start, *end))
            .collect();
        assert_eq!(
            actual, expected,
            "Test {} (pattern: {}, input: {:?})",
            index, test.pattern, test.input
        );
    }
}
