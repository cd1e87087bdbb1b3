//! Integration tests for verbatim-query
//!
//! Structured parameters and natural-language queries must drive the same
//! filter engine to the same results.

use chrono::Utc;
use verbatim_domain::StringRecord;
use verbatim_query::{apply_filters, parse_params, resolve_natural_language, QueryError};

fn corpus() -> Vec<StringRecord> {
    [
        "racecar",
        "level",
        "hello world",
        "A man a plan a canal Panama",
        "zebra",
        "pizzazz",
        "extraordinarily long",
        "noon",
    ]
    .into_iter()
    .map(|v| StringRecord::new(v, Utc::now()))
    .collect()
}

fn values(records: &[StringRecord]) -> Vec<&str> {
    records.iter().map(|r| r.value.as_str()).collect()
}

#[test]
fn test_both_paths_agree_on_single_word_palindromes() {
    let structured = parse_params([("is_palindrome", "true"), ("word_count", "1")]).unwrap();
    let natural = resolve_natural_language("all single word palindromic strings").unwrap();
    assert_eq!(structured, natural);

    let outcome = apply_filters(corpus(), &natural);
    assert_eq!(values(&outcome.data), vec!["racecar", "level", "noon"]);
}

#[test]
fn test_longer_than_is_strict() {
    let set = resolve_natural_language("strings longer than 10 characters").unwrap();
    let outcome = apply_filters(corpus(), &set);

    assert_eq!(
        values(&outcome.data),
        vec!["hello world", "A man a plan a canal Panama", "extraordinarily long"]
    );
    assert!(outcome.data.iter().all(|r| r.properties.length > 10));
}

#[test]
fn test_letter_query_matches_any_case() {
    let set = resolve_natural_language("strings containing the letter z").unwrap();
    let outcome = apply_filters(corpus(), &set);

    assert_eq!(values(&outcome.data), vec!["zebra", "pizzazz"]);
    assert_eq!(outcome.applied.contains_character, Some('z'));
}

#[test]
fn test_structured_window_matches_exact_length() {
    let set = parse_params([("min_length", "5"), ("max_length", "5")]).unwrap();
    let outcome = apply_filters(corpus(), &set);

    assert_eq!(values(&outcome.data), vec!["level", "zebra"]);
}

#[test]
fn test_empty_params_return_everything_in_order() {
    let set = parse_params(Vec::<(&str, &str)>::new()).unwrap();
    let input = corpus();
    let outcome = apply_filters(input.clone(), &set);

    assert_eq!(outcome.data, input);
}

#[test]
fn test_error_kinds_are_stable() {
    assert_eq!(
        parse_params([("bogus", "1")]).unwrap_err().kind(),
        "invalid_input"
    );
    assert_eq!(
        resolve_natural_language("the quick brown fox").unwrap_err().kind(),
        "parse_failure"
    );
    assert_eq!(
        resolve_natural_language("longer than 9 characters, shorter than 3 characters")
            .unwrap_err()
            .kind(),
        "conflicting_filters"
    );
    assert!(matches!(
        resolve_natural_language(""),
        Err(QueryError::EmptyQuery)
    ));
}
