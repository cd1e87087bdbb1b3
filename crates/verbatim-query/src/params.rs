//! Structured query-parameter parsing

use crate::QueryError;
use verbatim_domain::PredicateSet;

/// Build a predicate set from `name=value` query parameters
///
/// Parsing is strict: names outside the predicate vocabulary, repeated names
/// and malformed values are all rejected. No parameters at all is a valid,
/// unconstrained set.
pub fn parse_params<I, K, V>(params: I) -> Result<PredicateSet, QueryError>
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    let mut set = PredicateSet::default();

    for (name, value) in params {
        let (name, raw) = (name.as_ref(), value.as_ref());
        let value = raw.trim();
        match name {
            "is_palindrome" => set_once(&mut set.is_palindrome, name, parse_bool(name, value)?)?,
            "min_length" => set_once(&mut set.min_length, name, parse_count(name, value)?)?,
            "max_length" => set_once(&mut set.max_length, name, parse_count(name, value)?)?,
            "word_count" => set_once(&mut set.word_count, name, parse_count(name, value)?)?,
            "contains_character" => {
                set_once(&mut set.contains_character, name, parse_char(name, raw)?)?
            }
            other => return Err(QueryError::UnknownParameter(other.to_string())),
        }
    }

    Ok(set)
}

fn set_once<T>(slot: &mut Option<T>, name: &str, value: T) -> Result<(), QueryError> {
    if slot.is_some() {
        return Err(invalid(name, "parameter given more than once"));
    }
    *slot = Some(value);
    Ok(())
}

fn parse_bool(name: &str, value: &str) -> Result<bool, QueryError> {
    if value.eq_ignore_ascii_case("true") {
        Ok(true)
    } else if value.eq_ignore_ascii_case("false") {
        Ok(false)
    } else {
        Err(invalid(name, format!("expected true or false, got {:?}", value)))
    }
}

fn parse_count(name: &str, value: &str) -> Result<usize, QueryError> {
    if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid(
            name,
            format!("expected a non-negative integer, got {:?}", value),
        ));
    }
    value
        .parse()
        .map_err(|e| invalid(name, format!("{}: {:?}", e, value)))
}

fn parse_char(name: &str, value: &str) -> Result<char, QueryError> {
    let mut chars = value.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(crate::filter::fold_case(c)),
        _ => Err(invalid(
            name,
            format!("expected exactly one character, got {:?}", value),
        )),
    }
}

fn invalid(name: &str, reason: impl Into<String>) -> QueryError {
    QueryError::InvalidParameter {
        name: name.to_string(),
        reason: reason.into(),
    }
}
