//! Natural-language query interpreter
//!
//! A bounded pattern matcher, not a language model. The query is lower-cased
//! and trimmed, then every rule in an ordered table is checked against it.
//! Rules are independent: each may add at most one predicate, and a rule
//! whose predicate is already set does nothing. Supporting a new phrasing
//! means adding a table entry.

use crate::QueryError;
use regex::{Captures, Regex};
use std::sync::LazyLock;
use tracing::debug;
use verbatim_domain::PredicateSet;

/// Sets a predicate from a match; returns whether the rule fired
type Action = fn(&Captures<'_>, &mut PredicateSet) -> bool;

/// One pattern-to-predicate entry of the rule table
pub struct Rule {
    /// Short name used in logs
    pub name: &'static str,
    pattern: Regex,
    action: Action,
}

impl Rule {
    /// Build a rule from a regex pattern and the action it triggers
    ///
    /// # Panics
    ///
    /// Panics if `pattern` is not a valid regex. Rule tables are static, so
    /// this is a programming error.
    pub fn new(name: &'static str, pattern: &str, action: Action) -> Self {
        Self {
            name,
            pattern: Regex::new(pattern).expect("Invalid interpreter rule pattern"),
            action,
        }
    }

    fn apply(&self, text: &str, set: &mut PredicateSet) -> bool {
        match self.pattern.captures(text) {
            Some(caps) => (self.action)(&caps, set),
            None => false,
        }
    }
}

/// Ordered table of interpretation rules
pub struct Interpreter {
    rules: Vec<Rule>,
}

static DEFAULT_INTERPRETER: LazyLock<Interpreter> = LazyLock::new(Interpreter::new);

impl Interpreter {
    /// Interpreter with the built-in rule table
    pub fn new() -> Self {
        Self::with_rules(default_rules())
    }

    /// Interpreter with a custom rule table
    pub fn with_rules(rules: Vec<Rule>) -> Self {
        Self { rules }
    }

    /// Translate a query into a predicate set
    ///
    /// Returns `None` when no rule fires.
    pub fn interpret(&self, query: &str) -> Option<PredicateSet> {
        let text = query.trim().to_lowercase();
        let mut set = PredicateSet::default();
        let mut fired = false;

        for rule in &self.rules {
            if rule.apply(&text, &mut set) {
                debug!(rule = rule.name, query = %text, "interpreter rule fired");
                fired = true;
            }
        }

        fired.then_some(set)
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

/// Translate a query with the built-in rule table
///
/// # Examples
///
/// ```
/// use verbatim_query::{interpret, PredicateSet};
///
/// let set = interpret("strings longer than 10 characters").unwrap();
/// assert_eq!(set, PredicateSet { min_length: Some(11), ..Default::default() });
///
/// assert!(interpret("the quick brown fox").is_none());
/// ```
pub fn interpret(query: &str) -> Option<PredicateSet> {
    DEFAULT_INTERPRETER.interpret(query)
}

/// Interpret a query and check the result is satisfiable
///
/// Distinguishes a blank query, a query no rule understands, and a query
/// whose interpreted length bounds contradict each other.
pub fn resolve_natural_language(query: &str) -> Result<PredicateSet, QueryError> {
    if query.trim().is_empty() {
        return Err(QueryError::EmptyQuery);
    }

    let set = interpret(query).ok_or_else(|| QueryError::ParseFailure(query.to_string()))?;

    if let (Some(min_length), Some(max_length)) = (set.min_length, set.max_length) {
        if min_length > max_length {
            return Err(QueryError::ConflictingFilters {
                min_length,
                max_length,
            });
        }
    }

    Ok(set)
}

fn default_rules() -> Vec<Rule> {
    vec![
        Rule::new("single_word", r"single word|one word|\b1 word\b", |_, set| {
            set_if_absent(&mut set.word_count, 1)
        }),
        Rule::new("palindrome", r"palindromic|palindromes?", |_, set| {
            set_if_absent(&mut set.is_palindrome, true)
        }),
        Rule::new("longer_than", r"longer than (\d+) characters?", |caps, set| {
            match number(caps).and_then(|n| n.checked_add(1)) {
                Some(min) => set_if_absent(&mut set.min_length, min),
                None => false,
            }
        }),
        // No string is shorter than zero characters, so N = 0 does not fire
        Rule::new("shorter_than", r"shorter than (\d+) characters?", |caps, set| {
            match number(caps).and_then(|n| n.checked_sub(1)) {
                Some(max) => set_if_absent(&mut set.max_length, max),
                None => false,
            }
        }),
        // Letter rules run strictest first; later ones only fill a gap
        Rule::new("letter", r"contain(?:s|ing) the letter ([a-z])\b", |caps, set| {
            letter(caps).is_some_and(|c| set_if_absent(&mut set.contains_character, c))
        }),
        Rule::new("loose_letter", r"containing (?:the )?([a-z])\b", |caps, set| {
            letter(caps).is_some_and(|c| set_if_absent(&mut set.contains_character, c))
        }),
        Rule::new("first_vowel", r"\bfirst vowel\b", |_, set| {
            set_if_absent(&mut set.contains_character, 'a')
        }),
    ]
}

fn set_if_absent<T>(slot: &mut Option<T>, value: T) -> bool {
    if slot.is_some() {
        return false;
    }
    *slot = Some(value);
    true
}

fn number(caps: &Captures<'_>) -> Option<usize> {
    caps.get(1)?.as_str().parse().ok()
}

fn letter(caps: &Captures<'_>) -> Option<char> {
    caps.get(1)?.as_str().chars().next()
}
