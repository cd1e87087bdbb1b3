//! Verbatim Query Engine
//!
//! Turns either structured query parameters or a short natural-language
//! sentence into a [`PredicateSet`], and evaluates predicate sets over
//! analyzed string records.
//!
//! Both entry points produce the same predicate vocabulary, so a filter
//! behaves identically whichever way it was expressed.
//!
//! # Examples
//!
//! ```
//! use verbatim_query::{interpret, parse_params};
//!
//! let from_text = interpret("all single word palindromic strings").unwrap();
//! let from_params = parse_params([("is_palindrome", "true"), ("word_count", "1")]).unwrap();
//! assert_eq!(from_text, from_params);
//! ```

#![warn(missing_docs)]

mod error;
mod filter;
mod interpreter;
mod params;

pub use error::QueryError;
pub use filter::{apply_filters, matches, FilterOutcome};
pub use interpreter::{interpret, resolve_natural_language, Interpreter, Rule};
pub use params::parse_params;
pub use verbatim_domain::PredicateSet;
