//! Query error types

use thiserror::Error;

/// Errors raised while building a predicate set
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    /// Query parameter outside the predicate vocabulary
    #[error("Unknown filter parameter: {0}")]
    UnknownParameter(String),

    /// Query parameter with a value of the wrong shape
    #[error("Invalid value for {name}: {reason}")]
    InvalidParameter {
        /// Parameter name
        name: String,
        /// What was wrong with the value
        reason: String,
    },

    /// Natural-language query missing or blank
    #[error("Natural language query must not be empty")]
    EmptyQuery,

    /// No interpretation rule matched the query
    #[error("Unable to parse natural language query: {0:?}")]
    ParseFailure(String),

    /// Interpreted length bounds admit no string
    #[error("Query parsed but resulted in conflicting filters: min_length {min_length} > max_length {max_length}")]
    ConflictingFilters {
        /// Interpreted lower bound
        min_length: usize,
        /// Interpreted upper bound
        max_length: usize,
    },
}

impl QueryError {
    /// Stable machine-readable tag for this error
    pub fn kind(&self) -> &'static str {
        match self {
            QueryError::UnknownParameter(_) | QueryError::InvalidParameter { .. } => {
                "invalid_input"
            }
            QueryError::EmptyQuery => "invalid_input",
            QueryError::ParseFailure(_) => "parse_failure",
            QueryError::ConflictingFilters { .. } => "conflicting_filters",
        }
    }
}
