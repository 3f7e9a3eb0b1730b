//! # Error Handling for List Request Parsing
//!
//! Every failure in this crate is a deterministic validation failure: the
//! input either matches the documented grammar or the whole call fails.
//! There are no transient errors, nothing is retried, and no error is fatal
//! beyond the single request being parsed.
//!
//! Each variant carries the raw offending input so callers can echo it back
//! in a 400-class response. The crate itself has no notion of HTTP status
//! codes beyond the header text it emits and consumes.

use std::fmt;

/// Validation error produced by the pagination, sort and filter parsers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// A page, size or total outside the documented sentinel ranges.
    InvalidPagination {
        /// Which invariant was violated
        message: String,
    },

    /// Header text absent, empty, or failing the documented grammar.
    MalformedHeader {
        /// The raw header text that was rejected
        header: String,
        /// Which part of the grammar was violated
        message: String,
    },

    /// Sort string absent, blank, or failing the sort grammar.
    MalformedSort {
        /// The raw sort string that was rejected
        input: String,
    },

    /// Filter string absent, blank, or failing the filter grammar.
    MalformedFilter {
        /// The raw filter text that was rejected
        input: String,
        /// Which part of the grammar was violated
        message: String,
    },

    /// A navigation target that cannot be computed while the total or the
    /// page size is unknown.
    UnknownBound {
        /// Which bound was requested
        message: String,
    },
}

impl ParseError {
    /// Create an `InvalidPagination` error
    pub fn invalid_pagination(message: impl Into<String>) -> Self {
        Self::InvalidPagination {
            message: message.into(),
        }
    }

    /// Create a `MalformedHeader` error carrying the rejected header text
    pub fn malformed_header(header: impl Into<String>, message: impl Into<String>) -> Self {
        Self::MalformedHeader {
            header: header.into(),
            message: message.into(),
        }
    }

    /// Create a `MalformedSort` error carrying the rejected sort string
    pub fn malformed_sort(input: impl Into<String>) -> Self {
        Self::MalformedSort {
            input: input.into(),
        }
    }

    /// Create a `MalformedFilter` error carrying the rejected filter text
    pub fn malformed_filter(input: impl Into<String>, message: impl Into<String>) -> Self {
        Self::MalformedFilter {
            input: input.into(),
            message: message.into(),
        }
    }

    /// Create an `UnknownBound` error
    pub fn unknown_bound(message: impl Into<String>) -> Self {
        Self::UnknownBound {
            message: message.into(),
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidPagination { message } => write!(f, "{message}"),
            Self::MalformedHeader { header, message } => {
                write!(f, "header '{header}' is not in the correct format: {message}")
            }
            Self::MalformedSort { input } => {
                write!(f, "bad format of the sort string '{input}'")
            }
            Self::MalformedFilter { input, message } => {
                write!(f, "bad format of the filter '{input}': {message}")
            }
            Self::UnknownBound { message } => write!(f, "{message}"),
        }
    }
}

impl std::error::Error for ParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_header_display() {
        let err = ParseError::malformed_header("items=9-0", "the end must be greater than the start");
        assert_eq!(
            err.to_string(),
            "header 'items=9-0' is not in the correct format: the end must be greater than the start"
        );
    }

    #[test]
    fn test_malformed_sort_display() {
        let err = ParseError::malformed_sort("name:sideways");
        assert_eq!(err.to_string(), "bad format of the sort string 'name:sideways'");
    }

    #[test]
    fn test_malformed_filter_display() {
        let err = ParseError::malformed_filter("age gte", "expected 'property operator value'");
        assert_eq!(
            err.to_string(),
            "bad format of the filter 'age gte': expected 'property operator value'"
        );
    }

    #[test]
    fn test_error_trait() {
        let err = ParseError::invalid_pagination("size must be greater than 0, or -1 for unknown");
        let _: &dyn std::error::Error = &err;
    }

    #[test]
    fn test_errors_compare_by_payload() {
        assert_eq!(
            ParseError::malformed_sort("a;b"),
            ParseError::malformed_sort("a;b")
        );
        assert_ne!(
            ParseError::malformed_sort("a;b"),
            ParseError::malformed_sort("b;a")
        );
    }
}
