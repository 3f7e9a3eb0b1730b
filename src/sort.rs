//! # Sort Query Parameter Parsing
//!
//! Parses the `sort` query parameter of a list endpoint into an ordered
//! list of [`SortCriterion`]. The grammar is a comma-separated list of
//! `property[:direction]` tokens:
//!
//! ```text
//! sort=name,age:desc
//! ```
//!
//! The direction defaults to ascending, input order is preserved as sort
//! precedence, and a single malformed token rejects the whole string.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::errors::ParseError;

// Whole-string grammar: one bad token invalidates the input, no partial
// results.
static SORT_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^[a-z0-9_]+(?::(?:asc|desc))?(?:,[a-z0-9_]+(?::(?:asc|desc))?)*$")
        .expect("valid pattern")
});

/// The supported sort directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    /// Parse a direction token, case-insensitively.
    #[must_use]
    pub fn from_token(token: &str) -> Option<Self> {
        match token.to_ascii_lowercase().as_str() {
            "asc" => Some(Self::Ascending),
            "desc" => Some(Self::Descending),
            _ => None,
        }
    }

    /// The query-string token for this direction.
    #[must_use]
    pub fn token(self) -> &'static str {
        match self {
            Self::Ascending => "asc",
            Self::Descending => "desc",
        }
    }
}

/// One ordering key: a property name and a direction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct SortCriterion {
    /// The name of the property to sort on
    pub property: String,
    /// The sort direction
    pub direction: SortDirection,
}

/// Parse a sort query string into an ordered list of criteria.
///
/// Whitespace anywhere in the input is stripped before matching, so
/// `name, age : desc` parses the same as `name,age:desc`. The first
/// criterion is the primary sort key.
///
/// # Errors
///
/// Returns [`ParseError::MalformedSort`] when the input is blank or any
/// token fails the `property[:asc|:desc]` grammar.
pub fn parse_sort(input: &str) -> Result<Vec<SortCriterion>, ParseError> {
    let stripped: String = input.chars().filter(|c| !c.is_whitespace()).collect();
    if stripped.is_empty() || !SORT_PATTERN.is_match(&stripped) {
        tracing::debug!(input, "rejected sort string");
        return Err(ParseError::malformed_sort(input));
    }

    let mut criteria = Vec::new();
    for token in stripped.split(',') {
        let criterion = match token.split_once(':') {
            Some((property, direction)) => SortCriterion {
                property: property.to_owned(),
                direction: SortDirection::from_token(direction)
                    .ok_or_else(|| ParseError::malformed_sort(input))?,
            },
            None => SortCriterion {
                property: token.to_owned(),
                direction: SortDirection::Ascending,
            },
        };
        criteria.push(criterion);
    }
    Ok(criteria)
}
