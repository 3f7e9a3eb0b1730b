//! # Filter Query Parameter Parsing
//!
//! Parses the `filter` query parameter of a list endpoint into a list of
//! typed [`FilterCriterion`] predicates. The grammar is a comma-separated
//! list of `property operator value` segments, each exactly three tokens
//! separated by single spaces:
//!
//! ```text
//! filter=age gte 25,name eq John
//! ```
//!
//! Properties may be dot-separated paths into nested resources
//! (`address.city eq Paris`); the crate does not validate that the path
//! exists, that is a downstream schema concern. For the `in` operator the
//! value token is a `|`-separated list (`status in open|closed`); every
//! other operator carries its value token verbatim.
//!
//! The criteria in a parsed list are implicitly AND-combined by consumers.
//! Translating them into a concrete query predicate (SQL condition,
//! in-memory closure, ...) is the caller's responsibility: dispatch on
//! [`FilterOperator`] and build one predicate per criterion.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::errors::ParseError;

/// The supported filter operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum FilterOperator {
    /// Equality (`eq`)
    Equals,
    /// Inequality (`ne`)
    NotEquals,
    /// Strictly greater (`gt`)
    GreaterThan,
    /// Greater or equal (`gte`)
    GreaterOrEqual,
    /// Strictly less (`lt`)
    LessThan,
    /// Less or equal (`lte`)
    LessOrEqual,
    /// Pattern match (`like`)
    Like,
    /// Membership in a value list (`in`)
    In,
}

impl FilterOperator {
    /// Parse an operator from its query-string mnemonic.
    #[must_use]
    pub fn from_mnemonic(token: &str) -> Option<Self> {
        match token {
            "eq" => Some(Self::Equals),
            "ne" => Some(Self::NotEquals),
            "gt" => Some(Self::GreaterThan),
            "gte" => Some(Self::GreaterOrEqual),
            "lt" => Some(Self::LessThan),
            "lte" => Some(Self::LessOrEqual),
            "like" => Some(Self::Like),
            "in" => Some(Self::In),
            _ => None,
        }
    }

    /// The query-string mnemonic for this operator.
    #[must_use]
    pub fn mnemonic(self) -> &'static str {
        match self {
            Self::Equals => "eq",
            Self::NotEquals => "ne",
            Self::GreaterThan => "gt",
            Self::GreaterOrEqual => "gte",
            Self::LessThan => "lt",
            Self::LessOrEqual => "lte",
            Self::Like => "like",
            Self::In => "in",
        }
    }
}

/// One predicate over a resource collection: a property path, an operator
/// and the values to compare against.
///
/// `values` is never empty. Multi-value operators (`in`) consume the full
/// list; single-value operators use only the first element, but the list is
/// kept uniform across operators for interface consistency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct FilterCriterion {
    /// The property to filter on, possibly a dot-separated path
    pub property: String,
    /// The comparison operator
    pub operator: FilterOperator,
    /// The values to compare against, in input order
    pub values: Vec<String>,
}

impl FilterCriterion {
    /// The segments of the property path, in traversal order.
    ///
    /// A plain property yields a single segment; `address.city` yields
    /// `["address", "city"]`.
    pub fn path_segments(&self) -> impl Iterator<Item = &str> {
        self.property.split('.')
    }
}

/// Parse a filter query string into a list of criteria.
///
/// # Errors
///
/// Returns [`ParseError::MalformedFilter`] when the input is blank, a
/// segment is blank or does not split into exactly three space-separated
/// tokens, a token is blank, the operator mnemonic is unknown, or an `in`
/// value list has an empty component. The first violation fails the whole
/// call, no partial result is produced.
pub fn parse_filter(input: &str) -> Result<Vec<FilterCriterion>, ParseError> {
    if input.trim().is_empty() {
        return Err(ParseError::malformed_filter(input, "filter string cannot be blank"));
    }
    input.split(',').map(parse_single_filter).collect()
}

fn parse_single_filter(segment: &str) -> Result<FilterCriterion, ParseError> {
    if segment.trim().is_empty() {
        return Err(ParseError::malformed_filter(segment, "filter segment cannot be blank"));
    }

    let parts: Vec<&str> = segment.split(' ').collect();
    let [property, operator, value] = parts.as_slice() else {
        tracing::debug!(segment, "rejected filter segment");
        return Err(ParseError::malformed_filter(
            segment,
            "expected format is 'property operator value'",
        ));
    };
    if property.is_empty() || operator.is_empty() || value.is_empty() {
        return Err(ParseError::malformed_filter(
            segment,
            "property, operator and value cannot be blank",
        ));
    }

    let operator = FilterOperator::from_mnemonic(operator).ok_or_else(|| {
        tracing::debug!(segment, "rejected filter operator");
        ParseError::malformed_filter(segment, format!("unknown operator '{operator}'"))
    })?;

    let values = parse_values(segment, operator, value)?;
    Ok(FilterCriterion {
        property: (*property).to_owned(),
        operator,
        values,
    })
}

// Only `in` takes a value list; every other operator keeps its token whole,
// pipes included.
fn parse_values(
    segment: &str,
    operator: FilterOperator,
    value: &str,
) -> Result<Vec<String>, ParseError> {
    if operator != FilterOperator::In {
        return Ok(vec![value.to_owned()]);
    }
    value
        .split('|')
        .map(|component| {
            if component.is_empty() {
                Err(ParseError::malformed_filter(
                    segment,
                    "the value list cannot contain empty components",
                ))
            } else {
                Ok(component.to_owned())
            }
        })
        .collect()
}
