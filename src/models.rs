//! Query-parameter model and the per-request parse result.
//!
//! [`ListParams`] is the raw `sort`/`filter` query-parameter pair as any
//! framework's query extractor produces it; [`ListQuery`] is the typed
//! triple a data-access collaborator consumes to build the actual paged,
//! sorted, filtered fetch.

use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

use crate::errors::ParseError;
use crate::filter::{FilterCriterion, parse_filter};
use crate::pagination::PageRange;
use crate::sort::{SortCriterion, parse_sort};

/// Query parameters for sorting and filtering list resources.
///
/// Pagination does not appear here: it travels in the `Range` header, not
/// the query string.
#[derive(Debug, Clone, Deserialize, IntoParams, ToSchema, Default)]
#[into_params(parameter_in = Query)]
pub struct ListParams {
    /// Comma-separated sort criteria in the format `property[:asc|:desc]`.
    ///
    /// Example: `name,age:desc`
    #[param(example = "name,age:desc")]
    pub sort: Option<String>,
    /// Comma-separated filter criteria in the format `property operator value`.
    ///
    /// Example: `age gte 25,name eq John`
    #[param(example = "age gte 25,name eq John")]
    pub filter: Option<String>,
}

/// Everything a data-access collaborator needs to serve one list request:
/// the requested window, the sort precedence and the AND-combined filters.
///
/// Absent inputs parse to `None` or an empty list; a present but malformed
/// input fails the whole call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    /// The requested window, when a `Range` header was sent
    pub range: Option<PageRange>,
    /// Sort criteria in precedence order
    pub sort: Vec<SortCriterion>,
    /// Filter criteria, conjunction semantics
    pub filters: Vec<FilterCriterion>,
}

impl ListQuery {
    /// Parse the raw header and query-parameter text of one list request.
    ///
    /// # Errors
    ///
    /// Propagates [`ParseError::MalformedHeader`],
    /// [`ParseError::MalformedSort`] or [`ParseError::MalformedFilter`]
    /// from whichever part is present and rejected.
    pub fn parse(range_header: Option<&str>, params: &ListParams) -> Result<Self, ParseError> {
        let range = range_header
            .map(PageRange::parse_range_header)
            .transpose()?;
        let sort = params
            .sort
            .as_deref()
            .map(parse_sort)
            .transpose()?
            .unwrap_or_default();
        let filters = params
            .filter
            .as_deref()
            .map(parse_filter)
            .transpose()?
            .unwrap_or_default();
        Ok(Self {
            range,
            sort,
            filters,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::FilterOperator;
    use crate::sort::SortDirection;

    #[test]
    fn test_list_params_default_is_empty() {
        let params = ListParams::default();
        assert_eq!(params.sort, None);
        assert_eq!(params.filter, None);
    }

    #[test]
    fn test_list_params_deserialization() {
        let params: ListParams =
            serde_json::from_str(r#"{"sort":"name,age:desc","filter":"age gte 25"}"#).unwrap();
        assert_eq!(params.sort.as_deref(), Some("name,age:desc"));
        assert_eq!(params.filter.as_deref(), Some("age gte 25"));
    }

    #[test]
    fn test_parse_full_request() {
        let params = ListParams {
            sort: Some("name,age:desc".to_owned()),
            filter: Some("age gte 25".to_owned()),
        };
        let query = ListQuery::parse(Some("Range: users=0-24"), &params).unwrap();

        let range = query.range.unwrap();
        assert_eq!(range.element_name(), "users");
        assert_eq!(range.page(), 0);
        assert_eq!(range.size(), 25);

        assert_eq!(query.sort.len(), 2);
        assert_eq!(query.sort[1].direction, SortDirection::Descending);

        assert_eq!(query.filters.len(), 1);
        assert_eq!(query.filters[0].operator, FilterOperator::GreaterOrEqual);
    }

    #[test]
    fn test_parse_absent_parts_yield_empty() {
        let query = ListQuery::parse(None, &ListParams::default()).unwrap();
        assert_eq!(query.range, None);
        assert!(query.sort.is_empty());
        assert!(query.filters.is_empty());
    }

    #[test]
    fn test_parse_fails_fast_on_any_malformed_part() {
        let bad_sort = ListParams {
            sort: Some("name:sideways".to_owned()),
            filter: None,
        };
        assert!(matches!(
            ListQuery::parse(None, &bad_sort),
            Err(ParseError::MalformedSort { .. })
        ));

        let bad_filter = ListParams {
            sort: None,
            filter: Some("age gte".to_owned()),
        };
        assert!(matches!(
            ListQuery::parse(None, &bad_filter),
            Err(ParseError::MalformedFilter { .. })
        ));

        assert!(matches!(
            ListQuery::parse(Some("users=9-0"), &ListParams::default()),
            Err(ParseError::MalformedHeader { .. })
        ));
    }
}
