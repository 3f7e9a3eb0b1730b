//! # pagecrate
//!
//! Framework-independent types and parsers for HTTP range pagination,
//! sorting and filtering of REST list endpoints.
//!
//! Three independent, composable components, no shared state:
//!
//! - [`PageRange`] — canonical pagination state with codecs for the
//!   `Range`, `Content-Range` and `Accept-Ranges` headers, page navigation
//!   and `Link` header emission
//! - [`parse_sort`] — the `sort=name,age:desc` query parameter as an
//!   ordered list of [`SortCriterion`]
//! - [`parse_filter`] — the `filter=age gte 25` query parameter as a list
//!   of typed [`FilterCriterion`] predicates
//!
//! [`ListQuery`] bundles the three parsed results for one request.
//! Translating them into an actual data fetch — and reporting the total
//! count back for the response headers — is the job of a data-access
//! collaborator; this crate stays free of any web framework or query
//! engine.
//!
//! ```rust
//! use pagecrate::{ListParams, ListQuery};
//!
//! let params = ListParams {
//!     sort: Some("name,age:desc".to_owned()),
//!     filter: Some("age gte 25".to_owned()),
//! };
//! let query = ListQuery::parse(Some("Range: users=0-9"), &params)?;
//! let requested = query.range.unwrap();
//!
//! // The data layer runs the query and reports the count back
//! let served = requested.with_total(42)?;
//! assert_eq!(served.to_content_range_header(true), "Content-Range: users 0-9/42");
//! assert_eq!(served.next_page().to_range_header(false), "users=10-19");
//! # Ok::<(), pagecrate::ParseError>(())
//! ```
//!
//! All parse and format calls are pure, synchronous and side-effect-free;
//! rejected input is reported through [`ParseError`] with the offending
//! text in the payload, never as a partial result.

pub mod errors;
pub mod filter;
pub mod models;
pub mod pagination;
pub mod sort;

pub use errors::ParseError;
pub use filter::{FilterCriterion, FilterOperator, parse_filter};
pub use models::{ListParams, ListQuery};
pub use pagination::{LinkHeader, LinkHeaders, PageRange};
pub use sort::{SortCriterion, SortDirection, parse_sort};
