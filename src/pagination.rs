//! # Range Header Pagination
//!
//! This module provides [`PageRange`], a canonical pagination value with
//! bidirectional conversion to and from the three HTTP range header
//! conventions used by list endpoints:
//!
//! - `Range: items=0-9` — the window a client requests
//! - `Content-Range: items 0-9/100` — the window a server actually served
//! - `Accept-Ranges: items` — a capability declaration, no pagination state
//!
//! A `PageRange` is immutable. Navigation methods (`first_page`,
//! `previous_page`, `next_page`, `last_page`) return a new value, and
//! [`PageRange::to_link_headers`] renders the four navigation targets as a
//! `Link` response header.
//!
//! ```rust
//! use pagecrate::PageRange;
//!
//! let requested = PageRange::parse_range_header("Range: items=0-9").unwrap();
//! assert_eq!(requested.page(), 0);
//! assert_eq!(requested.size(), 10);
//!
//! // After the data layer reports the total count:
//! let served = requested.with_total(100).unwrap();
//! assert_eq!(served.to_content_range_header(true), "Content-Range: items 0-9/100");
//! ```

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use utoipa::ToSchema;

use crate::errors::ParseError;

/// The name of the `Range` HTTP header.
pub const RANGE_HEADER_NAME: &str = "Range";
/// The name of the `Content-Range` HTTP header.
pub const CONTENT_RANGE_HEADER_NAME: &str = "Content-Range";
/// The name of the `Accept-Ranges` HTTP header.
pub const ACCEPT_RANGES_HEADER_NAME: &str = "Accept-Ranges";

// The header-name prefix is optional on input so that both the full header
// line and the bare value parse identically.
static RANGE_HEADER_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:Range: )?([A-Za-z]+)=(\d+)-(\d+)$").expect("valid pattern")
});
static CONTENT_RANGE_HEADER_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:Content-Range: )?([A-Za-z]+) (\d+)-(\d+)/(\d+)$").expect("valid pattern")
});
static ACCEPT_RANGES_HEADER_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:Accept-Ranges: )?([A-Za-z]+)$").expect("valid pattern")
});

/// Pagination state extracted from, or intended for, the HTTP range headers.
///
/// `page` is a zero-based index into fixed-size chunks of the collection.
/// The sentinel `-1` means "unknown" for `page`, `size` and `total`; a
/// `Range` request carries no total, and an `Accept-Ranges` header carries
/// no pagination state at all.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct PageRange {
    element_name: String,
    page: i64,
    size: i64,
    total: i64,
}

impl PageRange {
    /// Create a validated `PageRange`.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::InvalidPagination`] when `page` is negative
    /// (other than `-1`), `size` is zero or negative (other than `-1`), or
    /// `total` is below `-1`. No partially-valid value is ever produced.
    pub fn new(
        element_name: impl Into<String>,
        page: i64,
        size: i64,
        total: i64,
    ) -> Result<Self, ParseError> {
        if page < 0 && page != -1 {
            return Err(ParseError::invalid_pagination(
                "page must be greater than or equal to 0, or -1 for unknown",
            ));
        }
        if size == 0 || size < -1 {
            return Err(ParseError::invalid_pagination(
                "size must be greater than 0, or -1 for unknown",
            ));
        }
        if total < -1 {
            return Err(ParseError::invalid_pagination(
                "total must be greater than or equal to 0, or -1 for unknown",
            ));
        }
        Ok(Self {
            element_name: element_name.into(),
            page,
            size,
            total,
        })
    }

    /// The pluralized resource name embedded in the headers, e.g. `"items"`.
    #[must_use]
    pub fn element_name(&self) -> &str {
        &self.element_name
    }

    /// Zero-based page index, `-1` if unknown.
    #[must_use]
    pub fn page(&self) -> i64 {
        self.page
    }

    /// Elements per page, `-1` if unknown.
    #[must_use]
    pub fn size(&self) -> i64 {
        self.size
    }

    /// Total element count across all pages, `-1` if unknown.
    #[must_use]
    pub fn total(&self) -> i64 {
        self.total
    }

    /// Index of the first element of this page.
    #[must_use]
    pub fn start(&self) -> i64 {
        self.page * self.size
    }

    /// Index of the last element of this page, clamped to the final element
    /// when the total is known.
    #[must_use]
    pub fn end(&self) -> i64 {
        if self.total < 0 {
            (self.page + 1) * self.size - 1
        } else {
            ((self.page + 1) * self.size - 1).min(self.total - 1)
        }
    }

    /// Return the same window with a different total, typically the count a
    /// data layer reported back.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::InvalidPagination`] when `total` is below `-1`.
    pub fn with_total(&self, total: i64) -> Result<Self, ParseError> {
        Self::new(self.element_name.clone(), self.page, self.size, total)
    }

    /// Parse a `Range` request header, e.g. `Range: items=0-9`.
    ///
    /// The header-name prefix is optional: `items=0-9` parses identically.
    /// The total is unknown (`-1`) since a request carries no count. The
    /// page size is `end - start + 1` and the page index is `start / size`.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::MalformedHeader`] when the text is empty, does
    /// not match the grammar, or `end <= start`.
    pub fn parse_range_header(header: &str) -> Result<Self, ParseError> {
        let captures = RANGE_HEADER_PATTERN.captures(header).ok_or_else(|| {
            tracing::debug!(header, "rejected Range header");
            malformed(header, "the format must be like 'Range: elements=0-9'")
        })?;
        let element_name = &captures[1];
        let (start, end) = parse_bounds(header, &captures[2], &captures[3])?;

        let size = end - start + 1;
        let page = start / size;
        Self::new(element_name, page, size, -1)
    }

    /// Parse a `Content-Range` response header, e.g.
    /// `Content-Range: items 0-9/100`.
    ///
    /// The total is taken literally; size and page are derived the same way
    /// as for the `Range` header, so formatting a full page and parsing it
    /// back yields an equal value.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::MalformedHeader`] when the text is empty, does
    /// not match the grammar, or `end <= start`.
    pub fn parse_content_range_header(header: &str) -> Result<Self, ParseError> {
        let captures = CONTENT_RANGE_HEADER_PATTERN.captures(header).ok_or_else(|| {
            tracing::debug!(header, "rejected Content-Range header");
            malformed(header, "the format must be like 'Content-Range: elements 0-9/100'")
        })?;
        let element_name = &captures[1];
        let (start, end) = parse_bounds(header, &captures[2], &captures[3])?;
        let total: i64 = captures[4]
            .parse()
            .map_err(|_| malformed(header, "the total does not fit in a 64-bit integer"))?;

        let size = end - start + 1;
        let page = start / size;
        Self::new(element_name, page, size, total)
    }

    /// Parse an `Accept-Ranges` response header, e.g. `Accept-Ranges: items`.
    ///
    /// This is a pure capability declaration: the resulting value has
    /// unknown page, size and total.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::MalformedHeader`] when the text is empty or
    /// does not match the grammar.
    pub fn parse_accept_ranges_header(header: &str) -> Result<Self, ParseError> {
        let captures = ACCEPT_RANGES_HEADER_PATTERN.captures(header).ok_or_else(|| {
            tracing::debug!(header, "rejected Accept-Ranges header");
            malformed(header, "the format must be like 'Accept-Ranges: elements'")
        })?;
        Self::new(&captures[1], -1, -1, -1)
    }

    /// Format this window as a `Range` header value.
    #[must_use]
    pub fn to_range_header(&self, include_name: bool) -> String {
        if include_name {
            format!(
                "{RANGE_HEADER_NAME}: {}={}-{}",
                self.element_name,
                self.start(),
                self.end()
            )
        } else {
            format!("{}={}-{}", self.element_name, self.start(), self.end())
        }
    }

    /// Format this window as a `Content-Range` header value.
    ///
    /// The total slot is always emitted, `-1` included, since the wire
    /// format requires a denominator.
    #[must_use]
    pub fn to_content_range_header(&self, include_name: bool) -> String {
        if include_name {
            format!(
                "{CONTENT_RANGE_HEADER_NAME}: {} {}-{}/{}",
                self.element_name,
                self.start(),
                self.end(),
                self.total
            )
        } else {
            format!(
                "{} {}-{}/{}",
                self.element_name,
                self.start(),
                self.end(),
                self.total
            )
        }
    }

    /// Format this value as an `Accept-Ranges` header value.
    #[must_use]
    pub fn to_accept_ranges_header(&self) -> String {
        format!("{ACCEPT_RANGES_HEADER_NAME}: {}", self.element_name)
    }

    /// The bare `start-end` fragment used in `Link` headers.
    fn to_range(&self) -> String {
        format!("{}-{}", self.start(), self.end())
    }

    /// The first page of the collection, same size and total.
    #[must_use]
    pub fn first_page(&self) -> Self {
        Self {
            element_name: self.element_name.clone(),
            page: 0,
            size: self.size,
            total: self.total,
        }
    }

    /// The previous page, or this page unchanged when already at the lower
    /// bound.
    #[must_use]
    pub fn previous_page(&self) -> Self {
        if self.page <= 0 {
            return self.clone();
        }
        Self {
            element_name: self.element_name.clone(),
            page: self.page - 1,
            size: self.size,
            total: self.total,
        }
    }

    /// The next page, or this page unchanged when already at or after the
    /// last page.
    ///
    /// When the last page cannot be determined (unknown total or size) the
    /// value is also returned unchanged: a next page cannot be proven to
    /// exist, and steady-state link generation must not fail.
    #[must_use]
    pub fn next_page(&self) -> Self {
        let Ok(last) = self.last_page() else {
            return self.clone();
        };
        if self.page >= last.page {
            return self.clone();
        }
        Self {
            element_name: self.element_name.clone(),
            page: self.page + 1,
            size: self.size,
            total: self.total,
        }
    }

    /// The last page of the collection, `page = (total - 1) / size`.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::UnknownBound`] when the total or the size is
    /// unknown, since the division is undefined.
    pub fn last_page(&self) -> Result<Self, ParseError> {
        if self.total < 0 || self.size < 0 {
            return Err(ParseError::unknown_bound(
                "the last page cannot be computed while the total or the size is unknown",
            ));
        }
        Ok(Self {
            element_name: self.element_name.clone(),
            page: (self.total - 1) / self.size,
            size: self.size,
            total: self.total,
        })
    }

    /// Render the four navigation links (`first`, `previous`, `next`,
    /// `last`) for this window as a `Link` header.
    ///
    /// Each link carries the base URI, the relation name, and the bare
    /// `start-end` range of the neighboring window.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::UnknownBound`] when the last page cannot be
    /// computed, see [`PageRange::last_page`].
    pub fn to_link_headers(&self, base_uri: &str) -> Result<LinkHeaders, ParseError> {
        let last = self.last_page()?;
        Ok(LinkHeaders(vec![
            LinkHeader::new(base_uri, "first", self.first_page().to_range()),
            LinkHeader::new(base_uri, "previous", self.previous_page().to_range()),
            LinkHeader::new(base_uri, "next", self.next_page().to_range()),
            LinkHeader::new(base_uri, "last", last.to_range()),
        ]))
    }
}

fn malformed(header: &str, message: &str) -> ParseError {
    ParseError::malformed_header(header, message)
}

/// Parse and order-check the two bound captures shared by the `Range` and
/// `Content-Range` grammars.
fn parse_bounds(header: &str, start: &str, end: &str) -> Result<(i64, i64), ParseError> {
    let start: i64 = start
        .parse()
        .map_err(|_| malformed(header, "the start does not fit in a 64-bit integer"))?;
    let end: i64 = end
        .parse()
        .map_err(|_| malformed(header, "the end does not fit in a 64-bit integer"))?;
    if end <= start {
        return Err(malformed(header, "the end must be greater than the start"));
    }
    Ok((start, end))
}

/// A single navigation link, e.g. `</api/v1/items>; rel="next"; range="10-19"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkHeader {
    /// The URI path of the linked resource
    pub uri: String,
    /// The relation type, one of `first`, `previous`, `next`, `last`
    pub rel: String,
    /// The bare `start-end` range of the linked window
    pub range: String,
}

impl LinkHeader {
    #[must_use]
    pub fn new(uri: impl Into<String>, rel: impl Into<String>, range: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            rel: rel.into(),
            range: range.into(),
        }
    }
}

impl fmt::Display for LinkHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}>; rel=\"{}\"; range=\"{}\"", self.uri, self.rel, self.range)
    }
}

/// The ordered set of navigation links for one window, rendered comma-joined
/// as a single `Link` header value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkHeaders(pub Vec<LinkHeader>);

impl fmt::Display for LinkHeaders {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered: Vec<String> = self.0.iter().map(LinkHeader::to_string).collect();
        write!(f, "{}", rendered.join(", "))
    }
}
