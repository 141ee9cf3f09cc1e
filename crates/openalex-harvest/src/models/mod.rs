//! Data models for OpenAlex API entities.
//!
//! Response models use `#[serde(default)]` only where the API genuinely
//! omits a field; everything else is required so a malformed page fails
//! loudly at deserialization time.

mod institution;
mod work;

pub use institution::Institution;
pub use work::{AbstractIndex, AuthorName, Authorship, RawWork, Work};

use serde::Deserialize;

/// One page of a cursor-paginated OpenAlex response.
#[derive(Debug, Deserialize)]
pub struct Page<T> {
    /// Entries on this page, in API order.
    pub results: Vec<T>,

    /// Pagination metadata. A response without `meta` ends the scan.
    #[serde(default)]
    pub meta: PageMeta,
}

/// Pagination metadata from the `meta` envelope.
#[derive(Debug, Default, Deserialize)]
pub struct PageMeta {
    /// Opaque token for the next page; absent or null on the last page.
    #[serde(default)]
    pub next_cursor: Option<String>,
}

impl PageMeta {
    /// The next cursor, if one is present and non-empty.
    #[must_use]
    pub fn next_cursor(&self) -> Option<&str> {
        self.next_cursor.as_deref().filter(|c| !c.is_empty())
    }
}
