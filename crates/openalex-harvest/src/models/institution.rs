//! Institution data model matching the OpenAlex institutions index.

use serde::Deserialize;

/// An institution from the OpenAlex institutions index.
///
/// Only the fields the pipeline consumes are modeled; everything else in
/// the API entry is ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct Institution {
    /// Opaque OpenAlex identifier, e.g. `https://openalex.org/I157725225`.
    pub id: String,

    /// Human-readable institution name.
    pub display_name: String,
}
