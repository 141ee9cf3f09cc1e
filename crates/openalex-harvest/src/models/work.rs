//! Work data models: the raw OpenAlex entry and the simplified output record.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Inverted abstract index: each distinct word mapped to the positions it
/// occupies in the abstract text. A `BTreeMap` keeps serialization order
/// stable so repeated runs produce byte-identical output.
pub type AbstractIndex = BTreeMap<String, Vec<u32>>;

/// A raw work entry as returned by the works endpoint.
#[derive(Debug, Deserialize)]
pub struct RawWork {
    /// Work title; the API omits it for some records.
    #[serde(default)]
    pub title: Option<String>,

    /// Inverted abstract index; absent when OpenAlex has no abstract.
    #[serde(default)]
    pub abstract_inverted_index: Option<AbstractIndex>,

    /// Authorship entries in author order.
    #[serde(default)]
    pub authorships: Vec<Authorship>,
}

/// One authorship entry on a raw work.
#[derive(Debug, Deserialize)]
pub struct Authorship {
    /// The author record. Required: an authorship without an author is a
    /// malformed entry and fails the whole page.
    pub author: AuthorName,
}

/// The author half of an authorship entry.
#[derive(Debug, Deserialize)]
pub struct AuthorName {
    /// Author display name.
    pub display_name: String,
}

impl RawWork {
    /// Flatten this entry into an output record for `institution_id`.
    ///
    /// `institution_name` is left empty; the pipeline attaches it once the
    /// owning institution is known to the caller.
    #[must_use]
    pub fn into_work(self, institution_id: &str) -> Work {
        Work {
            title: self.title,
            r#abstract: self.abstract_inverted_index,
            authors: self.authorships.into_iter().map(|a| a.author.display_name).collect(),
            institution: institution_id.to_string(),
            institution_name: String::new(),
        }
    }
}

/// A simplified open-access work record, one element of the output array.
///
/// Field order here is the serialization order of the output file:
/// `title`, `abstract`, `authors`, `institution`, `institution_name`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Work {
    /// Work title.
    pub title: Option<String>,

    /// Inverted abstract index.
    pub r#abstract: Option<AbstractIndex>,

    /// Author display names, in authorship order.
    pub authors: Vec<String>,

    /// Identifier of the institution this work was collected for.
    pub institution: String,

    /// Display name of that institution, attached by the pipeline.
    pub institution_name: String,
}
