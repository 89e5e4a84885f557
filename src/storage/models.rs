//! Document store record models.
//!
//! These mirror the hosted store's wire representation of the trending
//! collection. They are kept separate from the domain [`TrendingEntry`] so the
//! store's field naming (`$id`, `searchTerm`) stays out of the rest of the crate.

use crate::domain::TrendingEntry;
use serde::{Deserialize, Serialize};

/// A trending document as returned by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrendingDocument {
    /// Store-assigned document identifier.
    #[serde(rename = "$id")]
    pub id: String,

    /// Exact search term this document counts.
    #[serde(rename = "searchTerm")]
    pub search_term: String,

    /// Accumulated search count.
    #[serde(default)]
    pub count: u64,

    /// Provider id of the top result when first recorded.
    #[serde(default)]
    pub movie_id: u64,

    /// Absolute poster URL of that result.
    #[serde(default)]
    pub poster_url: String,
}

impl From<TrendingDocument> for TrendingEntry {
    fn from(document: TrendingDocument) -> Self {
        Self {
            id: document.id,
            search_term: document.search_term,
            count: document.count,
            movie_id: document.movie_id,
            poster_url: document.poster_url,
        }
    }
}

/// Envelope of a document list query.
#[derive(Debug, Clone, Deserialize)]
pub struct DocumentList {
    /// Total matching documents on the server, which may exceed `documents.len()`.
    #[serde(default)]
    pub total: u64,

    #[serde(default)]
    pub documents: Vec<TrendingDocument>,
}

/// Writable attributes of a trending document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrendingFields {
    #[serde(rename = "searchTerm")]
    pub search_term: String,
    pub count: u64,
    pub movie_id: u64,
    pub poster_url: String,
}

/// Body of a create-document request.
#[derive(Debug, Clone, Serialize)]
pub struct CreateDocument {
    #[serde(rename = "documentId")]
    pub document_id: String,
    pub data: TrendingFields,
}

/// Body of an update/upsert-document request.
#[derive(Debug, Clone, Serialize)]
pub struct UpdateDocument {
    pub data: TrendingFields,
}

/// Error envelope the store returns with non-2xx statuses.
#[derive(Debug, Clone, Deserialize)]
pub struct StoreErrorBody {
    #[serde(default)]
    pub message: String,
    #[serde(default, rename = "type")]
    pub kind: String,
}
