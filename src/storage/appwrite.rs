//! Appwrite-backed trending store.
//!
//! Talks to one collection of an Appwrite database over its REST API. Queries
//! use Appwrite's JSON query syntax, percent-encoded into `queries[N]`
//! parameters.
//!
//! # Collection Schema
//!
//! ```json
//! {
//!   "$id": "6650f1c2001e2b3c4d5e",
//!   "searchTerm": "dune",
//!   "count": 4,
//!   "movie_id": 438631,
//!   "poster_url": "https://image.tmdb.org/t/p/w500/d5NXSklXo0qyIYkgV94XAgMIckC.jpg"
//! }
//! ```

use crate::api::http::{HttpRequest, HttpResponse, Verb};
use crate::api::messages::RequestContext;
use crate::domain::error::{MarqueeError, Result};
use crate::domain::{Movie, TrendingEntry};
use crate::storage::backend::TrendingStore;
use crate::storage::models::{
    CreateDocument, DocumentList, StoreErrorBody, TrendingDocument, TrendingFields, UpdateDocument,
};
use serde_json::json;

/// Default Appwrite Cloud endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://cloud.appwrite.io/v1";

/// Connection settings for the trending collection.
///
/// Every identifier is optional so the plugin can load without them; requests
/// fail at build time with [`MarqueeError::Config`] naming the missing setting.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppwriteConfig {
    pub endpoint: String,
    pub project_id: Option<String>,
    pub database_id: Option<String>,
    pub collection_id: Option<String>,
    /// Server API key, only needed when the collection is not publicly writable.
    pub api_key: Option<String>,
}

/// Trending store backed by an Appwrite collection.
#[derive(Debug, Clone)]
pub struct AppwriteStore {
    config: AppwriteConfig,
}

impl AppwriteStore {
    #[must_use]
    pub const fn new(config: AppwriteConfig) -> Self {
        Self { config }
    }

    fn require<'a>(value: Option<&'a String>, name: &str) -> Result<&'a str> {
        value
            .map(String::as_str)
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| MarqueeError::Config(format!("{name} is not set")))
    }

    /// Returns the documents URL of the configured collection.
    fn documents_url(&self) -> Result<String> {
        let database = Self::require(self.config.database_id.as_ref(), "appwrite_database_id")?;
        let collection = Self::require(self.config.collection_id.as_ref(), "appwrite_collection_id")?;

        Ok(format!(
            "{}/databases/{}/collections/{}/documents",
            self.config.endpoint.trim_end_matches('/'),
            urlencoding::encode(database),
            urlencoding::encode(collection)
        ))
    }

    /// Builds a request against the collection with project and auth headers.
    fn request(&self, verb: Verb, url: String, context: RequestContext) -> Result<HttpRequest> {
        let project = Self::require(self.config.project_id.as_ref(), "appwrite_project_id")?;

        let mut request = HttpRequest::new(verb, url, context)
            .with_header("X-Appwrite-Project", project)
            .with_header("accept", "application/json");

        if let Some(key) = self.config.api_key.as_deref().filter(|k| !k.trim().is_empty()) {
            request = request.with_header("X-Appwrite-Key", key);
        }

        Ok(request)
    }

    /// Appends JSON queries as `queries[N]` parameters.
    fn with_queries(url: String, queries: &[serde_json::Value]) -> String {
        let params: Vec<String> = queries
            .iter()
            .enumerate()
            .map(|(index, query)| {
                format!(
                    "{}={}",
                    urlencoding::encode(&format!("queries[{index}]")),
                    urlencoding::encode(&query.to_string())
                )
            })
            .collect();

        if params.is_empty() {
            url
        } else {
            format!("{url}?{}", params.join("&"))
        }
    }

    /// Turns a non-2xx response into a store error with the server's message.
    fn check_status(response: &HttpResponse) -> Result<()> {
        if response.is_success() {
            return Ok(());
        }

        let detail = serde_json::from_slice::<StoreErrorBody>(&response.body)
            .ok()
            .filter(|body| !body.message.is_empty())
            .map_or_else(String::new, |body| format!(" ({}: {})", body.kind, body.message));

        Err(MarqueeError::Store(format!("status {}{detail}", response.status)))
    }
}

impl TrendingStore for AppwriteStore {
    fn top_request(&self, limit: usize) -> Result<HttpRequest> {
        let url = Self::with_queries(
            self.documents_url()?,
            &[
                json!({"method": "orderDesc", "attribute": "count"}),
                json!({"method": "limit", "values": [limit]}),
            ],
        );

        self.request(Verb::Get, url, RequestContext::trending_list())
    }

    fn lookup_request(&self, query: &str, movie: &Movie) -> Result<HttpRequest> {
        let url = Self::with_queries(
            self.documents_url()?,
            &[json!({"method": "equal", "attribute": "searchTerm", "values": [query]})],
        );

        self.request(
            Verb::Get,
            url,
            RequestContext::trending_lookup(query.to_string(), movie.clone()),
        )
    }

    fn create_request(&self, query: &str, movie_id: u64, poster_url: &str) -> Result<HttpRequest> {
        let body = CreateDocument {
            document_id: "unique()".to_string(),
            data: TrendingFields {
                search_term: query.to_string(),
                count: 1,
                movie_id,
                poster_url: poster_url.to_string(),
            },
        };

        self.request(
            Verb::Post,
            self.documents_url()?,
            RequestContext::trending_create(query.to_string()),
        )?
        .with_json_body(&body)
    }

    fn increment_request(&self, query: &str, existing: &TrendingEntry) -> Result<HttpRequest> {
        let count = existing.count.saturating_add(1);
        let body = UpdateDocument {
            data: TrendingFields {
                search_term: existing.search_term.clone(),
                count,
                movie_id: existing.movie_id,
                poster_url: existing.poster_url.clone(),
            },
        };

        let url = format!("{}/{}", self.documents_url()?, urlencoding::encode(&existing.id));

        self.request(
            Verb::Put,
            url,
            RequestContext::trending_increment(query.to_string(), count),
        )?
        .with_json_body(&body)
    }

    fn parse_entries(&self, response: &HttpResponse) -> Result<Vec<TrendingEntry>> {
        Self::check_status(response)?;
        let list: DocumentList = response.json()?;

        tracing::debug!(
            total = list.total,
            returned = list.documents.len(),
            "trending documents received"
        );

        Ok(list.documents.into_iter().map(TrendingEntry::from).collect())
    }

    fn parse_entry(&self, response: &HttpResponse) -> Result<TrendingEntry> {
        Self::check_status(response)?;
        let document: TrendingDocument = response.json()?;
        Ok(document.into())
    }
}
