use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::client::read_error;
use crate::{ElkClient, ElkDocument, ElkError, QueryDoc};

/// Index-scoped typed document store.
///
/// Binds a shared [`ElkClient`] to one index name and exposes CRUD and
/// search operations for [`ElkDocument`] types. The store itself is
/// stateless: each call is an independent request/response cycle, safe to
/// issue concurrently from clones of the same store.
#[derive(Clone)]
pub struct ElkStore {
    client: ElkClient,
    index: String,
}

impl ElkStore {
    pub fn new(client: ElkClient, index: impl Into<String>) -> Self {
        Self {
            client,
            index: index.into(),
        }
    }

    /// The index this store operates on.
    pub fn index(&self) -> &str {
        &self.index
    }

    // ── Index lifecycle ──────────────────────────────────────────────────────

    /// Create the index, optionally with a mapping body.
    pub async fn create_index(&self, mapping: Option<&Value>) -> Result<(), ElkError> {
        let mut req = self.client.http().put(self.index_url());
        if let Some(mapping) = mapping {
            req = req.json(mapping);
        }
        let resp = req.send().await?;
        if resp.status().is_success() {
            Ok(())
        } else {
            Err(read_error(resp).await)
        }
    }

    /// Drop the entire index and everything in it.
    pub async fn delete_index(&self) -> Result<(), ElkError> {
        let resp = self.client.http().delete(self.index_url()).send().await?;
        if resp.status().is_success() {
            Ok(())
        } else {
            Err(read_error(resp).await)
        }
    }

    // ── Writes ───────────────────────────────────────────────────────────────

    /// Store a new document under its ID. Fails if the ID already exists.
    pub async fn create<D: ElkDocument>(&self, doc: &D) -> Result<(), ElkError> {
        self.create_inner(doc, false).await
    }

    /// Like [`create`](Self::create), but asks the server to make the write
    /// visible to searches before returning (`refresh=wait_for`). Trades
    /// latency for read-after-write consistency.
    pub async fn create_wait_for_refresh<D: ElkDocument>(&self, doc: &D) -> Result<(), ElkError> {
        self.create_inner(doc, true).await
    }

    async fn create_inner<D: ElkDocument>(
        &self,
        doc: &D,
        wait_for_refresh: bool,
    ) -> Result<(), ElkError> {
        let payload = serde_json::to_value(doc).map_err(ElkError::Serialize)?;
        let mut req = self
            .client
            .http()
            .put(self.create_url(doc.document_id()))
            .json(&payload);
        if wait_for_refresh {
            req = req.query(&[("refresh", "wait_for")]);
        }
        let resp = req.send().await?;
        if resp.status().is_success() {
            tracing::debug!("created {}/{}", self.index, doc.document_id());
            Ok(())
        } else {
            Err(read_error(resp).await)
        }
    }

    /// Partially update an existing document: only the fields present in
    /// `doc`'s serialized form are touched. Fails if the ID does not exist.
    pub async fn update<D: ElkDocument>(&self, doc: &D) -> Result<(), ElkError> {
        self.update_inner(doc, false).await
    }

    /// Like [`update`](Self::update), but creates the document when the ID
    /// does not exist yet (`doc_as_upsert`).
    pub async fn upsert<D: ElkDocument>(&self, doc: &D) -> Result<(), ElkError> {
        self.update_inner(doc, true).await
    }

    async fn update_inner<D: ElkDocument>(
        &self,
        doc: &D,
        doc_as_upsert: bool,
    ) -> Result<(), ElkError> {
        let doc_value = serde_json::to_value(doc).map_err(ElkError::Serialize)?;
        let body = if doc_as_upsert {
            json!({ "doc": doc_value, "doc_as_upsert": true })
        } else {
            json!({ "doc": doc_value })
        };
        let resp = self
            .client
            .http()
            .post(self.update_url(doc.document_id()))
            .json(&body)
            .send()
            .await?;
        if resp.status().is_success() {
            Ok(())
        } else {
            Err(read_error(resp).await)
        }
    }

    /// Delete the document with the given ID.
    ///
    /// Returns `true` if a document was deleted, `false` if the ID did not
    /// exist. Any other status is an error.
    pub async fn delete(&self, id: &str) -> Result<bool, ElkError> {
        let resp = self.client.http().delete(self.doc_url(id)).send().await?;
        match resp.status() {
            StatusCode::OK => Ok(true),
            StatusCode::NOT_FOUND => Ok(false),
            other => Err(ElkError::UnexpectedStatus(other.as_u16())),
        }
    }

    // ── Reads ────────────────────────────────────────────────────────────────

    /// Check whether a document with the given ID exists.
    pub async fn exists(&self, id: &str) -> Result<bool, ElkError> {
        let resp = self.client.http().head(self.doc_url(id)).send().await?;
        match resp.status() {
            StatusCode::OK => Ok(true),
            StatusCode::NOT_FOUND => Ok(false),
            other => Err(ElkError::UnexpectedStatus(other.as_u16())),
        }
    }

    /// Fetch a single document by ID.
    ///
    /// A miss is the distinguished [`ElkError::NotFound`], so callers can
    /// tell "absent" apart from transport and server failures.
    pub async fn find_one<T: DeserializeOwned>(&self, id: &str) -> Result<T, ElkError> {
        let resp = self.client.http().get(self.doc_url(id)).send().await?;
        match resp.status() {
            StatusCode::OK => {
                let body = resp.bytes().await?;
                let parsed: GetResponse<T> =
                    serde_json::from_slice(&body).map_err(ElkError::Deserialize)?;
                Ok(parsed.source)
            }
            StatusCode::NOT_FOUND => Err(ElkError::NotFound {
                index: self.index.clone(),
                id: id.to_string(),
            }),
            _ => Err(read_error(resp).await),
        }
    }

    /// Run a structured query against this store's index.
    ///
    /// The query is stamped with the store's index name before dispatch.
    /// Hits come back in server relevance order; zero matches yield an
    /// empty vector, not an error.
    pub async fn search<T: DeserializeOwned>(&self, query: QueryDoc) -> Result<Vec<T>, ElkError> {
        let mut query = query;
        query.index = Some(self.index.clone());
        let resp = self
            .client
            .http()
            .post(self.search_url())
            .json(&query.body())
            .send()
            .await?;
        if !resp.status().is_success() {
            return Err(read_error(resp).await);
        }
        let body = resp.bytes().await?;
        let parsed: SearchResponse<T> =
            serde_json::from_slice(&body).map_err(ElkError::Deserialize)?;
        tracing::debug!("search {}: {} hits", self.index, parsed.hits.hits.len());
        Ok(parsed.hits.hits.into_iter().map(|hit| hit.source).collect())
    }

    // ── URL helpers ──────────────────────────────────────────────────────────

    fn index_url(&self) -> String {
        self.client.url(&self.index)
    }

    fn doc_url(&self, id: &str) -> String {
        self.client
            .url(&format!("{}/_doc/{}", self.index, urlencoding::encode(id)))
    }

    fn create_url(&self, id: &str) -> String {
        self.client
            .url(&format!("{}/_create/{}", self.index, urlencoding::encode(id)))
    }

    fn update_url(&self, id: &str) -> String {
        self.client
            .url(&format!("{}/_update/{}", self.index, urlencoding::encode(id)))
    }

    fn search_url(&self) -> String {
        self.client.url(&format!("{}/_search", self.index))
    }
}

// ---------------------------------------------------------------------------
// Response envelopes
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct SearchResponse<T> {
    hits: HitList<T>,
}

#[derive(Debug, Deserialize)]
struct HitList<T> {
    hits: Vec<Hit<T>>,
}

#[derive(Debug, Deserialize)]
struct Hit<T> {
    #[serde(rename = "_source")]
    source: T,
}

#[derive(Debug, Deserialize)]
struct GetResponse<T> {
    #[serde(rename = "_source")]
    source: T,
}
