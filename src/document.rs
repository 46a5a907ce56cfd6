use serde::Serialize;

/// Capability trait for types stored in Elasticsearch.
///
/// Implementors report the stable, client-assigned identifier the store
/// writes under. The store never generates IDs; two documents with the same
/// ID address the same slot in the index.
pub trait ElkDocument: Serialize {
    /// The unique document ID within the index.
    fn document_id(&self) -> &str;
}
