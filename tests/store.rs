use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use elkstore::{
    ElkClient, ElkConfig, ElkDocument, ElkError, ElkStore, MatchType, QueryDoc, QueryItem,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct TestDoc {
    doc_id: String,
    planet_name: String,
    stage: String,
    status: String,
}

impl ElkDocument for TestDoc {
    fn document_id(&self) -> &str {
        &self.doc_id
    }
}

/// Partial document used to exercise field-merge semantics.
#[derive(Debug, Serialize)]
struct StatusPatch {
    doc_id: String,
    status: String,
}

impl ElkDocument for StatusPatch {
    fn document_id(&self) -> &str {
        &self.doc_id
    }
}

fn earth(id: &str) -> TestDoc {
    TestDoc {
        doc_id: id.to_string(),
        planet_name: "Earth".to_string(),
        stage: "beta".to_string(),
        status: "active".to_string(),
    }
}

// ---------------------------------------------------------------------------
// Pure tests
// ---------------------------------------------------------------------------

#[test]
fn config_defaults() {
    let config = ElkConfig::default();
    assert_eq!(config.address, "http://127.0.0.1:9200");
    assert_eq!(config.pool_max_idle_per_host, 10);
    assert_eq!(config.connect_timeout, Duration::from_secs(1));
    assert_eq!(config.read_timeout, Duration::from_secs(1));
}

#[test]
fn config_builder() {
    let config = ElkConfig::new("https://es.internal:9200")
        .with_pool_max_idle_per_host(32)
        .with_connect_timeout(Duration::from_secs(5))
        .with_read_timeout(Duration::from_secs(30));
    assert_eq!(config.address, "https://es.internal:9200");
    assert_eq!(config.pool_max_idle_per_host, 32);
    assert_eq!(config.connect_timeout, Duration::from_secs(5));
    assert_eq!(config.read_timeout, Duration::from_secs(30));
}

#[test]
fn store_reports_its_index() {
    let client = ElkClient::connect(ElkConfig::default()).unwrap();
    let store = ElkStore::new(client, "planet");
    assert_eq!(store.index(), "planet");
}

#[test]
fn document_round_trip() {
    let doc = earth("111");
    let encoded = serde_json::to_string(&doc).unwrap();
    let decoded: TestDoc = serde_json::from_str(&encoded).unwrap();
    assert_eq!(decoded, doc);
    assert_eq!(decoded.document_id(), "111");
}

#[test]
fn server_error_display_carries_type_and_reason() {
    let err = ElkError::Server {
        status: 409,
        kind: "version_conflict_engine_exception".to_string(),
        reason: "[111]: version conflict".to_string(),
    };
    assert_eq!(
        err.to_string(),
        "[409] version_conflict_engine_exception: [111]: version conflict"
    );
}

#[test]
fn not_found_display_names_index_and_id() {
    let err = ElkError::NotFound {
        index: "planet".to_string(),
        id: "999".to_string(),
    };
    assert_eq!(err.to_string(), "document 999 not found in index planet");
}

// ---------------------------------------------------------------------------
// Live-cluster tests
// ---------------------------------------------------------------------------

static INDEX_ID: AtomicU32 = AtomicU32::new(0);

/// Connect to the local node and create a throwaway index for one test.
async fn test_store() -> ElkStore {
    let client = ElkClient::connect(ElkConfig::default()).unwrap();
    client
        .info()
        .await
        .expect("Elasticsearch must be reachable at 127.0.0.1:9200");
    let index = format!("elkstore_test_{}", INDEX_ID.fetch_add(1, Ordering::SeqCst));
    let store = ElkStore::new(client, index);
    store.create_index(None).await.unwrap();
    store
}

#[tokio::test]
#[ignore = "requires Elasticsearch at 127.0.0.1:9200"]
async fn create_then_find_one() {
    let store = test_store().await;

    store.create(&earth("111")).await.unwrap();

    // Get-by-ID is realtime; no refresh needed.
    let found: TestDoc = store.find_one("111").await.unwrap();
    assert_eq!(found, earth("111"));

    store.delete_index().await.unwrap();
}

#[tokio::test]
#[ignore = "requires Elasticsearch at 127.0.0.1:9200"]
async fn create_conflict_is_a_server_error() {
    let store = test_store().await;

    store.create(&earth("111")).await.unwrap();
    let err = store.create(&earth("111")).await.unwrap_err();
    match err {
        ElkError::Server { status, .. } => assert_eq!(status, 409),
        other => panic!("expected Server error, got {other:?}"),
    }

    store.delete_index().await.unwrap();
}

#[tokio::test]
#[ignore = "requires Elasticsearch at 127.0.0.1:9200"]
async fn search_finds_refreshed_create() {
    let store = test_store().await;

    store.create_wait_for_refresh(&earth("111")).await.unwrap();

    let docs: Vec<TestDoc> = store
        .search(QueryDoc::new().and(QueryItem::new("doc_id", "111", MatchType::Match)))
        .await
        .unwrap();
    assert_eq!(docs.len(), 1);
    assert_eq!(docs[0].planet_name, "Earth");

    store.delete_index().await.unwrap();
}

#[tokio::test]
#[ignore = "requires Elasticsearch at 127.0.0.1:9200"]
async fn search_with_no_matches_is_empty() {
    let store = test_store().await;

    let docs: Vec<TestDoc> = store
        .search(QueryDoc::new().and(QueryItem::new("doc_id", "nope", MatchType::Match)))
        .await
        .unwrap();
    assert!(docs.is_empty());

    store.delete_index().await.unwrap();
}

#[tokio::test]
#[ignore = "requires Elasticsearch at 127.0.0.1:9200"]
async fn upsert_creates_then_merges_fields() {
    let store = test_store().await;

    // Missing ID: upsert inserts the whole document.
    store.upsert(&earth("111")).await.unwrap();
    let found: TestDoc = store.find_one("111").await.unwrap();
    assert_eq!(found.status, "active");

    // Existing ID: only the supplied fields change.
    store
        .upsert(&StatusPatch {
            doc_id: "111".to_string(),
            status: "inactive".to_string(),
        })
        .await
        .unwrap();
    let merged: TestDoc = store.find_one("111").await.unwrap();
    assert_eq!(merged.status, "inactive");
    assert_eq!(merged.planet_name, "Earth");
    assert_eq!(merged.stage, "beta");

    store.delete_index().await.unwrap();
}

#[tokio::test]
#[ignore = "requires Elasticsearch at 127.0.0.1:9200"]
async fn update_touches_only_supplied_fields() {
    let store = test_store().await;

    store.create(&earth("111")).await.unwrap();
    store
        .update(&StatusPatch {
            doc_id: "111".to_string(),
            status: "retired".to_string(),
        })
        .await
        .unwrap();

    let updated: TestDoc = store.find_one("111").await.unwrap();
    assert_eq!(updated.status, "retired");
    assert_eq!(updated.planet_name, "Earth");

    store.delete_index().await.unwrap();
}

#[tokio::test]
#[ignore = "requires Elasticsearch at 127.0.0.1:9200"]
async fn exists_delete_lifecycle() {
    let store = test_store().await;

    assert!(!store.exists("111").await.unwrap());

    store.create(&earth("111")).await.unwrap();
    assert!(store.exists("111").await.unwrap());

    assert!(store.delete("111").await.unwrap());
    assert!(!store.exists("111").await.unwrap());

    // Deleting a missing ID reports false, not an error.
    assert!(!store.delete("111").await.unwrap());

    store.delete_index().await.unwrap();
}

#[tokio::test]
#[ignore = "requires Elasticsearch at 127.0.0.1:9200"]
async fn find_one_miss_is_not_found() {
    let store = test_store().await;

    let err = store.find_one::<TestDoc>("ghost").await.unwrap_err();
    match err {
        ElkError::NotFound { index, id } => {
            assert_eq!(index, store.index());
            assert_eq!(id, "ghost");
        }
        other => panic!("expected NotFound, got {other:?}"),
    }

    store.delete_index().await.unwrap();
}
