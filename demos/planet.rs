//! End-to-end demo against a local Elasticsearch node.
//!
//! Run with `cargo run --example planet` while a node is listening on
//! `http://127.0.0.1:9200`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use elkstore::{
    ElkClient, ElkConfig, ElkDocument, ElkError, ElkStore, MatchType, QueryDoc, QueryItem,
};

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Planet {
    planet_id: String,
    planet_name: String,
    stage: String,
    status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    ban_info: Option<BanInfo>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct BanInfo {
    begin_time: DateTime<Utc>,
    end_time: DateTime<Utc>,
    reason: String,
}

impl ElkDocument for Planet {
    fn document_id(&self) -> &str {
        &self.planet_id
    }
}

/// Domain repository composing an [`ElkStore`] for the `planet` index.
struct PlanetRepo {
    store: ElkStore,
}

impl PlanetRepo {
    fn new(client: ElkClient) -> Self {
        Self {
            store: ElkStore::new(client, "planet"),
        }
    }

    async fn ensure_index(&self) -> Result<(), ElkError> {
        match self.store.create_index(None).await {
            Ok(()) => Ok(()),
            // Re-running the demo against an existing index is fine.
            Err(ElkError::Server { kind, .. }) if kind == "resource_already_exists_exception" => {
                Ok(())
            }
            Err(e) => Err(e),
        }
    }

    async fn add(&self, planet: &Planet) -> Result<(), ElkError> {
        self.store.create_wait_for_refresh(planet).await
    }

    async fn find_by_id(&self, planet_id: &str) -> Result<Vec<Planet>, ElkError> {
        self.store
            .search(QueryDoc::new().and(QueryItem::new("planet_id", planet_id, MatchType::Match)))
            .await
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let client = ElkClient::connect(ElkConfig::default())?;
    let info = client.info().await?;
    println!(
        "connected to '{}' (Elasticsearch {})",
        info.cluster_name, info.version.number
    );

    let repo = PlanetRepo::new(client);
    repo.ensure_index().await?;
    repo.add(&Planet {
        planet_id: "999".to_string(),
        planet_name: "Earth".to_string(),
        stage: "beta".to_string(),
        status: "active".to_string(),
        ban_info: None,
    })
    .await?;

    let planets = repo.find_by_id("999").await?;
    println!("{planets:#?}");

    Ok(())
}
