//! Typed document store over the Elasticsearch REST API.
//!
//! This crate provides [`ElkStore`], an index-scoped CRUD and search layer
//! for caller-defined document types. A document is any serde-serializable
//! type that implements [`ElkDocument`] by reporting its stable,
//! client-assigned identifier. Every operation is a single REST
//! request/response; retries, caching and write ordering stay with the
//! Elasticsearch server.
//!
//! # Quick start
//!
//! ```rust,no_run
//! use elkstore::{ElkClient, ElkConfig, ElkDocument, ElkStore};
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Serialize, Deserialize)]
//! struct Planet {
//!     planet_id: String,
//!     planet_name: String,
//! }
//!
//! impl ElkDocument for Planet {
//!     fn document_id(&self) -> &str {
//!         &self.planet_id
//!     }
//! }
//!
//! # async fn example() -> Result<(), elkstore::ElkError> {
//! let client = ElkClient::connect(ElkConfig::default())?;
//! let store = ElkStore::new(client, "planet");
//! store.create_index(None).await?;
//! store
//!     .create(&Planet {
//!         planet_id: "999".into(),
//!         planet_name: "Earth".into(),
//!     })
//!     .await?;
//! let earth: Planet = store.find_one("999").await?;
//! # Ok(())
//! # }
//! ```

mod client;
mod config;
mod document;
mod error;
mod query;
mod store;

pub use client::{ClusterInfo, ClusterVersion, ElkClient};
pub use config::ElkConfig;
pub use document::ElkDocument;
pub use error::ElkError;
pub use query::{MatchType, QueryDoc, QueryItem};
pub use store::ElkStore;
