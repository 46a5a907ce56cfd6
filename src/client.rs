use serde::Deserialize;

use crate::{ElkConfig, ElkError};

/// Shared HTTP handle for one Elasticsearch cluster.
///
/// Wraps a pooled `reqwest::Client` plus the node base URL. Cloning is
/// cheap; stores for different indices are expected to share one client.
#[derive(Clone)]
pub struct ElkClient {
    http: reqwest::Client,
    base_url: String,
}

impl ElkClient {
    /// Build a client from the given configuration.
    ///
    /// Fails if the underlying HTTP client cannot be constructed; no
    /// network traffic happens here. Use [`info`](Self::info) to verify the
    /// node is actually reachable.
    pub fn connect(config: ElkConfig) -> Result<Self, ElkError> {
        let http = reqwest::Client::builder()
            .pool_max_idle_per_host(config.pool_max_idle_per_host)
            .connect_timeout(config.connect_timeout)
            .read_timeout(config.read_timeout)
            .min_tls_version(config.min_tls_version)
            .build()?;
        Ok(Self::with_client(config.address, http))
    }

    /// Build a client around an existing `reqwest::Client`.
    pub fn with_client(address: impl Into<String>, http: reqwest::Client) -> Self {
        let mut base_url = address.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self { http, base_url }
    }

    /// Fetch node name, cluster name and version from the root endpoint.
    pub async fn info(&self) -> Result<ClusterInfo, ElkError> {
        let resp = self.http.get(&self.base_url).send().await?;
        if !resp.status().is_success() {
            return Err(read_error(resp).await);
        }
        let body = resp.bytes().await?;
        let info: ClusterInfo = serde_json::from_slice(&body).map_err(ElkError::Deserialize)?;
        tracing::debug!(
            "connected to cluster '{}' ({})",
            info.cluster_name,
            info.version.number
        );
        Ok(info)
    }

    pub(crate) fn http(&self) -> &reqwest::Client {
        &self.http
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}/{path}", self.base_url)
    }
}

/// Subset of the `GET /` root response used for connectivity checks.
#[derive(Debug, Clone, Deserialize)]
pub struct ClusterInfo {
    /// Node name.
    pub name: String,
    pub cluster_name: String,
    pub version: ClusterVersion,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ClusterVersion {
    pub number: String,
}

// ---------------------------------------------------------------------------
// Error envelope
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorCause,
}

#[derive(Debug, Deserialize)]
struct ErrorCause {
    #[serde(rename = "type")]
    kind: String,
    reason: Option<String>,
}

/// Drain a non-2xx response into the matching [`ElkError`].
pub(crate) async fn read_error(resp: reqwest::Response) -> ElkError {
    let status = resp.status().as_u16();
    let body = match resp.bytes().await {
        Ok(body) => body,
        Err(e) => return ElkError::Transport(e),
    };
    parse_error_body(status, &body)
}

/// Bodies without the `{"error":{"type","reason"}}` envelope (HEAD
/// responses, proxy error pages) degrade to `UnexpectedStatus`.
fn parse_error_body(status: u16, body: &[u8]) -> ElkError {
    match serde_json::from_slice::<ErrorEnvelope>(body) {
        Ok(envelope) => ElkError::Server {
            status,
            kind: envelope.error.kind,
            reason: envelope
                .error
                .reason
                .unwrap_or_else(|| "unknown".to_string()),
        },
        Err(_) => ElkError::UnexpectedStatus(status),
    }
}
