use std::time::Duration;

/// Configuration for [`ElkClient`](crate::ElkClient).
///
/// Carries the transport knobs threaded through to the underlying
/// `reqwest::Client`: pool sizing, timeouts and the TLS floor. Everything
/// has a working default for a local single-node cluster.
#[derive(Debug, Clone)]
pub struct ElkConfig {
    /// Base URL of the Elasticsearch node (default: `"http://127.0.0.1:9200"`).
    pub address: String,
    /// Maximum idle connections kept per host (default: 10).
    pub pool_max_idle_per_host: usize,
    /// Timeout for establishing a connection (default: 1s).
    pub connect_timeout: Duration,
    /// Timeout between reads of the response (default: 1s).
    pub read_timeout: Duration,
    /// Minimum accepted TLS version for `https` addresses (default: 1.2).
    pub min_tls_version: reqwest::tls::Version,
}

impl ElkConfig {
    /// Create a new configuration for the given node address.
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            pool_max_idle_per_host: 10,
            connect_timeout: Duration::from_secs(1),
            read_timeout: Duration::from_secs(1),
            min_tls_version: reqwest::tls::Version::TLS_1_2,
        }
    }

    /// Set the maximum number of idle connections per host.
    pub fn with_pool_max_idle_per_host(mut self, max: usize) -> Self {
        self.pool_max_idle_per_host = max;
        self
    }

    /// Set the connect timeout.
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Set the read timeout.
    pub fn with_read_timeout(mut self, timeout: Duration) -> Self {
        self.read_timeout = timeout;
        self
    }

    /// Set the minimum accepted TLS version.
    pub fn with_min_tls_version(mut self, version: reqwest::tls::Version) -> Self {
        self.min_tls_version = version;
        self
    }
}

impl Default for ElkConfig {
    fn default() -> Self {
        Self::new("http://127.0.0.1:9200")
    }
}
