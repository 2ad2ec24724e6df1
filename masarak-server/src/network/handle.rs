//! Shared, atomically replaceable network snapshot.

use std::path::Path;
use std::sync::Arc;

use tokio::sync::RwLock;

use super::error::NetworkError;
use super::load;
use super::model::Network;

/// Thread-safe handle to the current network snapshot.
///
/// Queries call [`snapshot`](Self::snapshot) once and work against that
/// `Arc<Network>` for their whole lifetime; a concurrent reload swaps the
/// inner pointer in one write, so an in-flight query observes either the
/// old network or the new one, never a partially updated graph.
#[derive(Clone)]
pub struct NetworkHandle {
    inner: Arc<RwLock<Arc<Network>>>,
}

impl NetworkHandle {
    pub fn new(network: Network) -> Self {
        Self {
            inner: Arc::new(RwLock::new(Arc::new(network))),
        }
    }

    /// The current snapshot. The lock is released before returning; the
    /// caller holds only the `Arc`.
    pub async fn snapshot(&self) -> Arc<Network> {
        self.inner.read().await.clone()
    }

    /// Swap in a fully built replacement network.
    pub async fn replace(&self, network: Network) {
        let mut guard = self.inner.write().await;
        *guard = Arc::new(network);
    }

    /// Rebuild the network from its data file and swap it in.
    ///
    /// The new network is built completely before the swap; on any load or
    /// validation failure the existing snapshot is kept and the error is
    /// returned. Returns the new station count on success.
    pub async fn reload_from(&self, path: impl AsRef<Path>) -> Result<usize, NetworkError> {
        let loaded = load::from_json_file(path)?;
        let count = loaded.network.station_count();
        self.replace(loaded.network).await;
        Ok(count)
    }
}
