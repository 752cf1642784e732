use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::warn;

use super::aggregator::VersionAggregator;
use super::snapshot::VersionSnapshot;
use crate::core::error::{MetaError, MetaResult};

/// The single process-wide mutable handle: an atomically swapped reference
/// to the current snapshot. Readers always see one fully assembled snapshot
/// or the previous one, never a mix.
#[derive(Default)]
pub struct SnapshotStore {
    current: RwLock<Option<Arc<VersionSnapshot>>>,
}

impl SnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// The last published snapshot, if any aggregation has succeeded yet.
    pub async fn current(&self) -> Option<Arc<VersionSnapshot>> {
        self.current.read().await.clone()
    }

    /// Publish a freshly assembled snapshot, replacing the previous one.
    pub async fn publish(&self, snapshot: VersionSnapshot) -> Arc<VersionSnapshot> {
        let snapshot = Arc::new(snapshot);
        *self.current.write().await = Some(snapshot.clone());
        snapshot
    }

    /// Run one aggregation and publish the result. On failure the previous
    /// snapshot stays in place and the error surfaces to the driver.
    pub async fn regenerate(
        &self,
        aggregator: &VersionAggregator,
    ) -> MetaResult<Arc<VersionSnapshot>> {
        match aggregator.generate().await {
            Ok(snapshot) => Ok(self.publish(snapshot).await),
            Err(e) => {
                warn!("Snapshot regeneration failed, keeping last good: {e}");
                Err(e)
            }
        }
    }

    /// Convenience for callers that cannot serve without version data.
    pub async fn require(&self) -> MetaResult<Arc<VersionSnapshot>> {
        self.current()
            .await
            .ok_or_else(|| MetaError::Other("no version snapshot published yet".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::database::allow_all;
    use crate::core::manifest::GameManifest;
    use crate::core::maven::ArtifactVersion;

    fn snapshot(loader_version: &str) -> VersionSnapshot {
        let manifest: GameManifest = serde_json::from_str(
            r#"{ "versions": [ { "id": "b1.7.3", "type": "old_beta", "url": "https://example.com/b1.7.3.json" } ] }"#,
        )
        .unwrap();

        VersionSnapshot::assemble(
            vec![ArtifactVersion::new("babric:barn", "b1.7.3+build.1")],
            vec![ArtifactVersion::new("babric:intermediary", "b1.7.3")],
            vec![ArtifactVersion::new("babric:fabric-loader", loader_version)],
            vec![],
            manifest,
            allow_all(),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn store_starts_empty() {
        let store = SnapshotStore::new();
        assert!(store.current().await.is_none());
    }

    #[tokio::test]
    async fn publish_swaps_the_whole_snapshot() {
        let store = SnapshotStore::new();

        store.publish(snapshot("0.1.0")).await;
        let first = store.current().await.unwrap();
        assert_eq!(first.all_loader_versions()[0].version, "0.1.0");

        store.publish(snapshot("0.2.0")).await;
        let second = store.current().await.unwrap();
        assert_eq!(second.all_loader_versions()[0].version, "0.2.0");

        // The replaced snapshot is untouched for readers still holding it.
        assert_eq!(first.all_loader_versions()[0].version, "0.1.0");
    }
}
