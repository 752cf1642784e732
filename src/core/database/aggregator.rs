use std::time::Instant;

use reqwest::Client;
use tracing::info;

use super::snapshot::{allow_all, LoaderVisibility, VersionSnapshot};
use crate::core::config::MetaConfig;
use crate::core::error::MetaResult;
use crate::core::manifest::GameManifest;
use crate::core::maven::{fetch_artifact_versions, metadata_url, ArtifactVersion};

/// The four artifact kinds aggregated into every snapshot.
const MAPPINGS: &str = "babric:barn";
const INTERMEDIARY: &str = "babric:intermediary";
const LOADER: &str = "babric:fabric-loader";
const INSTALLER: &str = "babric:fabric-installer";

/// Builds version snapshots from the upstream Maven repository and the
/// game-version manifest. Driven periodically by the process's regeneration
/// loop; failures propagate so the driver can keep the prior snapshot.
pub struct VersionAggregator {
    client: Client,
    config: MetaConfig,
    visibility: LoaderVisibility,
}

impl VersionAggregator {
    pub fn new(client: Client, config: MetaConfig) -> Self {
        Self {
            client,
            config,
            visibility: allow_all(),
        }
    }

    /// Replace the loader-visibility policy for this deployment.
    pub fn with_visibility(mut self, visibility: LoaderVisibility) -> Self {
        self.visibility = visibility;
        self
    }

    /// Run one full aggregation: fetch the five upstream sources and
    /// reconcile them into a fresh snapshot. No retries; the caller decides
    /// what a failed run means.
    pub async fn generate(&self) -> MetaResult<VersionSnapshot> {
        let started = Instant::now();

        // The five fetches are independent; only assembly needs them all.
        let (mappings, intermediary, loader, installer, manifest) = tokio::try_join!(
            self.fetch_listing(MAPPINGS),
            self.fetch_listing(INTERMEDIARY),
            self.fetch_listing(LOADER),
            self.fetch_listing(INSTALLER),
            GameManifest::fetch(&self.client, &self.config.manifest_url),
        )?;

        let snapshot = VersionSnapshot::assemble(
            mappings,
            intermediary,
            loader,
            installer,
            manifest,
            self.visibility.clone(),
        )?;

        info!(
            "Version database update took {:?} ({} game versions)",
            started.elapsed(),
            snapshot.game.len()
        );

        Ok(snapshot)
    }

    async fn fetch_listing(&self, group_artifact: &str) -> MetaResult<Vec<ArtifactVersion>> {
        let url = metadata_url(&self.config.maven_url, group_artifact);
        fetch_artifact_versions(&self.client, &url, group_artifact).await
    }
}
