use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::maven::BABRIC_MAVEN;

const MANIFEST_URL: &str = "https://piston-meta.mojang.com/mc/game/version_manifest_v2.json";

/// Endpoint configuration for the aggregator and profile builder.
///
/// Defaults point at the production Babric Maven and the Mojang version
/// manifest; deployments override via a JSON file next to the process.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetaConfig {
    /// Base URL of the loader project's Maven repository, trailing slash
    /// included (library entries embed it verbatim).
    pub maven_url: String,
    /// URL of the external game-version manifest.
    pub manifest_url: String,
}

impl Default for MetaConfig {
    fn default() -> Self {
        Self {
            maven_url: BABRIC_MAVEN.to_string(),
            manifest_url: MANIFEST_URL.to_string(),
        }
    }
}

impl MetaConfig {
    /// Best-effort load from a JSON file, falling back to defaults.
    pub fn load(path: &Path) -> Self {
        std::fs::read_to_string(path)
            .ok()
            .and_then(|raw| serde_json::from_str(&raw).ok())
            .unwrap_or_default()
    }
}
