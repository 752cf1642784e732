// ─── Game-version manifest ───
// Fetches and queries the external game-version manifest: the authority on
// which game versions exist, their release chronology, and their stability.

use serde::Deserialize;
use tracing::info;

use crate::core::error::{MetaError, MetaResult};
use crate::core::profile::Library;

/// Top-level game-version manifest. Versions are listed newest first; the
/// position of a record doubles as its release index (sort key only, not
/// necessarily contiguous from a caller's point of view).
#[derive(Debug, Clone, Deserialize)]
pub struct GameManifest {
    pub versions: Vec<GameVersionRecord>,
}

/// A single row of the manifest.
#[derive(Debug, Clone, Deserialize)]
pub struct GameVersionRecord {
    pub id: String,
    #[serde(rename = "type")]
    pub version_type: String,
    #[serde(rename = "releaseTime", default)]
    pub release_time: Option<String>,
    pub url: String,
}

/// Per-game-version upstream document, resolved through a manifest record's
/// URL. Only the fields profile synthesis reads are modeled; library entries
/// pass through untouched. A document without a library list is malformed,
/// not empty.
#[derive(Debug, Clone, Deserialize)]
pub struct VersionMeta {
    pub libraries: Vec<Library>,
    /// Legacy space-delimited game argument string (pre-1.13 format).
    #[serde(rename = "minecraftArguments", default)]
    pub minecraft_arguments: Option<String>,
}

impl GameManifest {
    /// Fetch the manifest from the configured URL.
    pub async fn fetch(client: &reqwest::Client, url: &str) -> MetaResult<Self> {
        let response = client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(MetaError::Fetch {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let manifest: GameManifest = response.json().await?;
        info!("Loaded {} game versions from manifest", manifest.versions.len());
        Ok(manifest)
    }

    pub fn find_version(&self, id: &str) -> Option<&GameVersionRecord> {
        self.versions.iter().find(|v| v.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.find_version(id).is_some()
    }

    /// Release-chronology sort key for a version id: its position in the
    /// manifest (newest first). Unknown ids get `None`.
    pub fn release_index(&self, id: &str) -> Option<usize> {
        self.versions.iter().position(|v| v.id == id)
    }

    /// A version is stable when the manifest types it as a full release.
    pub fn is_stable(&self, id: &str) -> bool {
        self.find_version(id)
            .map(|v| v.version_type == "release")
            .unwrap_or(false)
    }

    /// Fetch the per-version upstream document for a game version.
    pub async fn version_meta(
        &self,
        client: &reqwest::Client,
        id: &str,
    ) -> MetaResult<VersionMeta> {
        let record = self
            .find_version(id)
            .ok_or_else(|| MetaError::UnknownGameVersion(id.to_string()))?;

        let response = client.get(&record.url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(MetaError::Fetch {
                url: record.url.clone(),
                status: status.as_u16(),
            });
        }

        let raw: serde_json::Value = response.json().await?;
        serde_json::from_value(raw).map_err(|e| MetaError::MalformedUpstreamMeta(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manifest() -> GameManifest {
        serde_json::from_str(
            r#"{
                "versions": [
                    { "id": "1.0", "type": "release", "releaseTime": "2011-11-17T22:00:00+00:00", "url": "https://example.com/1.0.json" },
                    { "id": "b1.8.1", "type": "old_beta", "url": "https://example.com/b1.8.1.json" },
                    { "id": "b1.7.3", "type": "old_beta", "url": "https://example.com/b1.7.3.json" }
                ]
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn release_index_follows_manifest_order() {
        let m = manifest();
        assert_eq!(m.release_index("1.0"), Some(0));
        assert_eq!(m.release_index("b1.7.3"), Some(2));
        assert_eq!(m.release_index("a1.2.6"), None);
    }

    #[test]
    fn stability_comes_from_the_release_type() {
        let m = manifest();
        assert!(m.is_stable("1.0"));
        assert!(!m.is_stable("b1.7.3"));
        assert!(!m.is_stable("a1.2.6"));
    }

    #[test]
    fn version_meta_deserializes_legacy_arguments() {
        let meta: VersionMeta = serde_json::from_str(
            r#"{
                "libraries": [
                    { "name": "org.lwjgl.lwjgl:lwjgl:2.9.0" }
                ],
                "minecraftArguments": "${auth_player_name} ${auth_session}"
            }"#,
        )
        .unwrap();
        assert_eq!(meta.libraries.len(), 1);
        assert_eq!(
            meta.minecraft_arguments.as_deref(),
            Some("${auth_player_name} ${auth_session}")
        );
    }

    #[test]
    fn version_meta_without_a_library_list_is_rejected() {
        assert!(serde_json::from_str::<VersionMeta>("{}").is_err());
        assert!(serde_json::from_str::<VersionMeta>(
            r#"{ "minecraftArguments": "${auth_player_name}" }"#
        )
        .is_err());

        // An explicitly empty list is still a well-formed document.
        assert!(serde_json::from_str::<VersionMeta>(r#"{ "libraries": [] }"#).is_ok());
    }
}
