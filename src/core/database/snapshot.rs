// ─── Version snapshot ───
// The immutable aggregate the endpoint layer reads: four raw artifact lists
// reconciled against the game-version manifest into one ordered database.

use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use tracing::warn;

use crate::core::error::{MetaError, MetaResult};
use crate::core::manifest::GameManifest;
use crate::core::maven::ArtifactVersion;

/// A public game version derived from intermediary availability: distinct,
/// manifest-backed, in release-chronology order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameVersion {
    pub version: String,
    pub stable: bool,
}

/// Deployment policy deciding which loader builds are publicly visible.
/// Defaults to allow-all; kept injectable so a deployment can gate
/// pre-release builds without touching aggregation logic.
pub type LoaderVisibility = Arc<dyn Fn(&ArtifactVersion) -> bool + Send + Sync>;

pub fn allow_all() -> LoaderVisibility {
    Arc::new(|_| true)
}

/// One fully reconciled version database. Built wholesale by an aggregation
/// run and never patched; readers share it behind an `Arc`.
pub struct VersionSnapshot {
    pub mappings: Vec<ArtifactVersion>,
    pub intermediary: Vec<ArtifactVersion>,
    loader: Vec<ArtifactVersion>,
    pub installer: Vec<ArtifactVersion>,
    pub game: Vec<GameVersion>,
    pub manifest: GameManifest,
    visibility: LoaderVisibility,
}

// The visibility field is a bare function object, so Debug is written out
// by hand over the data fields.
impl fmt::Debug for VersionSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VersionSnapshot")
            .field("mappings", &self.mappings)
            .field("intermediary", &self.intermediary)
            .field("loader", &self.loader)
            .field("installer", &self.installer)
            .field("game", &self.game)
            .finish_non_exhaustive()
    }
}

impl VersionSnapshot {
    /// Reconcile fetched listings and the manifest into a snapshot.
    ///
    /// Pure over its inputs; all fetching happens in the aggregator.
    pub(crate) fn assemble(
        mappings: Vec<ArtifactVersion>,
        mut intermediary: Vec<ArtifactVersion>,
        mut loader: Vec<ArtifactVersion>,
        installer: Vec<ArtifactVersion>,
        manifest: GameManifest,
        visibility: LoaderVisibility,
    ) -> MetaResult<Self> {
        // Mappings and intermediary drive the derived game list; an empty
        // listing means the upstream repository is broken, not empty.
        if mappings.is_empty() {
            return Err(MetaError::InconsistentData("mappings listing is empty".into()));
        }
        if intermediary.is_empty() {
            return Err(MetaError::InconsistentData(
                "intermediary listing is empty".into(),
            ));
        }

        // Designate the newest publicly visible loader build as stable.
        for version in loader.iter_mut() {
            if (visibility)(version) {
                version.stable = true;
                break;
            }
        }

        // Sort intermediary into manifest release chronology; ids the
        // manifest does not know sort last and are dropped below.
        intermediary.sort_by_key(|v| manifest.release_index(&v.version).unwrap_or(usize::MAX));

        // Intermediary availability implies production-ready mappings.
        for version in intermediary.iter_mut() {
            version.stable = true;
        }

        intermediary.retain(|v| {
            if manifest.contains(&v.version) {
                true
            } else {
                warn!(
                    "Dropping intermediary {} as it does not match a game version",
                    v.version
                );
                false
            }
        });

        // Distinct game versions in first-seen (chronological) order,
        // stability taken from the manifest.
        let mut game: Vec<GameVersion> = Vec::new();
        for version in &intermediary {
            if game.iter().all(|g| g.version != version.version) {
                game.push(GameVersion {
                    version: version.version.clone(),
                    stable: manifest.is_stable(&version.version),
                });
            }
        }

        Ok(Self {
            mappings,
            intermediary,
            loader,
            installer,
            game,
            manifest,
            visibility,
        })
    }

    /// Loader builds the visibility policy accepts, newest first.
    pub fn loader_versions(&self) -> Vec<ArtifactVersion> {
        self.loader
            .iter()
            .filter(|v| (self.visibility)(v))
            .cloned()
            .collect()
    }

    /// Every fetched loader build, policy ignored. Administrative use.
    pub fn all_loader_versions(&self) -> &[ArtifactVersion] {
        &self.loader
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manifest() -> GameManifest {
        serde_json::from_str(
            r#"{
                "versions": [
                    { "id": "1.0", "type": "release", "url": "https://example.com/1.0.json" },
                    { "id": "b1.8.1", "type": "old_beta", "url": "https://example.com/b1.8.1.json" },
                    { "id": "b1.7.3", "type": "old_beta", "url": "https://example.com/b1.7.3.json" }
                ]
            }"#,
        )
        .unwrap()
    }

    fn versions(group_artifact: &str, ids: &[&str]) -> Vec<ArtifactVersion> {
        ids.iter()
            .map(|id| ArtifactVersion::new(group_artifact, id))
            .collect()
    }

    fn assemble(
        intermediary: Vec<ArtifactVersion>,
        loader: Vec<ArtifactVersion>,
        visibility: LoaderVisibility,
    ) -> VersionSnapshot {
        VersionSnapshot::assemble(
            versions("babric:barn", &["b1.7.3+build.1"]),
            intermediary,
            loader,
            versions("babric:fabric-installer", &["0.1.0"]),
            manifest(),
            visibility,
        )
        .unwrap()
    }

    #[test]
    fn empty_required_listing_is_rejected() {
        let err = VersionSnapshot::assemble(
            vec![],
            versions("babric:intermediary", &["b1.7.3"]),
            vec![],
            vec![],
            manifest(),
            allow_all(),
        )
        .unwrap_err();
        assert!(matches!(err, MetaError::InconsistentData(_)));

        let err = VersionSnapshot::assemble(
            versions("babric:barn", &["b1.7.3+build.1"]),
            vec![],
            vec![],
            vec![],
            manifest(),
            allow_all(),
        )
        .unwrap_err();
        assert!(matches!(err, MetaError::InconsistentData(_)));
    }

    #[test]
    fn snapshot_debug_covers_the_data_fields() {
        let snapshot = assemble(
            versions("babric:intermediary", &["b1.7.3"]),
            versions("babric:fabric-loader", &["0.1.0"]),
            allow_all(),
        );
        let rendered = format!("{:?}", snapshot);
        assert!(rendered.contains("VersionSnapshot"));
        assert!(rendered.contains("b1.7.3"));
    }

    #[test]
    fn game_list_is_distinct_and_in_manifest_chronology() {
        // Fetched order disagrees with the manifest, and b1.7.3 has two
        // intermediary builds.
        let snapshot = assemble(
            versions("babric:intermediary", &["b1.7.3", "1.0", "b1.7.3", "b1.8.1"]),
            vec![],
            allow_all(),
        );

        let game: Vec<&str> = snapshot.game.iter().map(|g| g.version.as_str()).collect();
        assert_eq!(game, ["1.0", "b1.8.1", "b1.7.3"]);
    }

    #[test]
    fn game_stability_comes_from_the_manifest() {
        let snapshot = assemble(
            versions("babric:intermediary", &["1.0", "b1.7.3"]),
            vec![],
            allow_all(),
        );

        assert!(snapshot.game.iter().find(|g| g.version == "1.0").unwrap().stable);
        assert!(!snapshot.game.iter().find(|g| g.version == "b1.7.3").unwrap().stable);
    }

    #[test]
    fn intermediary_without_a_manifest_match_is_dropped() {
        let snapshot = assemble(
            versions("babric:intermediary", &["b1.7.3", "in-20100618"]),
            vec![],
            allow_all(),
        );

        assert!(snapshot.intermediary.iter().all(|v| v.version != "in-20100618"));
        assert!(snapshot.game.iter().all(|g| g.version != "in-20100618"));
    }

    #[test]
    fn intermediary_entries_are_marked_stable() {
        let snapshot = assemble(
            versions("babric:intermediary", &["b1.7.3", "1.0"]),
            vec![],
            allow_all(),
        );
        assert!(snapshot.intermediary.iter().all(|v| v.stable));
    }

    #[test]
    fn first_visible_loader_build_is_designated_stable() {
        let snapshot = assemble(
            versions("babric:intermediary", &["b1.7.3"]),
            versions("babric:fabric-loader", &["0.3.0", "0.2.0", "0.1.0"]),
            allow_all(),
        );

        let stable: Vec<&str> = snapshot
            .all_loader_versions()
            .iter()
            .filter(|v| v.stable)
            .map(|v| v.version.as_str())
            .collect();
        assert_eq!(stable, ["0.3.0"]);
    }

    #[test]
    fn visibility_policy_gates_both_designation_and_listing() {
        let hide_newest: LoaderVisibility = Arc::new(|v| v.version != "0.3.0");

        let snapshot = assemble(
            versions("babric:intermediary", &["b1.7.3"]),
            versions("babric:fabric-loader", &["0.3.0", "0.2.0", "0.1.0"]),
            hide_newest,
        );

        let visible = snapshot.loader_versions();
        let listed: Vec<&str> = visible.iter().map(|v| v.version.as_str()).collect();
        assert_eq!(listed, ["0.2.0", "0.1.0"]);

        // Designation skipped the hidden build and marked the next one.
        let stable: Vec<&str> = visible
            .iter()
            .filter(|v| v.stable)
            .map(|v| v.version.as_str())
            .collect();
        assert_eq!(stable, ["0.2.0"]);
    }

    #[test]
    fn visible_loader_versions_are_a_subset_of_all() {
        let snapshot = assemble(
            versions("babric:intermediary", &["b1.7.3"]),
            versions("babric:fabric-loader", &["0.2.0", "0.1.0"]),
            Arc::new(|v| v.version == "0.1.0"),
        );

        let all = snapshot.all_loader_versions();
        for visible in snapshot.loader_versions() {
            assert!(all.contains(&visible));
        }
        assert_eq!(snapshot.loader_versions().len(), 1);
        assert_eq!(all.len(), 2);
    }
}
