use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::error::{MetaError, MetaResult};

/// One published build of one artifact kind (mapping, intermediary, loader,
/// installer). Identity is `(group_artifact, version)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtifactVersion {
    /// `group:artifact` pair, e.g. `babric:fabric-loader`.
    pub group_artifact: String,
    pub version: String,
    pub stable: bool,
}

impl ArtifactVersion {
    pub fn new(group_artifact: &str, version: &str) -> Self {
        Self {
            group_artifact: group_artifact.to_string(),
            version: version.to_string(),
            stable: false,
        }
    }

    /// Full Maven coordinate, e.g. `babric:fabric-loader:0.16.10`.
    pub fn maven(&self) -> String {
        format!("{}:{}", self.group_artifact, self.version)
    }
}

/// A fully parsed `groupId:artifactId:version` Maven coordinate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MavenArtifact {
    pub group_id: String,
    pub artifact_id: String,
    pub version: String,
}

impl MavenArtifact {
    pub fn parse(coord: &str) -> MetaResult<Self> {
        let parts: Vec<&str> = coord.split(':').collect();

        match parts.as_slice() {
            [group, artifact, version] => Ok(Self {
                group_id: group.to_string(),
                artifact_id: artifact.to_string(),
                version: version.to_string(),
            }),
            _ => Err(MetaError::InvalidMavenCoordinate(coord.to_string())),
        }
    }

    /// Group path portion, e.g. `net/fabricmc` for `net.fabricmc`.
    pub fn group_path(&self) -> String {
        self.group_id.replace('.', "/")
    }

    /// `artifactId-version.extension`
    pub fn filename(&self, extension: &str) -> String {
        format!("{}-{}.{}", self.artifact_id, self.version, extension)
    }

    /// Full URL of this artifact's file under the given repository base.
    ///
    /// Template: `<repo>/<group_path>/<artifact_id>/<version>/<filename>`
    pub fn url(&self, repo_base: &str, extension: &str) -> String {
        let base = repo_base.trim_end_matches('/');
        format!(
            "{}/{}/{}/{}/{}",
            base,
            self.group_path(),
            self.artifact_id,
            self.version,
            self.filename(extension)
        )
    }
}

impl fmt::Display for MavenArtifact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.group_id, self.artifact_id, self.version)
    }
}
