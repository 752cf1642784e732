mod artifact;
mod metadata;

pub use artifact::{ArtifactVersion, MavenArtifact};
pub use metadata::{fetch_artifact_versions, parse_metadata_versions};

/// Well-known repositories referenced by synthesized profiles. Trailing
/// slashes are part of the wire format launchers expect.
pub const BABRIC_MAVEN: &str = "https://maven.glass-launcher.net/babric/";
pub const MOJANG_LIBRARIES: &str = "https://libraries.minecraft.net/";
pub const MAVEN_CENTRAL: &str = "https://repo1.maven.org/maven2/";

/// URL of the `maven-metadata.xml` listing for a `group:artifact` pair.
pub fn metadata_url(repo_base: &str, group_artifact: &str) -> String {
    let base = repo_base.trim_end_matches('/');
    let path = group_artifact.replace(['.', ':'], "/");
    format!("{}/{}/maven-metadata.xml", base, path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metadata_url_expands_group_and_artifact() {
        assert_eq!(
            metadata_url(BABRIC_MAVEN, "babric:fabric-loader"),
            "https://maven.glass-launcher.net/babric/babric/fabric-loader/maven-metadata.xml"
        );
    }
}
