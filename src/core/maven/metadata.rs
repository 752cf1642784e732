// ─── Maven version listings ───
// Fetches and parses `maven-metadata.xml` repository indexes into
// `ArtifactVersion` records, newest build first.

use serde::Deserialize;
use tracing::debug;

use super::ArtifactVersion;
use crate::core::error::{MetaError, MetaResult};

#[derive(Debug, Deserialize)]
struct MavenMetadata {
    versioning: MavenVersioning,
}

#[derive(Debug, Deserialize)]
struct MavenVersioning {
    versions: MavenVersions,
}

#[derive(Debug, Deserialize)]
struct MavenVersions {
    #[serde(rename = "version", default)]
    version: Vec<String>,
}

/// Parse a `maven-metadata.xml` document into version records.
///
/// Maven lists versions oldest first; the returned list is reversed so the
/// newest build comes first, which is the order every consumer of the
/// snapshot expects.
pub fn parse_metadata_versions(xml: &str, group_artifact: &str) -> MetaResult<Vec<ArtifactVersion>> {
    let metadata: MavenMetadata = quick_xml::de::from_str(xml)?;

    let mut versions: Vec<ArtifactVersion> = metadata
        .versioning
        .versions
        .version
        .iter()
        .map(|v| ArtifactVersion::new(group_artifact, v))
        .collect();
    versions.reverse();

    Ok(versions)
}

/// Fetch the repository listing for one `group:artifact` pair.
pub async fn fetch_artifact_versions(
    client: &reqwest::Client,
    metadata_url: &str,
    group_artifact: &str,
) -> MetaResult<Vec<ArtifactVersion>> {
    let response = client.get(metadata_url).send().await?;

    let status = response.status();
    if !status.is_success() {
        return Err(MetaError::Fetch {
            url: metadata_url.to_string(),
            status: status.as_u16(),
        });
    }

    let xml = response.text().await?;
    let versions = parse_metadata_versions(&xml, group_artifact)?;

    debug!(
        "Fetched {} versions of {} from {}",
        versions.len(),
        group_artifact,
        metadata_url
    );

    Ok(versions)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
    <metadata>
        <groupId>babric</groupId>
        <artifactId>fabric-loader</artifactId>
        <versioning>
            <latest>0.3.0</latest>
            <release>0.3.0</release>
            <versions>
                <version>0.1.0</version>
                <version>0.2.0</version>
                <version>0.3.0</version>
            </versions>
            <lastUpdated>20240101000000</lastUpdated>
        </versioning>
    </metadata>
    "#;

    #[test]
    fn parses_versions_newest_first() {
        let versions = parse_metadata_versions(SAMPLE, "babric:fabric-loader").unwrap();
        let listed: Vec<&str> = versions.iter().map(|v| v.version.as_str()).collect();
        assert_eq!(listed, ["0.3.0", "0.2.0", "0.1.0"]);
    }

    #[test]
    fn parsed_entries_carry_coordinate_and_default_stability() {
        let versions = parse_metadata_versions(SAMPLE, "babric:fabric-loader").unwrap();
        assert_eq!(versions[0].maven(), "babric:fabric-loader:0.3.0");
        assert!(versions.iter().all(|v| !v.stable));
    }

    #[test]
    fn empty_listing_parses_to_empty_list() {
        let xml = "<metadata><versioning><versions></versions></versioning></metadata>";
        let versions = parse_metadata_versions(xml, "babric:barn").unwrap();
        assert!(versions.is_empty());
    }
}
