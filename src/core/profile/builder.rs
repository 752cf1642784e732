// ─── Profile synthesis ───
// Assembles a launcher-compatible profile from the loader's launcher
// metadata, the per-game-version upstream document, and the resolved loader
// and intermediary builds. Mirrors what the loader's installer writes.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use reqwest::Client;
use tokio::sync::Semaphore;
use tracing::debug;

use super::model::{
    LaunchProfile, Library, LibraryRule, LoaderLauncherMeta, ProfileArguments, Side,
};
use super::package_zip;
use crate::core::config::MetaConfig;
use crate::core::database::VersionSnapshot;
use crate::core::error::{MetaError, MetaResult};
use crate::core::manifest::VersionMeta;
use crate::core::maven::{ArtifactVersion, MavenArtifact, MAVEN_CENTRAL, MOJANG_LIBRARIES};

/// Upper bound on concurrent profile builds. Each build performs two
/// upstream fetches; the cap keeps fan-out bounded under request load.
const PROFILE_WORKERS: usize = 2;

const ISO_8601: &str = "%Y-%m-%dT%H:%M:%S%z";

/// Marker token so programs inspecting the command line (Discord, hybrid GPU
/// drivers) recognize the process as vanilla Minecraft.
const MC_EMU_TOKEN: &str = "-DFabricMcEmu= net.minecraft.client.main.Main ";

/// Pinned compatibility shims required by old client versions. Reproduced
/// verbatim, repository URLs included; launchers resolve these byte-for-byte.
const COMPAT_LIBRARIES: [(&str, &str); 11] = [
    ("babric:log4j-config:1.0.0", ""), // resolved against the loader Maven
    ("net.minecrell:terminalconsoleappender:1.2.0", MAVEN_CENTRAL),
    ("org.slf4j:slf4j-api:1.8.0-beta4", MOJANG_LIBRARIES),
    ("org.apache.logging.log4j:log4j-slf4j18-impl:2.16.0", MOJANG_LIBRARIES),
    ("org.apache.logging.log4j:log4j-api:2.16.0", MOJANG_LIBRARIES),
    ("org.apache.logging.log4j:log4j-core:2.16.0", MOJANG_LIBRARIES),
    ("com.google.code.gson:gson:2.8.9", MOJANG_LIBRARIES),
    ("com.google.guava:guava:31.0.1-jre", MOJANG_LIBRARIES),
    ("org.apache.commons:commons-lang3:3.12.0", MOJANG_LIBRARIES),
    ("commons-io:commons-io:2.11.0", MOJANG_LIBRARIES),
    ("commons-codec:commons-codec:1.15", MOJANG_LIBRARIES),
];

/// Upstream names its loader-patched native builds by convention; there is
/// no structured tag to match on, so selection is a substring contract on
/// the library family and the build-variant suffix.
fn is_loader_patched_native(name: &str) -> bool {
    name.contains("lwjgl") && name.contains("-babric.")
}

/// Tokenize the legacy space-delimited argument string. Trailing spaces in
/// upstream documents must not inject empty arguments.
fn split_legacy_arguments(raw: &str) -> Vec<String> {
    let mut tokens: Vec<String> = raw.split(' ').map(str::to_string).collect();
    while tokens.last().is_some_and(String::is_empty) {
        tokens.pop();
    }
    tokens
}

/// Build a launch profile. Pure: same inputs and instant, same profile.
///
/// The upstream documents are only read; every list in the output is a
/// fresh clone, so concurrent builds sharing the same documents cannot
/// interfere with each other.
pub fn synthesize(
    launcher_meta: &LoaderLauncherMeta,
    version_meta: &VersionMeta,
    loader: &ArtifactVersion,
    intermediary: &ArtifactVersion,
    maven_url: &str,
    side: Side,
    now: DateTime<Utc>,
) -> LaunchProfile {
    let game_version = intermediary.version.as_str();
    let profile_id = format!("fabric-loader-{}-{}", loader.version, game_version);

    // Shared libraries plus the loader pair, resolved against the loader
    // project's Maven rather than the upstream repository.
    let mut libraries: Vec<Library> = launcher_meta.libraries.common.clone();
    libraries.push(Library::at_repo(&intermediary.maven(), maven_url));
    libraries.push(Library::at_repo(&loader.maven(), maven_url));

    libraries.extend(launcher_meta.libraries.for_side(side).iter().cloned());

    // Old asm builds collide with the loader-provided one on the classpath.
    libraries.push(
        Library::at_repo("org.ow2.asm:asm-all:*", MAVEN_CENTRAL)
            .with_rules(vec![LibraryRule::disallow()]),
    );

    for (coordinate, repo) in COMPAT_LIBRARIES {
        let repo = if repo.is_empty() { maven_url } else { repo };
        libraries.push(Library::at_repo(coordinate, repo));
    }

    // The client must load the loader-patched natives in preference to
    // upstream's, so those upstream entries are appended again last.
    if side == Side::Client {
        libraries.extend(
            version_meta
                .libraries
                .iter()
                .filter(|lib| is_loader_patched_native(&lib.name))
                .cloned(),
        );
    }

    let game = match side {
        Side::Client => version_meta
            .minecraft_arguments
            .as_deref()
            .map(split_legacy_arguments)
            .unwrap_or_default(),
        Side::Server => Vec::new(),
    };

    let jvm = match side {
        Side::Client => vec![
            MC_EMU_TOKEN.to_string(),
            "-cp".to_string(),
            "${classpath}".to_string(),
            "-Djava.library.path=${natives_directory}".to_string(),
        ],
        Side::Server => Vec::new(),
    };

    let timestamp = now.format(ISO_8601).to_string();

    LaunchProfile {
        id: profile_id,
        inherits_from: game_version.to_string(),
        release_time: timestamp.clone(),
        time: timestamp,
        profile_type: "release".to_string(),
        main_class: launcher_meta.main_class.resolve(side).to_string(),
        arguments: ProfileArguments { game, jvm },
        libraries,
    }
}

/// Resolves snapshot entries, fetches the upstream documents, and runs the
/// synthesis. Shared across requests; builds are capped by a small worker
/// pool.
pub struct ProfileBuilder {
    client: Client,
    config: MetaConfig,
    permits: Arc<Semaphore>,
}

impl ProfileBuilder {
    pub fn new(client: Client, config: MetaConfig) -> Self {
        Self {
            client,
            config,
            permits: Arc::new(Semaphore::new(PROFILE_WORKERS)),
        }
    }

    /// Build the launch profile for a (loader version, game version, side)
    /// triple against the given snapshot.
    pub async fn build_profile(
        &self,
        snapshot: &VersionSnapshot,
        loader_version: &str,
        game_version: &str,
        side: Side,
    ) -> MetaResult<LaunchProfile> {
        let _permit = self
            .permits
            .acquire()
            .await
            .map_err(|_| MetaError::Other("profile worker pool closed".to_string()))?;

        let loader = snapshot
            .all_loader_versions()
            .iter()
            .find(|v| v.version == loader_version)
            .cloned()
            .ok_or_else(|| MetaError::UnknownLoaderVersion(loader_version.to_string()))?;

        let intermediary = snapshot
            .intermediary
            .iter()
            .find(|v| v.version == game_version)
            .cloned()
            .ok_or_else(|| MetaError::UnknownGameVersion(game_version.to_string()))?;

        let launcher_meta = self.fetch_launcher_meta(&loader).await?;
        let version_meta = snapshot
            .manifest
            .version_meta(&self.client, game_version)
            .await?;

        debug!(
            "Synthesizing {} profile for loader {} / game {}",
            side, loader_version, game_version
        );

        Ok(synthesize(
            &launcher_meta,
            &version_meta,
            &loader,
            &intermediary,
            &self.config.maven_url,
            side,
            Utc::now(),
        ))
    }

    /// Serialized JSON form of a profile, as served to launchers.
    pub async fn build_profile_json(
        &self,
        snapshot: &VersionSnapshot,
        loader_version: &str,
        game_version: &str,
        side: Side,
    ) -> MetaResult<Vec<u8>> {
        let profile = self
            .build_profile(snapshot, loader_version, game_version, side)
            .await?;
        Ok(serde_json::to_vec(&profile)?)
    }

    /// Zip package form: the client profile JSON plus the placeholder jar.
    pub async fn build_profile_zip(
        &self,
        snapshot: &VersionSnapshot,
        loader_version: &str,
        game_version: &str,
    ) -> MetaResult<Vec<u8>> {
        let profile = self
            .build_profile(snapshot, loader_version, game_version, Side::Client)
            .await?;
        let json = serde_json::to_vec(&profile)?;
        package_zip(&profile.id, &json)
    }

    /// Fetch the loader build's launcher metadata document from its Maven
    /// location. A document missing its library list or main class is
    /// malformed, not absent.
    async fn fetch_launcher_meta(
        &self,
        loader: &ArtifactVersion,
    ) -> MetaResult<LoaderLauncherMeta> {
        let artifact = MavenArtifact::parse(&loader.maven())?;
        let url = artifact.url(&self.config.maven_url, "json");

        let response = self.client.get(&url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(MetaError::Fetch {
                url,
                status: status.as_u16(),
            });
        }

        let raw: serde_json::Value = response.json().await?;
        serde_json::from_value(raw).map_err(|e| MetaError::MalformedUpstreamMeta(e.to_string()))
    }
}
