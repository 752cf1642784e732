use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::core::error::MetaError;

/// Which half of the game a profile targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Client,
    Server,
}

impl Side {
    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Client => "client",
            Side::Server => "server",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Side {
    type Err = MetaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "client" => Ok(Side::Client),
            "server" => Ok(Side::Server),
            other => Err(MetaError::Other(format!("unknown side: {other}"))),
        }
    }
}

/// A launcher library entry.
///
/// Upstream documents attach download descriptors, natives classifiers and
/// OS rules to their entries; the flattened `extra` map carries anything we
/// do not model so entries re-appended into a profile survive byte-for-byte.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Library {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rules: Option<Vec<LibraryRule>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Library {
    /// Plain `{ name, url }` entry resolved against a repository.
    pub fn at_repo(name: &str, url: &str) -> Self {
        Self {
            name: name.to_string(),
            url: Some(url.to_string()),
            rules: None,
            extra: Map::new(),
        }
    }

    pub fn with_rules(mut self, rules: Vec<LibraryRule>) -> Self {
        self.rules = Some(rules);
        self
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LibraryRule {
    pub action: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl LibraryRule {
    pub fn disallow() -> Self {
        Self {
            action: "disallow".to_string(),
            extra: Map::new(),
        }
    }
}

/// The loader build's launcher metadata document, published alongside its
/// Maven artifact.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoaderLauncherMeta {
    pub libraries: LoaderLibraries,
    pub main_class: MainClass,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct LoaderLibraries {
    #[serde(default)]
    pub common: Vec<Library>,
    #[serde(default)]
    pub client: Vec<Library>,
    #[serde(default)]
    pub server: Vec<Library>,
}

impl LoaderLibraries {
    pub fn for_side(&self, side: Side) -> &[Library] {
        match side {
            Side::Client => &self.client,
            Side::Server => &self.server,
        }
    }
}

/// Entry point descriptor: older loader builds publish a single class name,
/// newer ones a per-side object. Both forms are valid.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum MainClass {
    Single(String),
    PerSide { client: String, server: String },
}

impl MainClass {
    pub fn resolve(&self, side: Side) -> &str {
        match self {
            MainClass::Single(class) => class,
            MainClass::PerSide { client, server } => match side {
                Side::Client => client,
                Side::Server => server,
            },
        }
    }
}

/// A synthesized launch descriptor, serialized as-is to consumers.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LaunchProfile {
    pub id: String,
    pub inherits_from: String,
    pub release_time: String,
    pub time: String,
    #[serde(rename = "type")]
    pub profile_type: String,
    pub main_class: String,
    pub arguments: ProfileArguments,
    pub libraries: Vec<Library>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfileArguments {
    pub game: Vec<String>,
    /// Only populated for the client; omitted from serialization otherwise.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub jvm: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn side_round_trips_through_str() {
        assert_eq!("client".parse::<Side>().unwrap(), Side::Client);
        assert_eq!("server".parse::<Side>().unwrap(), Side::Server);
        assert!("common".parse::<Side>().is_err());
    }

    #[test]
    fn library_passthrough_preserves_unknown_fields() {
        let raw = r#"{
            "name": "org.lwjgl.lwjgl:lwjgl:2.9.4-babric.1",
            "downloads": { "artifact": { "sha1": "abc", "size": 7 } }
        }"#;
        let lib: Library = serde_json::from_str(raw).unwrap();
        assert!(lib.extra.contains_key("downloads"));

        let round = serde_json::to_value(&lib).unwrap();
        assert_eq!(round["downloads"]["artifact"]["size"], 7);
    }

    #[test]
    fn main_class_supports_both_wire_forms() {
        let single: MainClass = serde_json::from_str(r#""net.minecraft.client.Minecraft""#).unwrap();
        assert_eq!(single.resolve(Side::Server), "net.minecraft.client.Minecraft");

        let per_side: MainClass = serde_json::from_str(
            r#"{ "client": "a.Client", "server": "a.Server" }"#,
        )
        .unwrap();
        assert_eq!(per_side.resolve(Side::Client), "a.Client");
        assert_eq!(per_side.resolve(Side::Server), "a.Server");
    }

    #[test]
    fn server_profile_omits_jvm_arguments_when_empty() {
        let args = ProfileArguments {
            game: vec![],
            jvm: vec![],
        };
        let json = serde_json::to_value(&args).unwrap();
        assert!(json.get("jvm").is_none());
        assert_eq!(json["game"], serde_json::json!([]));
    }
}
