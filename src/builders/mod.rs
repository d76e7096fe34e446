//! Builder definitions
//!
//! A builder is a build-tool family that can turn a source tree into a
//! container image. Each builder knows which manifest files belong to it and
//! how to turn a matching manifest into an [`Artifact`].

use crate::image::ImageReference;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

pub mod docker;
pub mod jib_gradle;
pub mod jib_maven;
pub mod registry;

pub use docker::DockerBuilder;
pub use jib_gradle::JibGradleBuilder;
pub use jib_maven::JibMavenBuilder;
pub use registry::BuilderRegistry;

/// Build-tool family that produces an artifact
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BuilderKind {
    Docker,
    JibMaven,
    JibGradle,
}

impl BuilderKind {
    pub fn all_variants() -> &'static [BuilderKind] {
        &[BuilderKind::Docker, BuilderKind::JibMaven, BuilderKind::JibGradle]
    }

    /// Name used in analysis output and structured artifact mappings
    pub fn name(&self) -> &'static str {
        match self {
            BuilderKind::Docker => "Docker",
            BuilderKind::JibMaven => "Jib Maven Plugin",
            BuilderKind::JibGradle => "Jib Gradle Plugin",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::all_variants()
            .iter()
            .copied()
            .find(|kind| kind.name() == name)
    }

    pub fn is_jib(&self) -> bool {
        matches!(self, BuilderKind::JibMaven | BuilderKind::JibGradle)
    }
}

impl fmt::Display for BuilderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for BuilderKind {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.name())
    }
}

impl<'de> Deserialize<'de> for BuilderKind {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::from_name(&s).ok_or_else(|| {
            serde::de::Error::custom(format!(
                "unknown builder '{}'. Valid options: Docker, Jib Maven Plugin, Jib Gradle Plugin",
                s
            ))
        })
    }
}

/// Kind-specific data describing where an artifact lives
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactPayload {
    /// Manifest path relative to the project root, `/`-separated
    pub path: String,
    /// Module name for multi-module builds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project: Option<String>,
    /// Target image declared by the manifest itself
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<ImageReference>,
}

impl ArtifactPayload {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            project: None,
            image: None,
        }
    }
}

/// A detected build unit
///
/// Serializes as `{"name": <builder>, "payload": {...}}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Artifact {
    #[serde(rename = "name")]
    pub kind: BuilderKind,
    pub payload: ArtifactPayload,
}

impl Artifact {
    pub fn new(kind: BuilderKind, payload: ArtifactPayload) -> Self {
        Self { kind, payload }
    }

    pub fn path(&self) -> &str {
        &self.payload.path
    }

    /// Build context: the manifest's directory, `.` for the project root
    pub fn context(&self) -> String {
        match self.payload.path.rsplit_once('/') {
            Some((dir, _)) if !dir.is_empty() => dir.to_string(),
            _ => ".".to_string(),
        }
    }

    pub fn file_name(&self) -> &str {
        match self.payload.path.rsplit_once('/') {
            Some((_, name)) => name,
            None => &self.payload.path,
        }
    }

    /// Name of the directory holding the manifest, if it is not the root
    pub fn context_dir_name(&self) -> Option<&str> {
        let (dir, _) = self.payload.path.rsplit_once('/')?;
        dir.rsplit('/').next().filter(|name| !name.is_empty())
    }

    pub fn declared_image(&self) -> Option<&ImageReference> {
        self.payload.image.as_ref()
    }
}

/// A build-tool family capable of recognising its manifests
pub trait Builder: Send + Sync {
    fn kind(&self) -> BuilderKind;

    /// Manifest file names this builder inspects (e.g. "Dockerfile", "pom.xml")
    fn manifest_names(&self) -> &[&'static str];

    /// Whether the manifest belongs to this builder
    fn detect(&self, file_name: &str, content: Option<&str>) -> bool;

    /// Build the artifact for a manifest that [`Builder::detect`] accepted
    fn extract(&self, rel_path: &str, content: Option<&str>) -> Artifact;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_kind_names_round_trip() {
        for kind in BuilderKind::all_variants() {
            assert_eq!(BuilderKind::from_name(kind.name()), Some(*kind));
        }
        assert_eq!(BuilderKind::from_name("docker"), None);
        assert_eq!(BuilderKind::from_name("Buildpacks"), None);
    }

    #[test]
    fn test_builder_kind_deserialize_unknown_fails() {
        assert!(serde_json::from_str::<BuilderKind>("\"Kaniko\"").is_err());
        assert_eq!(
            serde_json::from_str::<BuilderKind>("\"Jib Maven Plugin\"").unwrap(),
            BuilderKind::JibMaven
        );
    }

    #[test]
    fn test_artifact_context() {
        let nested = Artifact::new(BuilderKind::Docker, ArtifactPayload::new("svc/web/Dockerfile"));
        assert_eq!(nested.context(), "svc/web");
        assert_eq!(nested.context_dir_name(), Some("web"));
        assert_eq!(nested.file_name(), "Dockerfile");

        let root = Artifact::new(BuilderKind::Docker, ArtifactPayload::new("Dockerfile"));
        assert_eq!(root.context(), ".");
        assert_eq!(root.context_dir_name(), None);
    }

    #[test]
    fn test_artifact_serialization_shape() {
        let artifact = Artifact::new(BuilderKind::Docker, ArtifactPayload::new("a/Dockerfile"));
        assert_eq!(
            serde_json::to_string(&artifact).unwrap(),
            r#"{"name":"Docker","payload":{"path":"a/Dockerfile"}}"#
        );
    }
}
