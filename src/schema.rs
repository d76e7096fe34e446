//! Deployment configuration schema
//!
//! This module defines the `berth.yaml` document: which images to build from
//! which sources, and which manifests deploy them. Parsing applies the schema
//! defaults so that a file that spells out a default and one that omits it
//! produce equal values.

use crate::error::{InitError, Result};
use crate::image::ImageReference;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub const API_VERSION_PREFIX: &str = "berth/";
pub const API_VERSION: &str = "berth/v1";
pub const CONFIG_KIND: &str = "Config";
pub const DEFAULT_CONFIG_FILE: &str = "berth.yaml";

const DEFAULT_CONTEXT: &str = ".";
const DEFAULT_DOCKERFILE: &str = "Dockerfile";

fn default_context() -> String {
    DEFAULT_CONTEXT.to_string()
}

fn is_default_context(context: &str) -> bool {
    context == DEFAULT_CONTEXT
}

fn default_dockerfile() -> String {
    DEFAULT_DOCKERFILE.to_string()
}

/// Root of a `berth.yaml` document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentConfig {
    pub api_version: String,
    pub kind: String,
    #[serde(default)]
    pub metadata: Metadata,
    #[serde(default)]
    pub build: BuildConfig,
    #[serde(default)]
    pub deploy: DeployConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Metadata {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BuildConfig {
    #[serde(default)]
    pub artifacts: Vec<BuildArtifact>,
}

/// One image built from one source directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildArtifact {
    pub image: ImageReference,
    #[serde(default = "default_context", skip_serializing_if = "is_default_context")]
    pub context: String,
    /// Omitted when building the default `Dockerfile`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub docker: Option<DockerArtifact>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jib: Option<JibArtifact>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DockerArtifact {
    #[serde(default = "default_dockerfile")]
    pub dockerfile: String,
}

impl Default for DockerArtifact {
    fn default() -> Self {
        Self {
            dockerfile: default_dockerfile(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JibType {
    Maven,
    Gradle,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct JibArtifact {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub build_type: Option<JibType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DeployConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kubectl: Option<KubectlDeploy>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct KubectlDeploy {
    #[serde(default)]
    pub manifests: Vec<String>,
}

impl DeploymentConfig {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            api_version: API_VERSION.to_string(),
            kind: CONFIG_KIND.to_string(),
            metadata: Metadata { name: name.into() },
            build: BuildConfig::default(),
            deploy: DeployConfig::default(),
        }
    }

    /// Parses a document and applies schema defaults
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let mut config: DeploymentConfig = serde_yaml::from_str(content)
            .map_err(|e| InitError::InvalidConfig(e.to_string()))?;

        if !config.api_version.starts_with(API_VERSION_PREFIX) {
            return Err(InitError::InvalidConfig(format!(
                "unsupported apiVersion '{}'",
                config.api_version
            )));
        }
        if config.kind != CONFIG_KIND {
            return Err(InitError::InvalidConfig(format!(
                "unsupported kind '{}'",
                config.kind
            )));
        }

        config.apply_defaults();
        Ok(config)
    }

    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    fn apply_defaults(&mut self) {
        for artifact in &mut self.build.artifacts {
            if artifact.docker.is_none() && artifact.jib.is_none() {
                artifact.docker = Some(DockerArtifact::default());
            }
        }
    }
}

/// Reads and parses a deployment config from disk
pub fn parse_config(path: &Path) -> Result<DeploymentConfig> {
    let content = fs::read_to_string(path).map_err(|e| {
        InitError::InvalidConfig(format!("failed to read {}: {}", path.display(), e))
    })?;
    DeploymentConfig::from_yaml_str(&content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_make_documents_equal() {
        let terse = r#"
apiVersion: berth/v1
kind: Config
build:
  artifacts:
  - image: skaffold-example
"#;
        let verbose = r#"
apiVersion: berth/v1
kind: Config
build:
  artifacts:
  - image: skaffold-example
    context: .
    docker:
      dockerfile: Dockerfile
deploy: {}
"#;
        let a = DeploymentConfig::from_yaml_str(terse).unwrap();
        let b = DeploymentConfig::from_yaml_str(verbose).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_serialization_omits_defaults() {
        let mut config = DeploymentConfig::new("hello");
        config.build.artifacts.push(BuildArtifact {
            image: ImageReference::parse("skaffold-example").unwrap(),
            context: ".".to_string(),
            docker: None,
            jib: None,
        });
        config.deploy.kubectl = Some(KubectlDeploy {
            manifests: vec!["k8s-pod.yaml".to_string()],
        });

        let yaml = config.to_yaml().unwrap();
        assert!(yaml.starts_with("apiVersion: berth/v1\nkind: Config\n"));
        assert!(!yaml.contains("context"));
        assert!(yaml.contains("- k8s-pod.yaml"));
    }

    #[test]
    fn test_jib_artifact_round_trip() {
        let content = r#"
apiVersion: berth/v1
kind: Config
build:
  artifacts:
  - image: gcr.io/example/web
    context: web
    jib:
      type: maven
      project: web
"#;
        let config = DeploymentConfig::from_yaml_str(content).unwrap();
        let artifact = &config.build.artifacts[0];
        assert!(artifact.docker.is_none());
        assert_eq!(
            artifact.jib,
            Some(JibArtifact {
                build_type: Some(JibType::Maven),
                project: Some("web".to_string()),
            })
        );

        let reparsed = DeploymentConfig::from_yaml_str(&config.to_yaml().unwrap()).unwrap();
        assert_eq!(config, reparsed);
    }

    #[test]
    fn test_rejects_foreign_documents() {
        assert!(DeploymentConfig::from_yaml_str("apiVersion: v1\nkind: Pod\n").is_err());
        assert!(DeploymentConfig::from_yaml_str("apiVersion: berth/v1\nkind: Pod\n").is_err());
        assert!(DeploymentConfig::from_yaml_str("build: [").is_err());
    }
}
