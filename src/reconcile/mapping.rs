//! Artifact mappings supplied on the command line
//!
//! Two encodings are accepted in the same run:
//!
//! - legacy: `leeroy-app/Dockerfile=gcr.io/k8s-skaffold/leeroy-app`
//! - structured: `{"builder":"Docker","payload":{"path":"leeroy-app/Dockerfile"},"image":"gcr.io/k8s-skaffold/leeroy-app"}`

use crate::builders::{ArtifactPayload, BuilderKind};
use crate::error::{InitError, Result};
use crate::image::ImageReference;
use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliMapping {
    /// `path=image`; always refers to a Dockerfile
    Legacy { path: String, image: ImageReference },
    /// JSON object naming the builder explicitly
    Structured {
        kind: BuilderKind,
        payload: ArtifactPayload,
        image: ImageReference,
    },
}

#[derive(Deserialize)]
struct StructuredMapping {
    builder: BuilderKind,
    payload: ArtifactPayload,
    image: String,
}

impl CliMapping {
    /// Decodes structured JSON first and falls back to the legacy `path=image` form.
    pub fn parse(input: &str) -> Result<Self> {
        let trimmed = input.trim();

        if trimmed.starts_with('{') {
            let raw: StructuredMapping = serde_json::from_str(trimmed)
                .map_err(|e| InitError::malformed(input, e.to_string()))?;
            let image = ImageReference::parse(&raw.image)
                .map_err(|_| InitError::malformed(input, format!("invalid image '{}'", raw.image)))?;
            let mut payload = raw.payload;
            payload.path = normalize_path(&payload.path);
            if payload.path.is_empty() {
                return Err(InitError::malformed(input, "payload path is empty"));
            }
            return Ok(CliMapping::Structured {
                kind: raw.builder,
                payload,
                image,
            });
        }

        let parts: Vec<&str> = trimmed.split('=').collect();
        if parts.len() != 2 {
            return Err(InitError::malformed(
                input,
                "expected <path>=<image> with exactly one '='",
            ));
        }

        let path = normalize_path(parts[0]);
        if path.is_empty() {
            return Err(InitError::malformed(input, "path is empty"));
        }
        let image = ImageReference::parse(parts[1])
            .map_err(|_| InitError::malformed(input, format!("invalid image '{}'", parts[1])))?;

        Ok(CliMapping::Legacy { path, image })
    }

    pub fn parse_all(inputs: &[String]) -> Result<Vec<Self>> {
        inputs.iter().map(|s| Self::parse(s)).collect()
    }

    pub fn path(&self) -> &str {
        match self {
            CliMapping::Legacy { path, .. } => path,
            CliMapping::Structured { payload, .. } => &payload.path,
        }
    }

    /// Builder the mapping targets; legacy mappings only ever name Dockerfiles
    pub fn kind(&self) -> BuilderKind {
        match self {
            CliMapping::Legacy { .. } => BuilderKind::Docker,
            CliMapping::Structured { kind, .. } => *kind,
        }
    }

    pub fn image(&self) -> &ImageReference {
        match self {
            CliMapping::Legacy { image, .. } | CliMapping::Structured { image, .. } => image,
        }
    }
}

/// `./a\b/Dockerfile` → `a/b/Dockerfile`
fn normalize_path(raw: &str) -> String {
    raw.trim()
        .replace('\\', "/")
        .split('/')
        .filter(|part| !part.is_empty() && *part != ".")
        .collect::<Vec<_>>()
        .join("/")
}
