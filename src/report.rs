//! Analysis report for `berth init --analyze`
//!
//! The report is a single line of compact JSON. Two shapes exist: the legacy
//! one lists Dockerfile paths and image names; the current one (extended
//! detection) lists every builder with its payload and flags images a
//! builder already declares.

use crate::builders::{Artifact, BuilderKind};
use crate::error::{InitError, Result};
use crate::image::ImageReference;
use serde::Serialize;
use std::io::Write;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum AnalysisReport {
    Legacy(LegacyReport),
    Current(CurrentReport),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LegacyReport {
    pub dockerfiles: Vec<String>,
    pub images: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CurrentReport {
    pub builders: Vec<Artifact>,
    pub images: Vec<ImageMatch>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImageMatch {
    pub name: ImageReference,
    #[serde(rename = "foundMatch")]
    pub found_match: bool,
}

impl AnalysisReport {
    pub fn build(artifacts: &[Artifact], images: &[ImageReference], extended: bool) -> Self {
        if extended {
            AnalysisReport::Current(CurrentReport {
                builders: artifacts.to_vec(),
                images: images
                    .iter()
                    .map(|image| ImageMatch {
                        name: image.clone(),
                        found_match: artifacts
                            .iter()
                            .any(|a| a.declared_image() == Some(image)),
                    })
                    .collect(),
            })
        } else {
            AnalysisReport::Legacy(LegacyReport {
                dockerfiles: artifacts
                    .iter()
                    .filter(|a| a.kind == BuilderKind::Docker)
                    .map(|a| a.path().to_string())
                    .collect(),
                images: images.iter().map(|i| i.to_string()).collect(),
            })
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Writes the report as one newline-terminated line
    pub fn write_to(&self, out: &mut dyn Write) -> Result<()> {
        let line = self.to_json()?;
        writeln!(out, "{}", line).map_err(|e| InitError::Serialization {
            what: "analysis report",
            reason: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builders::ArtifactPayload;

    fn sample() -> (Vec<Artifact>, Vec<ImageReference>) {
        let artifacts = vec![
            Artifact::new(BuilderKind::Docker, ArtifactPayload::new("a/Dockerfile")),
            Artifact::new(BuilderKind::Docker, ArtifactPayload::new("b/Dockerfile")),
        ];
        let images = vec![
            ImageReference::parse("img/a").unwrap(),
            ImageReference::parse("img/b").unwrap(),
        ];
        (artifacts, images)
    }

    #[test]
    fn test_legacy_shape() {
        let (artifacts, images) = sample();
        let mut out = Vec::new();
        AnalysisReport::build(&artifacts, &images, false)
            .write_to(&mut out)
            .unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "{\"dockerfiles\":[\"a/Dockerfile\",\"b/Dockerfile\"],\"images\":[\"img/a\",\"img/b\"]}\n"
        );
    }

    #[test]
    fn test_current_shape() {
        let (artifacts, images) = sample();
        let json = AnalysisReport::build(&artifacts, &images, true).to_json().unwrap();
        assert_eq!(
            json,
            concat!(
                r#"{"builders":[{"name":"Docker","payload":{"path":"a/Dockerfile"}},"#,
                r#"{"name":"Docker","payload":{"path":"b/Dockerfile"}}],"#,
                r#""images":[{"name":"img/a","foundMatch":false},{"name":"img/b","foundMatch":false}]}"#
            )
        );
    }

    #[test]
    fn test_current_shape_flags_declared_images() {
        let mut payload = ArtifactPayload::new("pom.xml");
        payload.image = Some(ImageReference::parse("img/jib").unwrap());
        let artifacts = vec![Artifact::new(BuilderKind::JibMaven, payload)];
        let images = vec![
            ImageReference::parse("img/jib").unwrap(),
            ImageReference::parse("img/other").unwrap(),
        ];

        let json = AnalysisReport::build(&artifacts, &images, true).to_json().unwrap();
        assert!(json.contains(r#"{"name":"Jib Maven Plugin","payload":{"path":"pom.xml","image":"img/jib"}}"#));
        assert!(json.contains(r#"{"name":"img/jib","foundMatch":true}"#));
        assert!(json.contains(r#"{"name":"img/other","foundMatch":false}"#));
    }

    #[test]
    fn test_legacy_shape_lists_only_dockerfiles() {
        let artifacts = vec![
            Artifact::new(BuilderKind::Docker, ArtifactPayload::new("Dockerfile")),
            Artifact::new(BuilderKind::JibGradle, ArtifactPayload::new("build.gradle")),
        ];
        let json = AnalysisReport::build(&artifacts, &[], false).to_json().unwrap();
        assert_eq!(json, r#"{"dockerfiles":["Dockerfile"],"images":[]}"#);
    }

    #[test]
    fn test_empty_report() {
        let json = AnalysisReport::build(&[], &[], true).to_json().unwrap();
        assert_eq!(json, r#"{"builders":[],"images":[]}"#);
    }
}
