//! Jib Gradle plugin builder (Java/Kotlin)

use super::{Artifact, ArtifactPayload, Builder, BuilderKind};
use crate::image::ImageReference;
use regex::Regex;
use std::sync::OnceLock;

const PLUGIN_ID: &str = "com.google.cloud.tools.jib";

pub struct JibGradleBuilder;

fn target_image_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r#"(?s)(?:jib\.to\.image\s*=\s*['"]([^'"]+)['"])|(?:\bto\s*\{[^}]*?\bimage\s*=\s*['"]([^'"]+)['"])"#,
        )
        .expect("valid regex")
    })
}

impl Builder for JibGradleBuilder {
    fn kind(&self) -> BuilderKind {
        BuilderKind::JibGradle
    }

    fn manifest_names(&self) -> &[&'static str] {
        &["build.gradle", "build.gradle.kts"]
    }

    fn detect(&self, file_name: &str, content: Option<&str>) -> bool {
        match file_name {
            "build.gradle" | "build.gradle.kts" => content.is_some_and(|c| c.contains(PLUGIN_ID)),
            _ => false,
        }
    }

    fn extract(&self, rel_path: &str, content: Option<&str>) -> Artifact {
        let mut payload = ArtifactPayload::new(rel_path);
        payload.image = content.and_then(parse_target_image);
        Artifact::new(BuilderKind::JibGradle, payload)
    }
}

fn parse_target_image(content: &str) -> Option<ImageReference> {
    let cap = target_image_re().captures(content)?;
    let raw = cap.get(1).or_else(|| cap.get(2))?.as_str();
    ImageReference::strip_tag(raw).ok()
}
