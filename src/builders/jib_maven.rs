//! Jib Maven plugin builder (Java/Kotlin)

use super::{Artifact, ArtifactPayload, Builder, BuilderKind};
use crate::image::ImageReference;
use roxmltree::{Document, Node};
use tracing::debug;

const POM: &str = "pom.xml";
const PLUGIN_ARTIFACT_ID: &str = "jib-maven-plugin";

pub struct JibMavenBuilder;

impl Builder for JibMavenBuilder {
    fn kind(&self) -> BuilderKind {
        BuilderKind::JibMaven
    }

    fn manifest_names(&self) -> &[&'static str] {
        &[POM]
    }

    fn detect(&self, file_name: &str, content: Option<&str>) -> bool {
        if file_name != POM {
            return false;
        }
        content.is_some_and(|c| c.contains(PLUGIN_ARTIFACT_ID))
    }

    fn extract(&self, rel_path: &str, content: Option<&str>) -> Artifact {
        let mut payload = ArtifactPayload::new(rel_path);

        if let Some(content) = content {
            match Document::parse(content) {
                Ok(doc) => {
                    payload.project = parse_module_name(&doc);
                    payload.image = parse_target_image(&doc);
                }
                Err(err) => {
                    debug!(path = rel_path, error = %err, "pom.xml is not well-formed, using path only");
                }
            }
        }

        Artifact::new(BuilderKind::JibMaven, payload)
    }
}

/// A pom with a `<parent>` is a module; its own `artifactId` names it.
fn parse_module_name(doc: &Document) -> Option<String> {
    let root = doc.root_element();

    if !root.children().any(|c| c.has_tag_name("parent")) {
        return None;
    }

    root.children()
        .find(|c| c.has_tag_name("artifactId"))
        .and_then(|c| c.text())
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

fn parse_target_image(doc: &Document) -> Option<ImageReference> {
    let plugin = doc.descendants().find(|node| {
        node.has_tag_name("plugin")
            && child_text(*node, "artifactId").as_deref() == Some(PLUGIN_ARTIFACT_ID)
    })?;

    let to = plugin.descendants().find(|n| n.has_tag_name("to"))?;
    let raw = child_text(to, "image")?;

    ImageReference::strip_tag(&raw).ok()
}

fn child_text(node: Node, name: &str) -> Option<String> {
    node.children()
        .find(|c| c.has_tag_name(name))
        .and_then(|c| c.text())
        .map(|s| s.trim().to_string())
}
