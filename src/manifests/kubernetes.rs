//! Kubernetes manifest parsing utilities

use crate::image::ImageReference;
use crate::schema::API_VERSION_PREFIX;
use serde::Deserialize;
use serde_yaml::Value;
use tracing::{debug, warn};

/// Images referenced by one Kubernetes manifest file, in document order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KubernetesManifest {
    pub images: Vec<ImageReference>,
}

pub fn is_yaml_file(file_name: &str) -> bool {
    file_name.ends_with(".yaml") || file_name.ends_with(".yml")
}

/// Parses a YAML file as a Kubernetes manifest.
///
/// Returns `None` when the content is not YAML, or when none of its documents
/// carries both `apiVersion` and `kind`. Deployment configs written by this
/// tool are never treated as manifests.
pub fn parse_manifest(path: &str, content: &str) -> Option<KubernetesManifest> {
    let mut is_manifest = false;
    let mut images = Vec::new();

    for document in serde_yaml::Deserializer::from_str(content) {
        let value = match Value::deserialize(document) {
            Ok(value) => value,
            Err(err) => {
                debug!(path, error = %err, "Not a YAML document, skipping");
                return None;
            }
        };

        let Some(api_version) = value.get("apiVersion").and_then(Value::as_str) else {
            continue;
        };
        if api_version.starts_with(API_VERSION_PREFIX) || value.get("kind").is_none() {
            continue;
        }

        is_manifest = true;
        collect_images(&value, path, &mut images);
    }

    is_manifest.then_some(KubernetesManifest { images })
}

/// Whether the YAML content is a deployment config written by this tool
pub fn is_deployment_config(content: &str) -> bool {
    serde_yaml::from_str::<Value>(content)
        .ok()
        .and_then(|v| v.get("apiVersion").and_then(Value::as_str).map(str::to_string))
        .is_some_and(|api| api.starts_with(API_VERSION_PREFIX))
}

fn collect_images(value: &Value, path: &str, images: &mut Vec<ImageReference>) {
    match value {
        Value::Mapping(map) => {
            for (key, child) in map {
                if key.as_str() == Some("image") {
                    if let Some(raw) = child.as_str() {
                        match ImageReference::strip_tag(raw) {
                            Ok(image) => {
                                if !images.contains(&image) {
                                    images.push(image);
                                }
                            }
                            Err(err) => warn!(path, image = raw, error = %err, "Ignoring image"),
                        }
                        continue;
                    }
                }
                collect_images(child, path, images);
            }
        }
        Value::Sequence(items) => {
            for item in items {
                collect_images(item, path, images);
            }
        }
        Value::Tagged(tagged) => collect_images(&tagged.value, path, images),
        _ => {}
    }
}
