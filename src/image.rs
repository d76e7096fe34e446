//! Container image references

use crate::error::{InitError, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;

fn path_component_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^[a-z0-9]+(?:(?:[._]|__|-+)[a-z0-9]+)*$").expect("valid regex")
    })
}

fn domain_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"^(?:[a-zA-Z0-9](?:[a-zA-Z0-9-]*[a-zA-Z0-9])?)(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]*[a-zA-Z0-9])?)*(?::[0-9]+)?$",
        )
        .expect("valid regex")
    })
}

fn tag_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[\w][\w.-]{0,127}$").expect("valid regex"))
}

/// A repository-qualified image name without tag or digest,
/// e.g. `gcr.io/k8s-skaffold/leeroy-web`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ImageReference(String);

impl ImageReference {
    /// Parses a bare image name. Tags and digests are rejected; use
    /// [`ImageReference::strip_tag`] for references found in manifests.
    pub fn parse(raw: &str) -> Result<Self> {
        let name = raw.trim();
        if name.is_empty() || !is_valid_name(name) {
            return Err(InitError::InvalidImage(raw.to_string()));
        }
        Ok(Self(name.to_string()))
    }

    /// Parses a reference that may carry a `:tag` and/or `@digest` and keeps only the name.
    pub fn strip_tag(raw: &str) -> Result<Self> {
        let raw = raw.trim();
        let without_digest = match raw.split_once('@') {
            Some((name, _digest)) => name,
            None => raw,
        };

        let name = match without_digest.rfind(':') {
            Some(idx) if !without_digest[idx..].contains('/') => {
                let tag = &without_digest[idx + 1..];
                if !tag_re().is_match(tag) {
                    return Err(InitError::InvalidImage(raw.to_string()));
                }
                &without_digest[..idx]
            }
            _ => without_digest,
        };

        Self::parse(name).map_err(|_| InitError::InvalidImage(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Last path component, e.g. `leeroy-web` for `gcr.io/k8s-skaffold/leeroy-web`.
    pub fn short_name(&self) -> &str {
        self.0.rsplit('/').next().unwrap_or(&self.0)
    }
}

fn is_valid_name(name: &str) -> bool {
    let components: Vec<&str> = name.split('/').collect();
    let (first, rest) = match components.split_first() {
        Some(split) => split,
        None => return false,
    };

    let first_is_domain =
        !rest.is_empty() && (first.contains('.') || first.contains(':') || *first == "localhost");

    if first_is_domain {
        if !domain_re().is_match(first) {
            return false;
        }
    } else if !path_component_re().is_match(first) {
        return false;
    }

    rest.iter().all(|c| path_component_re().is_match(c))
}

impl fmt::Display for ImageReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for ImageReference {
    type Error = InitError;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl From<ImageReference> for String {
    fn from(image: ImageReference) -> Self {
        image.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_names() {
        for name in [
            "skaffold-example",
            "gcr.io/k8s-skaffold/leeroy-web",
            "localhost:5000/app",
            "docker.io/library/nginx",
            "my_org/my.app",
        ] {
            assert!(ImageReference::parse(name).is_ok(), "{} should parse", name);
        }
    }

    #[test]
    fn test_parse_rejects_invalid_names() {
        for name in ["", "  ", "UPPER/case", "gcr.io/app:v1", "a//b", "-leading"] {
            assert!(ImageReference::parse(name).is_err(), "{:?} should fail", name);
        }
    }

    #[test]
    fn test_strip_tag() {
        let image = ImageReference::strip_tag("gcr.io/k8s-skaffold/skaffold-example:v1.2").unwrap();
        assert_eq!(image.as_str(), "gcr.io/k8s-skaffold/skaffold-example");

        let image = ImageReference::strip_tag("localhost:5000/app").unwrap();
        assert_eq!(image.as_str(), "localhost:5000/app");

        let image = ImageReference::strip_tag(
            "nginx@sha256:0000000000000000000000000000000000000000000000000000000000000000",
        )
        .unwrap();
        assert_eq!(image.as_str(), "nginx");
    }

    #[test]
    fn test_short_name() {
        let image = ImageReference::parse("gcr.io/k8s-skaffold/leeroy-web").unwrap();
        assert_eq!(image.short_name(), "leeroy-web");
        let image = ImageReference::parse("nginx").unwrap();
        assert_eq!(image.short_name(), "nginx");
    }

    #[test]
    fn test_serde_as_string() {
        let image = ImageReference::parse("gcr.io/app").unwrap();
        assert_eq!(serde_json::to_string(&image).unwrap(), "\"gcr.io/app\"");
        let back: ImageReference = serde_json::from_str("\"gcr.io/app\"").unwrap();
        assert_eq!(back, image);
        assert!(serde_json::from_str::<ImageReference>("\"Bad Image\"").is_err());
    }
}
