//! Plain Dockerfile builder

use super::{Artifact, ArtifactPayload, Builder, BuilderKind};

pub const DOCKERFILE: &str = "Dockerfile";

pub struct DockerBuilder;

impl Builder for DockerBuilder {
    fn kind(&self) -> BuilderKind {
        BuilderKind::Docker
    }

    fn manifest_names(&self) -> &[&'static str] {
        &[DOCKERFILE]
    }

    fn detect(&self, file_name: &str, _content: Option<&str>) -> bool {
        file_name == DOCKERFILE
    }

    fn extract(&self, rel_path: &str, _content: Option<&str>) -> Artifact {
        Artifact::new(BuilderKind::Docker, ArtifactPayload::new(rel_path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_is_case_sensitive() {
        assert!(DockerBuilder.detect("Dockerfile", None));
        assert!(!DockerBuilder.detect("dockerfile", None));
        assert!(!DockerBuilder.detect("Dockerfile.dev", None));
        assert!(!DockerBuilder.detect("pom.xml", None));
    }

    #[test]
    fn test_extract() {
        let artifact = DockerBuilder.extract("leeroy-app/Dockerfile", Some("FROM golang"));
        assert_eq!(artifact.kind, BuilderKind::Docker);
        assert_eq!(artifact.path(), "leeroy-app/Dockerfile");
        assert!(artifact.payload.project.is_none());
        assert!(artifact.payload.image.is_none());
    }
}
