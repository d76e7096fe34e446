use super::{Artifact, Builder, BuilderKind, DockerBuilder, JibGradleBuilder, JibMavenBuilder};
use std::sync::Arc;

/// Ordered set of builders consulted for every file in a project.
///
/// Builders are tried in registration order and the first one that claims a
/// file wins, so a file never yields more than one artifact.
pub struct BuilderRegistry {
    builders: Vec<Arc<dyn Builder>>,
}

impl BuilderRegistry {
    pub fn new() -> Self {
        Self {
            builders: Vec::new(),
        }
    }

    /// Dockerfile detection only
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(DockerBuilder));
        registry
    }

    /// Dockerfile detection plus the Jib Maven and Gradle builders
    pub fn with_extended() -> Self {
        let mut registry = Self::with_defaults();
        registry.register(Arc::new(JibMavenBuilder));
        registry.register(Arc::new(JibGradleBuilder));
        registry
    }

    pub fn for_detection(enable_extended: bool) -> Self {
        if enable_extended {
            Self::with_extended()
        } else {
            Self::with_defaults()
        }
    }

    pub fn register(&mut self, builder: Arc<dyn Builder>) {
        self.builders.push(builder);
    }

    pub fn kinds(&self) -> Vec<BuilderKind> {
        self.builders.iter().map(|b| b.kind()).collect()
    }

    /// Whether any registered builder inspects files with this name
    pub fn is_manifest(&self, file_name: &str) -> bool {
        self.builders
            .iter()
            .any(|b| b.manifest_names().contains(&file_name))
    }

    pub fn detect(&self, rel_path: &str, file_name: &str, content: Option<&str>) -> Option<Artifact> {
        self.builders
            .iter()
            .find(|b| b.detect(file_name, content))
            .map(|b| b.extract(rel_path, content))
    }
}

impl Default for BuilderRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builders::ArtifactPayload;

    struct AnyPomBuilder;

    impl Builder for AnyPomBuilder {
        fn kind(&self) -> BuilderKind {
            BuilderKind::JibMaven
        }

        fn manifest_names(&self) -> &[&'static str] {
            &["pom.xml"]
        }

        fn detect(&self, file_name: &str, _content: Option<&str>) -> bool {
            file_name == "pom.xml"
        }

        fn extract(&self, rel_path: &str, _content: Option<&str>) -> Artifact {
            let mut payload = ArtifactPayload::new(rel_path);
            payload.project = Some("first".to_string());
            Artifact::new(BuilderKind::JibMaven, payload)
        }
    }

    #[test]
    fn test_default_registry_is_docker_only() {
        let registry = BuilderRegistry::with_defaults();
        assert_eq!(registry.kinds(), vec![BuilderKind::Docker]);
        assert!(registry.is_manifest("Dockerfile"));
        assert!(!registry.is_manifest("pom.xml"));
    }

    #[test]
    fn test_extended_registry_order() {
        let registry = BuilderRegistry::for_detection(true);
        assert_eq!(
            registry.kinds(),
            vec![BuilderKind::Docker, BuilderKind::JibMaven, BuilderKind::JibGradle]
        );
        assert!(registry.is_manifest("build.gradle.kts"));
    }

    #[test]
    fn test_first_builder_wins() {
        let mut registry = BuilderRegistry::new();
        registry.register(Arc::new(AnyPomBuilder));
        registry.register(Arc::new(JibMavenBuilder));

        let pom = "<project><build><plugins><plugin><artifactId>jib-maven-plugin</artifactId></plugin></plugins></build></project>";
        let artifact = registry.detect("pom.xml", "pom.xml", Some(pom)).unwrap();
        assert_eq!(artifact.payload.project.as_deref(), Some("first"));
    }

    #[test]
    fn test_detect_nothing() {
        let registry = BuilderRegistry::with_extended();
        assert!(registry.detect("README.md", "README.md", Some("# hi")).is_none());
    }
}
