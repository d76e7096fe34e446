// Parsers for deployment manifests found alongside the sources.
//
// Kubernetes manifests are where a project already names the images it
// deploys; the reconciler matches detected artifacts against those names.

pub mod kubernetes;

pub use kubernetes::{is_deployment_config, is_yaml_file, parse_manifest, KubernetesManifest};
