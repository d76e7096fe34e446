//! Deployment config synthesis and persistence

use crate::builders::BuilderKind;
use crate::error::{InitError, Result};
use crate::reconcile::ArtifactImagePair;
use crate::schema::{BuildArtifact, DeploymentConfig, JibArtifact, JibType, KubectlDeploy};
use std::collections::HashSet;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, OnceLock};
use tempfile::NamedTempFile;
use tracing::{debug, info};

/// Builds the configuration for reconciled pairs, one build artifact per pair.
pub fn generate_config(
    name: &str,
    pairs: &[ArtifactImagePair],
    manifests: &[String],
) -> Result<DeploymentConfig> {
    if pairs.is_empty() {
        return Err(InitError::NoArtifactsDetected);
    }

    let mut config = DeploymentConfig::new(name);

    for pair in pairs {
        let artifact = &pair.artifact;

        // Docker artifacts are always named `Dockerfile`, the schema default,
        // so they carry no `docker` block
        let build_type = match artifact.kind {
            BuilderKind::Docker => None,
            BuilderKind::JibMaven => Some(JibType::Maven),
            BuilderKind::JibGradle => Some(JibType::Gradle),
        };

        let entry = BuildArtifact {
            image: pair.image.clone(),
            context: artifact.context(),
            docker: None,
            jib: build_type.map(|build_type| JibArtifact {
                build_type: Some(build_type),
                project: artifact.payload.project.clone(),
            }),
        };

        config.build.artifacts.push(entry);
    }

    config.deploy.kubectl = Some(KubectlDeploy {
        manifests: manifests.to_vec(),
    });

    Ok(config)
}

fn writes_in_flight() -> &'static Mutex<HashSet<PathBuf>> {
    static IN_FLIGHT: OnceLock<Mutex<HashSet<PathBuf>>> = OnceLock::new();
    IN_FLIGHT.get_or_init(|| Mutex::new(HashSet::new()))
}

/// Holds the in-process claim on an output path until dropped
struct WriteGuard {
    path: PathBuf,
}

impl WriteGuard {
    fn acquire(path: &Path) -> Result<Self> {
        let mut in_flight = writes_in_flight()
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        if !in_flight.insert(path.to_path_buf()) {
            return Err(InitError::write_failure(
                path,
                io::Error::new(
                    io::ErrorKind::WouldBlock,
                    "another write to this path is in progress",
                ),
            ));
        }

        Ok(Self {
            path: path.to_path_buf(),
        })
    }
}

impl Drop for WriteGuard {
    fn drop(&mut self) {
        let mut in_flight = writes_in_flight()
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        in_flight.remove(&self.path);
    }
}

/// Writes `yaml` to `path` atomically.
///
/// The content goes to a temporary file next to `path` which is then renamed
/// over it, so a failed write never leaves a partial file behind.
pub fn write_config(path: &Path, yaml: &str, overwrite: bool) -> Result<()> {
    let _guard = WriteGuard::acquire(path)?;

    match fs::metadata(path) {
        Ok(meta) if meta.is_dir() => {
            return Err(InitError::write_failure(
                path,
                io::Error::new(io::ErrorKind::Other, "path is a directory"),
            ));
        }
        Ok(_) if !overwrite => return Err(InitError::OutputAlreadyExists(path.to_path_buf())),
        _ => {}
    }

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(dir).map_err(|e| InitError::write_failure(path, e))?;
    tmp.write_all(yaml.as_bytes())
        .and_then(|_| tmp.as_file().sync_all())
        .map_err(|e| InitError::write_failure(path, e))?;

    debug!(tmp = %tmp.path().display(), target = %path.display(), "Persisting configuration");

    tmp.persist(path)
        .map_err(|e| InitError::write_failure(path, e.error))?;

    info!(path = %path.display(), "Configuration written");
    Ok(())
}
