use super::ScanResult;
use crate::builders::BuilderRegistry;
use crate::cancel::CancellationToken;
use crate::error::{InitError, Result};
use crate::manifests::{is_deployment_config, is_yaml_file, parse_manifest};
use ignore::{overrides::OverrideBuilder, WalkBuilder};
use std::fs;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Dependency and build-output directories never searched for artifacts
pub const EXCLUDED_DIRS: &[&str] = &["node_modules", "vendor", "target"];

pub struct ProjectScanner {
    root: PathBuf,
    registry: Arc<BuilderRegistry>,
    excluded_files: Vec<PathBuf>,
    cancel: CancellationToken,
}

impl ProjectScanner {
    pub fn new(root: &Path, registry: Arc<BuilderRegistry>) -> Result<Self> {
        let walk_failure = |reason: String| InitError::FilesystemWalkFailure {
            path: root.to_path_buf(),
            reason,
        };

        if !root.exists() {
            return Err(walk_failure("path does not exist".to_string()));
        }
        if !root.is_dir() {
            return Err(walk_failure("path is not a directory".to_string()));
        }
        fs::read_dir(root).map_err(|e| walk_failure(e.to_string()))?;

        let root = root
            .canonicalize()
            .map_err(|e| walk_failure(format!("failed to canonicalize: {}", e)))?;

        debug!(root = %root.display(), "ProjectScanner initialized");

        Ok(Self {
            root,
            registry,
            excluded_files: Vec::new(),
            cancel: CancellationToken::new(),
        })
    }

    /// Skip a file (typically the configuration being generated) during the walk
    pub fn with_excluded_file(mut self, path: &Path) -> Self {
        let path = if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        };
        let path = path.canonicalize().unwrap_or(path);
        self.excluded_files.push(path);
        self
    }

    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn scan(&self) -> Result<ScanResult> {
        let start = Instant::now();

        info!(root = %self.root.display(), "Scanning project");

        let mut result = ScanResult::default();

        let mut override_builder = OverrideBuilder::new(&self.root);
        for excluded in EXCLUDED_DIRS {
            override_builder
                .add(&format!("!{}/", excluded))
                .map_err(|e| self.walk_failure(e.to_string()))?;
        }
        let overrides = override_builder
            .build()
            .map_err(|e| self.walk_failure(e.to_string()))?;

        let walker = WalkBuilder::new(&self.root)
            .hidden(true)
            .parents(false)
            .ignore(false)
            .git_ignore(false)
            .git_global(false)
            .git_exclude(false)
            .follow_links(false)
            .overrides(overrides)
            .sort_by_file_name(|a, b| a.cmp(b))
            .build();

        for entry in walker {
            self.cancel.check()?;

            let entry = match entry {
                Ok(e) => e,
                Err(err) => {
                    warn!(error = %err, "Failed to read directory entry, skipping");
                    result.skipped += 1;
                    continue;
                }
            };

            let path = entry.path();
            let Some(file_type) = entry.file_type() else {
                continue;
            };

            // links are not followed by the walk; a link to a file still counts
            if file_type.is_symlink() {
                match fs::metadata(path) {
                    Ok(meta) if meta.is_file() => {}
                    Ok(_) => continue,
                    Err(err) => {
                        warn!(path = %path.display(), error = %err, "Dangling symlink, skipping");
                        result.skipped += 1;
                        continue;
                    }
                }
            } else if !file_type.is_file() {
                continue;
            }

            if self.is_excluded(path) {
                debug!(path = %path.display(), "Skipping excluded file");
                continue;
            }

            let Some(file_name) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };

            result.files_scanned += 1;

            let is_yaml = is_yaml_file(file_name);
            if !is_yaml && !self.registry.is_manifest(file_name) {
                continue;
            }

            let content = match fs::read(path) {
                Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
                Err(err) => {
                    warn!(path = %path.display(), error = %err, "Failed to read file, skipping");
                    result.skipped += 1;
                    continue;
                }
            };

            let rel_path = self.relative_path(path);

            if is_yaml {
                if is_deployment_config(&content) {
                    debug!(path = %rel_path, "Skipping existing deployment config");
                } else if let Some(manifest) = parse_manifest(&rel_path, &content) {
                    debug!(path = %rel_path, images = manifest.images.len(), "Found Kubernetes manifest");
                    result.manifests.push(rel_path);
                    result.add_images(manifest.images);
                }
                continue;
            }

            if let Some(artifact) = self.registry.detect(&rel_path, file_name, Some(&content)) {
                debug!(path = %rel_path, builder = %artifact.kind, "Detected artifact");
                result.artifacts.push(artifact);
            }
        }

        result.scan_time_ms = start.elapsed().as_millis() as u64;

        info!(
            artifacts = result.artifacts.len(),
            manifests = result.manifests.len(),
            images = result.images.len(),
            files_scanned = result.files_scanned,
            skipped = result.skipped,
            scan_time_ms = result.scan_time_ms,
            "Project scan completed"
        );

        Ok(result)
    }

    fn is_excluded(&self, path: &Path) -> bool {
        self.excluded_files.iter().any(|excluded| excluded == path)
    }

    /// Root-relative, `/`-separated path
    fn relative_path(&self, path: &Path) -> String {
        path.strip_prefix(&self.root)
            .unwrap_or(path)
            .components()
            .filter_map(|c| match c {
                Component::Normal(part) => Some(part.to_string_lossy()),
                _ => None,
            })
            .collect::<Vec<_>>()
            .join("/")
    }

    fn walk_failure(&self, reason: String) -> InitError {
        InitError::FilesystemWalkFailure {
            path: self.root.clone(),
            reason,
        }
    }
}
