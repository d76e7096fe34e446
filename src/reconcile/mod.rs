//! Binding detected artifacts to the images they build
//!
//! Explicit mappings from the command line win outright. Without them each
//! artifact is matched against the images the project's manifests reference,
//! asking the [`Resolver`] when the match is not obvious.

pub mod mapping;
pub mod resolver;

pub use mapping::CliMapping;
pub use resolver::{NonInteractiveResolver, Resolver};

use crate::builders::Artifact;
use crate::cancel::CancellationToken;
use crate::error::{InitError, Result};
use crate::image::ImageReference;
use std::collections::{HashMap, HashSet};
use tracing::{debug, info};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactImagePair {
    pub artifact: Artifact,
    pub image: ImageReference,
}

pub struct Reconciler<'a> {
    force: bool,
    resolver: &'a dyn Resolver,
    cancel: CancellationToken,
}

impl<'a> Reconciler<'a> {
    pub fn new(force: bool, resolver: &'a dyn Resolver) -> Self {
        Self {
            force,
            resolver,
            cancel: CancellationToken::new(),
        }
    }

    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    /// Pairs follow the order of `artifacts`.
    pub fn reconcile(
        &self,
        artifacts: &[Artifact],
        images: &[ImageReference],
        mappings: &[CliMapping],
    ) -> Result<Vec<ArtifactImagePair>> {
        if mappings.is_empty() {
            self.resolve_automatic(artifacts, images)
        } else {
            resolve_explicit(artifacts, mappings)
        }
    }

    fn resolve_automatic(
        &self,
        artifacts: &[Artifact],
        images: &[ImageReference],
    ) -> Result<Vec<ArtifactImagePair>> {
        let mut remaining: Vec<ImageReference> = images.to_vec();
        let mut pairs = Vec::new();

        // images that strongly match an artifact are held back from the
        // weak candidates offered to the artifacts before it
        let reserved: Vec<Vec<ImageReference>> = artifacts
            .iter()
            .map(|artifact| strong_candidates(artifact, images))
            .collect();

        for (idx, artifact) in artifacts.iter().enumerate() {
            self.cancel.check()?;

            let strong = strong_candidates(artifact, &remaining);
            let choice = if strong.len() == 1 {
                debug!(path = artifact.path(), image = %strong[0], "Matched image automatically");
                strong.into_iter().next()
            } else {
                let candidates = if strong.is_empty() {
                    remaining
                        .iter()
                        .filter(|image| !reserved[idx + 1..].iter().any(|r| r.contains(image)))
                        .cloned()
                        .collect()
                } else {
                    strong
                };

                if self.force {
                    if candidates.len() != 1 {
                        return Err(InitError::AmbiguousMatch {
                            path: artifact.path().to_string(),
                        });
                    }
                    candidates.into_iter().next()
                } else {
                    self.resolver.choose_image(artifact, &candidates)?
                }
            };

            match choice {
                Some(image) => {
                    remaining.retain(|i| i != &image);
                    pairs.push(ArtifactImagePair {
                        artifact: artifact.clone(),
                        image,
                    });
                }
                None => info!(path = artifact.path(), "No image selected, skipping artifact"),
            }
        }

        Ok(pairs)
    }
}

/// Images that name this artifact unambiguously: the image a Jib manifest
/// declares, or images whose last path component is the artifact's directory.
fn strong_candidates(artifact: &Artifact, remaining: &[ImageReference]) -> Vec<ImageReference> {
    if let Some(declared) = artifact.declared_image() {
        if remaining.contains(declared) {
            return vec![declared.clone()];
        }
    }

    match artifact.context_dir_name() {
        Some(dir) => remaining
            .iter()
            .filter(|image| image.short_name() == dir)
            .cloned()
            .collect(),
        None => Vec::new(),
    }
}

/// Binds every mapping to the detected artifact at its path.
pub fn resolve_explicit(
    artifacts: &[Artifact],
    mappings: &[CliMapping],
) -> Result<Vec<ArtifactImagePair>> {
    let mut seen = HashSet::new();
    let mut by_path: HashMap<&str, &ImageReference> = HashMap::new();

    for mapping in mappings {
        if !seen.insert(mapping.path()) {
            return Err(InitError::DuplicateArtifactMapping {
                path: mapping.path().to_string(),
            });
        }

        let found = artifacts
            .iter()
            .any(|a| a.path() == mapping.path() && a.kind == mapping.kind());
        if !found {
            return Err(InitError::UnresolvedArtifact {
                path: mapping.path().to_string(),
            });
        }

        by_path.insert(mapping.path(), mapping.image());
    }

    Ok(artifacts
        .iter()
        .filter_map(|artifact| {
            by_path.get(artifact.path()).map(|image| ArtifactImagePair {
                artifact: artifact.clone(),
                image: (*image).clone(),
            })
        })
        .collect())
}
