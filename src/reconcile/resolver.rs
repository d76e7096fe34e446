use crate::builders::Artifact;
use crate::error::Result;
use crate::image::ImageReference;
use std::path::Path;

/// Answers the questions a non-forced run has to ask.
///
/// Each question is asked at most once per artifact; the run blocks until it
/// returns.
pub trait Resolver {
    /// Pick the image built from `artifact`. `None` leaves the artifact out of
    /// the configuration.
    fn choose_image(
        &self,
        artifact: &Artifact,
        candidates: &[ImageReference],
    ) -> Result<Option<ImageReference>>;

    /// Confirm writing `config_yaml` to `path`
    fn confirm_write(&self, config_yaml: &str, path: &Path) -> Result<bool>;
}

/// Resolver for runs without a terminal: never picks an image, always writes.
#[derive(Debug, Clone, Copy, Default)]
pub struct NonInteractiveResolver;

impl Resolver for NonInteractiveResolver {
    fn choose_image(
        &self,
        _artifact: &Artifact,
        _candidates: &[ImageReference],
    ) -> Result<Option<ImageReference>> {
        Ok(None)
    }

    fn confirm_write(&self, _config_yaml: &str, _path: &Path) -> Result<bool> {
        Ok(true)
    }
}
