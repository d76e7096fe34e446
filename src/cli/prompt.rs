//! Terminal prompts used by interactive `berth init` runs

use crate::builders::Artifact;
use crate::error::{InitError, Result};
use crate::image::ImageReference;
use crate::reconcile::Resolver;
use inquire::validator::Validation;
use inquire::{Confirm, CustomUserError, InquireError, Select, Text};
use std::fmt;
use std::path::Path;

const SKIP_LABEL: &str = "None (image not built from these sources)";

enum ImageOption {
    Image(ImageReference),
    Skip,
}

impl fmt::Display for ImageOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImageOption::Image(image) => write!(f, "{}", image),
            ImageOption::Skip => write!(f, "{}", SKIP_LABEL),
        }
    }
}

/// Empty input means "skip"; anything else has to be a bare image name.
fn validate_image_input(input: &str) -> std::result::Result<Validation, CustomUserError> {
    let input = input.trim();
    if input.is_empty() || ImageReference::parse(input).is_ok() {
        Ok(Validation::Valid)
    } else {
        Ok(Validation::Invalid(
            format!("'{}' is not a valid image name (no tag or digest)", input).into(),
        ))
    }
}

fn map_inquire_error(err: InquireError) -> InitError {
    match err {
        InquireError::OperationCanceled | InquireError::OperationInterrupted => InitError::Cancelled,
        other => InitError::PromptFailure(other.to_string()),
    }
}

/// Asks on the terminal
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalResolver;

impl Resolver for TerminalResolver {
    fn choose_image(
        &self,
        artifact: &Artifact,
        candidates: &[ImageReference],
    ) -> Result<Option<ImageReference>> {
        if candidates.is_empty() {
            let answer = Text::new(&format!(
                "Image name for {} ({}), leave empty to skip:",
                artifact.path(),
                artifact.kind
            ))
            .with_validator(validate_image_input)
            .prompt()
            .map_err(map_inquire_error)?;

            let answer = answer.trim();
            if answer.is_empty() {
                return Ok(None);
            }
            return ImageReference::parse(answer).map(Some);
        }

        let mut options: Vec<ImageOption> = candidates
            .iter()
            .cloned()
            .map(ImageOption::Image)
            .collect();
        options.push(ImageOption::Skip);

        let selected = Select::new(
            &format!("Choose the image built by {} ({}):", artifact.path(), artifact.kind),
            options,
        )
        .prompt()
        .map_err(map_inquire_error)?;

        Ok(match selected {
            ImageOption::Image(image) => Some(image),
            ImageOption::Skip => None,
        })
    }

    fn confirm_write(&self, config_yaml: &str, path: &Path) -> Result<bool> {
        eprintln!("{}", config_yaml);

        Confirm::new(&format!(
            "Do you want to write this configuration to {}?",
            path.display()
        ))
        .with_default(true)
        .prompt()
        .map_err(map_inquire_error)
    }
}
