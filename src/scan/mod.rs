mod scanner;

pub use scanner::{ProjectScanner, EXCLUDED_DIRS};

use crate::builders::Artifact;
use crate::image::ImageReference;

/// Everything one walk of a project found, in discovery order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanResult {
    pub artifacts: Vec<Artifact>,
    /// Kubernetes manifests, relative to the project root
    pub manifests: Vec<String>,
    /// Images referenced by the manifests, tags stripped, without duplicates
    pub images: Vec<ImageReference>,
    pub files_scanned: usize,
    /// Entries that could not be read (dangling links, permission errors)
    pub skipped: usize,
    pub scan_time_ms: u64,
}

impl ScanResult {
    pub fn add_images(&mut self, images: impl IntoIterator<Item = ImageReference>) {
        for image in images {
            if !self.images.contains(&image) {
                self.images.push(image);
            }
        }
    }
}
