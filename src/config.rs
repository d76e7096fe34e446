//! Run configuration for `berth init`
//!
//! A [`RunConfig`] is built once by the caller (usually from CLI arguments)
//! and read by every stage of the run. Nothing in the engine mutates it.
//!
//! # Environment Variables
//!
//! - `BERTH_LOG_LEVEL`: Logging level - default: "info"
//! - `BERTH_LOG_JSON`: Emit JSON logs (true|false) - default: "false"
//!
//! # Example
//!
//! ```no_run
//! use berth::RunConfig;
//!
//! let config = RunConfig::default()
//!     .with_root("services")
//!     .with_force(true)
//!     .with_artifact("web/Dockerfile=gcr.io/acme/web");
//! config.validate().expect("Invalid configuration");
//! ```

use crate::error::{InitError, Result};
use crate::schema::DEFAULT_CONFIG_FILE;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    /// Print an analysis report instead of writing a configuration
    pub analyze: bool,

    /// Never prompt; fail when a choice would be required
    pub force: bool,

    /// Replace an existing output file
    pub overwrite: bool,

    /// Detect Jib Maven/Gradle projects and emit the current report shape
    pub enable_extended_builder_detection: bool,

    /// Explicit artifact→image mappings, `path=image` or structured JSON
    pub cli_artifacts: Vec<String>,

    /// Where the generated configuration is written; relative paths resolve against `root`
    pub output_path: PathBuf,

    /// Project directory to scan
    pub root: PathBuf,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            analyze: false,
            force: false,
            overwrite: false,
            enable_extended_builder_detection: false,
            cli_artifacts: Vec::new(),
            output_path: PathBuf::from(DEFAULT_CONFIG_FILE),
            root: PathBuf::from("."),
        }
    }
}

impl RunConfig {
    pub fn with_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.root = root.into();
        self
    }

    pub fn with_output_path(mut self, output_path: impl Into<PathBuf>) -> Self {
        self.output_path = output_path.into();
        self
    }

    pub fn with_analyze(mut self, analyze: bool) -> Self {
        self.analyze = analyze;
        self
    }

    pub fn with_force(mut self, force: bool) -> Self {
        self.force = force;
        self
    }

    pub fn with_overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    pub fn with_extended_detection(mut self, enabled: bool) -> Self {
        self.enable_extended_builder_detection = enabled;
        self
    }

    pub fn with_artifact(mut self, mapping: impl Into<String>) -> Self {
        self.cli_artifacts.push(mapping.into());
        self
    }

    /// Output path as written to disk
    pub fn resolved_output_path(&self) -> PathBuf {
        if self.output_path.is_absolute() {
            self.output_path.clone()
        } else {
            self.root.join(&self.output_path)
        }
    }

    /// Checks that generate mode has somewhere to write
    pub fn validate(&self) -> Result<()> {
        if !self.analyze && self.output_path.as_os_str().is_empty() {
            return Err(InitError::InvalidConfig(
                "an output path is required to generate a configuration".to_string(),
            ));
        }
        Ok(())
    }
}
