//! `berth init`: scan a project, then report or generate a configuration
//!
//! A run is a single pass:
//!
//! 1. parse explicit artifact mappings (before touching the filesystem)
//! 2. walk the project for artifacts, manifests and images
//! 3. analyze mode: print the report and stop
//! 4. generate mode: reconcile, synthesize, confirm, write

use crate::builders::BuilderRegistry;
use crate::cancel::CancellationToken;
use crate::config::RunConfig;
use crate::error::Result;
use crate::reconcile::{CliMapping, NonInteractiveResolver, Reconciler, Resolver};
use crate::report::AnalysisReport;
use crate::scan::ProjectScanner;
use crate::synth::{generate_config, write_config};
use std::io::Write;
use std::sync::Arc;
use tracing::info;

/// Outcome of a successful run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InitOutcome {
    Analyzed,
    Written { path: std::path::PathBuf },
    /// The resolver declined to write the generated configuration
    Declined,
}

pub struct Initializer<'a> {
    config: &'a RunConfig,
    resolver: &'a dyn Resolver,
    cancel: CancellationToken,
}

impl<'a> Initializer<'a> {
    pub fn new(config: &'a RunConfig) -> Self {
        Self {
            config,
            resolver: &NonInteractiveResolver,
            cancel: CancellationToken::new(),
        }
    }

    pub fn with_resolver(mut self, resolver: &'a dyn Resolver) -> Self {
        self.resolver = resolver;
        self
    }

    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    pub fn run(&self, out: &mut dyn Write) -> Result<InitOutcome> {
        let config = self.config;
        config.validate()?;

        let mappings = CliMapping::parse_all(&config.cli_artifacts)?;

        let registry = Arc::new(BuilderRegistry::for_detection(
            config.enable_extended_builder_detection,
        ));
        let output_path = config.resolved_output_path();

        let mut scanner = ProjectScanner::new(&config.root, registry)?
            .with_cancellation(self.cancel.clone());
        if !config.analyze {
            scanner = scanner.with_excluded_file(&output_path);
        }
        let scan = scanner.scan()?;

        if config.analyze {
            AnalysisReport::build(
                &scan.artifacts,
                &scan.images,
                config.enable_extended_builder_detection,
            )
            .write_to(out)?;
            return Ok(InitOutcome::Analyzed);
        }

        let pairs = Reconciler::new(config.force, self.resolver)
            .with_cancellation(self.cancel.clone())
            .reconcile(&scan.artifacts, &scan.images, &mappings)?;

        let name = scanner
            .root()
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        let deployment = generate_config(&name, &pairs, &scan.manifests)?;
        let yaml = deployment.to_yaml()?;

        if !config.force && !self.resolver.confirm_write(&yaml, &output_path)? {
            info!("No configuration written");
            return Ok(InitOutcome::Declined);
        }

        self.cancel.check()?;
        write_config(&output_path, &yaml, config.overwrite)?;

        info!(path = %output_path.display(), "Configuration was written");
        Ok(InitOutcome::Written { path: output_path })
    }
}

/// Runs init without prompts; choices that need a human are skipped.
pub fn do_init(out: &mut dyn Write, config: &RunConfig) -> Result<InitOutcome> {
    Initializer::new(config).run(out)
}
