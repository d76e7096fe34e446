//! berth - build artifact detection and deployment config generation
//!
//! berth walks a project tree, finds the things that can be built into
//! container images (Dockerfiles, and with extended detection Jib Maven and
//! Gradle projects), collects the images referenced by Kubernetes manifests,
//! pairs the two, and writes a `berth.yaml` deployment configuration.
//!
//! # Example
//!
//! ```no_run
//! use berth::{do_init, RunConfig};
//!
//! let config = RunConfig::default().with_root("./my-project").with_analyze(true);
//! do_init(&mut std::io::stdout(), &config)?;
//! # Ok::<(), berth::InitError>(())
//! ```
//!
//! # Project Structure
//!
//! - [`scan`]: project walk, collects artifacts, manifests and images
//! - [`builders`]: per-builder detection (Docker, Jib Maven, Jib Gradle)
//! - [`reconcile`]: pairs artifacts with images
//! - [`synth`]: renders and writes the deployment configuration
//! - [`report`]: `--analyze` JSON output

pub mod builders;
pub mod cancel;
pub mod cli;
pub mod config;
pub mod error;
pub mod image;
pub mod init;
pub mod manifests;
pub mod reconcile;
pub mod report;
pub mod scan;
pub mod schema;
pub mod synth;
pub mod util;

pub use builders::{Artifact, ArtifactPayload, BuilderKind, BuilderRegistry};
pub use cancel::CancellationToken;
pub use config::RunConfig;
pub use error::{InitError, Result};
pub use image::ImageReference;
pub use init::{do_init, InitOutcome, Initializer};
pub use reconcile::{CliMapping, Resolver};
pub use schema::DeploymentConfig;
pub use util::{init_default, init_from_env, init_logging, LoggingConfig};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
