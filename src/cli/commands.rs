use crate::config::RunConfig;
use crate::schema::DEFAULT_CONFIG_FILE;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Detects buildable artifacts in a project and generates a deployment configuration
#[derive(Parser, Debug)]
#[command(
    name = "berth",
    about = "Detects buildable artifacts in a project and generates a deployment configuration",
    version,
    author,
    long_about = "berth walks a project for Dockerfiles (and, optionally, Jib Maven and Gradle \
                  projects), matches each one with an image referenced by the project's \
                  Kubernetes manifests, and writes a berth.yaml describing how to build and \
                  deploy them."
)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(long, global = true, value_name = "LEVEL", help = "Set logging level")]
    pub log_level: Option<String>,

    #[arg(short = 'v', long, global = true, help = "Enable debug logging")]
    pub verbose: bool,

    #[arg(
        short = 'q',
        long,
        global = true,
        conflicts_with = "verbose",
        help = "Quiet mode - suppress non-error output"
    )]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    #[command(
        about = "Generate a deployment configuration for a project",
        long_about = "Scans the project for build artifacts and Kubernetes manifests and writes \
                      a deployment configuration.\n\n\
                      Examples:\n  \
                      berth init\n  \
                      berth init --analyze\n  \
                      berth init --force\n  \
                      berth init -a leeroy-app/Dockerfile=gcr.io/k8s-skaffold/leeroy-app"
    )]
    Init(InitArgs),
}

#[derive(Parser, Debug, Clone)]
pub struct InitArgs {
    #[arg(
        long,
        value_name = "DIR",
        default_value = ".",
        help = "Project directory to scan"
    )]
    pub root: PathBuf,

    #[arg(
        long,
        help = "Print all discovered Dockerfiles and images in JSON instead of writing a configuration"
    )]
    pub analyze: bool,

    #[arg(long, help = "Don't ask questions; fail when a choice would be required")]
    pub force: bool,

    #[arg(long, help = "Overwrite an existing configuration file")]
    pub overwrite: bool,

    #[arg(
        long = "enable-jib-init",
        help = "Detect Jib Maven and Gradle projects (changes the --analyze output format)"
    )]
    pub enable_jib_init: bool,

    #[arg(
        short = 'a',
        long = "artifact",
        value_name = "MAPPING",
        help = "'<path>=<image>' or a JSON builder/image pair; may be repeated"
    )]
    pub artifacts: Vec<String>,

    #[arg(
        short = 'f',
        long,
        value_name = "FILE",
        default_value = DEFAULT_CONFIG_FILE,
        help = "Path of the configuration file to write"
    )]
    pub filename: PathBuf,
}

impl From<&InitArgs> for RunConfig {
    fn from(args: &InitArgs) -> Self {
        RunConfig {
            analyze: args.analyze,
            force: args.force,
            overwrite: args.overwrite,
            enable_extended_builder_detection: args.enable_jib_init,
            cli_artifacts: args.artifacts.clone(),
            output_path: args.filename.clone(),
            root: args.root.clone(),
        }
    }
}
