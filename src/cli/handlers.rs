use crate::cli::commands::InitArgs;
use crate::cli::prompt::TerminalResolver;
use crate::config::RunConfig;
use crate::error::InitError;
use crate::init::{InitOutcome, Initializer};
use std::io::{self, Write};
use tracing::{debug, error, info};

/// Runs `berth init` and maps the outcome to a process exit code
pub fn handle_init(args: &InitArgs) -> i32 {
    info!("Starting project initialization");

    let config = RunConfig::from(args);
    debug!(?config, "Resolved run configuration");

    if let Err(e) = config.validate() {
        error!("Configuration error: {}", e);
        eprintln!("\nPlease check your command-line arguments.");
        return 1;
    }

    let terminal = TerminalResolver;
    let mut initializer = Initializer::new(&config);
    if !config.force && !config.analyze {
        initializer = initializer.with_resolver(&terminal);
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let result = initializer
        .run(&mut out)
        .and_then(|outcome| flush_output(&mut out).map(|_| outcome));

    match result {
        Ok(InitOutcome::Analyzed) => 0,
        Ok(InitOutcome::Written { path }) => {
            eprintln!("Configuration written to {}", path.display());
            0
        }
        Ok(InitOutcome::Declined) => {
            eprintln!("Configuration not written");
            0
        }
        Err(e) => {
            error!("Init failed: {}", e);
            if let Some(hint) = hint_for(&e) {
                eprintln!("\n{}", hint);
            }
            1
        }
    }
}

/// Stdout is buffered; a report that never reaches it is a failed run.
fn flush_output(out: &mut dyn Write) -> Result<(), InitError> {
    out.flush().map_err(|e| InitError::Serialization {
        what: "output",
        reason: e.to_string(),
    })
}

fn hint_for(err: &InitError) -> Option<&'static str> {
    match err {
        InitError::OutputAlreadyExists(_) => {
            Some("Pass --overwrite to replace the existing configuration.")
        }
        InitError::AmbiguousMatch { .. } => Some(
            "Run without --force to choose interactively, or map artifacts explicitly with --artifact.",
        ),
        InitError::NoArtifactsDetected => {
            Some("No artifact could be paired with an image. Try --analyze to see what was found.")
        }
        InitError::MalformedCliMapping { .. } => {
            Some("Mappings look like 'path/to/Dockerfile=image' or a JSON object with builder, payload and image.")
        }
        _ => None,
    }
}
