use berth::cli::commands::{CliArgs, Commands};
use berth::cli::handlers::handle_init;
use berth::util::{init_logging, LoggingConfig};
use berth::VERSION;

use clap::Parser;
use tracing::debug;

fn main() {
    let args = CliArgs::parse();
    init_logging(LoggingConfig::from_flags(
        args.log_level.as_deref(),
        args.verbose,
        args.quiet,
    ));

    debug!("berth v{} starting", VERSION);
    debug!("Arguments: {:?}", args);

    let exit_code = match &args.command {
        Commands::Init(init_args) => handle_init(init_args),
    };

    std::process::exit(exit_code);
}
