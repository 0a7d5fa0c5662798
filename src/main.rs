// Entrypoint for the CLI application.
// - Keeps `main` small: parse flags, set up logging and hand over to `app::run`.
// - Any failure is printed as a single `Error: ...` line and exits with 1.

use std::io;
use std::process::ExitCode;

use clap::Parser;
use timetrak_hours::{
    app,
    config::Args,
    dates::SystemClock,
    logging,
    ui::TerminalCredentials,
};

fn main() -> ExitCode {
    let args = Args::parse();

    if let Err(e) = logging::enable_logging(args.verbose) {
        eprintln!("Error: {e:#}");
        return ExitCode::FAILURE;
    }

    let config = args.into_config();
    let stdout = io::stdout();
    match app::run(&config, &mut TerminalCredentials, &SystemClock, &mut stdout.lock()) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
