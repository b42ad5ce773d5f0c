use actas_core::logging;

mod cli;

use crate::cli::CliCommand;

#[tokio::main]
async fn main() {
    // File-backed logging when possible; stderr otherwise.
    logging::init();

    if let Err(err) = CliCommand::run_from_args().await {
        eprintln!("actas error: {:#}", err);
        std::process::exit(1);
    }
}
