use clap::Parser;
use std::error::Error;
use std::process::ExitCode;
use subnet_summary::cli::{run, Cli};
use subnet_summary::config::init_logging;
use subnet_summary::output::print_error;

fn main() -> ExitCode {
    // Do as little as possible in main.rs as it can't contain any tests
    dotenv::dotenv().ok();
    if let Err(e) = init_logging() {
        eprintln!("Error initializing log4rs: {e}");
    }
    log::info!("#Start main()");

    let cli = Cli::parse();
    let result: Result<(), Box<dyn Error>> = run(&cli);
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            print_error(e.as_ref());
            ExitCode::FAILURE
        }
    }
}
