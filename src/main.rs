use std::process::ExitCode;

use clap::Parser;
use maxbid::cli::{self, Cli};

fn main() -> ExitCode {
    let cli = Cli::parse();

    match cli::run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            cli::report(&e);
            ExitCode::FAILURE
        }
    }
}
