//! digilib - A personal book tracker

use std::process::ExitCode;

fn main() -> ExitCode {
    if let Err(e) = digilib::cli::run() {
        eprintln!("Error: {:#}", e);
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
