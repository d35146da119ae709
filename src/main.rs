//! Roster - Local employee record manager

use std::process::ExitCode;

fn main() -> ExitCode {
    if let Err(e) = roster::cli::run() {
        eprintln!("Error: {:#}", e);
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
