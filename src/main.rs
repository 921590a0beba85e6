//! sprintcap - sprint and capacity views from issue-tracker exports

use std::process::ExitCode;

fn main() -> ExitCode {
    if let Err(e) = sprintcap::cli::run() {
        eprintln!("Error: {:#}", e);
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
