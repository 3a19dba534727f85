//! tasklint - Validator for JSONL task indexes and markdown detail files

use std::process::ExitCode;

fn main() -> ExitCode {
    match tasklint::cli::run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
