use std::process::ExitCode;

fn main() -> ExitCode {
    match tfguard::cli::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => tfguard::cli::report(&err),
    }
}
