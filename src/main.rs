use std::process::ExitCode;

fn main() -> ExitCode {
    env_logger::init();

    // Backing-store failures are fatal by design: report and exit non-zero.
    if let Err(err) = bank_ledger::app::run(std::env::args()) {
        eprintln!("fatal: {err}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
