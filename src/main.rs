use pluma_harness::cli;
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    // Pick the interface language before any output is produced.
    pluma_harness::init();

    match cli::run().await {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
