//! Binary entrypoint for the `uuid-generator` CLI.

use std::process::ExitCode;

use uuid_generator::Error;

// The interrupt listener gets a worker of its own, so a generation loop
// stuck in a blocking write can still be hard-exited.
#[tokio::main(flavor = "multi_thread", worker_threads = 2)]
async fn main() -> ExitCode {
    // Load from .env; a missing file is fine.
    let _ = dotenvy::dotenv();
    uuid_generator::telemetry::init();

    match uuid_generator::run(std::env::args_os()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(Error::Usage(err)) => err.exit(),
        Err(err) if err.is_broken_pipe() => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error on run: {err}");
            ExitCode::FAILURE
        }
    }
}
