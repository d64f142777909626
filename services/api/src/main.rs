use lead_dork_api::run;
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("lead-dork: {err}");
            ExitCode::FAILURE
        }
    }
}
