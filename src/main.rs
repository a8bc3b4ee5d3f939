mod api;
mod cli;
mod copy;
mod error;
mod group;
mod paginate;
#[cfg(test)]
mod testing;
mod utils;
mod verify;

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use api::RdsApi;
use cli::Args;
use copy::copy_parameter_group;
use error::Result;

fn init_tracing(verbosity: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(verbosity));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(args: Args) -> Result<()> {
    let source_api = RdsApi::new(&args.source.region, args.source_endpoint.clone())?;
    let target_api = RdsApi::new(&args.target.region, args.target_endpoint.clone())?;

    let mut stdout = std::io::stdout();
    copy_parameter_group(&source_api, &target_api, &args.job(), &mut stdout).await?;
    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(&args.verbosity);

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {}", err);
            ExitCode::FAILURE
        }
    }
}
