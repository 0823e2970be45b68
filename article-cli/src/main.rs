mod app;
mod args;

use std::process::ExitCode;

use article_core::{AppConfig, StoreError};
use tokio::runtime::Runtime;
use tracing::error;
use tracing_subscriber::EnvFilter;

use crate::app::App;
use crate::args::{parse_args, CliArgs, Command, USAGE};

fn main() -> ExitCode {
    init_tracing();

    let args = match parse_args(std::env::args_os().skip(1)) {
        Ok(args) => args,
        Err(msg) => {
            eprintln!("{msg}\n\n{USAGE}");
            return ExitCode::from(2);
        }
    };
    if args.command == Command::Help {
        println!("{USAGE}");
        return ExitCode::SUCCESS;
    }

    let runtime = match Runtime::new() {
        Ok(runtime) => runtime,
        Err(err) => {
            error!(error = %err, "failed to initialise Tokio runtime");
            return ExitCode::FAILURE;
        }
    };

    // single place where failures are reported; nothing is retried
    match runtime.block_on(run(args)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(error = %err, "article store command failed");
            ExitCode::FAILURE
        }
    }
}

async fn run(args: CliArgs) -> Result<(), StoreError> {
    let config = load_config(&args)?;
    let app = App::build(&args, &config).await?;
    app.run(&args.command).await
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn load_config(args: &CliArgs) -> Result<AppConfig, StoreError> {
    let mut config = match &args.config {
        Some(path) => AppConfig::load_from(path)?,
        None => AppConfig::load(),
    };
    if let Some(base_url) = &args.base_url {
        config.server.base_url = base_url.clone();
    }
    Ok(config)
}
