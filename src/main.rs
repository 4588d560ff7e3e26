use std::process::ExitCode;

use tracing_subscriber::EnvFilter;

mod cli;
use cli::{CliMode, USAGE, parse_cli_mode_from_env, run};
use weekcal::storage::config::Config;

fn main() -> ExitCode {
    setup_logging();

    let options = match parse_cli_mode_from_env() {
        Ok(CliMode::Show(options)) => options,
        Ok(CliMode::Help) => {
            println!("{USAGE}");
            return ExitCode::SUCCESS;
        }
        Err(err) => {
            eprintln!("Error: {}", err);
            println!("{USAGE}");
            return ExitCode::FAILURE;
        }
    };

    match run(options) {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            tracing::error!("weekcal failed: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn setup_logging() {
    let log_dir = Config::config_dir();

    std::fs::create_dir_all(&log_dir).ok();

    let file_appender = tracing_appender::rolling::daily(log_dir, "weekcal.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_ansi(false)
        .with_target(false)
        .init();

    std::mem::forget(_guard);

    tracing::info!("weekcal started");
}
