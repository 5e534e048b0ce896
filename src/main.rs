//! placereview - headless-browser review crawler
//!
//! Main entry point. Logs go to stderr (and optionally a rotating file);
//! stdout carries only the completion payload.

mod cli;
mod invoke;

use std::process::ExitCode;

use clap::Parser;
use placereview_config::LoggingConfig;
use tracing::error;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::cli::{Cli, Commands};
use crate::invoke::{Completion, InvokeEvent};

/// Initialize tracing with console and optional file output.
fn init_tracing(logging: &LoggingConfig) -> Result<(), Box<dyn std::error::Error>> {
    let file_layer = match &logging.dir {
        Some(dir) => {
            std::fs::create_dir_all(dir)?;
            let file_appender = RollingFileAppender::builder()
                .rotation(Rotation::DAILY)
                .filename_prefix("placereview")
                .filename_suffix("log")
                .max_log_files(30)
                .build(dir)?;
            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

            // Flushes buffered lines on exit.
            static GUARD: std::sync::OnceLock<tracing_appender::non_blocking::WorkerGuard> =
                std::sync::OnceLock::new();
            let _ = GUARD.set(guard);

            Some(fmt::layer().with_writer(non_blocking).with_ansi(false))
        }
        None => None,
    };

    let (json_console, text_console) = if logging.json {
        (Some(fmt::layer().json().with_writer(std::io::stderr)), None)
    } else {
        (
            None,
            Some(fmt::layer().with_target(true).with_writer(std::io::stderr)),
        )
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(json_console)
        .with(text_console)
        .with(file_layer)
        .try_init()?;

    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = invoke::load_config(&cli.config);
    let logging = config
        .as_ref()
        .map(|c| c.logging.clone())
        .unwrap_or_default();
    if let Err(e) = init_tracing(&logging) {
        eprintln!("Failed to initialize logging: {}", e);
    }

    let event = match cli.command {
        Commands::Run { target } => Ok(InvokeEvent { target_id: target }),
        Commands::Invoke { event } => InvokeEvent::read(&event),
    };

    let completion = match (config, event) {
        (Ok(config), Ok(event)) => invoke::handle(&config, &event).await,
        (Err(e), _) | (_, Err(e)) => {
            error!("Invocation rejected ({}): {}", e.kind(), e);
            Completion::failure(&e)
        }
    };

    match completion.to_json() {
        Ok(payload) => println!("{}", payload),
        Err(e) => {
            eprintln!("Failed to render completion payload: {}", e);
            return ExitCode::FAILURE;
        }
    }

    if completion.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
