//! CLI entrypoint for chat-gateway
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, anyhow};
use chat_gateway_application::HandleChatUseCase;
use chat_gateway_infrastructure::{BedrockChatGateway, ConfigLoader};
use chat_gateway_presentation::{Cli, router, serve};
use clap::Parser;
use std::sync::Arc;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    // Dropping the guard flushes the file writer.
    let _log_guard = init_tracing(&cli);

    if cli.show_config {
        println!("Configuration sources (in priority order):");
        for source in ConfigLoader::config_sources(cli.config.as_deref()) {
            println!("  {source}");
        }
    }

    let loaded = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_deref())
    };
    let mut config = loaded.map_err(|e| anyhow!("failed to load configuration: {e}"))?;

    if let Some(bind) = cli.bind {
        config.server.bind = bind;
    }

    if cli.show_config {
        println!();
        println!("Effective configuration:");
        println!("{config:#?}");
        return Ok(());
    }

    config.validate().context("invalid configuration")?;
    let addr = config.bind_address()?;

    info!("Starting chat-gateway");

    // === Dependency Injection ===
    let gateway = Arc::new(BedrockChatGateway::new(&config.to_bedrock_config()).await);
    let use_case = HandleChatUseCase::new(gateway, config.to_retry_policy());

    serve(router(use_case), addr)
        .await
        .with_context(|| format!("HTTP server on {addr} failed"))
}

/// Install the global subscriber: stderr always, plus a daily-rotated file
/// when `--log-dir` is given. `RUST_LOG` overrides the `-v` level.
fn init_tracing(cli: &Cli) -> Option<WorkerGuard> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cli.log_filter()));

    let (file_layer, guard) = match &cli.log_dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, "chat-gateway.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer().with_ansi(false).with_writer(writer);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(file_layer)
        .init();

    guard
}
