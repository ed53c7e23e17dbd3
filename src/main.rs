use anyhow::Context;
use clap::Parser;
use logview_core::{ProjectRegistry, Settings, SharedRegistry};
use logview_tail::TailConfig;
use logview_web::AppContext;
use std::path::PathBuf;
use tokio_util::sync::CancellationToken;

#[derive(Parser)]
#[command(name = "logview", about = "Live web viewer for server log files")]
struct Cli {
    /// Interface to bind. Overrides the settings file.
    #[arg(long)]
    host: Option<String>,

    /// Port to listen on. Overrides the settings file.
    #[arg(long)]
    port: Option<u16>,

    /// Project-to-logfile mapping: a JSON object of name to path.
    #[arg(long, default_value = "config.json")]
    config: PathBuf,

    /// Optional TOML settings file (bind address, poll pacing, tail window).
    #[arg(long)]
    settings: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_env("RUST_LOG")
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let settings = Settings::load(cli.settings.as_deref()).context("loading settings")?;
    let host = cli.host.unwrap_or_else(|| settings.server.host.clone());
    let port = cli.port.unwrap_or(settings.server.port);

    let registry = ProjectRegistry::load(&cli.config)
        .with_context(|| format!("loading project mapping from {}", cli.config.display()))?;
    tracing::info!(
        projects = registry.len(),
        mapping = %cli.config.display(),
        "project mapping loaded"
    );

    let tail = TailConfig {
        window_lines: settings.tail.window_lines,
        active_delay: settings.tail.active_delay(),
        idle_delay: settings.tail.idle_delay(),
    };

    let shutdown = CancellationToken::new();
    let app = logview_web::router(AppContext::new(
        SharedRegistry::new(registry),
        tail,
        shutdown.clone(),
    ));

    let listener = tokio::net::TcpListener::bind((host.as_str(), port))
        .await
        .with_context(|| format!("binding {host}:{port}"))?;
    tracing::info!(addr = %listener.local_addr()?, "logview listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            tokio::signal::ctrl_c()
                .await
                .expect("install ctrl-c signal handler");
            tracing::info!("shutdown signal received, ending stream sessions");
            shutdown.cancel();
        })
        .await
        .context("serving HTTP")?;

    Ok(())
}
