use anyhow::{Context, Result};
use clap::Parser;
use sentiment_dashboard::{config::Args, server, AppState, DashboardContext};
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let args = Args::parse();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(args.log_directive().parse()?)
                .add_directive("tower_http=info".parse()?),
        )
        .init();

    info!("Starting Sentiment Dashboard");
    info!("Sentiment file: {}", args.sentiment_path.display());
    info!("Trades file: {}", args.trades_path.display());

    let context = DashboardContext::load(&args.sentiment_path, &args.trades_path)
        .context("Failed to load dashboard data")?;
    info!(
        "Dashboard ready: {} merged trades, {} coins, {} sides",
        context.table.len(),
        context.layout.coin_dropdown.options.len(),
        context.layout.side_dropdown.options.len()
    );

    let state = Arc::new(AppState::new(context));
    let app = server::router(state, &args.frontend_dir);

    let addr = args.socket_addr();
    info!("Server running at http://{}", addr);
    info!("Open http://localhost:{} in your browser", args.port);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(listener, app)
        .with_graceful_shutdown(server::shutdown_signal())
        .await?;

    Ok(())
}
