use std::net::SocketAddr;

use anyhow::Context;
use tokio::net::TcpListener;

use introeval::application::services::Scheduler;
use introeval::infrastructure::CollaboratorFactory;
use introeval::infrastructure::observability::{TracingConfig, init_tracing};
use introeval::presentation::{AppState, Environment, Settings, create_router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let environment = Environment::from_env().map_err(anyhow::Error::msg)?;
    let settings = Settings::load(environment).context("Failed to load settings")?;

    let json_logs = settings.logging.json || environment.is_production();
    init_tracing(&TracingConfig::new(environment.as_str(), json_logs));

    let collaborators =
        CollaboratorFactory::create(&settings).context("Failed to configure collaborators")?;
    let media_store =
        CollaboratorFactory::media_store(&settings).context("Failed to open media store")?;

    let scheduler = Scheduler::new(collaborators, settings.scheduler.clone());
    scheduler.start().await;

    let state = AppState {
        scheduler: scheduler.clone(),
        media_root: media_store.root().to_path_buf(),
        media_store,
    };
    let router = create_router(state);

    let addr: SocketAddr = format!("{}:{}", settings.server.host, settings.server.port)
        .parse()
        .context("Invalid server address")?;
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(%addr, environment = %environment, "Listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    scheduler.shutdown().await;
    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
