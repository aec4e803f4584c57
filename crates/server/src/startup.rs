use std::net::SocketAddr;

use axum::Router;
use common::utils::logging::init_logging_from_env;
use configs::AppConfig;
use dotenvy::dotenv;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::routes;
use crate::state::ServerState;
use service::{issues::IssueSnapshots, repos::RepoStore, runtime};

/// Any origin may call the API.
pub fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Wire the stores for the configured data directory into handler state.
pub fn build_state(cfg: &AppConfig) -> ServerState {
    let storage = &cfg.storage;
    let repos = RepoStore::new(storage.repos_path());
    let issues = IssueSnapshots::new(
        storage.data_dir.clone(),
        storage.issues_prefix.clone(),
        storage.issues_suffix.clone(),
    );
    ServerState::new(repos, issues)
}

fn load_bind_addr(cfg: &AppConfig) -> anyhow::Result<SocketAddr> {
    Ok(cfg.server.bind_addr().parse()?)
}

/// Serve `app` on an already bound listener until Ctrl+C.
pub async fn serve(listener: TcpListener, app: Router) -> anyhow::Result<()> {
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("shutdown signal received, draining connections");
        })
        .await?;
    Ok(())
}

/// Public entry: build the app and run the HTTP server
pub async fn run() -> anyhow::Result<()> {
    dotenv().ok();
    init_logging_from_env();

    let cfg = AppConfig::load_or_env()?;
    runtime::ensure_env(&cfg.storage.data_dir, &cfg.storage.repos_path()).await?;

    let state = build_state(&cfg);
    let app = routes::build_router(state, build_cors());

    let addr = load_bind_addr(&cfg)?;
    info!(%addr, data_dir = %cfg.storage.data_dir.display(), "starting server");
    let listener = TcpListener::bind(addr).await?;
    serve(listener, app).await
}
