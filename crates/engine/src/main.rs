//! EasyNPC Engine - Main entry point.

use std::net::SocketAddr;
use std::sync::Arc;

use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use easynpc_engine::api::{self, websocket::WsState, ConnectionManager};
use easynpc_engine::app::{App, AppPorts};
use easynpc_engine::infrastructure::{
    clock::SystemClock, command_executor::LoggingCommandExecutor, config::EngineConfig,
    privileges::OperatorList, skin_source::InMemorySkinSource,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment from repo root (the engine may be started from `crates/engine`).
    load_dotenv_from_repo_root();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "easynpc_engine=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting EasyNPC Engine");

    let config = EngineConfig::from_env()?;

    let skin_source = match &config.skin_catalog {
        Some(path) => {
            let source = InMemorySkinSource::from_catalog_file(path)?;
            tracing::info!(path = %path.display(), skins = source.total(), "Skin catalog loaded");
            source
        }
        None => {
            tracing::info!("No skin catalog configured, skin sets start empty");
            InMemorySkinSource::new()
        }
    };

    if config.operators.is_empty() {
        tracing::warn!("No operators configured, privileged operations are unavailable");
    }

    let connections = Arc::new(ConnectionManager::new());
    let app = Arc::new(App::new(
        &config,
        AppPorts {
            clock: Arc::new(SystemClock),
            privileges: Arc::new(OperatorList::new(config.operators.iter().copied())),
            executor: Arc::new(LoggingCommandExecutor::new()),
            skin_source: Arc::new(skin_source),
            broadcast: connections.clone(),
        },
    ));

    let ws_state = Arc::new(WsState { app, connections });
    let router = api::routes(ws_state).layer(TraceLayer::new_for_http());

    let addr: SocketAddr = config.bind_address().parse()?;
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}

fn load_dotenv_from_repo_root() {
    let repo_root = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..");

    // Prefer local overrides.
    for filename in [".env.local", ".env"] {
        let path = repo_root.join(filename);
        if path.exists() {
            let _ = dotenvy::from_path(path);
        }
    }
}
