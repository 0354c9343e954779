use std::{env, net::SocketAddr, path::Path};

use axum::Router;
use common::utils::logging::init_logging_default;
use dotenvy::dotenv;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::routes;
use crate::session::ServerState;
use service::{logos, runtime};

fn init_logging() {
    init_logging_default();
}

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Load configuration. Defaults plus `SERVER_HOST`/`SERVER_PORT` env vars
/// apply only when no config file exists; a file that is present but
/// malformed or invalid aborts startup instead of being ignored.
fn load_config() -> anyhow::Result<configs::AppConfig> {
    let mut cfg = match configs::load_optional()? {
        Some(cfg) => cfg,
        None => {
            let mut cfg = configs::AppConfig::default();
            if let Ok(host) = env::var("SERVER_HOST") {
                cfg.server.host = host;
            }
            if let Some(port) = env::var("SERVER_PORT").ok().and_then(|p| p.parse::<u16>().ok()) {
                cfg.server.port = port;
            }
            cfg
        }
    };
    cfg.normalize_and_validate()?;
    Ok(cfg)
}

/// Public entry: build the app and run the HTTP server.
pub async fn run() -> anyhow::Result<()> {
    dotenv().ok();
    init_logging();

    let cfg = load_config()?;

    let data_dir = Path::new(&cfg.storage.data_path)
        .parent()
        .map(|p| p.display().to_string())
        .filter(|p| !p.is_empty())
        .unwrap_or_else(|| ".".to_string());
    runtime::ensure_env(&data_dir, &cfg.uploads.dir).await?;

    // Backend is resolved exactly once; an unknown key fails startup here.
    let store = logos::from_config(&cfg.storage).await?;

    let state = ServerState { store, uploads: cfg.uploads.clone() };
    let app: Router = routes::build_router(state, build_cors());

    let addr: SocketAddr = format!("{}:{}", cfg.server.host, cfg.server.port).parse()?;
    info!(%addr, backend = %cfg.storage.backend, "starting logo gallery server");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
