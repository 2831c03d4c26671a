use anyhow::Result;
use axum::Router;
use doc2md::{config, routes, services};
use std::{fs, io::ErrorKind, path::Path, sync::Arc};
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // --- Logging setup ---
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // --- Parse config ---
    let cfg = config::AppConfig::from_env_and_args()?;

    tracing::info!("Starting doc2md with config: {:?}", cfg);

    // --- Ensure temp directory exists ---
    if !Path::new(&cfg.temp_dir).exists() {
        fs::create_dir_all(&cfg.temp_dir)?;
        tracing::info!("Created temp directory at {}", cfg.temp_dir);
    }

    // --- Initialize core service ---
    let cfg = Arc::new(cfg);
    let service = services::convert_service::ConvertService::new(cfg.clone());

    // --- Build router ---
    let app: Router = routes::routes::routes(&cfg).with_state(service);

    // --- Start server ---
    let addr = cfg.addr();
    let listener = match TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(err)
            if err.kind() == ErrorKind::PermissionDenied
                && matches!(cfg.host.as_str(), "0.0.0.0" | "::") =>
        {
            let fallback_addr = format!("127.0.0.1:{}", cfg.port);
            tracing::warn!(
                "Permission denied binding to {} ({}). Falling back to {}",
                addr,
                err,
                fallback_addr
            );
            TcpListener::bind(&fallback_addr).await?
        }
        Err(err) => return Err(err.into()),
    };

    tracing::info!("Server listening on http://{}", listener.local_addr()?);
    axum::serve(listener, app).await?;

    Ok(())
}
