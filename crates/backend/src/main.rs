pub mod api;
pub mod dashboards;
pub mod routes;
pub mod shared;
pub mod system;

use std::sync::Arc;
use tokio::net::TcpListener;

use crate::dashboards::d100_city_sales::service::SalesService;
use crate::shared::config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Config is read before tracing exists, so its own log lines are not recorded
    let config = config::load_config()?;

    system::tracing::initialize(&config::get_log_dir(&config))?;

    let service = Arc::new(SalesService::new(config::get_dataset_path(&config)));
    tracing::info!("Dataset: {}", service.dataset_path().display());
    if !service.dataset_path().exists() {
        tracing::warn!(
            "Dataset file does not exist yet; data endpoints will fail until it is created"
        );
    }

    let app = routes::configure_routes(service);

    let addr = config.server.socket_addr()?;

    tracing::info!("Attempting to bind server to http://{}", addr);
    let listener = match TcpListener::bind(addr).await {
        Ok(listener) => {
            tracing::info!("Server successfully bound to {}", addr);
            listener
        }
        Err(e) => {
            if e.kind() == std::io::ErrorKind::AddrInUse {
                tracing::error!(
                    "Error: Port {} is already in use. Please ensure no other process is using this port.",
                    addr.port()
                );
            } else {
                tracing::error!("Failed to bind to {}. Error: {}", addr, e);
            }
            return Err(e.into());
        }
    };

    axum::serve(listener, app).await?;

    Ok(())
}
