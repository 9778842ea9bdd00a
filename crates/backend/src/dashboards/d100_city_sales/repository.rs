use std::path::{Path, PathBuf};

use super::error::AnalyticsError;
use crate::shared::data::orders_csv::{self, OrderRecord};

/// Read the orders table fresh from disk.
///
/// The CSV is parsed on the blocking pool so a large file does not stall
/// the async workers.
pub async fn load_orders(path: &Path) -> Result<Vec<OrderRecord>, AnalyticsError> {
    let path: PathBuf = path.to_path_buf();
    let started = std::time::Instant::now();

    let orders = tokio::task::spawn_blocking(move || orders_csv::load_orders(&path))
        .await
        .map_err(|e| AnalyticsError::ComputationFailure(format!("dataset load task failed: {e}")))??;

    tracing::debug!(
        "Dataset loaded: {} orders in {}ms",
        orders.len(),
        started.elapsed().as_millis()
    );
    Ok(orders)
}
